//! Standard reporting windows: the Sunday-based week and the biweekly pay period.

use crate::models::period::Period;
use crate::utils::date::previous_or_same_sunday;
use chrono::{Duration, NaiveDate};

/// Fixed Sunday every pay period is counted from, so the cadence does not
/// depend on the device or on when the app was installed.
pub fn pay_period_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 4).unwrap_or(NaiveDate::MIN)
}

/// Sunday through Saturday of the week containing `today`.
pub fn week_range(today: NaiveDate) -> Period {
    let start = previous_or_same_sunday(today);
    Period::new(start, start + Duration::days(6))
}

/// The 14-day pay period containing `today`.
///
/// Whole weeks between the anchor and this week's Sunday decide the start:
/// an even count starts the period this Sunday, an odd one the Sunday before.
pub fn biweekly_range(today: NaiveDate) -> Period {
    let this_sunday = previous_or_same_sunday(today);
    let weeks_since = (this_sunday - pay_period_anchor()).num_days().div_euclid(7);

    let start = if weeks_since.rem_euclid(2) == 0 {
        this_sunday
    } else {
        this_sunday - Duration::weeks(1)
    };
    Period::new(start, start + Duration::days(13))
}

/// The `count` weeks ending with the current one, newest first.
pub fn recent_weeks(today: NaiveDate, count: usize) -> Vec<Period> {
    let current = week_range(today);
    (0..count as i64)
        .map(|i| {
            let start = current.start - Duration::weeks(i);
            Period::new(start, start + Duration::days(6))
        })
        .collect()
}
