use super::period::Period;
use serde::Serialize;

/// Totals over one period, as shown above a week listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodSummary {
    pub period: Period,
    pub days_worked: usize,
    pub total_minutes: i64,
    pub earnings: f64,
    pub unsubmitted: usize,
}

impl PeriodSummary {
    pub fn total_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }
}
