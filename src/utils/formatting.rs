//! Formatting utilities used for CLI output.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Currency amount with two decimals, e.g. `$160.00`.
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

pub fn hourly(rate: f64) -> String {
    format!("{}/h", money(rate))
}

/// Greeting for the live session view, by hour of day.
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning!",
        12..=16 => "Good afternoon!",
        17..=22 => "Good evening!",
        _ => "Burning the midnight oil?",
    }
}
