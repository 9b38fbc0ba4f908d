//! ANSI color helper utilities for terminal output.

use regex::Regex;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}

/// Submitted entries in green, pending ones in red.
pub fn color_for_submitted(submitted: bool) -> &'static str {
    if submitted { GREEN } else { RED }
}

pub fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}
