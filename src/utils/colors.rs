/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Placeholder shown for an unset optional field, greyed out when colour is on.
pub fn optional_or(value: Option<&str>, placeholder: &str, color: bool) -> String {
    match value {
        Some(v) => v.to_string(),
        _ if color => format!("{GREY}{placeholder}{RESET}"),
        _ => placeholder.to_string(),
    }
}

/// Remaining-hours colour:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_balance(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}
