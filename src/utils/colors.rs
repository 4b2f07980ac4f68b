/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Locked occurrences are shown in red, anchors in cyan.
pub fn color_for_occurrence(locked: bool, recurring: bool) -> &'static str {
    if locked {
        RED
    } else if recurring {
        CYAN
    } else {
        RESET
    }
}
