//! Time utilities: parsing HH:MM and validating session hour ranges.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Validate a session time range such as `10:00-11:30`.
pub fn validate_hours(range: &str) -> AppResult<()> {
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| AppError::InvalidTime(range.to_string()))?;

    let start = parse_time(start.trim()).ok_or_else(|| AppError::InvalidTime(range.to_string()))?;
    let end = parse_time(end.trim()).ok_or_else(|| AppError::InvalidTime(range.to_string()))?;

    if end <= start {
        return Err(AppError::InvalidTime(format!(
            "{}: end must be after start",
            range
        )));
    }
    Ok(())
}
