use crate::errors::{AppError, AppResult};
use crate::models::report::ReportRow;
use std::path::Path;

/// Write the attendance report as pretty-printed JSON.
pub fn write_json(path: &Path, rows: &[ReportRow]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
