//! Attendance report export.

mod csv;
mod fs_utils;
mod json;

use crate::errors::AppResult;
use crate::models::report::ReportRow;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write report rows to `file` in the requested format.
pub fn export_report(rows: &[ReportRow], format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
    let path = expand_tilde(file);
    fs_utils::ensure_writable(&path, force)?;

    match format {
        ExportFormat::Csv => csv::write_csv(&path, rows)?,
        ExportFormat::Json => json::write_json(&path, rows)?,
    }

    success(format!(
        "{} export completed ({} row(s)): {}",
        format.as_str().to_uppercase(),
        rows.len(),
        path.display()
    ));
    Ok(())
}
