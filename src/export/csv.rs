use crate::errors::AppResult;
use crate::models::report::ReportRow;
use csv::Writer;
use std::path::Path;

const HEADERS: [&str; 12] = [
    "Class Name",
    "Class Group",
    "Date",
    "Group Hours",
    "Location",
    "Counselor",
    "Attendee Name",
    "ID",
    "Status",
    "Time In",
    "Time Out",
    "Notes",
];

/// Write the attendance report as CSV, one line per attendance record.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(HEADERS)?;

    for r in rows {
        wtr.write_record([
            r.class_name.as_str(),
            r.group_name.as_str(),
            r.date.as_str(),
            r.group_hours.as_str(),
            r.location.as_str(),
            &r.counselor_id.to_string(),
            r.attendee_name.as_str(),
            r.attendee_code.as_str(),
            r.status.as_str(),
            r.time_in.as_str(),
            r.time_out.as_str(),
            r.notes.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
