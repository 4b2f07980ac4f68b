use serde::Serialize;

/// One attendance line of the report, already joined with its occurrence
/// and attendee.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub class_name: String,
    pub group_name: String,
    pub date: String,
    pub group_hours: String,
    pub location: String,
    pub counselor_id: i64,
    pub attendee_name: String,
    pub attendee_code: String,
    pub status: String,
    pub time_in: String,
    pub time_out: String,
    pub notes: String,
}
