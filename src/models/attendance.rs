use chrono::NaiveTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Other(String),
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Other(s) => s.as_str(),
        }
    }

    /// Convert DB/CLI string → enum (case-insensitive for the known states)
    pub fn from_db_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "present" => AttendanceStatus::Present,
            "absent" => AttendanceStatus::Absent,
            _ => AttendanceStatus::Other(s.trim().to_string()),
        }
    }
}

impl From<AttendanceStatus> for String {
    fn from(s: AttendanceStatus) -> Self {
        s.to_db_str().to_string()
    }
}

/// One attendee's attendance on one occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub occurrence_id: i64,
    pub attendee_id: i64,
    pub time_in: Option<NaiveTime>,
    pub time_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub notes: String,
    pub location: String,
}

impl AttendanceRecord {
    pub fn time_in_str(&self) -> Option<String> {
        self.time_in.map(|t| t.format("%H:%M").to_string())
    }

    pub fn time_out_str(&self) -> Option<String> {
        self.time_out.map(|t| t.format("%H:%M").to_string())
    }
}
