use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Attendee {
    pub id: i64,
    pub full_name: String,
    pub code: String, // ⇔ attendees.code (external attendee id, UNIQUE)
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub details: String,
}
