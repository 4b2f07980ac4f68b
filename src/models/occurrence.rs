use super::frequency::Frequency;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Attributes shared by every occurrence of a series.
/// These are exactly the fields an edit propagates to future siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SessionDetails {
    pub group_name: String,
    pub class_name: String,
    pub group_hours: String, // ⇔ occurrences.group_hours (TEXT "HH:MM-HH:MM")
    pub group_type: String,
    pub notes: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Occurrence {
    pub id: i64,
    #[serde(flatten)]
    pub details: SessionDetails,
    pub date: NaiveDate, // ⇔ occurrences.date (TEXT "YYYY-MM-DD")
    pub counselor_id: i64,
    pub recurring: bool, // anchor flag
    pub frequency: Option<Frequency>,
    pub locked: bool,
    pub created_at: String, // ⇔ occurrences.created_at (TEXT, ISO8601)
}

impl Occurrence {
    /// Build a not-yet-persisted occurrence (`id = 0`, unlocked).
    pub fn new(
        details: SessionDetails,
        date: NaiveDate,
        counselor_id: i64,
        recurring: bool,
        frequency: Option<Frequency>,
    ) -> Self {
        Self {
            id: 0,
            details,
            date,
            counselor_id,
            recurring,
            frequency,
            locked: false,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// The instance the generator materializes from this anchor on `date`.
    /// Spawned instances are never anchors themselves.
    pub fn spawn_on(&self, date: NaiveDate) -> Self {
        Occurrence::new(self.details.clone(), date, self.counselor_id, false, None)
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn class_name(&self) -> &str {
        &self.details.class_name
    }

    pub fn frequency_str(&self) -> Option<&str> {
        self.frequency.as_ref().map(|f| f.to_db_str())
    }

    /// Short label used as `target` in the internal log.
    pub fn label(&self) -> String {
        format!("#{} {} {}", self.id, self.details.class_name, self.date_str())
    }
}

/// A full edit of one occurrence: the shared details plus the
/// per-occurrence identity and anchor attributes.
#[derive(Debug, Clone)]
pub struct OccurrenceEdit {
    pub details: SessionDetails,
    pub date: NaiveDate,
    pub counselor_id: i64,
    pub recurring: bool,
    pub frequency: Option<Frequency>,
}

impl OccurrenceEdit {
    /// Start an edit from the current state of an occurrence.
    pub fn from_current(occ: &Occurrence) -> Self {
        Self {
            details: occ.details.clone(),
            date: occ.date,
            counselor_id: occ.counselor_id,
            recurring: occ.recurring,
            frequency: occ.frequency.clone(),
        }
    }

    /// Apply the edit to `current`, keeping its id, lock and creation stamp.
    pub fn applied_to(&self, current: &Occurrence) -> Occurrence {
        Occurrence {
            id: current.id,
            details: self.details.clone(),
            date: self.date,
            counselor_id: self.counselor_id,
            recurring: self.recurring,
            frequency: if self.recurring {
                self.frequency.clone()
            } else {
                None
            },
            locked: current.locked,
            created_at: current.created_at.clone(),
        }
    }
}
