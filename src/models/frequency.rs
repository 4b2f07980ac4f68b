use serde::Serialize;

/// Cadence of a recurring anchor.
///
/// Only `weekly` has an expansion policy. Any other value is accepted and
/// stored verbatim but never expanded by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Frequency {
    Weekly,
    Unsupported(String),
}

impl Frequency {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Unsupported(s) => s.as_str(),
        }
    }

    /// Convert DB string → enum. Empty strings mean "no frequency".
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "" => None,
            "weekly" => Some(Frequency::Weekly),
            other => Some(Frequency::Unsupported(other.to_string())),
        }
    }

    /// Helper: convert CLI input (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        Frequency::from_db_str(&code.to_lowercase())
    }

    /// Days between two generated occurrences, if this cadence is expanded.
    pub fn step_days(&self) -> Option<i64> {
        match self {
            Frequency::Weekly => Some(7),
            Frequency::Unsupported(_) => None,
        }
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        f.to_db_str().to_string()
    }
}
