use crate::errors::{AppError, AppResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Counselor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Counselor => "counselor",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "counselor" => Ok(Role::Counselor),
            other => Err(AppError::InvalidRole(other.to_string())),
        }
    }
}

/// The authenticated caller, as supplied by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
}

impl Principal {
    pub fn admin(id: i64) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    pub fn counselor(id: i64) -> Self {
        Self {
            id,
            role: Role::Counselor,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins own everything; counselors own what carries their id.
    pub fn owns(&self, counselor_id: i64) -> bool {
        self.is_admin() || self.id == counselor_id
    }

    /// Short label used as `target` in the internal log.
    pub fn label(&self) -> String {
        format!("{}:{}", self.role.as_str(), self.id)
    }
}
