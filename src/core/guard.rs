//! Ownership and lock checks shared by every mutating entry point.

use crate::db::queries::load_occurrence;
use crate::errors::{AppError, AppResult};
use crate::models::occurrence::Occurrence;
use crate::models::role::Principal;
use rusqlite::Connection;

pub struct LockGuard;

impl LockGuard {
    /// Ownership first, then the lock. Admins skip the ownership check but
    /// never the lock.
    pub fn check(occ: &Occurrence, principal: &Principal) -> AppResult<()> {
        if !principal.owns(occ.counselor_id) {
            return Err(AppError::Unauthorized(format!(
                "occurrence #{} belongs to counselor {}",
                occ.id, occ.counselor_id
            )));
        }
        if occ.locked {
            return Err(AppError::Locked(occ.id));
        }
        Ok(())
    }

    /// Load an occurrence the caller is about to mutate.
    pub fn load_for_mutation(conn: &Connection, id: i64, principal: &Principal) -> AppResult<Occurrence> {
        let occ = load_occurrence(conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("occurrence #{}", id)))?;
        Self::check(&occ, principal)?;
        Ok(occ)
    }
}
