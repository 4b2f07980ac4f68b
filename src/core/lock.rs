use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_occurrence, set_locked};
use crate::errors::{AppError, AppResult};
use crate::models::role::Principal;

pub struct LockLogic;

impl LockLogic {
    /// Lock or unlock one occurrence. Admin only; setting the current state
    /// again succeeds without change.
    pub fn toggle_lock(pool: &mut DbPool, id: i64, principal: &Principal, locked: bool) -> AppResult<()> {
        if !principal.is_admin() {
            return Err(AppError::Unauthorized(
                "only an admin may lock or unlock occurrences".into(),
            ));
        }

        let occ = load_occurrence(&pool.conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("occurrence #{}", id)))?;

        if occ.locked == locked {
            return Ok(());
        }

        set_locked(&pool.conn, id, locked)?;

        ttlog(
            &pool.conn,
            if locked { "lock" } else { "unlock" },
            &occ.label(),
            &format!("Set by {}", principal.label()),
        )?;

        Ok(())
    }
}
