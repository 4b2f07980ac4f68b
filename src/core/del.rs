use crate::core::guard::LockGuard;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_attendance, delete_occurrences, delete_roster_links, load_series_from};
use crate::errors::AppResult;
use crate::models::role::Principal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    Single,
    ThisAndFuture,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Occurrences removed.
    pub deleted: usize,
    /// Later occurrences kept because they are locked.
    pub skipped: usize,
}

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove an occurrence, or it and every later occurrence of its series.
    ///
    /// Children go first, always in this order: roster links, attendance
    /// records, occurrences.
    pub fn delete_occurrence(
        pool: &mut DbPool,
        id: i64,
        principal: &Principal,
        scope: DeleteScope,
    ) -> AppResult<DeleteOutcome> {
        let tx = pool.transaction()?;

        let target = LockGuard::load_for_mutation(&tx, id, principal)?;

        let mut outcome = DeleteOutcome::default();
        let ids: Vec<i64> = match scope {
            DeleteScope::Single => vec![target.id],
            DeleteScope::ThisAndFuture => {
                let series = load_series_from(&tx, target.class_name(), target.counselor_id, &target.date)?;
                let (locked, free): (Vec<_>, Vec<_>) = series.into_iter().partition(|o| o.locked);
                outcome.skipped = locked.len();
                free.into_iter().map(|o| o.id).collect()
            }
        };

        delete_roster_links(&tx, &ids)?;
        delete_attendance(&tx, &ids)?;
        outcome.deleted = delete_occurrences(&tx, &ids)?;

        let scope_label = match scope {
            DeleteScope::Single => "single",
            DeleteScope::ThisAndFuture => "this and future",
        };
        ttlog(
            &tx,
            "del",
            &target.label(),
            &format!(
                "Deleted {} occurrence(s) ({}) by {}, {} locked kept",
                outcome.deleted,
                scope_label,
                principal.label(),
                outcome.skipped
            ),
        )?;

        tx.commit()?;
        Ok(outcome)
    }
}
