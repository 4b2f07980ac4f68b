//! Edit propagator: applies an edit to one occurrence and, on request, to
//! every later occurrence of the same series.

use crate::core::guard::LockGuard;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_future_siblings, replace_roster, update_occurrence, update_shared_details};
use crate::errors::{AppError, AppResult};
use crate::models::occurrence::{Occurrence, OccurrenceEdit};
use crate::models::role::Principal;
use crate::ui::messages::warning;
use rusqlite::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Occurrences updated directly (the edited one).
    pub updated: usize,
    /// Future siblings the edit reached.
    pub propagated: usize,
    /// Future siblings left untouched (locked, or failed).
    pub skipped: usize,
}

pub struct EditLogic;

impl EditLogic {
    /// Overwrite occurrence `id` with `edit` and replace its roster with
    /// `roster`. With `propagate` on a recurring occurrence, the shared
    /// details and the roster also reach every later occurrence of the
    /// series. Past occurrences are never rewritten.
    ///
    /// The primary edit is all-or-nothing; the fan-out is best-effort, one
    /// savepoint per sibling.
    pub fn apply_edit(
        pool: &mut DbPool,
        id: i64,
        principal: &Principal,
        edit: &OccurrenceEdit,
        roster: &[i64],
        propagate: bool,
    ) -> AppResult<EditOutcome> {
        let mut tx = pool.transaction()?;

        let current = LockGuard::load_for_mutation(&tx, id, principal)?;

        if edit.counselor_id != current.counselor_id && !principal.is_admin() {
            return Err(AppError::Unauthorized(format!(
                "only an admin may reassign occurrence #{} to counselor {}",
                id, edit.counselor_id
            )));
        }

        let updated = edit.applied_to(&current);
        update_occurrence(&tx, &updated)?;
        replace_roster(&tx, id, roster)?;

        let mut outcome = EditOutcome {
            updated: 1,
            ..Default::default()
        };

        if propagate && updated.recurring {
            Self::propagate(&mut tx, &current, &updated, roster, &mut outcome)?;
        }

        ttlog(
            &tx,
            "edit",
            &updated.label(),
            &format!(
                "Edited by {} (propagated to {}, skipped {})",
                principal.label(),
                outcome.propagated,
                outcome.skipped
            ),
        )?;

        tx.commit()?;
        Ok(outcome)
    }

    /// Siblings are resolved from the series identity before the edit:
    /// same class name and counselor, strictly later date.
    fn propagate(
        tx: &mut Transaction<'_>,
        before: &Occurrence,
        after: &Occurrence,
        roster: &[i64],
        outcome: &mut EditOutcome,
    ) -> AppResult<()> {
        let siblings = load_future_siblings(tx, before.class_name(), before.counselor_id, &before.date)?;

        for sibling in siblings.iter().filter(|s| s.id != before.id) {
            if sibling.locked {
                outcome.skipped += 1;
                ttlog(tx, "edit_skip", &sibling.label(), "Locked, propagation withheld")?;
                continue;
            }

            let sp = tx.savepoint()?;
            let applied = update_shared_details(&sp, sibling.id, &after.details)
                .and_then(|_| replace_roster(&sp, sibling.id, roster));

            match applied {
                Ok(()) => {
                    sp.commit()?;
                    outcome.propagated += 1;
                }
                Err(e) => {
                    // Dropping the savepoint rolls this sibling back.
                    drop(sp);
                    outcome.skipped += 1;
                    warning(format!("Propagation to {} failed: {}", sibling.label(), e));
                    ttlog(tx, "edit_skip", &sibling.label(), &e.to_string())?;
                }
            }
        }

        Ok(())
    }
}
