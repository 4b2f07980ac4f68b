use crate::core::generate::GenerateLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_occurrence, replace_roster};
use crate::errors::{AppError, AppResult};
use crate::models::occurrence::Occurrence;
use crate::models::role::Principal;
use crate::utils::date::add_days;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    pub id: i64,
    /// Future instances created right away for a weekly anchor.
    pub generated: usize,
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Create an occurrence with its roster. A recurring weekly occurrence is
    /// expanded immediately up to `today + horizon_days`, the same way the
    /// daily generation pass would.
    pub fn add_occurrence(
        pool: &mut DbPool,
        principal: &Principal,
        occ: &Occurrence,
        roster: &[i64],
        today: NaiveDate,
        horizon_days: i64,
    ) -> AppResult<AddOutcome> {
        if !principal.owns(occ.counselor_id) {
            return Err(AppError::Unauthorized(format!(
                "counselor {} cannot create sessions for counselor {}",
                principal.id, occ.counselor_id
            )));
        }

        let max_date = add_days(today, horizon_days)?;
        let tx = pool.transaction()?;

        let id = insert_occurrence(&tx, occ).map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict(format!(
                "'{}' already has an occurrence on {} for counselor {}",
                occ.class_name(),
                occ.date_str(),
                occ.counselor_id
            )),
            other => other,
        })?;
        replace_roster(&tx, id, roster)?;

        let stored = Occurrence { id, ..occ.clone() };
        let generated = if stored.recurring {
            GenerateLogic::expand_anchor(&tx, &stored, max_date)?
        } else {
            0
        };

        ttlog(
            &tx,
            "add",
            &stored.label(),
            &format!(
                "Created by {} with {} attendee(s), {} future instance(s)",
                principal.label(),
                roster.len(),
                generated
            ),
        )?;

        tx.commit()?;
        Ok(AddOutcome { id, generated })
    }
}
