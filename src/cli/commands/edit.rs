use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::EditLogic;
use crate::db::queries::{load_occurrence, load_roster};
use crate::errors::{AppError, AppResult};
use crate::models::frequency::Frequency;
use crate::models::occurrence::OccurrenceEdit;
use crate::models::role::Principal;
use crate::ui::messages::{info, success, warning};
use crate::utils::date;
use crate::utils::time::validate_hours;

/// Edit an occurrence. Options not given keep their current value; without
/// `--attendees` the current roster is kept (and propagated as is).
pub fn handle(cmd: &Commands, cfg: &Config, principal: &Principal) -> AppResult<()> {
    if let Commands::Edit {
        id,
        class_name,
        group_name,
        date: date_str,
        hours,
        counselor,
        group_type,
        notes,
        location,
        recurring,
        no_recurring,
        frequency,
        attendees,
        propagate,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;

        let current = load_occurrence(&pool.conn, *id)?
            .ok_or_else(|| AppError::NotFound(format!("occurrence #{}", id)))?;

        //
        // 1. Overlay the requested changes on the current state
        //
        let mut edit = OccurrenceEdit::from_current(&current);

        if let Some(v) = class_name {
            edit.details.class_name = v.trim().to_string();
        }
        if let Some(v) = group_name {
            edit.details.group_name = v.clone();
        }
        if let Some(v) = hours {
            validate_hours(v)?;
            edit.details.group_hours = v.clone();
        }
        if let Some(v) = group_type {
            edit.details.group_type = v.clone();
        }
        if let Some(v) = notes {
            edit.details.notes = v.clone();
        }
        if let Some(v) = location {
            edit.details.location = v.clone();
        }
        if let Some(v) = date_str {
            edit.date = date::require_date(v)?;
        }
        if let Some(v) = counselor {
            edit.counselor_id = *v;
        }
        if *recurring {
            edit.recurring = true;
        }
        if *no_recurring {
            edit.recurring = false;
        }
        if let Some(f) = frequency {
            edit.frequency = Frequency::from_code(f);
        }
        if edit.recurring && edit.frequency.is_none() {
            edit.frequency = Some(Frequency::Weekly);
        }

        let roster = match attendees {
            Some(ids) => ids.clone(),
            None => load_roster(&pool.conn, *id)?,
        };

        //
        // 2. Execute logic
        //
        let outcome = EditLogic::apply_edit(&mut pool, *id, principal, &edit, &roster, *propagate)?;

        success(format!("Occurrence #{} updated.", id));

        if *propagate {
            if edit.recurring {
                info(format!(
                    "Propagated to {} later occurrence(s).",
                    outcome.propagated
                ));
            } else {
                warning("Occurrence is not recurring: nothing propagated.");
            }
        }
        if outcome.skipped > 0 {
            warning(format!(
                "{} later occurrence(s) skipped (locked or failed).",
                outcome.skipped
            ));
        }
    }

    Ok(())
}
