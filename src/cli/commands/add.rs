use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::errors::{AppError, AppResult};
use crate::models::frequency::Frequency;
use crate::models::occurrence::{Occurrence, SessionDetails};
use crate::models::role::Principal;
use crate::ui::messages::{info, success};
use crate::utils::date;
use crate::utils::time::validate_hours;

/// Create a session occurrence.
pub fn handle(cmd: &Commands, cfg: &Config, principal: &Principal) -> AppResult<()> {
    if let Commands::Add {
        date: date_str,
        class_name,
        group_name,
        hours,
        counselor,
        group_type,
        notes,
        location,
        recurring,
        frequency,
        attendees,
        today,
    } = cmd
    {
        //
        // 1. Parse and validate input
        //
        let d = date::require_date(date_str)?;
        validate_hours(hours)?;

        if class_name.trim().is_empty() {
            return Err(AppError::InvalidInput("class name must not be empty".into()));
        }

        let freq = if *recurring {
            Some(
                Frequency::from_code(frequency)
                    .ok_or_else(|| AppError::InvalidInput("frequency must not be empty".into()))?,
            )
        } else {
            None
        };

        let today = match today {
            Some(t) => date::require_date(t)?,
            None => date::today(),
        };

        let occ = Occurrence::new(
            SessionDetails {
                group_name: group_name.clone(),
                class_name: class_name.trim().to_string(),
                group_hours: hours.clone(),
                group_type: group_type.clone(),
                notes: notes.clone(),
                location: location.clone(),
            },
            d,
            counselor.unwrap_or(principal.id),
            *recurring,
            freq,
        );

        //
        // 2. Execute logic
        //
        let mut pool = open_pool(cfg)?;
        let outcome =
            AddLogic::add_occurrence(&mut pool, principal, &occ, attendees, today, cfg.horizon_days)?;

        success(format!(
            "Occurrence #{} added: {} on {}",
            outcome.id,
            occ.class_name(),
            occ.date_str()
        ));

        if *recurring {
            match occ.frequency.as_ref().and_then(Frequency::step_days) {
                Some(_) => info(format!(
                    "{} future occurrence(s) generated up to {} day(s) ahead.",
                    outcome.generated, cfg.horizon_days
                )),
                None => info(format!(
                    "Frequency '{}' is not expanded automatically.",
                    frequency
                )),
            }
        }
    }

    Ok(())
}
