use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::generate::GenerateLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date;

/// Entry point for the external daily trigger.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Generate { today, horizon } = cmd {
        let today = match today {
            Some(t) => date::require_date(t)?,
            None => date::today(),
        };

        let horizon = horizon.unwrap_or(cfg.horizon_days);
        if horizon < 0 {
            return Err(AppError::InvalidInput(format!(
                "horizon must not be negative (found {})",
                horizon
            )));
        }

        let mut pool = open_pool(cfg)?;
        let report = GenerateLogic::generate_missing_occurrences(&mut pool, today, horizon)?;

        success(format!(
            "Generated {} occurrence(s) from {} anchor(s) up to {}.",
            report.generated,
            report.anchors,
            date::add_days(today, horizon)?
        ));
        if report.skipped > 0 {
            warning(format!(
                "{} anchor(s) skipped, see `rattendance log --print`.",
                report.skipped
            ));
        }
    }

    Ok(())
}
