use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::models::role::Principal;
use crate::ui::messages::{info, success};

/// Handle both `assign` and `unassign`.
pub fn handle(cmd: &Commands, cfg: &Config, principal: &Principal) -> AppResult<()> {
    match cmd {
        Commands::Assign {
            id,
            group,
            attendee,
        } => {
            let mut pool = open_pool(cfg)?;

            if let Some(g) = group {
                let added = RosterLogic::assign_group(&mut pool, *id, *g, principal)?;
                if added == 0 {
                    info(format!(
                        "Every member of group #{} is already on occurrence #{}.",
                        g, id
                    ));
                } else {
                    success(format!("{} attendee(s) added to occurrence #{}.", added, id));
                }
            } else if let Some(a) = attendee {
                RosterLogic::assign_attendee(&mut pool, *id, *a, principal)?;
                success(format!("Attendee #{} assigned to occurrence #{}.", a, id));
            }
        }
        Commands::Unassign { id, attendee } => {
            let mut pool = open_pool(cfg)?;
            RosterLogic::unassign_attendee(&mut pool, *id, *attendee, principal)?;
            success(format!(
                "Attendee #{} unassigned from occurrence #{}.",
                attendee, id
            ));
        }
        _ => {}
    }

    Ok(())
}
