use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::{DeleteLogic, DeleteScope};
use crate::errors::AppResult;
use crate::models::role::Principal;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, principal: &Principal) -> AppResult<()> {
    if let Commands::Del { id, future, yes } = cmd {
        let scope = if *future {
            DeleteScope::ThisAndFuture
        } else {
            DeleteScope::Single
        };

        //
        // Confirmation prompt
        //
        let prompt = match scope {
            DeleteScope::Single => format!(
                "Delete occurrence #{} with its roster and attendance? This action is irreversible.",
                id
            ),
            DeleteScope::ThisAndFuture => format!(
                "Delete occurrence #{} and ALL later occurrences of its series? This action is irreversible.",
                id
            ),
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let mut pool = open_pool(cfg)?;
        let outcome = DeleteLogic::delete_occurrence(&mut pool, *id, principal, scope)?;

        success(format!("{} occurrence(s) deleted.", outcome.deleted));
        if outcome.skipped > 0 {
            warning(format!("{} locked occurrence(s) kept.", outcome.skipped));
        }
    }

    Ok(())
}
