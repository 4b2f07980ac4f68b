use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::lock::LockLogic;
use crate::errors::AppResult;
use crate::models::role::Principal;
use crate::ui::messages::success;

/// Handle both `lock` and `unlock`.
pub fn handle(cmd: &Commands, cfg: &Config, principal: &Principal) -> AppResult<()> {
    let (id, locked) = match cmd {
        Commands::Lock { id } => (*id, true),
        Commands::Unlock { id } => (*id, false),
        _ => return Ok(()),
    };

    let mut pool = open_pool(cfg)?;
    LockLogic::toggle_lock(&mut pool, id, principal, locked)?;

    if locked {
        success(format!("🔒 Occurrence #{} locked.", id));
    } else {
        success(format!("🔓 Occurrence #{} unlocked.", id));
    }
    Ok(())
}
