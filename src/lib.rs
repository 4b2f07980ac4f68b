//! rAttendance library root.
//! Exposes the CLI parser, the high-level run() function, and the engine
//! modules (series generation, edit propagation, deletion cascade, roster
//! management, locking).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::role::{Principal, Role};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, principal: &Principal) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(cmd, cfg),
        Commands::Db { .. } => cli::commands::db::handle(cmd, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cmd, cfg),
        Commands::Add { .. } => cli::commands::add::handle(cmd, cfg, principal),
        Commands::Edit { .. } => cli::commands::edit::handle(cmd, cfg, principal),
        Commands::Del { .. } => cli::commands::del::handle(cmd, cfg, principal),
        Commands::Assign { .. } | Commands::Unassign { .. } => {
            cli::commands::assign::handle(cmd, cfg, principal)
        }
        Commands::Lock { .. } | Commands::Unlock { .. } => {
            cli::commands::lock::handle(cmd, cfg, principal)
        }
        Commands::Generate { .. } => cli::commands::generate::handle(cmd, cfg),
        Commands::List { .. } => cli::commands::list::handle(cmd, cfg, principal),
        Commands::Attendee { .. } => cli::commands::attendee::handle(cmd, cfg),
        Commands::Group { .. } => cli::commands::group::handle(cmd, cfg),
        Commands::Attend { .. } => cli::commands::attend::handle(cmd, cfg, principal),
        Commands::Report { .. } => cli::commands::report::handle(cmd, cfg, principal),
    }
}

/// Caller identity: command-line flags first, then the configured defaults.
pub fn resolve_principal(cli: &Cli, cfg: &Config) -> AppResult<Principal> {
    let role = match &cli.role {
        Some(r) => Role::parse(r)?,
        None => Role::parse(&cfg.role)?,
    };
    let id = cli.user.unwrap_or(cfg.user_id);
    Ok(Principal { id, role })
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1. parse CLI
    let cli = Cli::parse();

    // 2. load config once
    let mut cfg = Config::load()?;

    // 3. command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 4. who is calling
    let principal = resolve_principal(&cli, &cfg)?;

    dispatch(&cli, &cfg, &principal)
}
