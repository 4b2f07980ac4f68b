use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, GroupAction};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::queries::{add_group_member, insert_group, load_attendee, load_group};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Group { action } = cmd {
        let pool = open_pool(cfg)?;

        match action {
            GroupAction::Add { name, details } => {
                if name.trim().is_empty() {
                    return Err(AppError::InvalidInput("group name must not be empty".into()));
                }
                let id = insert_group(&pool.conn, name.trim(), details)?;
                ttlog(&pool.conn, "group_add", &format!("#{}", id), name.trim())?;
                success(format!("Group #{} created: {}", id, name.trim()));
            }
            GroupAction::Join { group, attendee } => {
                let g = load_group(&pool.conn, *group)?
                    .ok_or_else(|| AppError::NotFound(format!("group #{}", group)))?;
                let a = load_attendee(&pool.conn, *attendee)?
                    .ok_or_else(|| AppError::NotFound(format!("attendee #{}", attendee)))?;

                if add_group_member(&pool.conn, g.id, a.id)? {
                    ttlog(
                        &pool.conn,
                        "group_join",
                        &format!("#{}", g.id),
                        &format!("{} joined", a.full_name),
                    )?;
                    success(format!("{} joined group '{}'.", a.full_name, g.name));
                } else {
                    info(format!("{} is already in group '{}'.", a.full_name, g.name));
                }
            }
        }
    }

    Ok(())
}
