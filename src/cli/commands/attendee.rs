use crate::cli::commands::open_pool;
use crate::cli::parser::{AttendeeAction, Commands};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::queries::{insert_attendee, list_attendees};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attendee { action } = cmd {
        let pool = open_pool(cfg)?;

        match action {
            AttendeeAction::Add { name, code, notes } => {
                if name.trim().is_empty() {
                    return Err(AppError::InvalidInput("attendee name must not be empty".into()));
                }

                let id = insert_attendee(&pool.conn, name.trim(), code.trim(), notes)
                    .map_err(|e| match e {
                        AppError::Conflict(_) => {
                            AppError::Conflict(format!("attendee code '{}' already exists", code))
                        }
                        other => other,
                    })?;

                ttlog(&pool.conn, "attendee_add", &format!("#{}", id), name.trim())?;
                success(format!("Attendee #{} added: {}", id, name.trim()));
            }
            AttendeeAction::List => {
                let attendees = list_attendees(&pool.conn)?;
                if attendees.is_empty() {
                    println!("No attendees registered.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("ID"),
                    Column::new("NAME"),
                    Column::new("CODE"),
                    Column::new("NOTES"),
                ]);
                for a in attendees {
                    table.add_row(vec![a.id.to_string(), a.full_name, a.code, a.notes]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        }
    }

    Ok(())
}
