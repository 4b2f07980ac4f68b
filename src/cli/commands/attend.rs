use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::errors::AppResult;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::role::Principal;
use crate::ui::messages::success;
use crate::utils::time;

pub fn handle(cmd: &Commands, cfg: &Config, principal: &Principal) -> AppResult<()> {
    if let Commands::Attend {
        id,
        attendee,
        status,
        time_in,
        time_out,
        notes,
        location,
    } = cmd
    {
        let rec = AttendanceRecord {
            occurrence_id: *id,
            attendee_id: *attendee,
            time_in: time::parse_optional_time(time_in.as_ref())?,
            time_out: time::parse_optional_time(time_out.as_ref())?,
            status: AttendanceStatus::from_db_str(status),
            notes: notes.clone(),
            location: location.clone(),
        };

        let mut pool = open_pool(cfg)?;
        AttendanceLogic::record(&mut pool, principal, &rec)?;

        success(format!(
            "Attendance recorded for attendee #{} on occurrence #{}: {}",
            attendee,
            id,
            rec.status.to_db_str()
        ));
    }

    Ok(())
}
