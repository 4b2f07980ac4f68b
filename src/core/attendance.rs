use crate::core::guard::LockGuard;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_attendee, upsert_attendance};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::role::Principal;

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Record (or overwrite) one attendee's attendance on an occurrence.
    /// A locked occurrence accepts no new attendance.
    pub fn record(pool: &mut DbPool, principal: &Principal, rec: &AttendanceRecord) -> AppResult<()> {
        if let (Some(t_in), Some(t_out)) = (rec.time_in, rec.time_out)
            && t_out < t_in
        {
            return Err(AppError::InvalidTime(format!(
                "time out {} is before time in {}",
                t_out.format("%H:%M"),
                t_in.format("%H:%M")
            )));
        }

        let tx = pool.transaction()?;

        let occ = LockGuard::load_for_mutation(&tx, rec.occurrence_id, principal)?;
        let attendee = load_attendee(&tx, rec.attendee_id)?
            .ok_or_else(|| AppError::NotFound(format!("attendee #{}", rec.attendee_id)))?;

        upsert_attendance(&tx, rec)?;

        ttlog(
            &tx,
            "attend",
            &occ.label(),
            &format!("{}: {}", attendee.full_name, rec.status.to_db_str()),
        )?;

        tx.commit()?;
        Ok(())
    }
}
