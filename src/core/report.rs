use crate::db::pool::DbPool;
use crate::db::queries::{ReportFilter, load_report};
use crate::errors::{AppError, AppResult};
use crate::models::report::ReportRow;
use crate::models::role::Principal;

pub struct ReportLogic;

impl ReportLogic {
    /// Attendance rows matching `filter`. Counselors only ever see their own
    /// sessions, whatever counselor filter they pass.
    pub fn build(pool: &DbPool, principal: &Principal, filter: &ReportFilter) -> AppResult<Vec<ReportRow>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to)
            && from > to
        {
            return Err(AppError::InvalidDate(format!("{} is after {}", from, to)));
        }

        let mut scoped = filter.clone();
        if !principal.is_admin() {
            if let Some(other) = filter.counselor_id
                && other != principal.id
            {
                return Err(AppError::Unauthorized(format!(
                    "counselor {} cannot report on counselor {}",
                    principal.id, other
                )));
            }
            scoped.counselor_id = Some(principal.id);
        }

        load_report(&pool.conn, &scoped)
    }
}
