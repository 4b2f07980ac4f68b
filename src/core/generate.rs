//! Series generator: materializes missing future occurrences of every
//! recurring anchor up to a rolling horizon.

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    insert_occurrence, insert_roster_link_ignore, load_anchor_rows, load_roster,
    occurrence_exists,
};
use crate::errors::AppResult;
use crate::models::frequency::Frequency;
use crate::models::occurrence::Occurrence;
use crate::ui::messages::warning;
use crate::utils::date::add_days;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Outcome of one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Anchor rows scanned (including those that were skipped).
    pub anchors: usize,
    /// Occurrences created.
    pub generated: usize,
    /// Anchors abandoned because of a bad row or a store failure.
    pub skipped: usize,
}

/// Dates `anchor + step, anchor + 2*step, …` up to and including `max_date`.
pub fn candidate_dates(anchor_date: NaiveDate, step_days: i64, max_date: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    if step_days <= 0 {
        return out;
    }

    let mut current = add_days(anchor_date, step_days);
    while let Ok(d) = current {
        if d > max_date {
            break;
        }
        out.push(d);
        current = add_days(d, step_days);
    }
    out
}

pub struct GenerateLogic;

impl GenerateLogic {
    /// Fill every weekly series up to `today + horizon_days`.
    ///
    /// Safe to run repeatedly: an occurrence already present for
    /// `(class_name, date, counselor_id)` is never created twice. Each anchor
    /// runs in its own transaction; one failing anchor is logged and skipped.
    pub fn generate_missing_occurrences(
        pool: &mut DbPool,
        today: NaiveDate,
        horizon_days: i64,
    ) -> AppResult<GenerationReport> {
        let max_date = add_days(today, horizon_days)?;
        let rows = load_anchor_rows(&pool.conn, &max_date)?;

        let mut report = GenerationReport::default();

        for row in rows {
            report.anchors += 1;

            let anchor = match row {
                Ok(a) => a,
                Err(e) => {
                    report.skipped += 1;
                    Self::log_skip(&pool.conn, "unreadable anchor row", &e.to_string());
                    continue;
                }
            };

            match Self::expand_in_transaction(pool, &anchor, max_date) {
                Ok(n) => report.generated += n,
                Err(e) => {
                    report.skipped += 1;
                    Self::log_skip(&pool.conn, &anchor.label(), &e.to_string());
                }
            }
        }

        ttlog_quiet(
            &pool.conn,
            "generate",
            &format!("{} → {}", today, max_date),
            &format!(
                "Generated {} occurrence(s) from {} anchor(s), {} skipped",
                report.generated, report.anchors, report.skipped
            ),
        );

        Ok(report)
    }

    fn expand_in_transaction(
        pool: &mut DbPool,
        anchor: &Occurrence,
        max_date: NaiveDate,
    ) -> AppResult<usize> {
        let tx = pool.transaction()?;
        let created = Self::expand_anchor(&tx, anchor, max_date)?;
        tx.commit()?;
        Ok(created)
    }

    /// Create the missing instances of one anchor, copying its roster into
    /// each new instance. Cadences without an expansion policy are a no-op.
    pub fn expand_anchor(conn: &Connection, anchor: &Occurrence, max_date: NaiveDate) -> AppResult<usize> {
        let Some(step) = anchor.frequency.as_ref().and_then(Frequency::step_days) else {
            return Ok(0);
        };

        let roster = load_roster(conn, anchor.id)?;
        let mut created = 0;

        for date in candidate_dates(anchor.date, step, max_date) {
            if occurrence_exists(conn, anchor.class_name(), &date, anchor.counselor_id)? {
                continue;
            }

            // A concurrent writer may have created the row since the check.
            let new_id = match insert_occurrence(conn, &anchor.spawn_on(date)) {
                Ok(id) => id,
                Err(e) if e.is_conflict() => continue,
                Err(e) => return Err(e),
            };

            for attendee_id in &roster {
                insert_roster_link_ignore(conn, new_id, *attendee_id)?;
            }
            created += 1;
        }

        Ok(created)
    }

    fn log_skip(conn: &Connection, target: &str, reason: &str) {
        warning(format!("Skipping anchor {}: {}", target, reason));
        ttlog_quiet(conn, "generate_skip", target, reason);
    }
}
