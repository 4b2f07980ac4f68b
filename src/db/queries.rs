//! Typed read/write operations over the occurrence, roster, attendee, group
//! and attendance tables. No business policy lives here.

use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::attendee::{Attendee, Group};
use crate::models::frequency::Frequency;
use crate::models::occurrence::{Occurrence, SessionDetails};
use crate::models::report::ReportRow;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const OCCURRENCE_COLUMNS: &str = "id, group_name, class_name, date, group_hours, counselor_id, \
     group_type, notes, location, recurring, frequency, locked, created_at";

fn date_to_db(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Build "?,?,?" for an IN (...) clause.
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

pub fn map_row(row: &Row) -> Result<Occurrence> {
    let date_str: String = row.get("date")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let frequency: Option<String> = row.get("frequency")?;

    Ok(Occurrence {
        id: row.get("id")?,
        details: SessionDetails {
            group_name: row.get("group_name")?,
            class_name: row.get("class_name")?,
            group_hours: row.get("group_hours")?,
            group_type: row.get("group_type")?,
            notes: row.get("notes")?,
            location: row.get("location")?,
        },
        date,
        counselor_id: row.get("counselor_id")?,
        recurring: row.get::<_, i32>("recurring")? == 1,
        frequency: frequency.as_deref().and_then(Frequency::from_db_str),
        locked: row.get::<_, i32>("locked")? == 1,
        created_at: row.get("created_at")?,
    })
}

fn collect_occurrences(conn: &Connection, sql: &str, values: Vec<Value>) -> AppResult<Vec<Occurrence>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Occurrences
// ---------------------------------------------------------------------------

pub fn load_occurrence(conn: &Connection, id: i64) -> AppResult<Option<Occurrence>> {
    let sql = format!("SELECT {OCCURRENCE_COLUMNS} FROM occurrences WHERE id = ?1");
    let occ = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(occ)
}

/// Insert a new occurrence and return its store-assigned id.
pub fn insert_occurrence(conn: &Connection, occ: &Occurrence) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO occurrences (group_name, class_name, date, group_hours, counselor_id,
                                  group_type, notes, location, recurring, frequency, locked, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            occ.details.group_name,
            occ.details.class_name,
            occ.date_str(),
            occ.details.group_hours,
            occ.counselor_id,
            occ.details.group_type,
            occ.details.notes,
            occ.details.location,
            if occ.recurring { 1 } else { 0 },
            occ.frequency_str(),
            if occ.locked { 1 } else { 0 },
            occ.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an occurrence (all fields except id, lock and creation stamp)
pub fn update_occurrence(conn: &Connection, occ: &Occurrence) -> AppResult<()> {
    conn.execute(
        "UPDATE occurrences
         SET group_name = ?1, class_name = ?2, date = ?3, group_hours = ?4,
             counselor_id = ?5, group_type = ?6, notes = ?7, location = ?8,
             recurring = ?9, frequency = ?10
         WHERE id = ?11",
        params![
            occ.details.group_name,
            occ.details.class_name,
            occ.date_str(),
            occ.details.group_hours,
            occ.counselor_id,
            occ.details.group_type,
            occ.details.notes,
            occ.details.location,
            if occ.recurring { 1 } else { 0 },
            occ.frequency_str(),
            occ.id,
        ],
    )?;
    Ok(())
}

/// Overwrite only the series-shared attributes of an occurrence.
pub fn update_shared_details(conn: &Connection, id: i64, details: &SessionDetails) -> AppResult<()> {
    conn.execute(
        "UPDATE occurrences
         SET group_name = ?1, class_name = ?2, group_hours = ?3,
             group_type = ?4, notes = ?5, location = ?6
         WHERE id = ?7",
        params![
            details.group_name,
            details.class_name,
            details.group_hours,
            details.group_type,
            details.notes,
            details.location,
            id,
        ],
    )?;
    Ok(())
}

pub fn set_locked(conn: &Connection, id: i64, locked: bool) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE occurrences SET locked = ?1 WHERE id = ?2",
        params![if locked { 1 } else { 0 }, id],
    )?;
    Ok(n)
}

pub fn occurrence_exists(
    conn: &Connection,
    class_name: &str,
    date: &NaiveDate,
    counselor_id: i64,
) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM occurrences
         WHERE class_name = ?1 AND date = ?2 AND counselor_id = ?3
         LIMIT 1",
    )?;
    let exists = stmt.exists(params![class_name, date_to_db(date), counselor_id])?;
    Ok(exists)
}

/// Anchors due for expansion: `recurring = 1 AND date <= max_date`.
///
/// Rows are returned one result each, so that a single unparseable row does
/// not hide the others from the generator.
pub fn load_anchor_rows(conn: &Connection, max_date: &NaiveDate) -> AppResult<Vec<Result<Occurrence>>> {
    let sql = format!(
        "SELECT {OCCURRENCE_COLUMNS} FROM occurrences
         WHERE recurring = 1 AND date <= ?1
         ORDER BY date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([date_to_db(max_date)], map_row)?;
    Ok(rows.collect())
}

/// Occurrences of the series `(class_name, counselor_id)` strictly after `date`.
pub fn load_future_siblings(
    conn: &Connection,
    class_name: &str,
    counselor_id: i64,
    date: &NaiveDate,
) -> AppResult<Vec<Occurrence>> {
    let sql = format!(
        "SELECT {OCCURRENCE_COLUMNS} FROM occurrences
         WHERE class_name = ?1 AND counselor_id = ?2 AND date > ?3
         ORDER BY date ASC"
    );
    collect_occurrences(
        conn,
        &sql,
        vec![
            Value::Text(class_name.to_string()),
            Value::Integer(counselor_id),
            Value::Text(date_to_db(date)),
        ],
    )
}

/// Occurrences of the series `(class_name, counselor_id)` on or after `date`.
pub fn load_series_from(
    conn: &Connection,
    class_name: &str,
    counselor_id: i64,
    date: &NaiveDate,
) -> AppResult<Vec<Occurrence>> {
    let sql = format!(
        "SELECT {OCCURRENCE_COLUMNS} FROM occurrences
         WHERE class_name = ?1 AND counselor_id = ?2 AND date >= ?3
         ORDER BY date ASC"
    );
    collect_occurrences(
        conn,
        &sql,
        vec![
            Value::Text(class_name.to_string()),
            Value::Integer(counselor_id),
            Value::Text(date_to_db(date)),
        ],
    )
}

#[derive(Debug, Clone, Default)]
pub struct OccurrenceFilter {
    pub class_name: Option<String>,
    pub counselor_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub fn list_occurrences(conn: &Connection, filter: &OccurrenceFilter) -> AppResult<Vec<Occurrence>> {
    let mut sql = format!("SELECT {OCCURRENCE_COLUMNS} FROM occurrences WHERE 1=1");
    let mut values: Vec<Value> = Vec::new();

    if let Some(c) = &filter.class_name {
        sql.push_str(" AND class_name = ?");
        values.push(Value::Text(c.clone()));
    }
    if let Some(id) = filter.counselor_id {
        sql.push_str(" AND counselor_id = ?");
        values.push(Value::Integer(id));
    }
    if let Some(d) = &filter.from {
        sql.push_str(" AND date >= ?");
        values.push(Value::Text(date_to_db(d)));
    }
    if let Some(d) = &filter.to {
        sql.push_str(" AND date <= ?");
        values.push(Value::Text(date_to_db(d)));
    }
    sql.push_str(" ORDER BY date ASC, class_name ASC, id ASC");

    collect_occurrences(conn, &sql, values)
}

/// Delete the occurrence rows themselves. Children must already be gone.
pub fn delete_occurrences(conn: &Connection, ids: &[i64]) -> AppResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    let sql = format!("DELETE FROM occurrences WHERE id IN ({})", placeholders(ids.len()));
    let n = conn.execute(&sql, params_from_iter(ids.iter()))?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// Roster links
// ---------------------------------------------------------------------------

pub fn load_roster(conn: &Connection, occurrence_id: i64) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT attendee_id FROM roster_links
         WHERE occurrence_id = ?1
         ORDER BY attendee_id ASC",
    )?;
    let rows = stmt.query_map([occurrence_id], |row| row.get::<_, i64>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn roster_size(conn: &Connection, occurrence_id: i64) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM roster_links WHERE occurrence_id = ?1",
        [occurrence_id],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Insert a roster link; a duplicate is a conflict.
pub fn insert_roster_link(conn: &Connection, occurrence_id: i64, attendee_id: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO roster_links (occurrence_id, attendee_id) VALUES (?1, ?2)",
        params![occurrence_id, attendee_id],
    )?;
    Ok(())
}

/// Insert a roster link unless it already exists. Returns true when added.
pub fn insert_roster_link_ignore(
    conn: &Connection,
    occurrence_id: i64,
    attendee_id: i64,
) -> AppResult<bool> {
    let n = conn.execute(
        "INSERT INTO roster_links (occurrence_id, attendee_id) VALUES (?1, ?2)
         ON CONFLICT DO NOTHING",
        params![occurrence_id, attendee_id],
    )?;
    Ok(n == 1)
}

pub fn delete_roster_link(conn: &Connection, occurrence_id: i64, attendee_id: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM roster_links WHERE occurrence_id = ?1 AND attendee_id = ?2",
        params![occurrence_id, attendee_id],
    )?;
    Ok(n)
}

pub fn delete_roster_links(conn: &Connection, occurrence_ids: &[i64]) -> AppResult<usize> {
    if occurrence_ids.is_empty() {
        return Ok(0);
    }
    let sql = format!(
        "DELETE FROM roster_links WHERE occurrence_id IN ({})",
        placeholders(occurrence_ids.len())
    );
    let n = conn.execute(&sql, params_from_iter(occurrence_ids.iter()))?;
    Ok(n)
}

/// Delete-all-then-insert: the roster of `occurrence_id` becomes `roster`.
pub fn replace_roster(conn: &Connection, occurrence_id: i64, roster: &[i64]) -> AppResult<()> {
    delete_roster_links(conn, &[occurrence_id])?;
    for attendee_id in roster {
        insert_roster_link_ignore(conn, occurrence_id, *attendee_id)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Attendees and groups
// ---------------------------------------------------------------------------

pub fn insert_attendee(conn: &Connection, full_name: &str, code: &str, notes: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO attendees (full_name, code, notes) VALUES (?1, ?2, ?3)",
        params![full_name, code, notes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_attendee(conn: &Connection, id: i64) -> AppResult<Option<Attendee>> {
    let a = conn
        .query_row(
            "SELECT id, full_name, code, notes FROM attendees WHERE id = ?1",
            [id],
            |row| {
                Ok(Attendee {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    code: row.get(2)?,
                    notes: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(a)
}

pub fn list_attendees(conn: &Connection) -> AppResult<Vec<Attendee>> {
    let mut stmt =
        conn.prepare("SELECT id, full_name, code, notes FROM attendees ORDER BY full_name ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Attendee {
            id: row.get(0)?,
            full_name: row.get(1)?,
            code: row.get(2)?,
            notes: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_group(conn: &Connection, name: &str, details: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO groups (name, details) VALUES (?1, ?2)",
        params![name, details],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_group(conn: &Connection, id: i64) -> AppResult<Option<Group>> {
    let g = conn
        .query_row(
            "SELECT id, name, details FROM groups WHERE id = ?1",
            [id],
            |row| {
                Ok(Group {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    details: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(g)
}

/// Add an attendee to a group. Returns true when newly added.
pub fn add_group_member(conn: &Connection, group_id: i64, attendee_id: i64) -> AppResult<bool> {
    let n = conn.execute(
        "INSERT INTO group_members (group_id, attendee_id) VALUES (?1, ?2)
         ON CONFLICT DO NOTHING",
        params![group_id, attendee_id],
    )?;
    Ok(n == 1)
}

pub fn load_group_members(conn: &Connection, group_id: i64) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT attendee_id FROM group_members
         WHERE group_id = ?1
         ORDER BY attendee_id ASC",
    )?;
    let rows = stmt.query_map([group_id], |row| row.get::<_, i64>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

/// Insert or update the attendance of one attendee on one occurrence.
pub fn upsert_attendance(conn: &Connection, rec: &AttendanceRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance (occurrence_id, attendee_id, time_in, time_out, status, notes, location)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT (occurrence_id, attendee_id) DO UPDATE SET
             time_in = excluded.time_in,
             time_out = excluded.time_out,
             status = excluded.status,
             notes = excluded.notes,
             location = excluded.location",
        params![
            rec.occurrence_id,
            rec.attendee_id,
            rec.time_in_str(),
            rec.time_out_str(),
            rec.status.to_db_str(),
            rec.notes,
            rec.location,
        ],
    )?;
    Ok(())
}

pub fn count_attendance(conn: &Connection, occurrence_id: i64) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE occurrence_id = ?1",
        [occurrence_id],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn delete_attendance(conn: &Connection, occurrence_ids: &[i64]) -> AppResult<usize> {
    if occurrence_ids.is_empty() {
        return Ok(0);
    }
    let sql = format!(
        "DELETE FROM attendance WHERE occurrence_id IN ({})",
        placeholders(occurrence_ids.len())
    );
    let n = conn.execute(&sql, params_from_iter(occurrence_ids.iter()))?;
    Ok(n)
}

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub class_name: Option<String>,
    pub counselor_id: Option<i64>,
    pub attendee_id: Option<i64>,
}

pub fn load_report(conn: &Connection, filter: &ReportFilter) -> AppResult<Vec<ReportRow>> {
    let mut sql = String::from(
        "SELECT o.class_name, o.group_name, o.date, o.group_hours, o.location, o.counselor_id,
                att.full_name, att.code, a.status, a.time_in, a.time_out, a.notes
         FROM attendance a
         JOIN occurrences o ON a.occurrence_id = o.id
         JOIN attendees att ON a.attendee_id = att.id
         WHERE 1=1",
    );
    let mut values: Vec<Value> = Vec::new();

    if let Some(d) = &filter.from {
        sql.push_str(" AND o.date >= ?");
        values.push(Value::Text(date_to_db(d)));
    }
    if let Some(d) = &filter.to {
        sql.push_str(" AND o.date <= ?");
        values.push(Value::Text(date_to_db(d)));
    }
    if let Some(c) = &filter.class_name {
        sql.push_str(" AND o.class_name = ?");
        values.push(Value::Text(c.clone()));
    }
    if let Some(id) = filter.counselor_id {
        sql.push_str(" AND o.counselor_id = ?");
        values.push(Value::Integer(id));
    }
    if let Some(id) = filter.attendee_id {
        sql.push_str(" AND a.attendee_id = ?");
        values.push(Value::Integer(id));
    }
    sql.push_str(" ORDER BY o.date ASC, o.class_name ASC, att.full_name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), |row| {
        Ok(ReportRow {
            class_name: row.get(0)?,
            group_name: row.get(1)?,
            date: row.get(2)?,
            group_hours: row.get(3)?,
            location: row.get(4)?,
            counselor_id: row.get(5)?,
            attendee_name: row.get(6)?,
            attendee_code: row.get(7)?,
            status: row.get(8)?,
            time_in: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
            time_out: row
                .get::<_, Option<String>>(10)?
                .unwrap_or_else(|| "Not set".to_string()),
            notes: row.get(11)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
