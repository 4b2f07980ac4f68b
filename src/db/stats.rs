use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) OCCURRENCES
    //
    let total = count(pool, "SELECT COUNT(*) FROM occurrences")?;
    let anchors = count(pool, "SELECT COUNT(*) FROM occurrences WHERE recurring = 1")?;
    let locked = count(pool, "SELECT COUNT(*) FROM occurrences WHERE locked = 1")?;
    let series = count(
        pool,
        "SELECT COUNT(*) FROM (SELECT DISTINCT class_name, counselor_id FROM occurrences)",
    )?;

    println!("{}• Occurrences:{} {}{}{}", CYAN, RESET, GREEN, total, RESET);
    println!("    series:  {}", series);
    println!("    anchors: {}", anchors);
    println!("    locked:  {}", locked);

    //
    // 3) PEOPLE
    //
    let attendees = count(pool, "SELECT COUNT(*) FROM attendees")?;
    let links = count(pool, "SELECT COUNT(*) FROM roster_links")?;
    let records = count(pool, "SELECT COUNT(*) FROM attendance")?;

    println!("{}• Attendees:{} {}", CYAN, RESET, attendees);
    println!("{}• Roster links:{} {}", CYAN, RESET, links);
    println!("{}• Attendance records:{} {}", CYAN, RESET, records);

    //
    // 4) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM occurrences ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM occurrences ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
