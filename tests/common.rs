#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rattendance::db::initialize::init_db;
use rattendance::db::pool::DbPool;
use rattendance::db::queries::{add_group_member, insert_attendee, insert_group, insert_occurrence};
use rattendance::models::frequency::Frequency;
use rattendance::models::occurrence::{Occurrence, SessionDetails};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn app() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB through the CLI (`--test init` does not touch the config file)
pub fn init_cli_db(db_path: &str) {
    app()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// In-memory database with the full schema
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn details(class_name: &str) -> SessionDetails {
    SessionDetails {
        group_name: format!("{} group", class_name),
        class_name: class_name.to_string(),
        group_hours: "10:00-11:00".to_string(),
        group_type: "Therapy".to_string(),
        notes: String::new(),
        location: "Room A".to_string(),
    }
}

/// Store a weekly anchor directly, without expanding it.
pub fn seed_anchor(pool: &DbPool, class_name: &str, date: &str, counselor_id: i64) -> i64 {
    let occ = Occurrence::new(
        details(class_name),
        d(date),
        counselor_id,
        true,
        Some(Frequency::Weekly),
    );
    insert_occurrence(&pool.conn, &occ).expect("insert anchor")
}

/// Store a plain (non-recurring) occurrence.
pub fn seed_single(pool: &DbPool, class_name: &str, date: &str, counselor_id: i64) -> i64 {
    let occ = Occurrence::new(details(class_name), d(date), counselor_id, false, None);
    insert_occurrence(&pool.conn, &occ).expect("insert occurrence")
}

pub fn seed_attendees(pool: &DbPool, n: usize) -> Vec<i64> {
    (0..n)
        .map(|i| {
            insert_attendee(&pool.conn, &format!("Attendee {}", i), &format!("A{:03}", i), "")
                .expect("insert attendee")
        })
        .collect()
}

pub fn seed_group(pool: &DbPool, name: &str, members: &[i64]) -> i64 {
    let id = insert_group(&pool.conn, name, "").expect("insert group");
    for m in members {
        add_group_member(&pool.conn, id, *m).expect("add member");
    }
    id
}

pub fn count(pool: &DbPool, sql: &str) -> i64 {
    pool.conn
        .query_row(sql, [], |row| row.get(0))
        .expect("count query")
}
