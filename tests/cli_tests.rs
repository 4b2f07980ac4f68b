use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{app, init_cli_db, setup_test_db, temp_out};

/// Two attendees, one group holding both, and a weekly Mindfulness anchor on
/// 2025-05-21 (id 1) expanded to 05-28, 06-04, 06-11, 06-18 (ids 2..5).
fn seed_mindfulness(db: &str) {
    init_cli_db(db);

    for (name, code) in [("Ann Lee", "A001"), ("Bob Roy", "B002")] {
        app()
            .args(["--db", db, "attendee", "add", "--name", name, "--code", code])
            .assert()
            .success();
    }

    app()
        .args(["--db", db, "group", "add", "--name", "Wednesday"])
        .assert()
        .success();
    for attendee in ["1", "2"] {
        app()
            .args(["--db", db, "group", "join", "--group", "1", "--attendee", attendee])
            .assert()
            .success();
    }

    app()
        .args([
            "--db",
            db,
            "add",
            "2025-05-21",
            "--class",
            "Mindfulness",
            "--group-name",
            "MBSR",
            "--hours",
            "10:00-11:30",
            "--counselor",
            "7",
            "--location",
            "Room A",
            "--recurring",
            "--today",
            "2025-05-21",
        ])
        .assert()
        .success()
        .stdout(contains("Occurrence #1 added"))
        .stdout(contains("4 future occurrence(s)"));
}

#[test]
fn test_add_recurring_fills_the_horizon() {
    let db = setup_test_db("cli_add_recurring");
    seed_mindfulness(&db);

    app()
        .args(["--db", &db, "list", "--class", "Mindfulness", "--json"])
        .assert()
        .success()
        .stdout(contains("2025-05-28"))
        .stdout(contains("2025-06-18"))
        .stdout(contains("2025-06-25").not());

    app()
        .args(["--db", &db, "generate", "--today", "2025-05-21"])
        .assert()
        .success()
        .stdout(contains("Generated 0 occurrence(s)"));

    app()
        .args(["--db", &db, "generate", "--today", "2025-05-28"])
        .assert()
        .success()
        .stdout(contains("Generated 1 occurrence(s)"));
}

#[test]
fn test_add_rejects_bad_input() {
    let db = setup_test_db("cli_add_bad_input");
    init_cli_db(&db);

    app()
        .args([
            "--db", &db, "add", "2025-13-01", "--class", "X", "--group-name", "G", "--hours",
            "10:00-11:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    app()
        .args([
            "--db", &db, "add", "2025-06-01", "--class", "X", "--group-name", "G", "--hours",
            "11:00-10:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time"));

    app()
        .args([
            "--db", &db, "add", "2025-06-01", "--class", "X", "--group-name", "G", "--hours",
            "10:00-11:00",
        ])
        .assert()
        .success();

    app()
        .args([
            "--db", &db, "add", "2025-06-01", "--class", "X", "--group-name", "G", "--hours",
            "10:00-11:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Conflict"));
}

#[test]
fn test_assign_group_reports_new_links() {
    let db = setup_test_db("cli_assign_group");
    seed_mindfulness(&db);

    app()
        .args(["--db", &db, "assign", "1", "--group", "1"])
        .assert()
        .success()
        .stdout(contains("2 attendee(s) added"));

    app()
        .args(["--db", &db, "assign", "1", "--group", "1"])
        .assert()
        .success()
        .stdout(contains("already on occurrence #1"));

    app()
        .args(["--db", &db, "unassign", "1", "--attendee", "2"])
        .assert()
        .success();

    app()
        .args(["--db", &db, "group", "add", "--name", "Empty"])
        .assert()
        .success();
    app()
        .args(["--db", &db, "assign", "1", "--group", "2"])
        .assert()
        .failure()
        .stderr(contains("has no members"));
}

#[test]
fn test_lock_rules_through_the_cli() {
    let db = setup_test_db("cli_lock_rules");
    seed_mindfulness(&db);

    // Counselors cannot lock, even their own sessions.
    app()
        .args(["--db", &db, "--role", "counselor", "--user", "7", "lock", "2"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));

    app()
        .args(["--db", &db, "lock", "2"])
        .assert()
        .success()
        .stdout(contains("locked"));

    // Owner hits the lock, a stranger hits ownership first.
    app()
        .args(["--db", &db, "--role", "counselor", "--user", "7", "del", "2", "-y"])
        .assert()
        .failure()
        .stderr(contains("is locked"));
    app()
        .args(["--db", &db, "--role", "counselor", "--user", "8", "del", "2", "-y"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));

    app()
        .args(["--db", &db, "unlock", "2"])
        .assert()
        .success();
    app()
        .args(["--db", &db, "--role", "counselor", "--user", "7", "del", "2", "-y"])
        .assert()
        .success()
        .stdout(contains("1 occurrence(s) deleted"));
}

#[test]
fn test_edit_propagates_and_skips_locked() {
    let db = setup_test_db("cli_edit_propagate");
    seed_mindfulness(&db);

    app().args(["--db", &db, "lock", "2"]).assert().success();

    app()
        .args([
            "--db",
            &db,
            "--role",
            "counselor",
            "--user",
            "7",
            "edit",
            "1",
            "--location",
            "Room B",
            "--propagate",
        ])
        .assert()
        .success()
        .stdout(contains("Propagated to 3 later occurrence(s)"))
        .stderr(contains("1 later occurrence(s) skipped"));

    let out = app()
        .args(["--db", &db, "list", "--json"])
        .output()
        .expect("list");
    assert!(out.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    let rows = listed.as_array().expect("array");
    assert_eq!(rows.len(), 5);
    for row in rows {
        let expected = if row["id"] == 2 { "Room A" } else { "Room B" };
        assert_eq!(row["location"], expected, "occurrence {}", row["id"]);
    }

    // Reassignment is reserved to admins.
    app()
        .args(["--db", &db, "--role", "counselor", "--user", "7", "edit", "3", "--counselor", "9"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));
}

#[test]
fn test_delete_future_cascades() {
    let db = setup_test_db("cli_delete_future");
    seed_mindfulness(&db);

    app()
        .args(["--db", &db, "assign", "3", "--group", "1"])
        .assert()
        .success();
    app()
        .args(["--db", &db, "attend", "3", "--attendee", "1", "--in", "10:00", "--out", "11:30"])
        .assert()
        .success();

    app()
        .args(["--db", &db, "del", "3", "--future", "--yes"])
        .assert()
        .success()
        .stdout(contains("3 occurrence(s) deleted"));

    app()
        .args(["--db", &db, "list", "--json"])
        .assert()
        .success()
        .stdout(contains("2025-05-28"))
        .stdout(contains("2025-06-04").not());

    app()
        .args(["--db", &db, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_report_export_and_scoping() {
    let db = setup_test_db("cli_report");
    seed_mindfulness(&db);
    let out = temp_out("cli_report", "csv");

    app()
        .args(["--db", &db, "assign", "1", "--group", "1"])
        .assert()
        .success();
    app()
        .args(["--db", &db, "attend", "1", "--attendee", "1", "--in", "10:00", "--out", "11:30"])
        .assert()
        .success();
    app()
        .args(["--db", &db, "attend", "1", "--attendee", "2", "--status", "Absent"])
        .assert()
        .success();

    app()
        .args(["--db", &db, "report", "--file", &out, "--format", "csv", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("csv written");
    assert!(content.starts_with("Class Name,"));
    assert!(content.contains("Ann Lee"));
    assert!(content.contains("Absent"));

    app()
        .args(["--db", &db, "--role", "counselor", "--user", "8", "report", "--counselor", "7"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));

    app()
        .args(["--db", &db, "--role", "counselor", "--user", "8", "report"])
        .assert()
        .success()
        .stdout(contains("No attendance records found."));
}

#[test]
fn test_log_records_operations() {
    let db = setup_test_db("cli_log");
    seed_mindfulness(&db);

    app()
        .args(["--db", &db, "generate", "--today", "2025-05-21"])
        .assert()
        .success();

    app()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("add"))
        .stdout(contains("generate"))
        .stdout(contains("init"));
}

#[test]
fn test_list_json_on_fresh_db_is_clean_json() {
    let db = setup_test_db("cli_fresh_json");

    // No `init`: the schema is created by this very command.
    let out = app()
        .args(["--db", &db, "list", "--json"])
        .output()
        .expect("list");
    assert!(out.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is pure json");
    assert_eq!(listed, serde_json::json!([]));
}
