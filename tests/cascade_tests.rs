mod common;
use common::{count, memory_pool, seed_anchor, seed_attendees, seed_single};

use chrono::NaiveTime;
use rattendance::core::attendance::AttendanceLogic;
use rattendance::core::del::{DeleteLogic, DeleteScope};
use rattendance::core::lock::LockLogic;
use rattendance::db::pool::DbPool;
use rattendance::db::queries::{load_occurrence, replace_roster};
use rattendance::errors::AppError;
use rattendance::models::attendance::{AttendanceRecord, AttendanceStatus};
use rattendance::models::role::Principal;

fn attend(pool: &mut DbPool, occurrence_id: i64, attendee_id: i64) {
    let rec = AttendanceRecord {
        occurrence_id,
        attendee_id,
        time_in: NaiveTime::from_hms_opt(10, 0, 0),
        time_out: NaiveTime::from_hms_opt(11, 0, 0),
        status: AttendanceStatus::Present,
        notes: String::new(),
        location: String::new(),
    };
    AttendanceLogic::record(pool, &Principal::admin(1), &rec).expect("attendance");
}

/// Four weekly sessions, each with two attendees and their attendance.
fn seed_full_series(pool: &mut DbPool) -> Vec<i64> {
    let people = seed_attendees(pool, 2);
    let ids = vec![
        seed_anchor(pool, "Grief", "2025-06-04", 4),
        seed_single(pool, "Grief", "2025-06-11", 4),
        seed_single(pool, "Grief", "2025-06-18", 4),
        seed_single(pool, "Grief", "2025-06-25", 4),
    ];
    for id in &ids {
        replace_roster(&pool.conn, *id, &people).expect("roster");
        for p in &people {
            attend(pool, *id, *p);
        }
    }
    ids
}

fn orphans(pool: &DbPool) -> i64 {
    count(
        pool,
        "SELECT
            (SELECT COUNT(*) FROM roster_links r
              WHERE NOT EXISTS (SELECT 1 FROM occurrences o WHERE o.id = r.occurrence_id))
          + (SELECT COUNT(*) FROM attendance a
              WHERE NOT EXISTS (SELECT 1 FROM occurrences o WHERE o.id = a.occurrence_id))",
    )
}

#[test]
fn test_single_delete_removes_children() {
    let mut pool = memory_pool();
    let ids = seed_full_series(&mut pool);

    let outcome = DeleteLogic::delete_occurrence(&mut pool, ids[1], &Principal::counselor(4), DeleteScope::Single)
        .expect("delete");

    assert_eq!(outcome.deleted, 1);
    assert!(load_occurrence(&pool.conn, ids[1]).expect("load").is_none());
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM occurrences"), 3);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM roster_links"), 6);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM attendance"), 6);
    assert_eq!(orphans(&pool), 0);
}

#[test]
fn test_this_and_future_keeps_the_past() {
    let mut pool = memory_pool();
    let ids = seed_full_series(&mut pool);

    let outcome =
        DeleteLogic::delete_occurrence(&mut pool, ids[2], &Principal::counselor(4), DeleteScope::ThisAndFuture)
            .expect("delete");

    assert_eq!(outcome.deleted, 2);
    assert_eq!(outcome.skipped, 0);
    assert!(load_occurrence(&pool.conn, ids[0]).expect("load").is_some());
    assert!(load_occurrence(&pool.conn, ids[1]).expect("load").is_some());
    assert!(load_occurrence(&pool.conn, ids[3]).expect("load").is_none());
    assert_eq!(orphans(&pool), 0);
}

#[test]
fn test_this_and_future_from_anchor_removes_whole_series_only() {
    let mut pool = memory_pool();
    let ids = seed_full_series(&mut pool);
    let other = seed_single(&pool, "Grief", "2025-06-18", 9);

    let outcome =
        DeleteLogic::delete_occurrence(&mut pool, ids[0], &Principal::admin(1), DeleteScope::ThisAndFuture)
            .expect("delete");

    assert_eq!(outcome.deleted, 4);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM occurrences"), 1);
    assert!(load_occurrence(&pool.conn, other).expect("load").is_some());
    assert_eq!(orphans(&pool), 0);
}

#[test]
fn test_locked_later_occurrence_survives_series_delete() {
    let mut pool = memory_pool();
    let ids = seed_full_series(&mut pool);
    LockLogic::toggle_lock(&mut pool, ids[3], &Principal::admin(1), true).expect("lock");

    let outcome =
        DeleteLogic::delete_occurrence(&mut pool, ids[1], &Principal::counselor(4), DeleteScope::ThisAndFuture)
            .expect("delete");

    assert_eq!(outcome.deleted, 2);
    assert_eq!(outcome.skipped, 1);
    assert!(load_occurrence(&pool.conn, ids[3]).expect("load").is_some());
    assert_eq!(
        count(&pool, &format!("SELECT COUNT(*) FROM attendance WHERE occurrence_id = {}", ids[3])),
        2
    );
    assert_eq!(orphans(&pool), 0);
}

#[test]
fn test_locked_target_cannot_be_deleted() {
    let mut pool = memory_pool();
    let ids = seed_full_series(&mut pool);
    LockLogic::toggle_lock(&mut pool, ids[1], &Principal::admin(1), true).expect("lock");

    for scope in [DeleteScope::Single, DeleteScope::ThisAndFuture] {
        let err = DeleteLogic::delete_occurrence(&mut pool, ids[1], &Principal::admin(1), scope)
            .expect_err("locked");
        assert!(matches!(err, AppError::Locked(_)));
    }
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM occurrences"), 4);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM attendance"), 8);
}

#[test]
fn test_owner_cannot_delete_locked_target() {
    let mut pool = memory_pool();
    let ids = seed_full_series(&mut pool);
    LockLogic::toggle_lock(&mut pool, ids[0], &Principal::admin(1), true).expect("lock");

    for scope in [DeleteScope::Single, DeleteScope::ThisAndFuture] {
        let err = DeleteLogic::delete_occurrence(&mut pool, ids[0], &Principal::counselor(4), scope)
            .expect_err("locked");
        assert!(matches!(err, AppError::Locked(id) if id == ids[0]));
    }
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM occurrences"), 4);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM roster_links"), 8);
    assert_eq!(orphans(&pool), 0);
}

#[test]
fn test_delete_requires_ownership() {
    let mut pool = memory_pool();
    let ids = seed_full_series(&mut pool);

    let err = DeleteLogic::delete_occurrence(&mut pool, ids[0], &Principal::counselor(5), DeleteScope::Single)
        .expect_err("not owner");
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = DeleteLogic::delete_occurrence(&mut pool, 4242, &Principal::admin(1), DeleteScope::Single)
        .expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_delete_is_logged() {
    let mut pool = memory_pool();
    let ids = seed_full_series(&mut pool);
    DeleteLogic::delete_occurrence(&mut pool, ids[3], &Principal::admin(1), DeleteScope::Single)
        .expect("delete");

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM log WHERE operation = 'del'"), 1);
}
