mod common;
use common::{count, d, memory_pool, seed_anchor, seed_attendees, seed_single};

use rattendance::core::generate::{GenerateLogic, candidate_dates};
use rattendance::db::queries::{OccurrenceFilter, list_occurrences, load_roster, replace_roster};

fn dates_of(pool: &rattendance::db::pool::DbPool, class_name: &str) -> Vec<String> {
    let filter = OccurrenceFilter {
        class_name: Some(class_name.to_string()),
        ..Default::default()
    };
    list_occurrences(&pool.conn, &filter)
        .expect("list")
        .iter()
        .map(|o| o.date_str())
        .collect()
}

#[test]
fn test_candidate_dates_include_the_horizon_day() {
    let out = candidate_dates(d("2025-05-21"), 7, d("2025-06-18"));
    assert_eq!(
        out,
        vec![d("2025-05-28"), d("2025-06-04"), d("2025-06-11"), d("2025-06-18")]
    );
    assert!(candidate_dates(d("2025-05-21"), 7, d("2025-05-27")).is_empty());
}

#[test]
fn test_weekly_anchor_is_filled_up_to_horizon() {
    let mut pool = memory_pool();
    seed_anchor(&pool, "Mindfulness", "2025-05-21", 7);

    let report = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 28)
        .expect("generate");

    assert_eq!(report.anchors, 1);
    assert_eq!(report.generated, 4);
    assert_eq!(report.skipped, 0);
    assert_eq!(
        dates_of(&pool, "Mindfulness"),
        vec!["2025-05-21", "2025-05-28", "2025-06-04", "2025-06-11", "2025-06-18"]
    );

    // Generated instances are not anchors and carry the anchor's details.
    let generated = count(
        &pool,
        "SELECT COUNT(*) FROM occurrences
         WHERE class_name = 'Mindfulness' AND recurring = 0 AND frequency IS NULL
           AND counselor_id = 7 AND location = 'Room A' AND group_hours = '10:00-11:00'",
    );
    assert_eq!(generated, 4);
}

#[test]
fn test_generation_is_idempotent() {
    let mut pool = memory_pool();
    seed_anchor(&pool, "Mindfulness", "2025-05-21", 7);

    GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 28).expect("first run");
    let second = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 28)
        .expect("second run");

    assert_eq!(second.generated, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM occurrences"), 5);
}

#[test]
fn test_rolling_horizon_only_adds_the_new_tail() {
    let mut pool = memory_pool();
    seed_anchor(&pool, "Mindfulness", "2025-05-21", 7);

    GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 28).expect("day 1");
    let next_week = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-28"), 28)
        .expect("day 8");

    assert_eq!(next_week.generated, 1);
    assert!(dates_of(&pool, "Mindfulness").contains(&"2025-06-25".to_string()));
}

#[test]
fn test_existing_occurrence_is_not_duplicated() {
    let mut pool = memory_pool();
    seed_anchor(&pool, "Mindfulness", "2025-05-21", 7);
    // Created by hand earlier, same series identity.
    seed_single(&pool, "Mindfulness", "2025-06-04", 7);

    let report = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 28)
        .expect("generate");

    assert_eq!(report.generated, 3);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM occurrences WHERE date = '2025-06-04'"),
        1
    );
}

#[test]
fn test_same_class_other_counselor_is_a_separate_series() {
    let mut pool = memory_pool();
    seed_anchor(&pool, "Mindfulness", "2025-05-21", 7);
    seed_anchor(&pool, "Mindfulness", "2025-05-21", 8);

    let report = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 14)
        .expect("generate");

    assert_eq!(report.generated, 4);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM occurrences WHERE counselor_id = 8"),
        3
    );
}

#[test]
fn test_roster_is_copied_to_generated_instances() {
    let mut pool = memory_pool();
    let anchor = seed_anchor(&pool, "Yoga", "2025-05-21", 3);
    let people = seed_attendees(&pool, 3);
    replace_roster(&pool.conn, anchor, &people).expect("roster");

    GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 14).expect("generate");

    let filter = OccurrenceFilter {
        class_name: Some("Yoga".into()),
        ..Default::default()
    };
    for occ in list_occurrences(&pool.conn, &filter).expect("list") {
        assert_eq!(load_roster(&pool.conn, occ.id).expect("roster"), people);
    }
}

#[test]
fn test_non_weekly_frequency_is_not_expanded() {
    let mut pool = memory_pool();
    let id = seed_anchor(&pool, "Art", "2025-05-21", 2);
    pool.conn
        .execute("UPDATE occurrences SET frequency = 'monthly' WHERE id = ?1", [id])
        .expect("set frequency");

    let report = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 60)
        .expect("generate");

    assert_eq!(report.anchors, 1);
    assert_eq!(report.generated, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM occurrences"), 1);
}

#[test]
fn test_anchor_beyond_horizon_is_ignored() {
    let mut pool = memory_pool();
    seed_anchor(&pool, "Late", "2025-08-01", 2);

    let report = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 28)
        .expect("generate");

    assert_eq!(report.anchors, 0);
    assert_eq!(report.generated, 0);
}

#[test]
fn test_bad_anchor_row_does_not_stop_the_others() {
    let mut pool = memory_pool();
    let broken = seed_anchor(&pool, "Broken", "2025-05-14", 1);
    pool.conn
        .execute("UPDATE occurrences SET date = '2025-05-1x' WHERE id = ?1", [broken])
        .expect("corrupt date");
    seed_anchor(&pool, "Mindfulness", "2025-05-21", 7);

    let report = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 28)
        .expect("generate");

    assert_eq!(report.anchors, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.generated, 4);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM log WHERE operation = 'generate_skip'"),
        1
    );
}

#[test]
fn test_zero_horizon_creates_nothing_for_todays_anchor() {
    let mut pool = memory_pool();
    seed_anchor(&pool, "Mindfulness", "2025-05-21", 7);

    let report = GenerateLogic::generate_missing_occurrences(&mut pool, d("2025-05-21"), 0)
        .expect("generate");

    assert_eq!(report.anchors, 1);
    assert_eq!(report.generated, 0);
}
