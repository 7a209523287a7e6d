mod common;

use common::laps;
use lapchart::core::calculator::rows::{build_rows, contributing_duration};
use lapchart::models::category::Category::{Automatic, Manual, Walk};
use lapchart::models::row::RowTotals;

#[test]
fn test_walk_folds_into_previous_manual() {
    // manual A 10 → walk 3 → manual B 7 (end marker at 20)
    let rows = build_rows(&laps(&[
        (0, Manual, "A"),
        (10, Walk, ""),
        (13, Manual, "B"),
        (20, Manual, "end"),
    ]));

    assert_eq!(rows.len(), 2);
    assert_eq!(
        (rows[0].no, rows[0].work_name.as_str(), rows[0].manual_sec, rows[0].walk_sec),
        (1, "A", 10, 3)
    );
    assert_eq!(
        (rows[1].no, rows[1].work_name.as_str(), rows[1].manual_sec, rows[1].walk_sec),
        (2, "B", 7, 0)
    );
}

#[test]
fn test_auto_folds_into_previous_manual_with_name() {
    let rows = build_rows(&laps(&[
        (0, Manual, "A"),
        (10, Automatic, " X "),
        (14, Manual, "B"),
        (20, Manual, "end"),
    ]));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].manual_sec, 10);
    assert_eq!(rows[0].auto_sec, 4);
    assert_eq!(rows[0].auto_names, vec!["X".to_string()]);
    assert_eq!(rows[1].manual_sec, 6);
    assert!(rows[1].auto_names.is_empty());
}

#[test]
fn test_consecutive_walks_accumulate() {
    let rows = build_rows(&laps(&[
        (0, Manual, "A"),
        (5, Walk, ""),
        (7, Walk, ""),
        (11, Automatic, ""),
        (12, Manual, "B"),
        (15, Manual, "end"),
    ]));

    assert_eq!(rows[0].walk_sec, 6);
    assert_eq!(rows[0].auto_sec, 1);
    // unnamed auto laps add time but no label
    assert!(rows[0].auto_names.is_empty());
}

#[test]
fn test_zero_duration_manual_is_omitted() {
    let rows = build_rows(&laps(&[
        (0, Manual, "A"),
        (4, Manual, "B"),
        (9, Manual, "C"),
    ]));

    // C is the last lap: duration 0
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.work_name != "C"));
}

#[test]
fn test_events_before_first_manual_are_dropped() {
    let rows = build_rows(&laps(&[
        (0, Walk, ""),
        (3, Automatic, "warmup"),
        (5, Manual, "A"),
        (9, Manual, "end"),
    ]));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].walk_sec, 0);
    assert_eq!(rows[0].auto_sec, 0);
    assert_eq!(rows[0].manual_sec, 4);
}

#[test]
fn test_walk_after_zero_manual_folds_onto_last_anchor() {
    // B has the same start as the walk: zero duration, never an anchor
    let rows = build_rows(&laps(&[
        (0, Manual, "A"),
        (6, Manual, "B"),
        (6, Walk, ""),
        (9, Manual, "C"),
        (12, Manual, "end"),
    ]));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].work_name, "A");
    assert_eq!(rows[0].walk_sec, 3);
    assert_eq!(rows[1].work_name, "C");
}

#[test]
fn test_no_manual_with_duration_gives_no_rows() {
    assert!(build_rows(&[]).is_empty());
    assert!(build_rows(&laps(&[(0, Walk, ""), (5, Automatic, "x")])).is_empty());
    assert!(build_rows(&laps(&[(0, Manual, "only")])).is_empty());
}

#[test]
fn test_row_totals_conserve_contributing_time() {
    let records = laps(&[
        (2, Walk, ""),
        (4, Manual, "A"),
        (9, Automatic, "press"),
        (21, Walk, ""),
        (24, Manual, "B"),
        (30, Manual, ""),
        (30, Automatic, "zero"),
        (33, Manual, "end"),
    ]);
    let rows = build_rows(&records);
    let totals = RowTotals::from_rows(&rows);

    assert_eq!(totals.total_sec(), contributing_duration(&records));
    assert_eq!(totals.total_sec(), 29);
    assert_eq!(totals.manual_sec, 11);
    assert_eq!(totals.auto_sec, 15);
    assert_eq!(totals.walk_sec, 3);
}
