mod common;

use common::laps;
use lapchart::core::calculator::timeline::{normalize, parse_delta, reconstruct_absolute};
use lapchart::models::category::Category::Manual;
use lapchart::models::lap::LapRecord;

#[test]
fn test_normalize_durations_and_display_times() {
    let out = laps(&[(12, Manual, "A"), (17, Manual, "B"), (95, Manual, "C")]);

    let durations: Vec<u32> = out.iter().map(|l| l.duration_sec).collect();
    let shown: Vec<&str> = out.iter().map(|l| l.display_time.as_str()).collect();

    assert_eq!(durations, vec![5, 78, 0]);
    assert_eq!(shown, vec!["00:00", "00:05", "01:23"]);
}

#[test]
fn test_normalize_is_idempotent() {
    let mut once = laps(&[(0, Manual, "A"), (7, Manual, "B"), (30, Manual, "C")]);
    let snapshot = once.clone();

    normalize(&mut once);
    assert_eq!(once, snapshot);
}

#[test]
fn test_normalize_out_of_order_gives_zero_duration() {
    let out = laps(&[(10, Manual, "A"), (4, Manual, "B"), (20, Manual, "C")]);

    assert_eq!(out[0].duration_sec, 0);
    assert_eq!(out[1].duration_sec, 16);
    assert_eq!(out[1].display_time, "00:00");
}

#[test]
fn test_normalize_empty_and_single() {
    let mut empty: Vec<LapRecord> = Vec::new();
    normalize(&mut empty);
    assert!(empty.is_empty());

    let one = laps(&[(42, Manual, "only")]);
    assert_eq!(one[0].duration_sec, 0);
    assert_eq!(one[0].display_time, "00:00");
}

#[test]
fn test_display_time_minutes_are_unbounded() {
    let out = laps(&[(0, Manual, "A"), (6001, Manual, "B")]);
    assert_eq!(out[1].display_time, "100:01");
}

#[test]
fn test_reconstruct_legacy_deltas() {
    assert_eq!(reconstruct_absolute(&[0, 5, 3]), vec![0, 0, 5]);
    assert_eq!(reconstruct_absolute(&[]), Vec::<u32>::new());
}

#[test]
fn test_reconstruct_then_normalize_restores_deltas() {
    let deltas = [4, 0, 9, 12, 1];
    let starts = reconstruct_absolute(&deltas);

    let entries: Vec<_> = starts.iter().map(|s| (*s, Manual, "")).collect();
    let out = laps(&entries);

    let durations: Vec<u32> = out.iter().map(|l| l.duration_sec).collect();
    assert_eq!(durations, vec![4, 0, 9, 12, 0]);
}

#[test]
fn test_parse_delta_is_defensive() {
    assert_eq!(parse_delta("7"), 7);
    assert_eq!(parse_delta(" 3.9 "), 3);
    assert_eq!(parse_delta("-2"), 0);
    assert_eq!(parse_delta("abc"), 0);
    assert_eq!(parse_delta(""), 0);
    assert_eq!(parse_delta("NaN"), 0);
}
