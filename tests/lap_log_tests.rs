use lapchart::core::lap_log::{LapLog, derive_active_index};
use lapchart::errors::AppError;
use lapchart::models::category::Category;
use lapchart::models::lap::{LapField, LapId};

fn log_with(starts: &[u32]) -> LapLog {
    let mut log = LapLog::new();
    for s in starts {
        log.append(*s).expect("append");
    }
    log
}

#[test]
fn test_append_sets_previous_duration() {
    let mut log = log_with(&[0]);
    log.update_field(log.records()[0].id, LapField::Work("A".into()))
        .expect("edit");

    log.append(5).expect("append");

    let r = log.records();
    assert_eq!(r[0].duration_sec, 5);
    assert_eq!(r[1].duration_sec, 0);
    assert_eq!(r[0].display_time, "00:00");
    assert_eq!(r[1].display_time, "00:05");
    assert_eq!(r[0].work, "A");
    assert_eq!(log.active_index(), Some(1));
}

#[test]
fn test_append_not_after_last_is_rejected() {
    let mut log = log_with(&[0, 10]);
    let before = log.clone();

    let same = log.append(10);
    assert!(matches!(same, Err(AppError::LapTooEarly { .. })));

    let earlier = log.append(3);
    assert!(matches!(earlier, Err(AppError::LapTooEarly { .. })));

    assert_eq!(log, before);
    assert_eq!(log.len(), 2);
}

#[test]
fn test_too_early_error_reports_mmss() {
    let mut log = log_with(&[75]);
    let err = log.append(60).unwrap_err();

    assert_eq!(err.code(), "too_early");
    let msg = err.to_string();
    assert!(msg.contains("01:00"));
    assert!(msg.contains("01:15"));
}

#[test]
fn test_first_lap_at_any_second() {
    let mut log = LapLog::new();
    assert_eq!(log.active_index(), None);

    log.append(0).expect("first lap at zero");
    assert_eq!(log.len(), 1);
    assert_eq!(log.records()[0].category, Category::Manual);
}

#[test]
fn test_truncate_keeps_prefix_and_activates_it() {
    let mut log = log_with(&[0, 4, 9, 15]);

    let dropped = log.truncate(1);

    assert_eq!(dropped.len(), 2);
    assert_eq!(log.len(), 2);
    assert_eq!(log.active_index(), Some(1));
    assert_eq!(log.records()[1].duration_sec, 0);
    assert_eq!(log.records()[0].duration_sec, 4);
}

#[test]
fn test_truncate_past_end_is_clamped() {
    let mut log = log_with(&[0, 4]);
    let dropped = log.truncate(10);

    assert!(dropped.is_empty());
    assert_eq!(log.len(), 2);
    assert_eq!(log.active_index(), Some(1));
}

#[test]
fn test_ids_are_not_reused_after_truncate() {
    let mut log = log_with(&[0, 4, 9]);
    let dropped_id = log.records()[2].id;

    log.truncate(1);
    let new_id = log.append(12).expect("append");

    assert_ne!(new_id, dropped_id);
    assert!(new_id > dropped_id);
}

#[test]
fn test_id_floor_from_storage() {
    let stored = log_with(&[0, 4]).records().to_vec();
    let mut log = LapLog::from_records(stored).with_id_floor(10);

    assert_eq!(log.append(20).expect("append"), LapId(11));
}

#[test]
fn test_active_index_follows_playback() {
    let mut log = log_with(&[5, 10, 20]);

    assert_eq!(log.set_active_by_time(0.0), Some(0));
    assert_eq!(log.set_active_by_time(5.0), Some(0));
    assert_eq!(log.set_active_by_time(19.99), Some(1));
    assert_eq!(log.set_active_by_time(20.0), Some(2));
    assert_eq!(log.set_active_by_time(500.0), Some(2));
    assert_eq!(log.active().map(|l| l.start_sec), Some(20));

    assert_eq!(derive_active_index(&[], 12.0), None);
}

#[test]
fn test_update_field_by_stable_id() {
    let mut log = log_with(&[0, 3, 8]);
    let id = log.records()[1].id;

    log.update_field(id, LapField::Category(Category::Walk))
        .expect("category");
    log.update_field(id, LapField::KeyPoint("watch the edge".into()))
        .expect("key point");
    log.update_field(id, LapField::Reason("burr".into()))
        .expect("reason");

    let lap = &log.records()[1];
    assert_eq!(lap.category, Category::Walk);
    assert_eq!(lap.key_point, "watch the edge");
    assert_eq!(lap.key_point_reason, "burr");
    assert_eq!(lap.start_sec, 3);
    assert_eq!(lap.duration_sec, 5);
}

#[test]
fn test_update_field_unknown_id() {
    let mut log = log_with(&[0]);
    let res = log.update_field(LapId(99), LapField::Work("x".into()));
    assert!(matches!(res, Err(AppError::LapNotFound(_))));
}

#[test]
fn test_subtitle_of_active_lap() {
    let mut log = log_with(&[0, 6]);
    let id = log.records()[1].id;
    log.update_field(id, LapField::Work("tighten".into())).expect("work");
    log.update_field(id, LapField::Category(Category::Automatic))
        .expect("category");

    log.set_active_by_time(7.0);
    assert_eq!(
        log.active().and_then(|l| l.subtitle()),
        Some("【自動】tighten".to_string())
    );

    log.set_active_by_time(1.0);
    assert_eq!(log.active().and_then(|l| l.subtitle()), None);
}
