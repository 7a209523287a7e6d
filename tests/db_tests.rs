use lapchart::core::lap_log::LapLog;
use lapchart::db::log::ttlog;
use lapchart::db::pool::DbPool;
use lapchart::db::queries::{load_project, max_lap_id, save_project};
use lapchart::models::category::Category;
use lapchart::models::lap::{LapField, LapId};
use lapchart::models::project::{Project, ProjectMeta};

fn sample_project() -> Project {
    let mut laps = LapLog::new();
    for s in [0, 5, 12, 20] {
        laps.append(s).expect("append");
    }
    let second = laps.records()[1].id;
    laps.update_field(second, LapField::Category(Category::Walk))
        .expect("edit");
    laps.update_field(second, LapField::Work("to press".into()))
        .expect("edit");

    Project {
        meta: ProjectMeta {
            process_name: "Assembly".into(),
            element_work_name: "Bracket".into(),
            video_path: "/videos/line1.mp4".into(),
            video_duration_sec: 95,
            takt_sec: 30.0,
        },
        laps,
    }
}

#[test]
fn test_fresh_database_has_empty_project() {
    let pool = DbPool::in_memory().expect("open");
    let project = load_project(&pool.conn).expect("load");

    assert!(project.laps.is_empty());
    assert_eq!(project.meta, ProjectMeta::default());
    assert_eq!(max_lap_id(&pool.conn).expect("seq"), 0);
}

#[test]
fn test_project_survives_save_and_load() {
    let mut pool = DbPool::in_memory().expect("open");
    let project = sample_project();

    pool.with_tx(|tx| save_project(tx, &project)).expect("save");
    let loaded = load_project(&pool.conn).expect("load");

    assert_eq!(loaded.meta, project.meta);
    assert_eq!(loaded.laps.records(), project.laps.records());
    assert_eq!(loaded.laps.records()[1].category, Category::Walk);
    assert_eq!(loaded.laps.records()[1].work, "to press");
    assert_eq!(loaded.laps.records()[2].duration_sec, 8);
}

#[test]
fn test_dropped_lap_ids_are_not_reused() {
    let mut pool = DbPool::in_memory().expect("open");
    let mut project = sample_project();
    pool.with_tx(|tx| save_project(tx, &project)).expect("save");

    // drop the last two laps, then store again
    let dropped = project.laps.truncate(1);
    assert_eq!(dropped.len(), 2);
    pool.with_tx(|tx| save_project(tx, &project)).expect("save");

    let mut reloaded = load_project(&pool.conn).expect("load");
    assert_eq!(reloaded.laps.len(), 2);
    assert_eq!(max_lap_id(&pool.conn).expect("seq"), 4);

    let id = reloaded.laps.append(30).expect("append");
    assert_eq!(id, LapId(5));
}

#[test]
fn test_migration_is_recorded_once() {
    let pool = DbPool::in_memory().expect("open");
    ttlog(&pool.conn, "lap", "1", "marked").expect("log");

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(applied, 1);
}
