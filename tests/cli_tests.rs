mod common;

use common::{init_project, lc, mark_laps, setup_test_db, temp_out};
use predicates::str::contains;
use serde_json::Value;
use std::fs;

#[test]
fn test_lap_and_list() {
    let db_path = setup_test_db("cli_lap_list");
    init_project(&db_path);

    lc().args(["--db", &db_path, "lap", "12"])
        .assert()
        .success()
        .stdout(contains("Lap 1 marked at 00:00"));

    lc().args(["--db", &db_path, "lap", "00:17.6"])
        .assert()
        .success()
        .stdout(contains("Lap 2 marked at 00:05 (17s)"));

    lc().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Assembly / Bracket"))
        .stdout(contains("00:05"))
        .stdout(contains("2 laps, span 00:05"));
}

#[test]
fn test_lap_too_early_is_informational() {
    let db_path = setup_test_db("cli_too_early");
    init_project(&db_path);

    lc().args(["--db", &db_path, "lap", "10"]).assert().success();

    lc().args(["--db", &db_path, "lap", "10"])
        .assert()
        .success()
        .stdout(contains("too early"));

    lc().args(["--db", &db_path, "lap", "4"])
        .assert()
        .success()
        .stdout(contains("too early"));

    lc().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("1 laps"));
}

#[test]
fn test_invalid_playback_position() {
    let db_path = setup_test_db("cli_bad_position");
    init_project(&db_path);

    lc().args(["--db", &db_path, "lap", "soon"])
        .assert()
        .failure()
        .stderr(contains("Invalid seconds value"));
}

#[test]
fn test_redo_drops_later_laps() {
    let db_path = setup_test_db("cli_redo");
    init_project(&db_path);

    for sec in ["0", "4", "9", "15"] {
        lc().args(["--db", &db_path, "lap", sec]).assert().success();
    }

    lc().args(["--db", &db_path, "redo", "2"])
        .assert()
        .success()
        .stdout(contains("2 later lap(s) dropped"));

    lc().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2 laps, span 00:04"));

    // marking continues after the kept laps
    lc().args(["--db", &db_path, "lap", "6"])
        .assert()
        .success()
        .stdout(contains("Lap 3 marked"));

    lc().args(["--db", &db_path, "redo", "9"])
        .assert()
        .failure()
        .stderr(contains("Invalid lap number: 9"));
}

#[test]
fn test_edit_and_rows() {
    let db_path = setup_test_db("cli_rows");
    init_project(&db_path);

    mark_laps(
        &db_path,
        &[(0, "m", "A"), (10, "w", "walk"), (13, "m", "B"), (20, "m", "end")],
    );

    lc().args(["--db", &db_path, "rows"])
        .assert()
        .success()
        .stdout(contains("合計"))
        .stdout(contains("2 rows, operator time 20s (timeline 20s)"));

    lc().args(["--db", &db_path, "edit", "1", "--cat", "x"])
        .assert()
        .failure()
        .stderr(contains("Invalid category"));
}

#[test]
fn test_list_marks_lap_under_playback() {
    let db_path = setup_test_db("cli_list_at");
    init_project(&db_path);

    mark_laps(&db_path, &[(0, "m", "pick"), (10, "w", "to press"), (13, "m", "place")]);

    lc().args(["--db", &db_path, "list", "--at", "11.5"])
        .assert()
        .success()
        .stdout(contains("▶ 00:11  【歩行】to press"));
}

#[test]
fn test_new_rejects_bad_video() {
    let db_path = setup_test_db("cli_bad_video");
    init_project(&db_path);

    let avi = temp_out("cli_bad_video", "avi");
    fs::write(&avi, b"not a video").expect("write");

    lc().args(["--db", &db_path, "new", "--video", &avi])
        .assert()
        .failure()
        .stderr(contains("unsupported_ext"));

    let missing = temp_out("cli_missing_video", "mp4");
    lc().args(["--db", &db_path, "new", "--video", &missing])
        .assert()
        .failure()
        .stderr(contains("file_not_found"));

    let mp4 = temp_out("cli_good_video", "mp4");
    fs::write(&mp4, b"fake").expect("write");
    lc().args([
        "--db", &db_path, "new", "--video", &mp4, "--duration", "01:35",
    ])
    .assert()
    .success()
    .stdout(contains("01:35"));
}

#[test]
fn test_chart_svg_and_pdf() {
    let db_path = setup_test_db("cli_chart");
    init_project(&db_path);
    mark_laps(
        &db_path,
        &[(0, "m", "A"), (10, "a", "press"), (14, "m", "B"), (20, "m", "end")],
    );

    let svg = temp_out("cli_chart", "svg");
    lc().args(["--db", &db_path, "chart", "--file", &svg, "--takt", "30"])
        .assert()
        .success()
        .stdout(contains("2 rows, takt 30s"));

    let content = fs::read_to_string(&svg).expect("svg");
    assert!(content.starts_with("<svg"));
    assert!(content.contains("press"));

    let pdf = temp_out("cli_chart", "pdf");
    lc().args(["--db", &db_path, "chart", "--file", &pdf])
        .assert()
        .success()
        .stdout(contains("takt 20s"));
    assert!(fs::read(&pdf).expect("pdf").starts_with(b"%PDF"));

    let png = temp_out("cli_chart", "png");
    lc().args(["--db", &db_path, "chart", "--file", &png])
        .assert()
        .failure()
        .stderr(contains("Export format not supported"));
}

#[test]
fn test_chart_without_rows() {
    let db_path = setup_test_db("cli_chart_empty");
    init_project(&db_path);

    let svg = temp_out("cli_chart_empty", "svg");
    lc().args(["--db", &db_path, "chart", "--file", &svg])
        .assert()
        .success()
        .stdout(contains("grid only"));
    assert!(fs::metadata(&svg).is_ok());
}

#[test]
fn test_export_json_payload() {
    let db_path = setup_test_db("cli_export_json");
    init_project(&db_path);
    mark_laps(&db_path, &[(3, "m", "A"), (8, "w", ""), (11, "m", "B")]);

    let out = temp_out("cli_export_json", "json");
    lc().args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let v: Value = serde_json::from_str(&fs::read_to_string(&out).expect("json")).expect("parse");
    assert_eq!(v["processName"], "Assembly");
    assert_eq!(v["laps"].as_array().map(|a| a.len()), Some(3));
    assert_eq!(v["laps"][0]["sec"], 3);
    assert_eq!(v["laps"][0]["dt"], 5);
    assert_eq!(v["laps"][1]["cat"], "歩行");
}

#[test]
fn test_export_other_formats() {
    let db_path = setup_test_db("cli_export_formats");
    init_project(&db_path);
    mark_laps(&db_path, &[(0, "m", "A"), (6, "m", "B")]);

    for fmt in ["csv", "xlsx", "pdf"] {
        let out = temp_out("cli_export_formats", fmt);
        lc().args(["--db", &db_path, "export", "--format", fmt, "--file", &out])
            .assert()
            .success();
        assert!(fs::metadata(&out).map(|m| m.len() > 0).unwrap_or(false));
    }

    let csv = fs::read_to_string(temp_out_path("cli_export_formats", "csv")).expect("csv");
    assert!(csv.starts_with("sec,dt,work,cat,key,reason"));
}

fn temp_out_path(name: &str, ext: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}_out.{}", name, ext))
}

#[test]
fn test_existing_output_needs_force() {
    let db_path = setup_test_db("cli_force");
    init_project(&db_path);
    mark_laps(&db_path, &[(0, "m", "A"), (6, "m", "B")]);

    let out = temp_out("cli_force", "json");
    fs::write(&out, "{}").expect("write");

    lc().args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    lc().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--force",
    ])
    .assert()
    .success();
}

#[test]
fn test_save_and_import_project_file() {
    let db_path = setup_test_db("cli_save_import");
    init_project(&db_path);
    mark_laps(
        &db_path,
        &[
            (5, "m", "A"),
            (15, "w", ""),
            (18, "a", "press"),
            (25, "m", "B"),
            (30, "m", "end"),
        ],
    );

    let file = temp_out("cli_save_import", "csv");
    lc().args(["--db", &db_path, "save", "--file", &file])
        .assert()
        .success()
        .stdout(contains("5 laps"));

    lc().args(["--db", &db_path, "new", "--process", "Other"])
        .assert()
        .success()
        .stdout(contains("5 laps of the previous project were discarded"));

    lc().args(["--db", &db_path, "import", &file])
        .assert()
        .success()
        .stdout(contains("Imported 5 laps"));

    lc().args(["--db", &db_path, "rows"])
        .assert()
        .success()
        .stdout(contains("Assembly / Bracket"))
        .stdout(contains("press"))
        .stdout(contains("2 rows, operator time 25s"));
}

#[test]
fn test_import_legacy_json() {
    let db_path = setup_test_db("cli_import_legacy");
    init_project(&db_path);

    let file = temp_out("cli_import_legacy", "json");
    fs::write(
        &file,
        r#"[{"sec":0,"work":"A"},{"sec":5,"work":"B"},{"sec":3,"work":"C"}]"#,
    )
    .expect("write");

    lc().args(["--db", &db_path, "import", &file, "--legacy"])
        .assert()
        .success();

    lc().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("3 laps, span 00:05"));

    let bad = temp_out("cli_import_legacy", "txt");
    fs::write(&bad, "x").expect("write");
    lc().args(["--db", &db_path, "import", &bad])
        .assert()
        .failure()
        .stderr(contains("unsupported_ext"));
}

#[test]
fn test_import_sorts_laps_by_start() {
    let db_path = setup_test_db("cli_import_unsorted");
    init_project(&db_path);

    let file = temp_out("cli_import_unsorted", "json");
    fs::write(
        &file,
        r#"[{"sec":0,"work":"A"},{"sec":12,"work":"C"},{"sec":5,"work":"B"}]"#,
    )
    .expect("write");

    lc().args(["--db", &db_path, "import", &file])
        .assert()
        .success()
        .stdout(contains("sorted by start time"))
        .stdout(contains("Imported 3 laps"));

    let out = temp_out("cli_import_unsorted_out", "json");
    lc().args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let v: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read")).expect("json");
    let works: Vec<&str> = v["laps"]
        .as_array()
        .expect("laps")
        .iter()
        .map(|l| l["work"].as_str().unwrap_or(""))
        .collect();
    assert_eq!(works, vec!["A", "B", "C"]);
}

#[test]
fn test_activity_log() {
    let db_path = setup_test_db("cli_log");
    init_project(&db_path);
    lc().args(["--db", &db_path, "lap", "0"]).assert().success();

    lc().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("new"))
        .stdout(contains("lap"));
}
