#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use lapchart::core::calculator::timeline::normalize;
use lapchart::models::category::Category;
use lapchart::models::lap::{LapId, LapRecord};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn lc() -> Command {
    cargo_bin_cmd!("lapchart")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_lapchart.sqlite", name));
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

/// Initialize a fresh DB and start a named project
pub fn init_project(db_path: &str) {
    lc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    lc().args([
        "--db", db_path, "new", "--process", "Assembly", "--element", "Bracket",
    ])
    .assert()
    .success();
}

/// Mark laps and annotate them: (second, category code, work name)
pub fn mark_laps(db_path: &str, laps: &[(u32, &str, &str)]) {
    for (i, (sec, cat, work)) in laps.iter().enumerate() {
        lc().args(["--db", db_path, "lap", &sec.to_string()])
            .assert()
            .success();

        let no = (i + 1).to_string();
        lc().args(["--db", db_path, "edit", &no, "--cat", cat, "--work", work])
            .assert()
            .success();
    }
}

/// Normalized in-memory laps: (start second, category, work name)
pub fn laps(entries: &[(u32, Category, &str)]) -> Vec<LapRecord> {
    let mut out: Vec<LapRecord> = entries
        .iter()
        .enumerate()
        .map(|(i, (start, cat, work))| {
            let mut lap = LapRecord::new(LapId(i as i64 + 1), *start);
            lap.category = *cat;
            lap.work = work.to_string();
            lap
        })
        .collect();
    normalize(&mut out);
    out
}
