// src/export/legacy_csv.rs
//
// Project file in the layout of the spreadsheet template the tool grew out of:
//
//   R1C2  process name
//   R2C2  element-work name
//   R3C2  video path
//   R11   header  (C2..C8: No, 作業名, 区分, Time, 秒, 急所, 急所の理由)
//   R12.. one lap per row; Time = absolute start as an Excel time serial,
//         秒 = duration of the lap (delta to the next one)
//
// Files are cp932, like the spreadsheets they come from. Text cp932 cannot
// hold is written as UTF-8 with a BOM instead.

use crate::core::calculator::timeline::{parse_delta, reconstruct_absolute};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_parent;
use crate::models::category::Category;
use crate::models::lap::{LapId, LapRecord};
use crate::models::project::ProjectMeta;
use crate::utils::time::sec_to_excel_serial;
use encoding_rs::{SHIFT_JIS, UTF_8};
use std::fs;
use std::io;
use std::path::Path;

const COLS: usize = 8;
const HEADER_ROW: usize = 11;
const FIRST_DATA_ROW: usize = 12;
const HEADERS: [&str; 7] = ["No", "作業名", "区分", "Time", "秒", "急所", "急所の理由"];
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A project read back from a legacy file: metadata plus laps whose absolute
/// starts were rebuilt from the stored durations.
#[derive(Debug, Clone)]
pub struct OpenedProject {
    pub meta: ProjectMeta,
    pub laps: Vec<LapRecord>,
}

/// Grow `rows` so that row `r` (1-based) exists with at least `COLS` cells.
fn ensure_row(rows: &mut Vec<Vec<String>>, r: usize) -> &mut Vec<String> {
    while rows.len() < r {
        rows.push(vec![String::new(); COLS]);
    }
    &mut rows[r - 1]
}

/// Cell (1-based row / column), "" when outside the sheet.
fn cell(rows: &[Vec<String>], r: usize, c: usize) -> &str {
    rows.get(r.wrapping_sub(1))
        .and_then(|row| row.get(c.wrapping_sub(1)))
        .map(|s| s.as_str())
        .unwrap_or("")
}

/// Write the project to `path`. Laps must be normalized.
pub fn save(path: &Path, meta: &ProjectMeta, laps: &[LapRecord]) -> AppResult<()> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    ensure_row(&mut rows, 1)[1] = meta.process_name.clone();
    ensure_row(&mut rows, 2)[1] = meta.element_work_name.clone();
    ensure_row(&mut rows, 3)[1] = meta.video_path.clone();

    let header = ensure_row(&mut rows, HEADER_ROW);
    for (i, h) in HEADERS.iter().enumerate() {
        header[i + 1] = h.to_string();
    }

    for (i, lap) in laps.iter().enumerate() {
        let row = ensure_row(&mut rows, FIRST_DATA_ROW + i);
        row[1] = (i + 1).to_string();
        row[2] = lap.work.trim().to_string();
        row[3] = lap.category.label().to_string();
        row[4] = sec_to_excel_serial(lap.start_sec);
        row[5] = lap.duration_sec.to_string();
        row[6] = lap.key_point.trim().to_string();
        row[7] = lap.key_point_reason.trim().to_string();
    }

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in &rows {
        wtr.write_record(row).map_err(csv_write_error)?;
    }
    let bytes = wtr.into_inner().map_err(csv_write_error)?;
    let text = String::from_utf8(bytes).map_err(csv_write_error)?;

    ensure_parent(path)?;
    fs::write(path, encode_text(&text))?;

    Ok(())
}

fn csv_write_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::from(io::Error::other(format!("CSV write error: {e}")))
}

/// cp932 bytes of `text`, or BOM + UTF-8 when some character has no cp932
/// code.
fn encode_text(text: &str) -> Vec<u8> {
    let (encoded, _, unmappable) = SHIFT_JIS.encode(text);
    if !unmappable {
        return encoded.into_owned();
    }
    let mut out = UTF8_BOM.to_vec();
    out.extend_from_slice(text.as_bytes());
    out
}

/// Text of a project file. A BOM or well-formed UTF-8 means UTF-8; anything
/// else is read as cp932.
fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return UTF_8.decode_without_bom_handling(rest).0.into_owned();
    }
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return text.into_owned();
    }
    SHIFT_JIS.decode_without_bom_handling(bytes).0.into_owned()
}

/// Read a project file. Blank data rows are skipped, unknown categories
/// become manual work, unreadable durations count as 0.
pub fn open(path: &Path) -> AppResult<OpenedProject> {
    if !path.is_file() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }

    let text = decode_text(&fs::read(path)?);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| AppError::Import(format!("{}: {e}", path.display())))?;
        rows.push(rec.iter().map(str::to_string).collect());
    }

    let meta = ProjectMeta {
        process_name: cell(&rows, 1, 2).trim().to_string(),
        element_work_name: cell(&rows, 2, 2).trim().to_string(),
        video_path: cell(&rows, 3, 2).trim().to_string(),
        ..ProjectMeta::default()
    };

    let mut laps = Vec::new();
    let mut deltas = Vec::new();

    for r in FIRST_DATA_ROW..=rows.len() {
        let cells: Vec<&str> = (2..=COLS).map(|c| cell(&rows, r, c).trim()).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }

        let mut lap = LapRecord::new(LapId(laps.len() as i64 + 1), 0);
        lap.work = cells[1].to_string();
        lap.category = Category::from_label(cells[2]);
        lap.key_point = cells[5].to_string();
        lap.key_point_reason = cells[6].to_string();

        deltas.push(parse_delta(cells[4]));
        laps.push(lap);
    }

    for (lap, start) in laps.iter_mut().zip(reconstruct_absolute(&deltas)) {
        lap.start_sec = start;
    }

    Ok(OpenedProject { meta, laps })
}
