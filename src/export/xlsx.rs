// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, laps_to_table};
use crate::export::notify_export_success;
use crate::models::lap::LapRecord;
use crate::models::row::{Row, RowTotals};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const ROW_HEADERS: [&str; 6] = ["No", "作業名", "手作業", "自動", "歩行", "自動作業"];

/// Workbook with two sheets: the lap table and the standard-work rows built
/// from it (with a totals line).
pub(crate) fn export_xlsx(laps: &[LapRecord], rows: &[Row], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    let lap_sheet = workbook.add_worksheet();
    lap_sheet.set_name("Laps").map_err(to_io_app_error)?;
    write_table(lap_sheet, &get_headers(), &laps_to_table(laps))?;

    let row_sheet = workbook.add_worksheet();
    row_sheet.set_name("Rows").map_err(to_io_app_error)?;
    let mut table: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.no.to_string(),
                r.work_name.clone(),
                r.manual_sec.to_string(),
                r.auto_sec.to_string(),
                r.walk_sec.to_string(),
                r.auto_names.join(", "),
            ]
        })
        .collect();
    let totals = RowTotals::from_rows(rows);
    table.push(vec![
        String::new(),
        "合計".to_string(),
        totals.manual_sec.to_string(),
        totals.auto_sec.to_string(),
        totals.walk_sec.to_string(),
        String::new(),
    ]);
    write_table(row_sheet, &ROW_HEADERS, &table)?;

    workbook.save(path_str(path)?).map_err(to_io_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Header line, frozen pane, banded body and columns sized to their widest
/// (display-width) cell.
fn write_table(sheet: &mut Worksheet, headers: &[&str], rows: &[Vec<String>]) -> AppResult<()> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_io_app_error)?;
    }
    sheet.set_freeze_panes(1, 0).map_err(to_io_app_error)?;

    let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (i, values) in rows.iter().enumerate() {
        let band = if i % 2 == 0 {
            Color::RGB(0xEAF3FB)
        } else {
            Color::RGB(0xFFFFFF)
        };

        for (col, value) in values.iter().enumerate() {
            write_cell(sheet, (i + 1) as u32, col as u16, value, band)?;
            if let Some(w) = widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in widths.iter().enumerate() {
        sheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_io_app_error)?;
    }
    Ok(())
}

/// Integers go in as numbers (right aligned), everything else as text.
fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, s: &str, band: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(band)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Ok(n) = s.parse::<u32>() {
        sheet
            .write_with_format(row, col, n as f64, &base.set_align(FormatAlign::Right))
            .map_err(to_io_app_error)?;
    } else {
        sheet
            .write_with_format(row, col, s, &base)
            .map_err(to_io_app_error)?;
    }
    Ok(())
}

fn to_io_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::from(io::Error::other(e.to_string()))
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::from(io::Error::other("invalid path")))
}
