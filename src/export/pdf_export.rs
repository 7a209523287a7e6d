// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, laps_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::models::lap::LapRecord;
use crate::ui::messages::info;
use std::io;
use std::path::Path;

/// Lap table as a paginated PDF.
pub(crate) fn export_pdf(laps: &[LapRecord], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let table = laps_to_table(laps);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &headers, &table);

    pdf.save(path)
        .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))?;

    notify_export_success("PDF", path);
    Ok(())
}
