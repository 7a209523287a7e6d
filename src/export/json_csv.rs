// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{LapExport, ProjectPayload};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Export the project payload (metadata + laps) as pretty JSON.
pub(crate) fn export_json(payload: &ProjectPayload, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(payload)
        .map_err(|e| AppError::from(io::Error::other(format!("JSON serialization error: {e}"))))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export laps as CSV (header from serde field names).
pub(crate) fn export_csv(laps: &[LapExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::from(io::Error::other(format!("CSV open error: {e}"))))?;

    for item in laps {
        wtr.serialize(item)
            .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
    }

    wtr.flush()
        .map_err(|e| AppError::from(io::Error::other(format!("CSV flush error: {e}"))))?;

    notify_export_success("CSV", path);
    Ok(())
}

/// Read a JSON payload: either a full project object or a bare lap array.
pub(crate) fn read_json(path: &Path) -> AppResult<ProjectPayload> {
    let text = fs::read_to_string(path)?;

    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| AppError::Import(format!("{}: {e}", path.display())))?;

    let payload = if value.is_array() {
        ProjectPayload {
            laps: serde_json::from_value(value)
                .map_err(|e| AppError::Import(format!("{}: {e}", path.display())))?,
            ..ProjectPayload::default()
        }
    } else {
        serde_json::from_value(value)
            .map_err(|e| AppError::Import(format!("{}: {e}", path.display())))?
    };

    Ok(payload)
}
