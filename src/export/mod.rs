// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod legacy_csv;
pub mod logic;
pub mod model;
pub mod pdf;
mod pdf_export;
pub mod surface;
pub mod svg;
mod xlsx;

pub use logic::ExportLogic;
pub use model::{LapExport, ProjectPayload};
pub use surface::{RenderSurface, synthesize};

pub(crate) use fs_utils::{ensure_parent, ensure_writable};
pub(crate) use json_csv::read_json;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Output of `chart`, picked from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartFormat {
    Svg,
    Pdf,
}

impl ChartFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match crate::utils::path::extension_of(path).as_str() {
            "svg" => Some(ChartFormat::Svg),
            "pdf" => Some(ChartFormat::Pdf),
            _ => None,
        }
    }
}
