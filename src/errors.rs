//! Unified application error type.
//! All modules (db, core, cli, export, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid seconds value: {0}")]
    InvalidSeconds(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    // ---------------------------
    // Lap log errors
    // ---------------------------
    #[error("Lap at {candidate} is too early: the previous lap starts at {last}")]
    LapTooEarly { candidate: String, last: String },

    #[error("Lap not found: {0}")]
    LapNotFound(String),

    #[error("Invalid lap number: {0}")]
    InvalidLapNumber(usize),

    // ---------------------------
    // Path validation (video / project files)
    // ---------------------------
    #[error("Unsupported file extension: {0}")]
    UnsupportedExt(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Empty path")]
    EmptyPath,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Import / export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Discriminant reported to the user for collaborator failures.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnsupportedExt(_) => "unsupported_ext",
            AppError::FileNotFound(_) => "file_not_found",
            AppError::EmptyPath => "empty_path",
            AppError::LapTooEarly { .. } => "too_early",
            _ => "other",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
