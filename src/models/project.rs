use super::row::Row;
use crate::core::lap_log::LapLog;
use serde::Serialize;

/// Project metadata (⇔ the singleton `project` row).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectMeta {
    pub process_name: String,
    pub element_work_name: String,
    pub video_path: String,
    pub video_duration_sec: u32,
    pub takt_sec: f64,
}

/// The working project: metadata plus the lap log it describes.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub meta: ProjectMeta,
    pub laps: LapLog,
}

/// Input handed to the chart synthesizer.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSheet {
    pub process_name: String,
    pub element_work_name: String,
    pub video_duration_sec: u32,
    /// 0 = use the total timeline duration.
    pub takt_sec: f64,
    pub rows: Vec<Row>,
}
