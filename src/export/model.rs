// src/export/model.rs

use crate::models::category::Category;
use crate::models::lap::LapRecord;
use serde::{Deserialize, Deserializer, Serialize};

/// Canonical lap shape shared by exports, imports and project payloads.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LapExport {
    /// Absolute start second (delta to the next lap in legacy payloads).
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub sec: u32,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub dt: u32,
    #[serde(default)]
    pub work: String,
    #[serde(default)]
    pub cat: Category,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub reason: String,
}

impl From<&LapRecord> for LapExport {
    fn from(r: &LapRecord) -> Self {
        Self {
            sec: r.start_sec,
            dt: r.duration_sec,
            work: r.work.clone(),
            cat: r.category,
            key: r.key_point.clone(),
            reason: r.key_point_reason.clone(),
        }
    }
}

/// Project payload as exchanged in JSON.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[serde(default)]
    pub process_name: String,
    #[serde(default)]
    pub element_work_name: String,
    #[serde(default)]
    pub video_path: String,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub video_duration_sec: u32,
    #[serde(default)]
    pub laps: Vec<LapExport>,
}

/// Accept numbers, numeric strings or garbage; garbage becomes 0.
fn lenient_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => {
            crate::utils::time::clamp_seconds(n.as_f64().unwrap_or(0.0))
        }
        Some(serde_json::Value::String(s)) => {
            crate::core::calculator::timeline::parse_delta(&s)
        }
        _ => 0,
    })
}

pub(crate) fn laps_to_export(records: &[LapRecord]) -> Vec<LapExport> {
    records.iter().map(LapExport::from).collect()
}

/// Header for CSV / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["no", "time", "sec", "dt", "work", "cat", "key", "reason"]
}

/// One lap as a row of strings (XLSX / PDF tables).
pub(crate) fn lap_to_row(no: usize, r: &LapRecord) -> Vec<String> {
    vec![
        no.to_string(),
        r.display_time.clone(),
        r.start_sec.to_string(),
        r.duration_sec.to_string(),
        r.work.clone(),
        r.category.label().to_string(),
        r.key_point.clone(),
        r.key_point_reason.clone(),
    ]
}

pub(crate) fn laps_to_table(records: &[LapRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| lap_to_row(i + 1, r))
        .collect()
}
