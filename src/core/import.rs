use crate::core::calculator::timeline::reconstruct_absolute;
use crate::core::lap_log::LapLog;
use crate::core::project::ProjectLogic;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::max_lap_id;
use crate::errors::{AppError, AppResult};
use crate::export::model::LapExport;
use crate::export::{legacy_csv, read_json};
use crate::models::lap::{LapId, LapRecord};
use crate::models::project::{Project, ProjectMeta};
use crate::ui::messages::{success, warning};
use crate::utils::path::{expand_tilde, extension_of};

pub struct ImportLogic;

impl ImportLogic {
    /// Replace the working project with the content of `file`.
    ///
    /// - `.csv`: project file in the legacy spreadsheet layout
    /// - `.json`: project payload or bare lap array; with `legacy` the `sec`
    ///   field holds per-lap deltas and absolute starts are rebuilt first
    ///
    /// Laps are stored in start order. Input listed out of order is sorted
    /// (stable for equal starts) and a warning says so.
    pub fn import(pool: &mut DbPool, file: &str, legacy: bool) -> AppResult<()> {
        let path = expand_tilde(file);
        if !path.is_file() {
            return Err(AppError::FileNotFound(path.display().to_string()));
        }

        let current = ProjectLogic::load(pool)?;

        let (meta, laps) = match extension_of(&path).as_str() {
            "csv" => {
                let opened = legacy_csv::open(&path)?;
                (opened.meta, opened.laps)
            }
            "json" => {
                let payload = read_json(&path)?;
                let meta = ProjectMeta {
                    process_name: payload.process_name,
                    element_work_name: payload.element_work_name,
                    video_path: payload.video_path,
                    video_duration_sec: payload.video_duration_sec,
                    ..ProjectMeta::default()
                };
                (meta, records_from_export(&payload.laps, legacy))
            }
            ext => return Err(AppError::UnsupportedExt(format!(".{ext}"))),
        };

        // fresh ids above every id the working store has handed out
        let floor = max_lap_id(&pool.conn)?;
        let laps: Vec<LapRecord> = laps
            .into_iter()
            .enumerate()
            .map(|(i, mut lap)| {
                lap.id = LapId(floor + i as i64 + 1);
                lap
            })
            .collect();

        if !laps.is_sorted_by_key(|l| l.start_sec) {
            warning("Laps were not in start order: sorted by start time.");
        }

        if !current.laps.is_empty() {
            warning(format!(
                "{} laps of the previous project were replaced.",
                current.laps.len()
            ));
        }

        let project = Project {
            meta: ProjectMeta {
                takt_sec: current.meta.takt_sec,
                ..meta
            },
            laps: LapLog::from_records(laps).with_id_floor(floor),
        };
        ProjectLogic::store(pool, &project)?;

        success(format!(
            "Imported {} laps from {}",
            project.laps.len(),
            path.display()
        ));
        ttlog_soft(
            &pool.conn,
            "import",
            &path.display().to_string(),
            &format!("{} laps{}", project.laps.len(), if legacy { " (legacy)" } else { "" }),
        );
        Ok(())
    }
}

/// Canonical (or legacy delta) lap shape → lap records with placeholder ids.
pub fn records_from_export(laps: &[LapExport], legacy: bool) -> Vec<LapRecord> {
    let starts: Vec<u32> = if legacy {
        let deltas: Vec<u32> = laps.iter().map(|l| l.sec).collect();
        reconstruct_absolute(&deltas)
    } else {
        laps.iter().map(|l| l.sec).collect()
    };

    laps.iter()
        .zip(starts)
        .enumerate()
        .map(|(i, (l, start))| {
            let mut lap = LapRecord::new(LapId(i as i64 + 1), start);
            lap.category = l.cat;
            lap.work = l.work.trim().to_string();
            lap.key_point = l.key.trim().to_string();
            lap.key_point_reason = l.reason.trim().to_string();
            lap
        })
        .collect()
}
