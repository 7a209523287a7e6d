use crate::config::Config;
use crate::core::lap_log::LapLog;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{load_project, max_lap_id, save_project};
use crate::errors::AppResult;
use crate::models::project::{Project, ProjectMeta};
use crate::ui::messages::{success, warning};
use crate::utils::time::{clamp_seconds, format_mmss, parse_playback};
use crate::utils::path::validate_video_path;

/// Fields of `lapchart new`.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub process_name: Option<String>,
    pub element_work_name: Option<String>,
    pub video: Option<String>,
    pub duration: Option<String>,
    pub takt_sec: Option<f64>,
}

pub struct ProjectLogic;

impl ProjectLogic {
    pub fn load(pool: &DbPool) -> AppResult<Project> {
        load_project(&pool.conn)
    }

    /// Persist metadata and laps in one transaction.
    pub fn store(pool: &mut DbPool, project: &Project) -> AppResult<()> {
        pool.with_tx(|tx| save_project(tx, project))
    }

    /// Start a new project: fresh metadata, empty lap log.
    ///
    /// The video (when given) must pass path validation before anything is
    /// written; an invalid one leaves the current project untouched.
    pub fn create(pool: &mut DbPool, cfg: &Config, args: &NewProject) -> AppResult<Project> {
        let video_path = match &args.video {
            Some(raw) => validate_video_path(raw, &cfg.video_exts)?
                .to_string_lossy()
                .to_string(),
            None => String::new(),
        };

        let video_duration_sec = match &args.duration {
            Some(raw) => clamp_seconds(parse_playback(raw)?),
            None => 0,
        };

        let takt_sec = args
            .takt_sec
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(0.0);

        let previous = load_project(&pool.conn)?;
        if !previous.laps.is_empty() {
            warning(format!(
                "{} laps of the previous project were discarded.",
                previous.laps.len()
            ));
        }

        let project = Project {
            meta: ProjectMeta {
                process_name: args.process_name.clone().unwrap_or_default().trim().to_string(),
                element_work_name: args
                    .element_work_name
                    .clone()
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                video_path,
                video_duration_sec,
                takt_sec,
            },
            laps: LapLog::new().with_id_floor(max_lap_id(&pool.conn)?),
        };

        Self::store(pool, &project)?;

        success(format!(
            "New project: {} / {}",
            display_or_dash(&project.meta.process_name),
            display_or_dash(&project.meta.element_work_name)
        ));
        if !project.meta.video_path.is_empty() {
            success(format!(
                "Video: {} ({})",
                project.meta.video_path,
                format_mmss(project.meta.video_duration_sec)
            ));
        }

        ttlog_soft(
            &pool.conn,
            "new",
            &project.meta.process_name,
            &format!(
                "element='{}' video='{}'",
                project.meta.element_work_name, project.meta.video_path
            ),
        );

        Ok(project)
    }
}

pub(crate) fn display_or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}
