use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::project::{NewProject, ProjectLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Start a new project.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::New {
        process,
        element,
        video,
        duration,
        takt,
    } = cmd
    {
        let args = NewProject {
            process_name: process.clone(),
            element_work_name: element.clone(),
            video: video.clone(),
            duration: duration.clone(),
            takt_sec: *takt,
        };

        let mut pool = DbPool::open(&cfg.database)?;
        ProjectLogic::create(&mut pool, cfg, &args)?;
    }
    Ok(())
}
