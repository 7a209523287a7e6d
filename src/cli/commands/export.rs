use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

/// `save`, `export` and `chart`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Save { file, force } => {
            let pool = DbPool::open(&cfg.database)?;
            ExportLogic::save(&pool, file.as_deref(), *force)?;
        }
        Commands::Export {
            format,
            file,
            force,
        } => {
            let pool = DbPool::open(&cfg.database)?;
            ExportLogic::export(&pool, *format, file, *force)?;
        }
        Commands::Chart { file, takt, force } => {
            let pool = DbPool::open(&cfg.database)?;
            ExportLogic::chart(&pool, cfg, file, *takt, *force)?;
        }
        _ => {}
    }
    Ok(())
}
