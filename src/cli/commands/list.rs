use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::time::parse_playback;

/// `list` and `rows`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::List { at } => {
            let at = at.as_deref().map(parse_playback).transpose()?;
            let pool = DbPool::open(&cfg.database)?;
            ListLogic::laps(&pool, at)?;
        }
        Commands::Rows => {
            let pool = DbPool::open(&cfg.database)?;
            ListLogic::rows(&pool)?;
        }
        _ => {}
    }
    Ok(())
}
