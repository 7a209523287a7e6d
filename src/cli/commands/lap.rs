use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::lap::LapLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::lap::LapField;

/// `lap`, `redo` and `edit`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Lap { at } => {
            let mut pool = DbPool::open(&cfg.database)?;
            LapLogic::mark(&mut pool, at)?;
        }

        Commands::Redo { no } => {
            let mut pool = DbPool::open(&cfg.database)?;
            LapLogic::redo(&mut pool, *no)?;
        }

        Commands::Edit {
            no,
            work,
            cat,
            key,
            reason,
        } => {
            let mut fields = Vec::new();

            if let Some(w) = work {
                fields.push(LapField::Work(w.trim().to_string()));
            }
            if let Some(c) = cat {
                let category = Category::from_code(c)
                    .ok_or_else(|| AppError::InvalidCategory(format!(
                        "'{c}': use m (手作業), w (歩行) or a (自動)"
                    )))?;
                fields.push(LapField::Category(category));
            }
            if let Some(k) = key {
                fields.push(LapField::KeyPoint(k.trim().to_string()));
            }
            if let Some(r) = reason {
                fields.push(LapField::Reason(r.trim().to_string()));
            }

            let mut pool = DbPool::open(&cfg.database)?;
            LapLogic::edit(&mut pool, *no, fields)?;
        }

        _ => {}
    }
    Ok(())
}
