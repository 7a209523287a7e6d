//! SQLite connection wrapper for the project database (lightweight for CLI usage).

use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the project database and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        run_pending_migrations(&conn).map_err(|e| AppError::Migration(e.to_string()))?;
        Ok(Self { conn })
    }

    /// In-memory project database.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        run_pending_migrations(&conn).map_err(|e| AppError::Migration(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Run `func` inside a transaction; rolled back if it fails.
    pub fn with_tx<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&rusqlite::Transaction<'_>) -> AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
