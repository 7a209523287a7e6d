use crate::core::lap_log::LapLog;
use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::lap::{LapId, LapRecord};
use crate::models::project::{Project, ProjectMeta};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_lap(row: &Row) -> Result<LapRecord> {
    let cat_str: String = row.get("category")?;
    let category = Category::from_db_str(&cat_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidCategory(cat_str.clone())),
        )
    })?;

    let mut lap = LapRecord::new(LapId(row.get("id")?), row.get("start_sec")?);
    lap.category = category;
    lap.work = row.get("work")?;
    lap.key_point = row.get("key_point")?;
    lap.key_point_reason = row.get("reason")?;
    Ok(lap)
}

pub fn load_laps(conn: &Connection) -> AppResult<Vec<LapRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, start_sec, category, work, key_point, reason
         FROM laps
         ORDER BY start_sec ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_lap)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Highest lap id ever handed out (including laps dropped since).
pub fn max_lap_id(conn: &Connection) -> AppResult<i64> {
    let seq: Option<i64> = conn
        .query_row(
            "SELECT seq FROM sqlite_sequence WHERE name = 'laps'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(seq.unwrap_or(0))
}

pub fn load_meta(conn: &Connection) -> AppResult<ProjectMeta> {
    let meta = conn.query_row(
        "SELECT process_name, element_work_name, video_path, video_duration_sec, takt_sec
         FROM project WHERE id = 1",
        [],
        |row| {
            Ok(ProjectMeta {
                process_name: row.get(0)?,
                element_work_name: row.get(1)?,
                video_path: row.get(2)?,
                video_duration_sec: row.get(3)?,
                takt_sec: row.get(4)?,
            })
        },
    )?;
    Ok(meta)
}

pub fn load_project(conn: &Connection) -> AppResult<Project> {
    let meta = load_meta(conn)?;
    let laps = LapLog::from_records(load_laps(conn)?).with_id_floor(max_lap_id(conn)?);
    Ok(Project { meta, laps })
}

pub fn save_meta(conn: &Connection, meta: &ProjectMeta) -> AppResult<()> {
    conn.execute(
        "UPDATE project
         SET process_name = ?1, element_work_name = ?2, video_path = ?3,
             video_duration_sec = ?4, takt_sec = ?5, updated_at = ?6
         WHERE id = 1",
        params![
            meta.process_name,
            meta.element_work_name,
            meta.video_path,
            meta.video_duration_sec,
            meta.takt_sec,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Replace the stored laps with the content of `log`.
/// Ids are written explicitly so they stay stable across invocations.
pub fn save_laps(conn: &Connection, log: &LapLog) -> AppResult<()> {
    conn.execute("DELETE FROM laps", [])?;

    let now = Local::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT INTO laps (id, start_sec, category, work, key_point, reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;

    for lap in log.records() {
        stmt.execute(params![
            lap.id.0,
            lap.start_sec,
            lap.category.to_db_str(),
            lap.work,
            lap.key_point,
            lap.key_point_reason,
            now,
        ])?;
    }
    Ok(())
}

pub fn save_project(conn: &Connection, project: &Project) -> AppResult<()> {
    save_meta(conn, &project.meta)?;
    save_laps(conn, &project.laps)?;
    Ok(())
}
