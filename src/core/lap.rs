use crate::core::project::ProjectLogic;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::lap::{LapField, LapId};
use crate::ui::messages::{info, success, warning};
use crate::utils::time::{clamp_seconds, format_mmss, parse_playback};

/// Lap marking, redo and annotation edits on the working project.
pub struct LapLogic;

impl LapLogic {
    /// Mark a lap at the playback position `at` (seconds or mm:ss).
    ///
    /// A lap that is not after the last one is refused with an informational
    /// message; the log is left as it was and the command still succeeds.
    pub fn mark(pool: &mut DbPool, at: &str) -> AppResult<Option<LapId>> {
        let sec = clamp_seconds(parse_playback(at)?);
        let mut project = ProjectLogic::load(pool)?;

        let id = match project.laps.append(sec) {
            Ok(id) => id,
            Err(e @ AppError::LapTooEarly { .. }) => {
                info(e.to_string());
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        ProjectLogic::store(pool, &project)?;

        let duration = project.meta.video_duration_sec;
        if duration > 0 && sec > duration {
            warning(format!(
                "Lap at {} is past the end of the video ({}).",
                format_mmss(sec),
                format_mmss(duration)
            ));
        }

        let no = project.laps.len();
        let shown = project
            .laps
            .last()
            .map(|l| l.display_time.clone())
            .unwrap_or_default();
        success(format!("Lap {no} marked at {shown} ({}s)", sec));

        ttlog_soft(
            &pool.conn,
            "lap",
            &id.to_string(),
            &format!("start={}s", sec),
        );
        Ok(Some(id))
    }

    /// Redo from lap `no` (1-based): laps after it are dropped for good.
    pub fn redo(pool: &mut DbPool, no: usize) -> AppResult<()> {
        let mut project = ProjectLogic::load(pool)?;
        let index = lap_index(no, project.laps.len())?;

        let dropped = project.laps.truncate(index);
        ProjectLogic::store(pool, &project)?;

        if dropped.is_empty() {
            info(format!("Lap {no} is already the last one: nothing dropped."));
        } else {
            success(format!(
                "Redo from lap {no}: {} later lap(s) dropped.",
                dropped.len()
            ));
        }

        let ids: Vec<String> = dropped.iter().map(|l| l.id.to_string()).collect();
        ttlog_soft(
            &pool.conn,
            "redo",
            &format!("lap {no}"),
            &format!("dropped [{}]", ids.join(", ")),
        );
        Ok(())
    }

    /// Apply annotation edits to lap `no` (1-based). The lap is addressed by
    /// its stable id from then on.
    pub fn edit(pool: &mut DbPool, no: usize, fields: Vec<LapField>) -> AppResult<()> {
        if fields.is_empty() {
            warning("Nothing to edit: pass at least one of --work, --cat, --key, --reason.");
            return Ok(());
        }

        let mut project = ProjectLogic::load(pool)?;
        let index = lap_index(no, project.laps.len())?;
        let id = project
            .laps
            .get(index)
            .map(|l| l.id)
            .ok_or(AppError::InvalidLapNumber(no))?;

        let names: Vec<&str> = fields.iter().map(LapField::name).collect();
        let summary = names.join(", ");

        for field in fields {
            project.laps.update_field(id, field)?;
        }
        ProjectLogic::store(pool, &project)?;

        success(format!("Lap {no} updated ({summary})."));
        ttlog_soft(&pool.conn, "edit", &id.to_string(), &summary);
        Ok(())
    }
}

/// 1-based lap number → index, checked against the log length.
fn lap_index(no: usize, len: usize) -> AppResult<usize> {
    if no == 0 || no > len {
        return Err(AppError::InvalidLapNumber(no));
    }
    Ok(no - 1)
}
