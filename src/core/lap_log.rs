//! The lap log: ordered, append-only-with-truncation state container.

use crate::core::calculator::timeline::normalize;
use crate::errors::{AppError, AppResult};
use crate::models::lap::{LapField, LapId, LapRecord};
use crate::utils::time::{clamp_seconds, format_mmss};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LapLog {
    records: Vec<LapRecord>,
    active_index: Option<usize>,
    next_id: i64,
}

/// Index of the lap under the playback head: the last lap whose start is not
/// after `playback_sec` (floored), 0 when the head is before every lap,
/// `None` for an empty log.
pub fn derive_active_index(records: &[LapRecord], playback_sec: f64) -> Option<usize> {
    if records.is_empty() {
        return None;
    }
    let now = clamp_seconds(playback_sec);
    let after = records.partition_point(|r| r.start_sec <= now);
    Some(after.saturating_sub(1))
}

impl LapLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from stored records (already carrying their ids).
    /// Records are kept in `start_sec` order; derived fields are recomputed.
    pub fn from_records(mut records: Vec<LapRecord>) -> Self {
        records.sort_by_key(|r| r.start_sec);
        normalize(&mut records);

        let next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        let active_index = if records.is_empty() { None } else { Some(0) };

        Self {
            records,
            active_index,
            next_id,
        }
    }

    /// Never hand out ids at or below `floor` (ids of laps dropped by an
    /// earlier redo stay retired).
    pub fn with_id_floor(mut self, floor: i64) -> Self {
        self.next_id = self.next_id.max(floor + 1);
        self
    }

    pub fn records(&self) -> &[LapRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LapRecord> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&LapRecord> {
        self.records.last()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active(&self) -> Option<&LapRecord> {
        self.active_index.and_then(|i| self.records.get(i))
    }

    /// Mark a new lap at `candidate_sec`.
    ///
    /// Rejected without touching the log when the candidate is not strictly
    /// after the last lap. Otherwise the lap is appended as manual work and
    /// the whole log is re-normalized (the previous last lap gets its
    /// duration).
    pub fn append(&mut self, candidate_sec: u32) -> AppResult<LapId> {
        if let Some(last) = self.records.last()
            && candidate_sec <= last.start_sec
        {
            return Err(AppError::LapTooEarly {
                candidate: format_mmss(candidate_sec),
                last: format_mmss(last.start_sec),
            });
        }

        let id = self.fresh_id();
        self.records.push(LapRecord::new(id, candidate_sec));
        normalize(&mut self.records);
        self.active_index = Some(self.records.len() - 1);

        Ok(id)
    }

    /// Redo from `index`: keep laps `[0..=index]`, drop the rest.
    /// Destructive; dropped laps cannot be recovered.
    pub fn truncate(&mut self, index: usize) -> Vec<LapRecord> {
        if self.records.is_empty() {
            self.active_index = None;
            return Vec::new();
        }

        let keep = index.min(self.records.len() - 1);
        let dropped = self.records.split_off(keep + 1);
        normalize(&mut self.records);
        self.active_index = Some(keep);

        dropped
    }

    /// Re-derive the active lap from the playback position. Safe to call on
    /// every tick and on every seek.
    pub fn set_active_by_time(&mut self, playback_sec: f64) -> Option<usize> {
        self.active_index = derive_active_index(&self.records, playback_sec);
        self.active_index
    }

    /// Edit one annotation field of the lap `id`. Timing fields never change.
    pub fn update_field(&mut self, id: LapId, field: LapField) -> AppResult<()> {
        let lap = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::LapNotFound(id.to_string()))?;

        field.apply(lap);
        Ok(())
    }

    /// Total span from the first to the last lap.
    pub fn span_sec(&self) -> u32 {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => last.start_sec.saturating_sub(first.start_sec),
            _ => 0,
        }
    }

    fn fresh_id(&mut self) -> LapId {
        if self.next_id <= 0 {
            self.next_id = 1;
        }
        let id = LapId(self.next_id);
        self.next_id += 1;
        id
    }
}
