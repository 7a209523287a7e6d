//! Lap timeline normalization: relative display time, per-lap durations and
//! reconstruction of absolute starts from legacy delta-only records.

use crate::models::lap::LapRecord;
use crate::utils::time::{clamp_seconds, format_mmss};

/// Recompute the derived fields of every lap from the `start_sec` ordering.
///
/// - `display_time`: "00:00" for the first lap, `mm:ss` of
///   `start_sec - first.start_sec` for the others (never negative)
/// - `duration_sec`: delta to the next lap's start, 0 for the last lap
///
/// Total and idempotent: out-of-order inputs produce zero durations instead
/// of failing.
pub fn normalize(records: &mut [LapRecord]) {
    let Some(base) = records.first().map(|r| r.start_sec) else {
        return;
    };

    let starts: Vec<u32> = records.iter().map(|r| r.start_sec).collect();

    for (i, cur) in records.iter_mut().enumerate() {
        let rel = cur.start_sec.saturating_sub(base);

        cur.display_time = if i == 0 {
            "00:00".to_string()
        } else {
            format_mmss(rel)
        };

        cur.duration_sec = match starts.get(i + 1) {
            Some(next) => next.saturating_sub(cur.start_sec),
            None => 0,
        };
    }
}

/// Parse a legacy delta cell defensively: anything that is not a finite
/// non-negative number becomes 0, fractions are floored.
pub fn parse_delta(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(v) => clamp_seconds(v),
        Err(_) => 0,
    }
}

/// Running accumulation of legacy durations into absolute starts:
/// `start[0] = 0`, `start[i] = start[i-1] + delta[i-1]`.
///
/// Re-normalizing the result gives back `delta[0..n-1]` followed by 0.
pub fn reconstruct_absolute(deltas: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(deltas.len());
    let mut start: u32 = 0;

    for dt in deltas {
        out.push(start);
        start = start.saturating_add(*dt);
    }

    out
}
