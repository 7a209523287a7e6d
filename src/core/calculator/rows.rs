use crate::models::category::Category;
use crate::models::lap::LapRecord;
use crate::models::row::Row;

/// Fold a normalized lap sequence into standard-work rows.
///
/// - the scan starts at the first manual lap with a non-zero duration
/// - every manual lap with a duration opens a new row (the anchor)
/// - 0-second manual laps are omitted and never become an anchor
/// - walking time is added to the anchor (consecutive walks accumulate)
/// - automatic time is added to the anchor, its label appended to `auto_names`
/// - anything met while no anchor exists is dropped
pub fn build_rows(records: &[LapRecord]) -> Vec<Row> {
    let Some(start) = records
        .iter()
        .position(|r| r.category.is_manual() && r.duration_sec > 0)
    else {
        return Vec::new();
    };

    let mut out: Vec<Row> = Vec::new();
    let mut anchor: Option<usize> = None;

    for lap in &records[start..] {
        match lap.category {
            Category::Manual => {
                if lap.duration_sec == 0 {
                    continue;
                }
                out.push(Row::new(lap.work.trim(), lap.duration_sec));
                anchor = Some(out.len() - 1);
            }

            Category::Walk => {
                if let Some(row) = anchor.and_then(|i| out.get_mut(i)) {
                    row.walk_sec += lap.duration_sec;
                }
            }

            Category::Automatic => {
                if lap.duration_sec == 0 {
                    continue;
                }
                if let Some(row) = anchor.and_then(|i| out.get_mut(i)) {
                    row.auto_sec += lap.duration_sec;
                    let name = lap.work.trim();
                    if !name.is_empty() {
                        row.auto_names.push(name.to_string());
                    }
                }
            }
        }
    }

    for (idx, row) in out.iter_mut().enumerate() {
        row.no = idx as u32 + 1;
    }

    out
}

/// Sum of the durations the rows were built from: every lap from the first
/// qualifying manual lap to the end of the log.
pub fn contributing_duration(records: &[LapRecord]) -> u32 {
    records
        .iter()
        .position(|r| r.category.is_manual() && r.duration_sec > 0)
        .map(|start| records[start..].iter().map(|r| r.duration_sec).sum())
        .unwrap_or(0)
}
