use serde::Serialize;

/// One line of the standard-work table: a manual operation with the walking
/// and automatic time folded into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub no: u32,
    pub work_name: String,
    pub manual_sec: u32,
    pub auto_sec: u32,
    pub walk_sec: u32,
    pub auto_names: Vec<String>,
}

impl Row {
    pub fn new(work_name: &str, manual_sec: u32) -> Self {
        Self {
            no: 0,
            work_name: work_name.to_string(),
            manual_sec,
            auto_sec: 0,
            walk_sec: 0,
            auto_names: Vec::new(),
        }
    }

    /// Seconds this row consumes on the operator clock.
    pub fn span_sec(&self) -> u32 {
        self.manual_sec
            .saturating_add(self.auto_sec)
            .saturating_add(self.walk_sec)
    }
}

/// Column sums shown in the table footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowTotals {
    pub manual_sec: u32,
    pub auto_sec: u32,
    pub walk_sec: u32,
}

impl RowTotals {
    pub fn from_rows(rows: &[Row]) -> Self {
        rows.iter().fold(Self::default(), |acc, r| Self {
            manual_sec: acc.manual_sec.saturating_add(r.manual_sec),
            auto_sec: acc.auto_sec.saturating_add(r.auto_sec),
            walk_sec: acc.walk_sec.saturating_add(r.walk_sec),
        })
    }

    pub fn total_sec(&self) -> u32 {
        self.manual_sec
            .saturating_add(self.auto_sec)
            .saturating_add(self.walk_sec)
    }
}
