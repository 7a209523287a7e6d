use super::category::Category;
use serde::Serialize;
use std::fmt;

/// Stable identifier of a lap inside a log (⇔ laps.id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LapId(pub i64);

impl fmt::Display for LapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LapRecord {
    pub id: LapId,
    pub start_sec: u32,       // ⇔ laps.start_sec (absolute second on the video)
    pub duration_sec: u32,    // derived, never stored
    pub display_time: String, // derived "mm:ss" relative to the first lap
    pub category: Category,   // ⇔ laps.category ('manual','walk','auto')
    pub work: String,
    pub key_point: String,
    pub key_point_reason: String,
}

impl LapRecord {
    /// A fresh manual lap with empty annotations.
    /// Derived fields are filled by the next normalize pass.
    pub fn new(id: LapId, start_sec: u32) -> Self {
        Self {
            id,
            start_sec,
            duration_sec: 0,
            display_time: String::new(),
            category: Category::Manual,
            work: String::new(),
            key_point: String::new(),
            key_point_reason: String::new(),
        }
    }

    /// Subtitle shown for the lap under the playback head: "【cat】work".
    pub fn subtitle(&self) -> Option<String> {
        let work = self.work.trim();
        if work.is_empty() {
            return None;
        }
        Some(format!("【{}】{}", self.category.label(), work))
    }
}

/// Command-style edit of the free-text / category fields of a lap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LapField {
    Work(String),
    Category(Category),
    KeyPoint(String),
    Reason(String),
}

impl LapField {
    pub fn name(&self) -> &'static str {
        match self {
            LapField::Work(_) => "work",
            LapField::Category(_) => "category",
            LapField::KeyPoint(_) => "key",
            LapField::Reason(_) => "reason",
        }
    }

    pub(crate) fn apply(self, lap: &mut LapRecord) {
        match self {
            LapField::Work(v) => lap.work = v,
            LapField::Category(c) => lap.category = c,
            LapField::KeyPoint(v) => lap.key_point = v,
            LapField::Reason(v) => lap.key_point_reason = v,
        }
    }
}
