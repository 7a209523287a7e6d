use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Work category of a lap. The taxonomy is fixed to the work-study domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Manual, // 手作業
    Walk,      // 歩行
    Automatic, // 自動
}

impl Category {
    /// Label used by project files and the canonical export shape.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Manual => "手作業",
            Category::Walk => "歩行",
            Category::Automatic => "自動",
        }
    }

    /// Label → enum. Anything unknown (or empty) is treated as manual work.
    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "歩行" => Category::Walk,
            "自動" => Category::Automatic,
            _ => Category::Manual,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Category::Manual => "manual",
            Category::Walk => "walk",
            Category::Automatic => "auto",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Category::Manual),
            "walk" => Some(Category::Walk),
            "auto" => Some(Category::Automatic),
            _ => None,
        }
    }

    /// Helper: parse a category typed on the command line.
    /// Accepts the DB codes, their initials and the Japanese labels.
    pub fn from_code(code: &str) -> Option<Self> {
        let c = code.trim().to_lowercase();
        match c.as_str() {
            "m" | "manual" | "手作業" => Some(Category::Manual),
            "w" | "walk" | "歩行" => Some(Category::Walk),
            "a" | "auto" | "automatic" | "自動" => Some(Category::Automatic),
            _ => None,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Category::Manual)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Imported data may carry anything here: never fail, fall back to manual.
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(s)) => Category::from_label(&s),
            _ => Category::Manual,
        })
    }
}
