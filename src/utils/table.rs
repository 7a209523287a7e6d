//! Table rendering utilities for CLI outputs.
//! Widths are measured in terminal columns so CJK labels line up.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
    pub right: bool,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            right: false,
        }
    }

    /// Right-aligned column, for seconds and counters.
    pub fn num(header: &str, width: usize) -> Self {
        Self {
            right: true,
            ..Self::new(header, width)
        }
    }

    fn pad(&self, s: &str) -> String {
        if self.right {
            pad_left(s, self.width)
        } else {
            pad_right(s, self.width)
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

/// Left-align `s` in `width` terminal columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - w))
}

/// Right-align `s` in `width` terminal columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - w), s)
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Grow every column to fit its widest cell.
    pub fn fit(&mut self) {
        for (i, col) in self.columns.iter_mut().enumerate() {
            let widest = self
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .flat_map(|cell| cell.lines())
                .map(UnicodeWidthStr::width)
                .chain(std::iter::once(UnicodeWidthStr::width(col.header.as_str())))
                .max()
                .unwrap_or(0);
            col.width = col.width.max(widest);
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&col.pad(&col.header));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&"-".repeat(total));
        out.push('\n');

        // Rows (cells may span several lines)
        for row in &self.rows {
            let height = row.iter().map(|c| c.lines().count().max(1)).max().unwrap_or(1);
            for line in 0..height {
                for (i, col) in self.columns.iter().enumerate() {
                    let cell = row
                        .get(i)
                        .and_then(|c| c.lines().nth(line))
                        .unwrap_or("");
                    out.push_str(&col.pad(cell));
                    out.push(' ');
                }
                out.push('\n');
            }
        }

        out
    }
}
