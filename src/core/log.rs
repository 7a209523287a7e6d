use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 48;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// ANSI colour per operation of the activity log
fn color_for_operation(op: &str) -> Colour {
    match op {
        "lap" => Colour::Green,
        "redo" => Colour::Red,
        "edit" => Colour::Yellow,
        "new" | "import" => Colour::Cyan,
        "save" | "export" | "chart" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

struct Entry {
    id: i64,
    date: String,
    operation: String,
    target: String,
    message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(Entry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("No log entries.");
            return Ok(());
        }

        let re = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| {
            crate::errors::AppError::Other(format!("invalid ANSI pattern: {e}"))
        })?;

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        for e in &entries {
            let color = color_for_operation(&e.operation);

            let mut op_target = color.paint(e.operation.as_str()).to_string();
            if !e.target.is_empty() {
                op_target.push_str(&format!(" ({})", e.target));
            }

            // width is computed on the visible text only
            let visible = strip_ansi(&re, &op_target);
            let visible_w = UnicodeWidthStr::width(visible.as_str());
            let shown = if visible_w > MAX_OP_WIDTH {
                let cut: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
                format!("{}...", cut)
            } else {
                op_target.clone()
            };

            let padding = " ".repeat(
                MAX_OP_WIDTH.saturating_sub(UnicodeWidthStr::width(strip_ansi(&re, &shown).as_str())),
            );

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                shown,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
