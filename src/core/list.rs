use crate::core::calculator::rows::{build_rows, contributing_duration};
use crate::core::lap_log::derive_active_index;
use crate::core::project::{ProjectLogic, display_or_dash};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::project::Project;
use crate::models::row::RowTotals;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};
use crate::utils::time::{clamp_seconds, format_mmss};

const WRAP_WIDTH: usize = 28;

fn wrap(text: &str) -> String {
    textwrap::wrap(text, WRAP_WIDTH).join("\n")
}

fn project_header(project: &Project) {
    header(format!(
        "{} / {}",
        display_or_dash(&project.meta.process_name),
        display_or_dash(&project.meta.element_work_name)
    ));
}

pub struct ListLogic;

impl ListLogic {
    /// Print the lap table. With `at`, the lap under that playback position
    /// is marked and its subtitle shown.
    pub fn laps(pool: &DbPool, at: Option<f64>) -> AppResult<()> {
        let project = ProjectLogic::load(pool)?;
        project_header(&project);

        if project.laps.is_empty() {
            info("No laps recorded yet.");
            return Ok(());
        }

        let records = project.laps.records();
        let active = at.and_then(|sec| derive_active_index(records, sec));

        let mut table = Table::new(vec![
            Column::new("", 1),
            Column::num("No", 3),
            Column::new("Time", 5),
            Column::num("Sec", 4),
            Column::num("Dt", 3),
            Column::new("区分", 6),
            Column::new("作業名", 10),
            Column::new("急所", 10),
            Column::new("急所の理由", 10),
        ]);

        for (i, lap) in records.iter().enumerate() {
            table.add_row(vec![
                if active == Some(i) { "▶" } else { "" }.to_string(),
                (i + 1).to_string(),
                lap.display_time.clone(),
                lap.start_sec.to_string(),
                lap.duration_sec.to_string(),
                lap.category.label().to_string(),
                wrap(&lap.work),
                wrap(&lap.key_point),
                wrap(&lap.key_point_reason),
            ]);
        }
        table.fit();
        print!("{}", table.render());

        println!(
            "\n{} laps, span {}",
            records.len(),
            format_mmss(project.laps.span_sec())
        );

        if let (Some(sec), Some(i)) = (at, active) {
            let now = format_mmss(clamp_seconds(sec));
            match records[i].subtitle() {
                Some(sub) => println!("▶ {now}  {sub}"),
                None => println!("▶ {now}  (lap {})", i + 1),
            }
        }

        Ok(())
    }

    /// Print the standard-work rows with their totals.
    pub fn rows(pool: &DbPool) -> AppResult<()> {
        let project = ProjectLogic::load(pool)?;
        project_header(&project);

        let records = project.laps.records();
        let rows = build_rows(records);

        if rows.is_empty() {
            info("No manual lap with a duration yet: no rows.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::num("No", 3),
            Column::new("作業名", 10),
            Column::num("手作業", 6),
            Column::num("自動", 4),
            Column::num("歩行", 4),
            Column::new("自動作業", 8),
        ]);

        for r in &rows {
            table.add_row(vec![
                r.no.to_string(),
                wrap(&r.work_name),
                r.manual_sec.to_string(),
                r.auto_sec.to_string(),
                r.walk_sec.to_string(),
                r.auto_names.join("\n"),
            ]);
        }

        let totals = RowTotals::from_rows(&rows);
        table.add_row(vec![
            String::new(),
            "合計".to_string(),
            totals.manual_sec.to_string(),
            totals.auto_sec.to_string(),
            totals.walk_sec.to_string(),
            String::new(),
        ]);
        table.fit();
        print!("{}", table.render());

        println!(
            "\n{} rows, operator time {}s (timeline {}s)",
            rows.len(),
            totals.total_sec(),
            contributing_duration(records)
        );
        Ok(())
    }
}
