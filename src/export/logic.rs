// src/export/logic.rs

use crate::config::Config;
use crate::core::calculator::layout::LayoutParams;
use crate::core::calculator::rows::build_rows;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::load_project;
use crate::errors::{AppError, AppResult};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ProjectPayload, laps_to_export};
use crate::export::pdf::PdfSurface;
use crate::export::pdf_export::export_pdf;
use crate::export::svg::SvgSurface;
use crate::export::xlsx::export_xlsx;
use crate::export::{ChartFormat, ExportFormat, ensure_parent, ensure_writable, legacy_csv, synthesize};
use crate::models::project::{ChartSheet, Project};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::{default_project_filename, expand_tilde, extension_of};
use std::path::PathBuf;

/// High level export operations on the working project.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the lap log as csv / json / xlsx / pdf.
    pub fn export(pool: &DbPool, format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
        let path = expand_tilde(file);
        let project = load_project(&pool.conn)?;

        if project.laps.is_empty() {
            warning("No laps recorded yet: nothing to export.");
            return Ok(());
        }

        ensure_parent(&path)?;
        ensure_writable(&path, force)?;

        let records = project.laps.records();

        match format {
            ExportFormat::Csv => export_csv(&laps_to_export(records), &path)?,
            ExportFormat::Json => export_json(&payload(&project), &path)?,
            ExportFormat::Xlsx => export_xlsx(records, &build_rows(records), &path)?,
            ExportFormat::Pdf => export_pdf(records, &path, &pdf_title(&project))?,
        }

        ttlog_soft(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("{} laps exported to {}", records.len(), path.display()),
        );
        Ok(())
    }

    /// Write the project file (legacy spreadsheet layout). Without `file` the
    /// name is derived from the process / element names, in the current
    /// directory.
    pub fn save(pool: &DbPool, file: Option<&str>, force: bool) -> AppResult<PathBuf> {
        let project = load_project(&pool.conn)?;

        let path = match file {
            Some(f) => expand_tilde(f),
            None => PathBuf::from(default_project_filename(
                &project.meta.process_name,
                &project.meta.element_work_name,
            )),
        };

        ensure_writable(&path, force)?;
        legacy_csv::save(&path, &project.meta, project.laps.records())?;

        success(format!(
            "Project saved: {} ({} laps)",
            path.display(),
            project.laps.len()
        ));
        ttlog_soft(
            &pool.conn,
            "save",
            &path.display().to_string(),
            &format!("{} laps", project.laps.len()),
        );
        Ok(path)
    }

    /// Render the standard-work sheet to `.svg` or `.pdf`.
    ///
    /// Takt: `takt` when given and positive, else the project's own value,
    /// else the configured default; 0 everywhere means "total duration".
    pub fn chart(
        pool: &DbPool,
        cfg: &Config,
        file: &str,
        takt: Option<f64>,
        force: bool,
    ) -> AppResult<()> {
        let path = expand_tilde(file);
        let format = ChartFormat::from_path(&path)
            .ok_or_else(|| AppError::InvalidExportFormat(format!(".{}", extension_of(&path))))?;

        let project = load_project(&pool.conn)?;
        let sheet = chart_sheet(&project, cfg, takt);

        if sheet.rows.is_empty() {
            warning("No manual lap with a duration yet: the chart shows the grid only.");
        }

        ensure_parent(&path)?;
        ensure_writable(&path, force)?;

        let base = LayoutParams {
            px_per_sec: cfg.px_per_sec,
            row_height: cfg.row_height,
            ..LayoutParams::default()
        };

        let geometry = match format {
            ChartFormat::Svg => {
                let mut surface = SvgSurface::new(cfg.row_height);
                let geometry = synthesize(&mut surface, &sheet, base)?;
                surface.save(&path)?;
                geometry
            }
            ChartFormat::Pdf => {
                let mut surface = PdfSurface::new(cfg.row_height);
                let geometry = synthesize(&mut surface, &sheet, base)?;
                surface.save(&path)?;
                geometry
            }
        };

        info(format!(
            "{} rows, takt {:.0}s",
            sheet.rows.len(),
            geometry.takt_sec
        ));
        success(format!("Chart written: {}", path.display()));

        ttlog_soft(
            &pool.conn,
            "chart",
            &path.display().to_string(),
            &format!("{} rows, takt {:.0}s", sheet.rows.len(), geometry.takt_sec),
        );
        Ok(())
    }
}

/// Chart input for `project`, with the takt resolved from the command line,
/// the project and the configuration (first positive value wins).
pub fn chart_sheet(project: &Project, cfg: &Config, takt: Option<f64>) -> ChartSheet {
    let takt_sec = [takt.unwrap_or(0.0), project.meta.takt_sec, cfg.takt_sec]
        .into_iter()
        .find(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(0.0);

    ChartSheet {
        process_name: project.meta.process_name.clone(),
        element_work_name: project.meta.element_work_name.clone(),
        video_duration_sec: project.meta.video_duration_sec,
        takt_sec,
        rows: build_rows(project.laps.records()),
    }
}

fn payload(project: &Project) -> ProjectPayload {
    ProjectPayload {
        process_name: project.meta.process_name.clone(),
        element_work_name: project.meta.element_work_name.clone(),
        video_path: project.meta.video_path.clone(),
        video_duration_sec: project.meta.video_duration_sec,
        laps: laps_to_export(project.laps.records()),
    }
}

fn pdf_title(project: &Project) -> String {
    let name = [
        project.meta.process_name.trim(),
        project.meta.element_work_name.trim(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" / ");

    if name.is_empty() {
        "Laps".to_string()
    } else {
        format!("Laps - {name}")
    }
}
