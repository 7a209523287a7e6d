// src/export/pdf.rs

use crate::core::calculator::layout::uniform_row_centers;
use crate::errors::{AppError, AppResult};
use crate::export::surface::RenderSurface;
use crate::models::geometry::{ChartGeometry, ConnectorPath, GridKind, Point, Primitive};
use crate::models::project::ChartSheet;
use crate::models::row::{Row, RowTotals};
use crate::utils::time::format_mmss;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const A4_W: f32 = 595.0;
const A4_H: f32 = 842.0;

/// Helvetica (WinAnsi) only covers Latin text: anything else becomes '?'.
pub(crate) fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,

    margin: f32,
    row_h: f32,
    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            next_id: 4,

            margin: 50.0,
            row_h: 20.0,
            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Write `content` as a new page of `w` x `h` points.
    pub(crate) fn push_page(&mut self, w: f32, h: f32, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, w, h))
                .contents(content_id);
            page.resources().fonts().pair(Name(b"F1"), self.font_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let safe = pdf_safe(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(safe.as_bytes()));
        content.end_text();
    }

    fn fill_band(content: &mut Content, x: f32, y: f32, w: f32, h: f32, grey: f32) {
        content.save_state();
        content.set_fill_rgb(grey, grey, grey);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, widths: &[f32], row: &[String], size: f32) {
        let mut x = self.margin;
        for (text, w) in row.iter().zip(widths) {
            Self::text(content, x + 4.0, y + 6.0, size, text);

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *w, self.row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    /// Column widths from header and content length, shrunk to the page.
    fn col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5 + 8.0).collect();

        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = w.max(cell.chars().count() as f32 * 6.0 + 8.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = A4_W - 2.0 * self.margin;
        if total > max {
            let scale = max / total;
            widths.iter_mut().for_each(|w| *w *= scale);
        }
        widths
    }

    /// Paginated table with a title and page numbers. An empty table still
    /// yields one page carrying the header.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let widths = self.col_widths(headers, rows);
        let table_w: f32 = widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let top = A4_H - self.margin - 30.0;

        let mut remaining: &[Vec<String>] = rows;
        let mut page_no = 1;

        loop {
            let mut content = Content::new();

            Self::text(
                &mut content,
                self.margin,
                A4_H - self.margin + 15.0,
                self.title_font_size,
                title,
            );
            Self::text(
                &mut content,
                A4_W - self.margin - 60.0,
                self.margin - 35.0,
                self.font_size,
                &format!("Page {page_no}"),
            );

            let mut y = top;
            Self::fill_band(&mut content, self.margin, y, table_w, self.row_h, 0.87);
            self.draw_row(&mut content, y, &widths, &header_row, self.header_font_size);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }
                if i % 2 == 0 {
                    Self::fill_band(&mut content, self.margin, y, table_w, self.row_h, 0.96);
                }
                self.draw_row(&mut content, y, &widths, row, self.font_size);
                y -= self.row_h;
                consumed += 1;
            }

            self.push_page(A4_W, A4_H, content);
            remaining = &remaining[consumed..];
            page_no += 1;

            if remaining.is_empty() || consumed == 0 {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        {
            let mut pages = self.pdf.pages(self.pages_id);
            pages.count(self.page_refs.len() as i32);
            pages.kids(self.page_refs.iter().copied());
        }

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Chart sheet
// ---------------------------------------------------------------------------

const SHEET_MARGIN: f32 = 20.0;
const TITLE_H: f32 = 48.0;
const RULER_H: f32 = 24.0;
const COLUMNS: [(&str, f32); 5] = [
    ("No", 30.0),
    ("Work", 200.0),
    ("Manual", 50.0),
    ("Auto", 50.0),
    ("Walk", 50.0),
];

fn sec_cell(v: u32) -> String {
    if v == 0 { String::new() } else { v.to_string() }
}

/// Standard-work sheet on a single PDF page sized to fit the chart.
///
/// Drawing happens in a top-down coordinate system (the page CTM is flipped),
/// so the geometry from the layout is used as is; text is flipped back.
pub struct PdfSurface {
    row_height: f64,
    manager: PdfManager,
}

impl PdfSurface {
    pub fn new(row_height: f64) -> Self {
        Self {
            row_height,
            manager: PdfManager::new(),
        }
    }

    pub fn save(self, path: &Path) -> AppResult<()> {
        self.manager
            .save(path)
            .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))
    }

    fn text(c: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let safe = pdf_safe(text);
        c.begin_text();
        c.set_font(Name(b"F1"), size);
        c.set_text_matrix([1.0, 0.0, 0.0, -1.0, x, y]);
        c.show(Str(safe.as_bytes()));
        c.end_text();
    }

    fn cell(c: &mut Content, x: f32, y: f32, w: f32, h: f32, grey: Option<f32>) {
        c.save_state();
        if let Some(g) = grey {
            c.set_fill_rgb(g, g, g);
            c.rect(x, y, w, h);
            c.fill_nonzero();
        }
        c.set_stroke_rgb(0.6, 0.6, 0.6);
        c.set_line_width(0.8);
        c.rect(x, y, w, h);
        c.stroke();
        c.restore_state();
    }

    fn table(&self, c: &mut Content, rows: &[Row], top: f32, chart_h: f32) {
        let rh = self.row_height as f32;

        let mut x = SHEET_MARGIN;
        for (label, w) in COLUMNS {
            Self::cell(c, x, top - RULER_H, w, RULER_H, Some(0.94));
            Self::text(c, x + 4.0, top - 8.0, 9.0, label);
            x += w;
        }

        for (i, r) in rows.iter().enumerate() {
            let y = top + i as f32 * rh;
            let cells = [
                r.no.to_string(),
                r.work_name.clone(),
                sec_cell(r.manual_sec),
                sec_cell(r.auto_sec),
                sec_cell(r.walk_sec),
            ];

            let mut x = SHEET_MARGIN;
            for (col, ((_, w), text)) in COLUMNS.iter().zip(&cells).enumerate() {
                Self::cell(c, x, y, *w, rh, None);
                if col == 1 && !r.auto_names.is_empty() {
                    Self::text(c, x + 4.0, y + 11.0, 10.0, text);
                    // automatic work, one name per line
                    c.save_state();
                    c.set_fill_rgb(0.75, 0.0, 0.0);
                    for (k, name) in r.auto_names.iter().enumerate() {
                        Self::text(c, x + 10.0, y + 21.0 + 8.0 * k as f32, 7.0, name);
                    }
                    c.restore_state();
                } else {
                    Self::text(c, x + 4.0, y + rh / 2.0 + 3.5, 10.0, text);
                }
                x += w;
            }
        }

        let totals = RowTotals::from_rows(rows);
        let y = top + chart_h;
        let cells = [
            ("Total".to_string(), COLUMNS[0].1 + COLUMNS[1].1),
            (sec_cell(totals.manual_sec), COLUMNS[2].1),
            (sec_cell(totals.auto_sec), COLUMNS[3].1),
            (sec_cell(totals.walk_sec), COLUMNS[4].1),
        ];
        let mut x = SHEET_MARGIN;
        for (text, w) in &cells {
            Self::cell(c, x, y, *w, rh, Some(0.97));
            Self::text(c, x + 4.0, y + rh / 2.0 + 3.5, 10.0, text);
            x += w;
        }
    }

    fn line(c: &mut Content, from: Point, to: Point) {
        c.move_to(from.x as f32, from.y as f32);
        c.line_to(to.x as f32, to.y as f32);
        c.stroke();
    }

    fn primitive(c: &mut Content, p: &Primitive) {
        c.save_state();
        match p {
            Primitive::Grid { kind, from, to } => {
                match kind {
                    GridKind::Second => {
                        c.set_stroke_rgb(0.82, 0.82, 0.82);
                        c.set_line_width(0.8);
                        c.set_dash_pattern([1.0, 4.0], 0.0);
                    }
                    GridKind::TenSeconds => {
                        c.set_stroke_rgb(0.4, 0.4, 0.4);
                        c.set_line_width(1.1);
                    }
                    GridKind::RowBoundary => {
                        c.set_stroke_rgb(0.85, 0.85, 0.85);
                        c.set_line_width(0.8);
                        c.set_dash_pattern([2.0, 4.0], 0.0);
                    }
                }
                Self::line(c, *from, *to);
            }
            Primitive::ManualBlock {
                x, y, width, height, ..
            } => {
                c.set_fill_rgb(0.902, 0.902, 0.980);
                c.set_stroke_rgb(0.0, 0.0, 0.0);
                c.set_line_width(1.0);
                c.rect(*x as f32, *y as f32, *width as f32, *height as f32);
                c.fill_nonzero_and_stroke();
            }
            Primitive::Connector { from, to, path, .. } => {
                c.set_stroke_rgb(0.0, 0.0, 0.0);
                c.set_line_width(1.2);
                match path {
                    ConnectorPath::Straight => Self::line(c, *from, *to),
                    ConnectorPath::Wavy(segments) => {
                        c.move_to(from.x as f32, from.y as f32);
                        let mut p0 = *from;
                        // quadratic piece as the equivalent cubic
                        for s in segments {
                            let c1 = Point::new(
                                p0.x + 2.0 / 3.0 * (s.control.x - p0.x),
                                p0.y + 2.0 / 3.0 * (s.control.y - p0.y),
                            );
                            let c2 = Point::new(
                                s.end.x + 2.0 / 3.0 * (s.control.x - s.end.x),
                                s.end.y + 2.0 / 3.0 * (s.control.y - s.end.y),
                            );
                            c.cubic_to(
                                c1.x as f32,
                                c1.y as f32,
                                c2.x as f32,
                                c2.y as f32,
                                s.end.x as f32,
                                s.end.y as f32,
                            );
                            p0 = s.end;
                        }
                        c.stroke();
                    }
                }
            }
            Primitive::AutoOverlay { from, to, .. } => {
                c.set_stroke_rgb(0.0, 0.0, 0.0);
                c.set_line_width(1.4);
                c.set_dash_pattern([6.0, 6.0], 0.0);
                Self::line(c, *from, *to);
            }
            Primitive::Takt { from, to } => {
                c.set_stroke_rgb(1.0, 0.0, 0.0);
                c.set_line_width(1.2);
                Self::line(c, *from, *to);
            }
        }
        c.restore_state();
    }
}

impl RenderSurface for PdfSurface {
    fn row_centers(&self, rows: &[Row]) -> Vec<f64> {
        uniform_row_centers(rows.len(), self.row_height)
    }

    fn chart_height(&self, rows: &[Row]) -> f64 {
        rows.len().max(1) as f64 * self.row_height
    }

    fn paint(&mut self, sheet: &ChartSheet, geometry: &ChartGeometry) -> AppResult<()> {
        let table_w: f32 = COLUMNS.iter().map(|(_, w)| w).sum();
        let chart_x = SHEET_MARGIN + table_w;
        let chart_y = SHEET_MARGIN + TITLE_H + RULER_H;
        let page_w = chart_x + geometry.width as f32 + SHEET_MARGIN;
        let page_h = chart_y + geometry.height as f32 + self.row_height as f32 + SHEET_MARGIN;

        let mut c = Content::new();
        c.transform([1.0, 0.0, 0.0, -1.0, 0.0, page_h]);

        Self::text(
            &mut c,
            SHEET_MARGIN,
            SHEET_MARGIN + 16.0,
            14.0,
            &format!("{} / {}", sheet.process_name, sheet.element_work_name),
        );
        Self::text(
            &mut c,
            SHEET_MARGIN,
            SHEET_MARGIN + 36.0,
            9.0,
            &format!(
                "Video {}   Takt {:.0}s",
                format_mmss(sheet.video_duration_sec),
                geometry.takt_sec
            ),
        );

        self.table(&mut c, &sheet.rows, chart_y, geometry.height as f32);

        c.save_state();
        c.transform([1.0, 0.0, 0.0, 1.0, chart_x, chart_y]);

        for tick in &geometry.ticks {
            Self::text(&mut c, tick.x as f32 - 4.0, -8.0, 8.0, &tick.sec.to_string());
        }
        for p in &geometry.primitives {
            Self::primitive(&mut c, p);
        }
        c.restore_state();

        self.manager.push_page(page_w, page_h, c);
        Ok(())
    }
}
