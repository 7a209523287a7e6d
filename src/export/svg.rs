// src/export/svg.rs

use crate::core::calculator::layout::uniform_row_centers;
use crate::errors::AppResult;
use crate::export::surface::RenderSurface;
use crate::models::geometry::{ChartGeometry, ConnectorPath, GridKind, Point, Primitive};
use crate::models::project::ChartSheet;
use crate::models::row::{Row, RowTotals};
use crate::utils::time::format_mmss;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const MARGIN: f64 = 20.0;
const TITLE_H: f64 = 48.0;
const RULER_H: f64 = 24.0;
const AUTO_NAME_LINE: f64 = 10.0;
const FONT: &str = "'Noto Sans CJK JP','Hiragino Sans','Meiryo',sans-serif";

/// Table columns left of the chart: (header, width).
const COLUMNS: [(&str, f64); 5] = [
    ("No", 36.0),
    ("作業名", 220.0),
    ("手作業", 56.0),
    ("自動", 56.0),
    ("歩行", 56.0),
];

fn table_width() -> f64 {
    COLUMNS.iter().map(|(_, w)| w).sum()
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Seconds cell: blank for zero.
fn sec_cell(v: u32) -> String {
    if v == 0 { String::new() } else { v.to_string() }
}

/// Standard-work sheet as a standalone SVG document.
pub struct SvgSurface {
    row_height: f64,
    doc: String,
}

impl SvgSurface {
    pub fn new(row_height: f64) -> Self {
        Self {
            row_height,
            doc: String::new(),
        }
    }

    /// The painted document ("" before `paint`).
    pub fn as_str(&self) -> &str {
        &self.doc
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        fs::write(path, self.doc.as_bytes())?;
        Ok(())
    }

    fn header(&self, svg: &mut String, sheet: &ChartSheet, geometry: &ChartGeometry) {
        let _ = writeln!(
            svg,
            "  <text x='{MARGIN}' y='{:.1}' font-size='16' font-weight='bold'>{}</text>",
            MARGIN + 16.0,
            xml_escape(&format!(
                "工程: {}    要素作業: {}",
                sheet.process_name, sheet.element_work_name
            ))
        );
        let _ = writeln!(
            svg,
            "  <text x='{MARGIN}' y='{:.1}' font-size='11' fill='#444'>{}</text>",
            MARGIN + 36.0,
            xml_escape(&format!(
                "動画長 {}    タクトタイム {:.0}s",
                format_mmss(sheet.video_duration_sec),
                geometry.takt_sec
            ))
        );
    }

    fn table(&self, svg: &mut String, rows: &[Row], top: f64, chart_h: f64) {
        let left = MARGIN;
        let header_y = top - RULER_H;

        // header cells
        let mut x = left;
        for (label, w) in COLUMNS {
            let _ = writeln!(
                svg,
                "  <rect x='{x:.1}' y='{header_y:.1}' width='{w:.1}' height='{RULER_H:.1}' fill='#f0f0f0' stroke='#999' stroke-width='0.8'/>"
            );
            let _ = writeln!(
                svg,
                "  <text x='{:.1}' y='{:.1}' font-size='11' text-anchor='middle'>{}</text>",
                x + w / 2.0,
                header_y + RULER_H / 2.0 + 4.0,
                label
            );
            x += w;
        }

        // body rows
        for (i, r) in rows.iter().enumerate() {
            let y = top + i as f64 * self.row_height;
            let cells = [
                r.no.to_string(),
                r.work_name.clone(),
                sec_cell(r.manual_sec),
                sec_cell(r.auto_sec),
                sec_cell(r.walk_sec),
            ];

            let mut x = left;
            for (c, ((_, w), text)) in COLUMNS.iter().zip(cells.iter()).enumerate() {
                let _ = writeln!(
                    svg,
                    "  <rect x='{x:.1}' y='{y:.1}' width='{w:.1}' height='{:.1}' fill='none' stroke='#999' stroke-width='0.8'/>",
                    self.row_height
                );

                if c == 1 {
                    let baseline = if r.auto_names.is_empty() {
                        y + self.row_height / 2.0 + 4.0
                    } else {
                        y + 13.0
                    };
                    let _ = writeln!(
                        svg,
                        "  <text x='{:.1}' y='{baseline:.1}' font-size='12'>{}</text>",
                        x + 4.0,
                        xml_escape(text)
                    );
                    if !r.auto_names.is_empty() {
                        self.auto_names(svg, &r.auto_names, x + 10.0, baseline + 11.0);
                    }
                } else {
                    let anchor_x = if c == 0 { x + w / 2.0 } else { x + w - 4.0 };
                    let anchor = if c == 0 { "middle" } else { "end" };
                    let _ = writeln!(
                        svg,
                        "  <text x='{anchor_x:.1}' y='{:.1}' font-size='12' text-anchor='{anchor}'>{}</text>",
                        y + self.row_height / 2.0 + 4.0,
                        xml_escape(text)
                    );
                }
                x += w;
            }
        }

        // totals
        let totals = RowTotals::from_rows(rows);
        let y = top + chart_h;
        let cells = [
            ("合計".to_string(), COLUMNS[0].1 + COLUMNS[1].1),
            (sec_cell(totals.manual_sec), COLUMNS[2].1),
            (sec_cell(totals.auto_sec), COLUMNS[3].1),
            (sec_cell(totals.walk_sec), COLUMNS[4].1),
        ];
        let mut x = left;
        for (i, (text, w)) in cells.iter().enumerate() {
            let _ = writeln!(
                svg,
                "  <rect x='{x:.1}' y='{y:.1}' width='{w:.1}' height='{:.1}' fill='#f7f7f7' stroke='#999' stroke-width='0.8'/>",
                self.row_height
            );
            let (tx, anchor) = if i == 0 {
                (x + w / 2.0, "middle")
            } else {
                (x + w - 4.0, "end")
            };
            let _ = writeln!(
                svg,
                "  <text x='{tx:.1}' y='{:.1}' font-size='12' font-weight='bold' text-anchor='{anchor}'>{}</text>",
                y + self.row_height / 2.0 + 4.0,
                xml_escape(text)
            );
            x += w;
        }
    }

    /// Automatic work names under the row's work name, one line each.
    fn auto_names(&self, svg: &mut String, names: &[String], x: f64, first_baseline: f64) {
        let _ = writeln!(
            svg,
            "  <text x='{x:.1}' y='{first_baseline:.1}' font-size='9' fill='#c00000'>"
        );
        for (i, name) in names.iter().enumerate() {
            let dy = if i == 0 { 0.0 } else { AUTO_NAME_LINE };
            let _ = writeln!(
                svg,
                "    <tspan x='{x:.1}' dy='{dy:.1}'>{}</tspan>",
                xml_escape(name)
            );
        }
        let _ = writeln!(svg, "  </text>");
    }

    fn ruler(&self, svg: &mut String, geometry: &ChartGeometry) {
        let _ = writeln!(svg, "    <g font-size='10' fill='#333' text-anchor='middle'>");
        for tick in &geometry.ticks {
            let _ = writeln!(
                svg,
                "      <text x='{:.1}' y='{:.1}'>{}</text>",
                tick.x,
                -RULER_H / 2.0 + 4.0,
                tick.sec
            );
        }
        let _ = writeln!(svg, "    </g>");
    }

    fn primitive(&self, svg: &mut String, p: &Primitive) {
        match p {
            Primitive::Grid { kind, from, to } => {
                let style = match kind {
                    GridKind::Second => "stroke='#d0d0d0' stroke-width='0.8' stroke-dasharray='1 4'",
                    GridKind::TenSeconds => "stroke='#666' stroke-width='1.1'",
                    GridKind::RowBoundary => {
                        "stroke='#d9d9d9' stroke-width='0.8' stroke-dasharray='2 4'"
                    }
                };
                line(svg, *from, *to, style);
            }
            Primitive::ManualBlock {
                x, y, width, height, ..
            } => {
                let _ = writeln!(
                    svg,
                    "    <rect x='{x:.2}' y='{y:.2}' width='{width:.2}' height='{height:.2}' fill='#E6E6FA' stroke='#000' stroke-width='1'/>"
                );
            }
            Primitive::Connector { from, to, path, .. } => match path {
                ConnectorPath::Straight => {
                    line(svg, *from, *to, "stroke='#000' stroke-width='1.2'");
                }
                ConnectorPath::Wavy(segments) => {
                    let mut d = format!("M {:.2} {:.2}", from.x, from.y);
                    for s in segments {
                        let _ = write!(
                            d,
                            " Q {:.2} {:.2} {:.2} {:.2}",
                            s.control.x, s.control.y, s.end.x, s.end.y
                        );
                    }
                    let _ = writeln!(
                        svg,
                        "    <path d='{d}' fill='none' stroke='#000' stroke-width='1.2'/>"
                    );
                }
            },
            Primitive::AutoOverlay { from, to, .. } => {
                line(
                    svg,
                    *from,
                    *to,
                    "stroke='#000' stroke-width='1.4' stroke-dasharray='6 6'",
                );
            }
            Primitive::Takt { from, to } => {
                line(svg, *from, *to, "stroke='red' stroke-width='1.2'");
            }
        }
    }
}

fn line(svg: &mut String, from: Point, to: Point, style: &str) {
    let _ = writeln!(
        svg,
        "    <line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' {style}/>",
        from.x, from.y, to.x, to.y
    );
}

impl RenderSurface for SvgSurface {
    fn row_centers(&self, rows: &[Row]) -> Vec<f64> {
        uniform_row_centers(rows.len(), self.row_height)
    }

    fn chart_height(&self, rows: &[Row]) -> f64 {
        rows.len().max(1) as f64 * self.row_height
    }

    fn paint(&mut self, sheet: &ChartSheet, geometry: &ChartGeometry) -> AppResult<()> {
        let chart_x = MARGIN + table_width();
        let chart_y = MARGIN + TITLE_H + RULER_H;
        let width = chart_x + geometry.width + MARGIN;
        let height = chart_y + geometry.height + self.row_height + MARGIN;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{width:.0}' height='{height:.0}' viewBox='0 0 {width:.0} {height:.0}' font-family=\"{FONT}\">"
        );
        let _ = writeln!(svg, "  <rect width='100%' height='100%' fill='#fff'/>");

        self.header(&mut svg, sheet, geometry);
        self.table(&mut svg, &sheet.rows, chart_y, geometry.height);

        let _ = writeln!(svg, "  <g transform='translate({chart_x:.1},{chart_y:.1})'>");
        self.ruler(&mut svg, geometry);
        let _ = writeln!(
            svg,
            "    <rect x='0' y='0' width='{:.1}' height='{:.1}' fill='none' stroke='#999' stroke-width='0.8'/>",
            geometry.width, geometry.height
        );
        for p in &geometry.primitives {
            self.primitive(&mut svg, p);
        }
        let _ = writeln!(svg, "  </g>");
        let _ = writeln!(svg, "</svg>");

        self.doc = svg;
        Ok(())
    }
}
