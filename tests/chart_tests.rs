use lapchart::core::calculator::layout::LayoutParams;
use lapchart::errors::AppResult;
use lapchart::export::svg::SvgSurface;
use lapchart::export::{RenderSurface, synthesize};
use lapchart::models::geometry::ChartGeometry;
use lapchart::models::project::ChartSheet;
use lapchart::models::row::Row;

fn sheet(rows: Vec<Row>, takt_sec: f64) -> ChartSheet {
    ChartSheet {
        process_name: "Assembly".into(),
        element_work_name: "Bracket <B&C>".into(),
        video_duration_sec: 95,
        takt_sec,
        rows,
    }
}

fn rows() -> Vec<Row> {
    let mut a = Row::new("A", 10);
    a.walk_sec = 3;
    a.no = 1;
    let mut b = Row::new("B", 7);
    b.auto_sec = 4;
    b.auto_names = vec!["press".into()];
    b.no = 2;
    vec![a, b]
}

/// Surface with rows of uneven height, remembering what it was asked to paint.
struct TallFirstRow {
    painted: Option<ChartGeometry>,
}

impl RenderSurface for TallFirstRow {
    fn row_centers(&self, rows: &[Row]) -> Vec<f64> {
        (0..rows.len()).map(|i| if i == 0 { 30.0 } else { 60.0 + 20.0 * i as f64 }).collect()
    }

    fn chart_height(&self, rows: &[Row]) -> f64 {
        60.0 + 40.0 * rows.len().saturating_sub(1) as f64
    }

    fn paint(&mut self, _sheet: &ChartSheet, geometry: &ChartGeometry) -> AppResult<()> {
        self.painted = Some(geometry.clone());
        Ok(())
    }
}

#[test]
fn test_surface_supplies_row_centers_and_height() {
    let mut surface = TallFirstRow { painted: None };
    let g = synthesize(&mut surface, &sheet(rows(), 0.0), LayoutParams::default())
        .expect("synthesize");

    assert_eq!(g.height, 100.0);
    assert_eq!(g.takt_sec, 24.0);
    assert_eq!(surface.painted.as_ref(), Some(&g));

    let ys: Vec<f64> = g
        .manual_blocks()
        .map(|p| match p {
            lapchart::models::geometry::Primitive::ManualBlock { y, height, .. } => y + height / 2.0,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(ys, vec![30.0, 80.0]);
}

#[test]
fn test_svg_sheet_content() {
    let mut surface = SvgSurface::new(36.0);
    synthesize(&mut surface, &sheet(rows(), 45.0), LayoutParams::default()).expect("svg");

    let svg = surface.as_str();
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    // wavy walk connector and dashed automatic overlay
    assert!(svg.contains(" Q "));
    assert!(svg.contains("stroke-dasharray='6 6'"));
    // takt line at 45 s
    assert!(svg.contains("x1='360.00' y1='0.00' x2='360.00' y2='72.00' stroke='red'"));
    // names are escaped, totals are shown
    assert!(svg.contains("Bracket &lt;B&amp;C&gt;"));
    assert!(svg.contains("合計"));
    assert!(svg.contains("press"));
}

#[test]
fn test_svg_without_rows_has_grid_only() {
    let mut surface = SvgSurface::new(36.0);
    let g = synthesize(&mut surface, &sheet(Vec::new(), 0.0), LayoutParams::default())
        .expect("svg");

    assert_eq!(g.manual_blocks().count(), 0);
    assert!(!surface.as_str().contains("#E6E6FA"));
    assert!(surface.as_str().contains("stroke='#666'"));
}

#[test]
fn test_svg_lists_each_automatic_name_on_its_own_line() {
    let mut rs = rows();
    rs[1].auto_names = vec!["press".into(), "wash & dry".into()];
    let mut surface = SvgSurface::new(36.0);
    synthesize(&mut surface, &sheet(rs, 0.0), LayoutParams::default()).expect("svg");

    let svg = surface.as_str();
    assert!(svg.contains("fill='#c00000'"));
    assert!(svg.contains("<tspan x='66.0' dy='0.0'>press</tspan>"));
    assert!(svg.contains("<tspan x='66.0' dy='10.0'>wash &amp; dry</tspan>"));
    assert!(!svg.contains(" / "));
}
