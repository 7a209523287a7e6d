// src/export/surface.rs

use crate::core::calculator::layout::{LayoutParams, layout_chart};
use crate::errors::AppResult;
use crate::models::geometry::ChartGeometry;
use crate::models::project::ChartSheet;
use crate::models::row::Row;

/// Something that can show a standard-work sheet: a table of rows with the
/// chart drawn beside it.
///
/// The surface owns the vertical layout of the table, so it is the one that
/// knows where each row's center falls inside the chart area.
pub trait RenderSurface {
    /// Vertical center of every row, in chart coordinates (y = 0 at the top
    /// of the chart area). May be shorter than `rows`; rows without a center
    /// are not drawn.
    fn row_centers(&self, rows: &[Row]) -> Vec<f64>;

    /// Height of the chart area for `rows`.
    fn chart_height(&self, rows: &[Row]) -> f64;

    /// Draw the sheet: header, table, ruler and the laid out chart.
    fn paint(&mut self, sheet: &ChartSheet, geometry: &ChartGeometry) -> AppResult<()>;
}

/// Lay the sheet out for `surface` and let it paint the result.
pub fn synthesize<S: RenderSurface + ?Sized>(
    surface: &mut S,
    sheet: &ChartSheet,
    base: LayoutParams,
) -> AppResult<ChartGeometry> {
    let params = LayoutParams {
        chart_height: surface.chart_height(&sheet.rows),
        takt_sec: sheet.takt_sec,
        ..base
    };
    let centers = surface.row_centers(&sheet.rows);

    let geometry = layout_chart(&sheet.rows, &centers, &params);
    surface.paint(sheet, &geometry)?;

    Ok(geometry)
}
