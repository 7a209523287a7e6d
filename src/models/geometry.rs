//! Drawable primitives produced by the chart layout.
//! Coordinates are render-surface pixels, origin at the top-left corner of
//! the chart area, y growing downwards.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One quadratic Bézier piece of a wavy connector (starts where the
/// previous piece ended).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadSegment {
    pub control: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GridKind {
    /// Light dotted line at every second.
    Second,
    /// Solid heavier line at every 10th second.
    TenSeconds,
    /// Dotted horizontal line at a row boundary.
    RowBoundary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConnectorPath {
    Straight,
    Wavy(Vec<QuadSegment>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    Grid {
        kind: GridKind,
        from: Point,
        to: Point,
    },
    ManualBlock {
        row: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Connector {
        from_row: usize,
        from: Point,
        to: Point,
        path: ConnectorPath,
    },
    AutoOverlay {
        row: usize,
        from: Point,
        to: Point,
    },
    Takt {
        from: Point,
        to: Point,
    },
}

/// A labelled tick of the numeric ruler above the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTick {
    pub sec: u32,
    pub x: f64,
}

/// Full result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub takt_sec: f64,
    pub ticks: Vec<AxisTick>,
    pub primitives: Vec<Primitive>,
}

impl ChartGeometry {
    pub fn manual_blocks(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::ManualBlock { .. }))
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Connector { .. }))
    }

    pub fn auto_overlays(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::AutoOverlay { .. }))
    }

    pub fn grid_lines(&self, kind: GridKind) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(move |p| matches!(p, Primitive::Grid { kind: k, .. } if *k == kind))
    }
}
