//! Standard-work chart geometry.
//!
//! Pure function of the rows, the per-second scale and the row centers the
//! render surface reports. Every x coordinate is `seconds * px_per_sec`, so
//! the chart, the ruler and the grid agree for the same second.

use crate::models::geometry::{
    AxisTick, ChartGeometry, ConnectorPath, GridKind, Point, Primitive, QuadSegment,
};
use crate::models::row::Row;

pub const PX_PER_SEC: f64 = 8.0;
pub const MAX_AXIS_SEC: u32 = 180;
pub const SCALE_STEP: u32 = 10;
pub const ROW_HEIGHT: f64 = 36.0;

pub const MANUAL_HEIGHT: f64 = 12.0;
pub const WALK_AMPLITUDE: f64 = 2.2;
pub const WALK_WAVE_LEN: f64 = 5.0;
pub const WALK_MIN_SEGMENTS: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub px_per_sec: f64,
    pub axis_max_sec: u32,
    pub row_height: f64,
    /// Height of the chart area as laid out by the surface.
    pub chart_height: f64,
    /// Takt preference; `<= 0` means "use the total timeline duration".
    pub takt_sec: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            px_per_sec: PX_PER_SEC,
            axis_max_sec: MAX_AXIS_SEC,
            row_height: ROW_HEIGHT,
            chart_height: ROW_HEIGHT,
            takt_sec: 0.0,
        }
    }
}

impl LayoutParams {
    pub fn chart_width(&self) -> f64 {
        self.axis_max_sec as f64 * self.px_per_sec
    }

    fn x(&self, sec: f64) -> f64 {
        sec * self.px_per_sec
    }
}

/// Manual block bounds of one row, kept for the connector pass.
#[derive(Debug, Clone, Copy)]
struct BlockInfo {
    x0: f64,
    x1: f64,
    y_top: f64,
    y_bottom: f64,
    walk_sec: u32,
}

/// Effective takt: explicit preference when positive, otherwise the total
/// operator time of `rows`, clamped to the axis.
///
/// `layout_chart` passes only the drawn rows (those with a center), so rows
/// the surface could not place do not stretch the fallback.
pub fn resolve_takt(rows: &[Row], preferred: f64, axis_max_sec: u32) -> f64 {
    let total: u64 = rows.iter().map(|r| u64::from(r.span_sec())).sum();
    let takt = if preferred.is_finite() && preferred > 0.0 {
        preferred
    } else {
        total as f64
    };
    takt.clamp(0.0, axis_max_sec as f64)
}

pub fn layout_chart(rows: &[Row], row_centers: &[f64], params: &LayoutParams) -> ChartGeometry {
    let width = params.chart_width();
    let height = params.chart_height.max(0.0);

    let mut primitives = Vec::new();

    // 1) grid
    grid(&mut primitives, params, width, height);

    // 2) manual blocks (back) on the operator clock: manual → auto → walk
    let mut blocks: Vec<Option<BlockInfo>> = Vec::with_capacity(rows.len());
    let mut t: u32 = 0;

    for (i, r) in rows.iter().enumerate() {
        let manual_start = t;
        let manual_end = t.saturating_add(r.manual_sec);
        t = manual_end
            .saturating_add(r.auto_sec)
            .saturating_add(r.walk_sec);

        let Some(&ym) = row_centers.get(i) else {
            blocks.push(None);
            continue;
        };

        let x0 = params.x(manual_start as f64);
        let x1 = params.x(manual_end as f64);
        let y_top = ym - MANUAL_HEIGHT / 2.0;

        primitives.push(Primitive::ManualBlock {
            row: i,
            x: x0,
            y: y_top,
            width: (x1 - x0).max(0.0),
            height: MANUAL_HEIGHT,
        });

        blocks.push(Some(BlockInfo {
            x0,
            x1,
            y_top,
            y_bottom: ym + MANUAL_HEIGHT / 2.0,
            walk_sec: r.walk_sec,
        }));
    }

    // 3) connectors: right-bottom of row i → left-top of row i+1
    for (i, pair) in blocks.windows(2).enumerate() {
        let (Some(a), Some(b)) = (pair[0], pair[1]) else {
            continue;
        };

        let from = Point::new(a.x1, a.y_bottom);
        let to = Point::new(b.x0, b.y_top);

        let path = if a.walk_sec > 0 {
            ConnectorPath::Wavy(wavy_segments(from, to, WALK_WAVE_LEN, WALK_AMPLITUDE))
        } else {
            ConnectorPath::Straight
        };

        primitives.push(Primitive::Connector {
            from_row: i,
            from,
            to,
            path,
        });
    }

    // 4) automatic overlay (front), right after the manual interval
    let mut t: u32 = 0;
    for (i, r) in rows.iter().enumerate() {
        let auto_start = t.saturating_add(r.manual_sec);
        let auto_end = auto_start.saturating_add(r.auto_sec);
        t = auto_end.saturating_add(r.walk_sec);

        if r.auto_sec == 0 {
            continue;
        }
        let Some(&ym) = row_centers.get(i) else {
            continue;
        };

        primitives.push(Primitive::AutoOverlay {
            row: i,
            from: Point::new(params.x(auto_start as f64), ym),
            to: Point::new(params.x(auto_end as f64), ym),
        });
    }

    // 5) takt
    let drawn = &rows[..rows.len().min(row_centers.len())];
    let takt_sec = resolve_takt(drawn, params.takt_sec, params.axis_max_sec);
    let tx = params.x(takt_sec);
    primitives.push(Primitive::Takt {
        from: Point::new(tx, 0.0),
        to: Point::new(tx, height),
    });

    ChartGeometry {
        width,
        height,
        takt_sec,
        ticks: ruler_ticks(params),
        primitives,
    }
}

/// Labelled ticks of the numeric ruler, every `SCALE_STEP` seconds.
pub fn ruler_ticks(params: &LayoutParams) -> Vec<AxisTick> {
    (0..=params.axis_max_sec)
        .step_by(SCALE_STEP as usize)
        .map(|sec| AxisTick {
            sec,
            x: params.x(sec as f64),
        })
        .collect()
}

fn grid(out: &mut Vec<Primitive>, params: &LayoutParams, width: f64, height: f64) {
    // vertical: 1 s dotted, 10 s solid
    for s in 0..=params.axis_max_sec {
        let x = params.x(s as f64);
        if x < 0.0 || x > width {
            continue;
        }
        let kind = if s % SCALE_STEP == 0 {
            GridKind::TenSeconds
        } else {
            GridKind::Second
        };
        out.push(Primitive::Grid {
            kind,
            from: Point::new(x, 0.0),
            to: Point::new(x, height),
        });
    }

    // horizontal row boundaries
    if params.row_height <= 0.0 {
        return;
    }
    let n = (height / params.row_height).floor() as usize;
    for i in 0..=n {
        let y = i as f64 * params.row_height;
        out.push(Primitive::Grid {
            kind: GridKind::RowBoundary,
            from: Point::new(0.0, y),
            to: Point::new(width, y),
        });
    }
}

/// Zig-zag approximation of the straight segment `from → to`: quadratic
/// pieces whose control points alternate ±`amp` along the unit normal.
/// Never fewer than `WALK_MIN_SEGMENTS` pieces, whatever the span.
pub fn wavy_segments(from: Point, to: Point, wave_len: f64, amp: f64) -> Vec<QuadSegment> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = dx.hypot(dy).max(1.0);
    let n = ((len / wave_len).floor() as usize).max(WALK_MIN_SEGMENTS);

    let nx = -dy / len;
    let ny = dx / len;

    (1..=n)
        .map(|i| {
            let tt = i as f64 / n as f64;
            let phase = if i % 2 == 0 { -1.0 } else { 1.0 };
            let mt = (i as f64 - 0.5) / n as f64;

            QuadSegment {
                control: Point::new(
                    from.x + dx * mt + nx * amp * phase,
                    from.y + dy * mt + ny * amp * phase,
                ),
                end: Point::new(from.x + dx * tt, from.y + dy * tt),
            }
        })
        .collect()
}

/// Row centers of a surface that stacks rows of a fixed height from y = 0.
pub fn uniform_row_centers(row_count: usize, row_height: f64) -> Vec<f64> {
    (0..row_count)
        .map(|i| (i as f64 + 0.5) * row_height)
        .collect()
}
