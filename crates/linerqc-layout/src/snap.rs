//! Grid and panel-to-panel snapping.
//!
//! Snapping is per axis: an `x` decision never influences a `y` decision.
//! On each axis the grid candidate and the nearest panel-edge candidate are
//! both measured from the pre-snap value; the panel candidate wins when it is
//! within `snap_threshold` and no farther than the grid candidate. Hence no
//! edge moves by more than `snap_threshold` (panel) or `grid_size / 2`
//! (grid).
//!
//! In resize mode the grid rounds the extent on each driven axis and places
//! the moving edge from the fixed one, so `width`/`height` land on grid
//! multiples without dragging the anchor. An extent shorter than half a cell
//! rounds up to one cell.
//!
//! Neighbor lookup is a linear scan over a flat slice. Ties between equally
//! near neighbor edges go to the earlier neighbor.

use linerqc_core::geometry::Geometry;
use serde::{Deserialize, Serialize};

use crate::config::{PackedRgba, SnapConfig};
use crate::handle::{Axis, EdgeSide, ResizeHandle};

/// Transient alignment guide produced by one update tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: PackedRgba,
}

impl SnapLine {
    /// Whether the guide is a vertical segment (an `x` alignment).
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }
}

/// How snapping may change the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// Translate only; size is preserved.
    Move,
    /// Only the edges the handle drags may move.
    Resize(ResizeHandle),
    /// Round all four fields to the grid, then translate toward neighbors.
    Place,
}

/// Snapped geometry plus the guides to draw for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapOutcome {
    pub geometry: Geometry,
    pub lines: Vec<SnapLine>,
}

impl SnapOutcome {
    fn unchanged(geometry: Geometry) -> Self {
        Self {
            geometry,
            lines: Vec::new(),
        }
    }
}

/// Round `value` to the nearest multiple of `grid`.
#[inline]
#[must_use]
pub fn grid_snap_value(value: f64, grid: f64) -> f64 {
    (value / grid).round() * grid
}

/// Round `x`, `y`, `width`, `height` independently to the grid.
///
/// Extents never round below one grid cell. Idempotent.
#[must_use]
pub fn grid_snap(geometry: Geometry, grid: f64) -> Geometry {
    if !(grid.is_finite() && grid > 0.0) {
        return geometry;
    }
    Geometry::new(
        grid_snap_value(geometry.x, grid),
        grid_snap_value(geometry.y, grid),
        grid_snap_value(geometry.width, grid).max(grid),
        grid_snap_value(geometry.height, grid).max(grid),
    )
}

/// Snap `geometry` against the grid and `neighbors`.
///
/// `neighbors` must not contain the panel being snapped. Neighbors with
/// invalid geometry are skipped.
#[must_use]
pub fn snap(
    geometry: Geometry,
    neighbors: &[Geometry],
    config: &SnapConfig,
    mode: SnapMode,
) -> SnapOutcome {
    if !geometry.is_valid() {
        return SnapOutcome::unchanged(geometry);
    }
    let grid = config.grid();
    let threshold = config.panel_threshold();
    if grid.is_none() && threshold.is_none() {
        return SnapOutcome::unchanged(geometry);
    }

    let mut snapped = geometry;
    let mut matches: Vec<AppliedMatch> = Vec::new();

    match mode {
        SnapMode::Move => {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                translate_axis(&mut snapped, axis, neighbors, grid, threshold, &mut matches);
            }
        }
        SnapMode::Place => {
            if let Some(grid) = grid {
                snapped.width = grid_snap_value(snapped.width, grid).max(grid);
                snapped.height = grid_snap_value(snapped.height, grid).max(grid);
            }
            for axis in [Axis::Horizontal, Axis::Vertical] {
                translate_axis(&mut snapped, axis, neighbors, grid, threshold, &mut matches);
            }
        }
        SnapMode::Resize(handle) => {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                if let Some(side) = handle.edge(axis) {
                    stretch_edge(&mut snapped, axis, side, neighbors, grid, threshold, &mut matches);
                }
            }
        }
    }

    let lines = matches
        .iter()
        .map(|applied| guide_line(&snapped, &neighbors[applied.neighbor], applied, config.line_color))
        .collect();
    SnapOutcome {
        geometry: snapped,
        lines,
    }
}

#[derive(Debug, Clone, Copy)]
struct EdgeMatch {
    delta: f64,
    target: f64,
    neighbor: usize,
}

#[derive(Debug, Clone, Copy)]
struct AppliedMatch {
    axis: Axis,
    target: f64,
    neighbor: usize,
}

fn edge_value(geometry: &Geometry, axis: Axis, side: EdgeSide) -> f64 {
    match (axis, side) {
        (Axis::Horizontal, EdgeSide::Start) => geometry.left(),
        (Axis::Horizontal, EdgeSide::End) => geometry.right(),
        (Axis::Vertical, EdgeSide::Start) => geometry.top(),
        (Axis::Vertical, EdgeSide::End) => geometry.bottom(),
    }
}

/// Nearest neighbor edge on `axis` within `threshold` of `value`.
fn nearest_edge(value: f64, axis: Axis, neighbors: &[Geometry], threshold: f64) -> Option<EdgeMatch> {
    let mut best: Option<EdgeMatch> = None;
    for (index, neighbor) in neighbors.iter().enumerate() {
        if !neighbor.is_valid() {
            continue;
        }
        for side in [EdgeSide::Start, EdgeSide::End] {
            let target = edge_value(neighbor, axis, side);
            let delta = target - value;
            if delta.abs() > threshold {
                continue;
            }
            match best {
                Some(current) if delta.abs() >= current.delta.abs() => {}
                _ => {
                    best = Some(EdgeMatch {
                        delta,
                        target,
                        neighbor: index,
                    });
                }
            }
        }
    }
    best
}

/// Pick the panel candidate over the grid candidate when it is no farther.
fn prefer_panel(panel: Option<EdgeMatch>, grid_delta: Option<f64>) -> Option<EdgeMatch> {
    match (panel, grid_delta) {
        (Some(found), Some(grid_delta)) if found.delta.abs() <= grid_delta.abs() => Some(found),
        (Some(found), None) => Some(found),
        _ => None,
    }
}

fn translate_axis(
    geometry: &mut Geometry,
    axis: Axis,
    neighbors: &[Geometry],
    grid: Option<f64>,
    threshold: Option<f64>,
    matches: &mut Vec<AppliedMatch>,
) {
    let origin = edge_value(geometry, axis, EdgeSide::Start);
    let grid_delta = grid.map(|grid| grid_snap_value(origin, grid) - origin);

    let panel = threshold.and_then(|threshold| {
        let start = nearest_edge(origin, axis, neighbors, threshold);
        let end = nearest_edge(edge_value(geometry, axis, EdgeSide::End), axis, neighbors, threshold);
        match (start, end) {
            (Some(s), Some(e)) if e.delta.abs() < s.delta.abs() => Some(e),
            (Some(s), _) => Some(s),
            (None, e) => e,
        }
    });

    let shift = match prefer_panel(panel, grid_delta) {
        Some(found) => {
            matches.push(AppliedMatch {
                axis,
                target: found.target,
                neighbor: found.neighbor,
            });
            found.delta
        }
        None => grid_delta.unwrap_or(0.0),
    };
    match axis {
        Axis::Horizontal => geometry.x += shift,
        Axis::Vertical => geometry.y += shift,
    }
}

fn stretch_edge(
    geometry: &mut Geometry,
    axis: Axis,
    side: EdgeSide,
    neighbors: &[Geometry],
    grid: Option<f64>,
    threshold: Option<f64>,
    matches: &mut Vec<AppliedMatch>,
) {
    let value = edge_value(geometry, axis, side);
    let grid_delta = grid.map(|grid| grid_extent_edge(geometry, axis, side, grid) - value);
    let panel = threshold.and_then(|threshold| nearest_edge(value, axis, neighbors, threshold));

    let target = match prefer_panel(panel, grid_delta) {
        Some(found) => {
            matches.push(AppliedMatch {
                axis,
                target: found.target,
                neighbor: found.neighbor,
            });
            found.target
        }
        None => value + grid_delta.unwrap_or(0.0),
    };

    let (left, top, right, bottom) = (
        geometry.left(),
        geometry.top(),
        geometry.right(),
        geometry.bottom(),
    );
    *geometry = match (axis, side) {
        (Axis::Horizontal, EdgeSide::Start) => Geometry::from_edges(target, top, right, bottom),
        (Axis::Horizontal, EdgeSide::End) => Geometry::from_edges(left, top, target, bottom),
        (Axis::Vertical, EdgeSide::Start) => Geometry::from_edges(left, target, right, bottom),
        (Axis::Vertical, EdgeSide::End) => Geometry::from_edges(left, top, right, target),
    };
}

/// Where the moving edge lands once the extent on `axis` is rounded to the
/// grid, measured from the fixed opposite edge.
fn grid_extent_edge(geometry: &Geometry, axis: Axis, side: EdgeSide, grid: f64) -> f64 {
    let (start, end) = match axis {
        Axis::Horizontal => (geometry.left(), geometry.right()),
        Axis::Vertical => (geometry.top(), geometry.bottom()),
    };
    let extent = grid_snap_value(end - start, grid).max(grid);
    match side {
        EdgeSide::Start => end - extent,
        EdgeSide::End => start + extent,
    }
}

fn guide_line(
    geometry: &Geometry,
    neighbor: &Geometry,
    applied: &AppliedMatch,
    color: PackedRgba,
) -> SnapLine {
    match applied.axis {
        Axis::Horizontal => SnapLine {
            x1: applied.target,
            y1: geometry.top().min(neighbor.top()),
            x2: applied.target,
            y2: geometry.bottom().max(neighbor.bottom()),
            color,
        },
        Axis::Vertical => SnapLine {
            x1: geometry.left().min(neighbor.left()),
            y1: applied.target,
            x2: geometry.right().max(neighbor.right()),
            y2: applied.target,
            color,
        },
    }
}
