//! Constraint solver: raw candidate geometry to validated geometry.
//!
//! # Ordering
//!
//! ```text
//! min/max clamp -> aspect correction -> min/max clamp
//! ```
//!
//! The second clamp catches dimensions pushed out of range by the aspect
//! correction. Size limits always win over the aspect lock; the conflict is
//! reported through [`ConstraintOutcome::violated`], never as an error.
//!
//! Clamping is anchored: the position on each axis is recomputed from the
//! fixed point captured from the candidate plus the clamped extent.

use linerqc_core::geometry::{Bounds, Geometry};
use serde::{Deserialize, Serialize};

use crate::config::ConstraintSet;
use crate::handle::{Axis, EdgeSide, ResizeHandle};

/// Relative tolerance when checking a locked aspect ratio.
pub const ASPECT_EPSILON: f64 = 1e-6;

/// The point of an axis that stays fixed while resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorSide {
    /// Left or top edge.
    Start,
    /// Midpoint.
    Center,
    /// Right or bottom edge.
    End,
}

/// Fixed points for both axes plus the axis that drives aspect correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub horizontal: AnchorSide,
    pub vertical: AnchorSide,
    pub driving: Axis,
}

impl Anchor {
    /// Anchor opposite `handle`.
    ///
    /// Edge handles drive their own axis and keep the orthogonal axis
    /// centered. Corner handles drive whichever axis changed more relative to
    /// `start`; ties go to the horizontal axis.
    #[must_use]
    pub fn for_handle(handle: ResizeHandle, start: &Geometry, delta: (f64, f64)) -> Self {
        let driving = match (handle.horizontal_edge(), handle.vertical_edge()) {
            (Some(_), None) => Axis::Horizontal,
            (None, Some(_)) => Axis::Vertical,
            (Some(_), Some(_)) | (None, None) => {
                let rel_x = relative_change(delta.0, start.width);
                let rel_y = relative_change(delta.1, start.height);
                if rel_y > rel_x {
                    Axis::Vertical
                } else {
                    Axis::Horizontal
                }
            }
        };
        Self {
            horizontal: opposite(handle.horizontal_edge()),
            vertical: opposite(handle.vertical_edge()),
            driving,
        }
    }

    #[must_use]
    pub const fn side(&self, axis: Axis) -> AnchorSide {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

fn opposite(moving: Option<EdgeSide>) -> AnchorSide {
    match moving {
        Some(EdgeSide::Start) => AnchorSide::End,
        Some(EdgeSide::End) => AnchorSide::Start,
        None => AnchorSide::Center,
    }
}

fn relative_change(delta: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        (delta / extent).abs()
    } else {
        delta.abs()
    }
}

/// Solver result.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintOutcome {
    pub geometry: Geometry,
    /// Whether any clamp or conflict altered the request.
    pub violated: bool,
    /// Human-readable description of what was clamped.
    pub message: Option<String>,
}

/// Apply size limits and the aspect lock to `candidate`.
#[must_use]
pub fn apply(candidate: Geometry, constraints: &ConstraintSet, anchor: Anchor) -> ConstraintOutcome {
    if !candidate.is_finite() {
        return ConstraintOutcome {
            geometry: candidate,
            violated: true,
            message: Some("candidate geometry is not finite".to_string()),
        };
    }

    let limits = constraints.size_limits();
    let width_range = limits.width_range();
    let height_range = limits.height_range();
    let fixed_x = FixedPoint::capture(candidate.x, candidate.width, anchor.horizontal);
    let fixed_y = FixedPoint::capture(candidate.y, candidate.height, anchor.vertical);

    let mut notes = Vec::new();
    let (mut width, width_clamp) = clamp_extent(candidate.width, width_range);
    let (mut height, height_clamp) = clamp_extent(candidate.height, height_range);

    match constraints.locked_aspect() {
        None => {
            note_clamp(&mut notes, "width", width_clamp);
            note_clamp(&mut notes, "height", height_clamp);
        }
        Some(ratio) => {
            match anchor.driving {
                Axis::Horizontal => {
                    note_clamp(&mut notes, "width", width_clamp);
                    height = width / ratio;
                }
                Axis::Vertical => {
                    note_clamp(&mut notes, "height", height_clamp);
                    width = height * ratio;
                }
            }
            width = clamp_extent(width, width_range).0;
            height = clamp_extent(height, height_range).0;
            if !aspect_holds(width, height, ratio) {
                notes.push(format!(
                    "aspect ratio {ratio} conflicts with size limits; size limits take precedence"
                ));
            }
        }
    }

    let geometry = Geometry::new(
        fixed_x.position(width),
        fixed_y.position(height),
        width,
        height,
    );
    let violated = !notes.is_empty();
    ConstraintOutcome {
        geometry,
        violated,
        message: violated.then(|| notes.join("; ")),
    }
}

/// Whether `width / height` matches `ratio` within [`ASPECT_EPSILON`].
#[must_use]
pub fn aspect_holds(width: f64, height: f64, ratio: f64) -> bool {
    height > 0.0 && (width / height - ratio).abs() <= ASPECT_EPSILON * ratio.max(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clamp {
    None,
    Min,
    Max,
}

fn clamp_extent(value: f64, (min, max): (f64, f64)) -> (f64, Clamp) {
    if value < min {
        (min, Clamp::Min)
    } else if value > max {
        (max, Clamp::Max)
    } else {
        (value, Clamp::None)
    }
}

fn note_clamp(notes: &mut Vec<String>, dimension: &str, clamp: Clamp) {
    match clamp {
        Clamp::None => {}
        Clamp::Min => notes.push(format!("{dimension} clamped to minimum")),
        Clamp::Max => notes.push(format!("{dimension} clamped to maximum")),
    }
}

/// The coordinate that must not move on one axis.
#[derive(Debug, Clone, Copy)]
enum FixedPoint {
    Start(f64),
    Center(f64),
    End(f64),
}

impl FixedPoint {
    fn capture(origin: f64, extent: f64, side: AnchorSide) -> Self {
        match side {
            AnchorSide::Start => Self::Start(origin),
            AnchorSide::Center => Self::Center(origin + extent / 2.0),
            AnchorSide::End => Self::End(origin + extent),
        }
    }

    fn position(self, extent: f64) -> f64 {
        match self {
            Self::Start(start) => start,
            Self::Center(center) => center - extent / 2.0,
            Self::End(end) => end - extent,
        }
    }
}

/// Result of fitting a resized panel into its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsFit {
    pub geometry: Geometry,
    /// Some edge had to be pulled back inside the container.
    pub clipped: bool,
    /// The minimum size does not fit the container on some axis.
    pub overflow: bool,
}

/// Fit a resize result into `bounds`, keeping the anchor where possible.
///
/// Moving edges are clipped to the container. If clipping takes an extent
/// below `min`, the extent is restored by pushing away from the container
/// edge; if `min` exceeds the container the panel is pinned at the origin
/// with its minimum extent and `overflow` is set.
#[must_use]
pub fn fit_resize_within(
    geometry: Geometry,
    bounds: Bounds,
    anchor: Anchor,
    min: (f64, f64),
) -> BoundsFit {
    let (x, width, clip_x, over_x) = fit_axis(
        geometry.left(),
        geometry.right(),
        bounds.width,
        anchor.horizontal,
        min.0,
    );
    let (y, height, clip_y, over_y) = fit_axis(
        geometry.top(),
        geometry.bottom(),
        bounds.height,
        anchor.vertical,
        min.1,
    );
    BoundsFit {
        geometry: Geometry::new(x, y, width, height),
        clipped: clip_x || clip_y,
        overflow: over_x || over_y,
    }
}

fn fit_axis(start: f64, end: f64, limit: f64, side: AnchorSide, min: f64) -> (f64, f64, bool, bool) {
    if min > limit {
        return (0.0, min, true, true);
    }
    let mut lo = start.clamp(0.0, limit);
    let mut hi = end.clamp(0.0, limit);
    let clipped = lo != start || hi != end;
    if hi - lo < min {
        match side {
            AnchorSide::Start => {
                hi = lo + min;
                if hi > limit {
                    hi = limit;
                    lo = limit - min;
                }
            }
            AnchorSide::End => {
                lo = hi - min;
                if lo < 0.0 {
                    lo = 0.0;
                    hi = min;
                }
            }
            AnchorSide::Center => {
                let center = ((lo + hi) / 2.0).clamp(min / 2.0, limit - min / 2.0);
                lo = center - min / 2.0;
                hi = center + min / 2.0;
            }
        }
    }
    (lo, hi - lo, clipped, false)
}

/// Translate `geometry` so it lies inside `bounds` without resizing it.
///
/// A panel larger than the container is pinned at the origin on that axis.
#[must_use]
pub fn contain_translate(geometry: Geometry, bounds: Bounds) -> Geometry {
    let x = clamp_origin(geometry.x, geometry.width, bounds.width);
    let y = clamp_origin(geometry.y, geometry.height, bounds.height);
    Geometry::new(x, y, geometry.width, geometry.height)
}

fn clamp_origin(origin: f64, extent: f64, limit: f64) -> f64 {
    let max_origin = (limit - extent).max(0.0);
    origin.clamp(0.0, max_origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> ConstraintSet {
        ConstraintSet {
            min_width: 50.0,
            min_height: 20.0,
            max_width: Some(400.0),
            max_height: Some(300.0),
            ..ConstraintSet::default()
        }
    }

    fn anchor(handle: ResizeHandle) -> Anchor {
        Anchor::for_handle(handle, &Geometry::new(0.0, 0.0, 100.0, 50.0), (0.0, 0.0))
    }

    #[test]
    fn unconstrained_candidate_passes_through() {
        let candidate = Geometry::new(10.0, 10.0, 120.0, 60.0);
        let out = apply(candidate, &constraints(), anchor(ResizeHandle::BottomRight));
        assert_eq!(out.geometry, candidate);
        assert!(!out.violated);
        assert_eq!(out.message, None);
    }

    #[test]
    fn min_clamp_keeps_left_anchor_for_right_handles() {
        let candidate = Geometry::new(0.0, 0.0, 10.0, 50.0);
        let out = apply(candidate, &constraints(), anchor(ResizeHandle::TopRight));
        assert_eq!(out.geometry, Geometry::new(0.0, 0.0, 50.0, 50.0));
        assert!(out.violated);
        assert!(out.message.as_deref().is_some_and(|m| m.contains("width")));
    }

    #[test]
    fn min_clamp_keeps_right_anchor_for_left_handles() {
        // Left edge dragged from 0 to 90 on a 100-wide panel: right edge stays at 100.
        let candidate = Geometry::new(90.0, 0.0, 10.0, 50.0);
        let out = apply(candidate, &constraints(), anchor(ResizeHandle::MiddleLeft));
        assert_eq!(out.geometry, Geometry::new(50.0, 0.0, 50.0, 50.0));
        assert!(out.violated);
    }

    #[test]
    fn dragging_past_anchor_clamps_to_minimum() {
        // Right edge dragged left past the left edge.
        let candidate = Geometry::new(0.0, 0.0, -40.0, 50.0);
        let out = apply(candidate, &constraints(), anchor(ResizeHandle::MiddleRight));
        assert_eq!(out.geometry, Geometry::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn max_clamp_on_top_handle_keeps_bottom() {
        let candidate = Geometry::new(0.0, -400.0, 100.0, 450.0);
        let out = apply(candidate, &constraints(), anchor(ResizeHandle::TopCenter));
        assert_eq!(out.geometry, Geometry::new(0.0, -250.0, 100.0, 300.0));
        assert!(out.message.as_deref().is_some_and(|m| m.contains("maximum")));
    }

    #[test]
    fn aspect_lock_derives_non_driving_dimension() {
        let set = ConstraintSet {
            lock_aspect_ratio: true,
            aspect_ratio: 2.0,
            ..constraints()
        };
        let start = Geometry::new(0.0, 0.0, 100.0, 50.0);
        let handle = ResizeHandle::BottomRight;
        let a = Anchor::for_handle(handle, &start, (60.0, 5.0));
        assert_eq!(a.driving, Axis::Horizontal);
        let out = apply(Geometry::new(0.0, 0.0, 160.0, 55.0), &set, a);
        assert_eq!(out.geometry, Geometry::new(0.0, 0.0, 160.0, 80.0));
        assert!(!out.violated);
    }

    #[test]
    fn aspect_conflict_lets_limits_win() {
        let set = ConstraintSet {
            lock_aspect_ratio: true,
            aspect_ratio: 2.0,
            max_height: Some(100.0),
            ..constraints()
        };
        let a = Anchor {
            horizontal: AnchorSide::Start,
            vertical: AnchorSide::Start,
            driving: Axis::Horizontal,
        };
        let out = apply(Geometry::new(0.0, 0.0, 300.0, 100.0), &set, a);
        assert_eq!(out.geometry.width, 300.0);
        assert_eq!(out.geometry.height, 100.0);
        assert!(out.violated);
        assert!(out.message.as_deref().is_some_and(|m| m.contains("aspect")));
    }

    #[test]
    fn edge_handle_aspect_keeps_orthogonal_center() {
        let set = ConstraintSet {
            lock_aspect_ratio: true,
            aspect_ratio: 2.0,
            ..constraints()
        };
        let a = anchor(ResizeHandle::BottomCenter);
        assert_eq!(a.horizontal, AnchorSide::Center);
        let out = apply(Geometry::new(0.0, 0.0, 100.0, 60.0), &set, a);
        assert_eq!(out.geometry, Geometry::new(-10.0, 0.0, 120.0, 60.0));
    }

    #[test]
    fn corner_driving_axis_uses_relative_change() {
        let start = Geometry::new(0.0, 0.0, 400.0, 40.0);
        let a = Anchor::for_handle(ResizeHandle::BottomRight, &start, (40.0, 10.0));
        assert_eq!(a.driving, Axis::Vertical);
    }

    #[test]
    fn fit_clips_moving_edge_to_container() {
        let a = anchor(ResizeHandle::MiddleRight);
        let fit = fit_resize_within(
            Geometry::new(100.0, 0.0, 300.0, 50.0),
            Bounds::new(250.0, 100.0),
            a,
            (50.0, 20.0),
        );
        assert_eq!(fit.geometry, Geometry::new(100.0, 0.0, 150.0, 50.0));
        assert!(fit.clipped);
        assert!(!fit.overflow);
    }

    #[test]
    fn fit_restores_minimum_by_moving_anchor() {
        let a = anchor(ResizeHandle::MiddleRight);
        let fit = fit_resize_within(
            Geometry::new(230.0, 0.0, 50.0, 50.0),
            Bounds::new(250.0, 100.0),
            a,
            (50.0, 20.0),
        );
        assert_eq!(fit.geometry, Geometry::new(200.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn fit_reports_overflow_when_minimum_exceeds_container() {
        let a = anchor(ResizeHandle::BottomRight);
        let fit = fit_resize_within(
            Geometry::new(0.0, 0.0, 80.0, 50.0),
            Bounds::new(60.0, 100.0),
            a,
            (80.0, 20.0),
        );
        assert!(fit.overflow);
        assert_eq!(fit.geometry.x, 0.0);
        assert_eq!(fit.geometry.width, 80.0);
    }

    #[test]
    fn contain_translate_clamps_without_resizing() {
        let bounds = Bounds::new(300.0, 200.0);
        assert_eq!(
            contain_translate(Geometry::new(-5.0, 180.0, 100.0, 50.0), bounds),
            Geometry::new(0.0, 150.0, 100.0, 50.0)
        );
        assert_eq!(
            contain_translate(Geometry::new(50.0, 0.0, 400.0, 50.0), bounds).x,
            0.0
        );
    }
}
