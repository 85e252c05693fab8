//! Resize handles, cursor hints, and handle hit-testing.

use linerqc_core::geometry::{Geometry, PointerPosition};
use serde::{Deserialize, Serialize};

/// Default hit-test inset around panel edges, in layout units.
pub const DEFAULT_HANDLE_INSET: f64 = 6.0;

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// West-east (`x`, `width`).
    Horizontal,
    /// North-south (`y`, `height`).
    Vertical,
}

/// Which edge of an axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSide {
    /// Left or top.
    Start,
    /// Right or bottom.
    End,
}

/// One of the eight interactive points on a selected panel's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// The `x` edge this handle drags, if any.
    #[must_use]
    pub const fn horizontal_edge(self) -> Option<EdgeSide> {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => Some(EdgeSide::Start),
            Self::TopRight | Self::MiddleRight | Self::BottomRight => Some(EdgeSide::End),
            Self::TopCenter | Self::BottomCenter => None,
        }
    }

    /// The `y` edge this handle drags, if any.
    #[must_use]
    pub const fn vertical_edge(self) -> Option<EdgeSide> {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Some(EdgeSide::Start),
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Some(EdgeSide::End),
            Self::MiddleLeft | Self::MiddleRight => None,
        }
    }

    /// The edge dragged along `axis`, if any.
    #[must_use]
    pub const fn edge(self, axis: Axis) -> Option<EdgeSide> {
        match axis {
            Axis::Horizontal => self.horizontal_edge(),
            Axis::Vertical => self.vertical_edge(),
        }
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }

    /// UI cursor suggestion for hovering or dragging this handle.
    #[must_use]
    pub const fn cursor(self) -> CursorHint {
        match self {
            Self::TopLeft | Self::BottomRight => CursorHint::NwseResize,
            Self::TopRight | Self::BottomLeft => CursorHint::NeswResize,
            Self::TopCenter | Self::BottomCenter => CursorHint::NsResize,
            Self::MiddleLeft | Self::MiddleRight => CursorHint::EwResize,
        }
    }
}

/// Cursor suggestion for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorHint {
    /// Diagonal, north-west to south-east.
    NwseResize,
    /// Diagonal, north-east to south-west.
    NeswResize,
    /// Vertical.
    NsResize,
    /// Horizontal.
    EwResize,
    /// Whole-panel drag.
    Move,
}

impl CursorHint {
    /// CSS `cursor` keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::Move => "move",
        }
    }
}

/// Pure lookup from handle to cursor hint.
#[must_use]
pub const fn resize_cursor(handle: ResizeHandle) -> CursorHint {
    handle.cursor()
}

/// Classify a pointer near a panel boundary as one of the eight handles.
///
/// Corners win where two edges are within `inset`. When a panel is thinner
/// than twice the inset the nearer edge is chosen. Points outside the
/// inflated rectangle, or deep inside the panel, yield `None`.
#[must_use]
pub fn classify_handle(
    geometry: &Geometry,
    pointer: PointerPosition,
    inset: f64,
) -> Option<ResizeHandle> {
    if !geometry.is_valid() || !pointer.is_finite() {
        return None;
    }
    let inset = if inset.is_finite() { inset.max(0.5) } else { DEFAULT_HANDLE_INSET };
    let (px, py) = (pointer.x, pointer.y);
    if px < geometry.left() - inset
        || px > geometry.right() + inset
        || py < geometry.top() - inset
        || py > geometry.bottom() + inset
    {
        return None;
    }

    let horizontal = nearest_edge(px, geometry.left(), geometry.right(), inset);
    let vertical = nearest_edge(py, geometry.top(), geometry.bottom(), inset);

    match (horizontal, vertical) {
        (Some(EdgeSide::Start), Some(EdgeSide::Start)) => Some(ResizeHandle::TopLeft),
        (Some(EdgeSide::End), Some(EdgeSide::Start)) => Some(ResizeHandle::TopRight),
        (Some(EdgeSide::Start), Some(EdgeSide::End)) => Some(ResizeHandle::BottomLeft),
        (Some(EdgeSide::End), Some(EdgeSide::End)) => Some(ResizeHandle::BottomRight),
        (Some(EdgeSide::Start), None) => Some(ResizeHandle::MiddleLeft),
        (Some(EdgeSide::End), None) => Some(ResizeHandle::MiddleRight),
        (None, Some(EdgeSide::Start)) => Some(ResizeHandle::TopCenter),
        (None, Some(EdgeSide::End)) => Some(ResizeHandle::BottomCenter),
        (None, None) => None,
    }
}

fn nearest_edge(coordinate: f64, start: f64, end: f64, inset: f64) -> Option<EdgeSide> {
    let to_start = (coordinate - start).abs();
    let to_end = (coordinate - end).abs();
    match (to_start <= inset, to_end <= inset) {
        (true, true) if to_end < to_start => Some(EdgeSide::End),
        (true, _) => Some(EdgeSide::Start),
        (false, true) => Some(EdgeSide::End),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_handle_drags_at_least_one_axis() {
        for handle in ResizeHandle::ALL {
            let axes = usize::from(handle.horizontal_edge().is_some())
                + usize::from(handle.vertical_edge().is_some());
            assert_eq!(axes, if handle.is_corner() { 2 } else { 1 }, "{handle:?}");
        }
    }

    #[test]
    fn cursor_table_matches_diagonals() {
        assert_eq!(resize_cursor(ResizeHandle::TopLeft).as_css(), "nwse-resize");
        assert_eq!(resize_cursor(ResizeHandle::BottomRight).as_css(), "nwse-resize");
        assert_eq!(resize_cursor(ResizeHandle::TopRight).as_css(), "nesw-resize");
        assert_eq!(resize_cursor(ResizeHandle::BottomLeft).as_css(), "nesw-resize");
        assert_eq!(resize_cursor(ResizeHandle::TopCenter), CursorHint::NsResize);
        assert_eq!(resize_cursor(ResizeHandle::MiddleRight), CursorHint::EwResize);
    }

    #[test]
    fn classify_corners_edges_and_interior() {
        let g = Geometry::new(100.0, 100.0, 200.0, 100.0);
        let at = |x, y| classify_handle(&g, PointerPosition::new(x, y), 5.0);
        assert_eq!(at(101.0, 99.0), Some(ResizeHandle::TopLeft));
        assert_eq!(at(300.0, 200.0), Some(ResizeHandle::BottomRight));
        assert_eq!(at(200.0, 102.0), Some(ResizeHandle::TopCenter));
        assert_eq!(at(297.0, 150.0), Some(ResizeHandle::MiddleRight));
        assert_eq!(at(200.0, 150.0), None);
        assert_eq!(at(400.0, 150.0), None);
    }

    #[test]
    fn thin_panel_picks_nearer_edge() {
        let g = Geometry::new(0.0, 0.0, 4.0, 100.0);
        assert_eq!(
            classify_handle(&g, PointerPosition::new(3.5, 50.0), 5.0),
            Some(ResizeHandle::MiddleRight)
        );
        assert_eq!(
            classify_handle(&g, PointerPosition::new(0.5, 50.0), 5.0),
            Some(ResizeHandle::MiddleLeft)
        );
    }
}
