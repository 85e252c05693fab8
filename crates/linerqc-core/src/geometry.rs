#![forbid(unsafe_code)]

//! Geometric primitives for liner panel layouts.
//!
//! All coordinates are layout units with the origin at the top-left of the
//! container; `y` grows southward. The unit itself (pixels, feet) is a host
//! concern, see `LayoutScale` in the layout crate.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing derived edges against limits and bounds.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Stable identifier of a panel, unique within one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Axis-aligned panel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its four edges.
    #[inline]
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[inline]
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Copy translated by `(dx, dy)`; size is untouched.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Whether all four fields are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Finite with strictly positive extents.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Length of the shared vertical extent with `other` (0 when disjoint).
    #[must_use]
    pub fn vertical_overlap(&self, other: &Geometry) -> f64 {
        (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0)
    }
}

/// Container extents. The container always starts at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Usable bounds are finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Check that `geometry` lies fully inside the container.
    #[must_use]
    pub fn contains(&self, geometry: &Geometry) -> bool {
        geometry.left() >= -GEOMETRY_EPSILON
            && geometry.top() >= -GEOMETRY_EPSILON
            && geometry.right() <= self.width + GEOMETRY_EPSILON
            && geometry.bottom() <= self.height + GEOMETRY_EPSILON
    }
}

/// Per-session size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl SizeLimits {
    #[must_use]
    pub fn width_range(&self) -> (f64, f64) {
        (self.min_width, self.max_width.unwrap_or(f64::INFINITY))
    }

    #[must_use]
    pub fn height_range(&self) -> (f64, f64) {
        (self.min_height, self.max_height.unwrap_or(f64::INFINITY))
    }

    /// Check both extents against the limits within [`GEOMETRY_EPSILON`].
    #[must_use]
    pub fn admits(&self, geometry: &Geometry) -> bool {
        let (min_w, max_w) = self.width_range();
        let (min_h, max_h) = self.height_range();
        geometry.width >= min_w - GEOMETRY_EPSILON
            && geometry.width <= max_w + GEOMETRY_EPSILON
            && geometry.height >= min_h - GEOMETRY_EPSILON
            && geometry.height <= max_h + GEOMETRY_EPSILON
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_width: 1.0,
            min_height: 1.0,
            max_width: None,
            max_height: None,
        }
    }
}

/// The reusable invariant check every engine runs before committing.
///
/// Geometry must be finite with positive extents, satisfy `limits`, and lie
/// inside `bounds` when a container is supplied.
#[must_use]
pub fn is_valid_geometry(geometry: &Geometry, limits: &SizeLimits, bounds: Option<Bounds>) -> bool {
    geometry.is_valid()
        && limits.admits(geometry)
        && bounds.is_none_or(|bounds| bounds.contains(geometry))
}

/// A liner panel as seen by the layout engine.
///
/// `rotation` is carried through untouched; `roll_number` is written only by
/// roll-number assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: PanelId,
    #[serde(flatten)]
    pub geometry: Geometry,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub panel_number: String,
    #[serde(default)]
    pub roll_number: Option<String>,
}

impl Panel {
    #[must_use]
    pub fn new(id: PanelId, geometry: Geometry) -> Self {
        Self {
            id,
            geometry,
            rotation: 0.0,
            panel_number: String::new(),
            roll_number: None,
        }
    }

    #[must_use]
    pub fn with_panel_number(mut self, panel_number: impl Into<String>) -> Self {
        self.panel_number = panel_number.into();
        self
    }
}

/// Pointer sample in layout-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Offset from `origin` to `self`.
    #[must_use]
    pub fn delta_from(&self, origin: PointerPosition) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}
