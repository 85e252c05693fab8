//! Interaction configuration.
//!
//! Every tunable lives in an explicit, serde-friendly struct so several
//! layouts with different scales and snapping policies can coexist. Each
//! section validates itself; [`LayoutConfig::validate`] checks them all.

use std::fmt;

use linerqc_core::animation::glide::{DEFAULT_GLIDE_EPSILON, DEFAULT_GLIDE_RATE};
use linerqc_core::geometry::{Bounds, PointerPosition, SizeLimits};
use serde::{Deserialize, Serialize};

use crate::roll::{RollNumberConfig, RollNumberConfigError};

/// Default minimum panel extent in layout units.
pub const DEFAULT_MIN_EXTENT: f64 = 20.0;

/// Default grid pitch in layout units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Default panel-to-panel snap distance in layout units.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 8.0;

/// Default pointer travel before a move session activates.
pub const DEFAULT_DRAG_ACTIVATION_THRESHOLD: f64 = 2.0;

/// RGBA color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// `#rrggbb` (alpha omitted when opaque) for canvas renderers.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a() == 0xFF {
            format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
        } else {
            format!("#{:08x}", self.0)
        }
    }
}

/// Default alignment guide color.
pub const DEFAULT_SNAP_LINE_COLOR: PackedRgba = PackedRgba::rgb(0x3B, 0x82, 0xF6);

/// Per-session resize/move constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstraintSet {
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    pub lock_aspect_ratio: bool,
    /// Width over height.
    pub aspect_ratio: f64,
    pub snap_to_grid: bool,
    pub grid_size: f64,
    pub snap_to_other_panels: bool,
    pub snap_threshold: f64,
    pub snap_line_color: PackedRgba,
}

impl ConstraintSet {
    /// Validate and return `self`.
    pub fn validated(self) -> Result<Self, ConstraintSetError> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConstraintSetError> {
        check_min("min_width", self.min_width)?;
        check_min("min_height", self.min_height)?;
        if let Some(max) = self.max_width
            && !(max.is_finite() && max >= self.min_width)
        {
            return Err(ConstraintSetError::InvertedRange {
                axis: "width",
                min: self.min_width,
                max,
            });
        }
        if let Some(max) = self.max_height
            && !(max.is_finite() && max >= self.min_height)
        {
            return Err(ConstraintSetError::InvertedRange {
                axis: "height",
                min: self.min_height,
                max,
            });
        }
        if self.lock_aspect_ratio && !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConstraintSetError::InvalidAspectRatio {
                value: self.aspect_ratio,
            });
        }
        if self.snap_to_grid && !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(ConstraintSetError::InvalidGridSize {
                value: self.grid_size,
            });
        }
        if !(self.snap_threshold.is_finite() && self.snap_threshold >= 0.0) {
            return Err(ConstraintSetError::InvalidSnapThreshold {
                value: self.snap_threshold,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits {
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    /// Aspect target when the lock is on and usable.
    #[must_use]
    pub fn locked_aspect(&self) -> Option<f64> {
        (self.lock_aspect_ratio && self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0)
            .then_some(self.aspect_ratio)
    }

    #[must_use]
    pub fn snap_config(&self) -> SnapConfig {
        SnapConfig {
            snap_to_grid: self.snap_to_grid,
            grid_size: self.grid_size,
            snap_to_other_panels: self.snap_to_other_panels,
            snap_threshold: self.snap_threshold,
            line_color: self.snap_line_color,
        }
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_EXTENT,
            min_height: DEFAULT_MIN_EXTENT,
            max_width: None,
            max_height: None,
            lock_aspect_ratio: false,
            aspect_ratio: 1.0,
            snap_to_grid: false,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_other_panels: true,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            snap_line_color: DEFAULT_SNAP_LINE_COLOR,
        }
    }
}

fn check_min(field: &'static str, value: f64) -> Result<(), ConstraintSetError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConstraintSetError::NonPositiveMinimum { field, value })
    }
}

/// Constraint-set validation failures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintSetError {
    NonPositiveMinimum { field: &'static str, value: f64 },
    InvertedRange { axis: &'static str, min: f64, max: f64 },
    InvalidAspectRatio { value: f64 },
    InvalidGridSize { value: f64 },
    InvalidSnapThreshold { value: f64 },
}

impl fmt::Display for ConstraintSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMinimum { field, value } => {
                write!(f, "{field} must be finite and > 0 (got {value})")
            }
            Self::InvertedRange { axis, min, max } => {
                write!(f, "max {axis} {max} is below min {axis} {min}")
            }
            Self::InvalidAspectRatio { value } => {
                write!(f, "locked aspect ratio must be finite and > 0 (got {value})")
            }
            Self::InvalidGridSize { value } => {
                write!(f, "grid size must be finite and > 0 (got {value})")
            }
            Self::InvalidSnapThreshold { value } => {
                write!(f, "snap threshold must be finite and >= 0 (got {value})")
            }
        }
    }
}

impl std::error::Error for ConstraintSetError {}

/// Snapping subset of a [`ConstraintSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapConfig {
    pub snap_to_grid: bool,
    pub grid_size: f64,
    pub snap_to_other_panels: bool,
    pub snap_threshold: f64,
    pub line_color: PackedRgba,
}

impl SnapConfig {
    /// Grid pitch when grid snapping is on and usable.
    #[must_use]
    pub fn grid(&self) -> Option<f64> {
        (self.snap_to_grid && self.grid_size.is_finite() && self.grid_size > 0.0)
            .then_some(self.grid_size)
    }

    /// Panel snap distance when panel snapping is on and usable.
    #[must_use]
    pub fn panel_threshold(&self) -> Option<f64> {
        (self.snap_to_other_panels && self.snap_threshold.is_finite() && self.snap_threshold >= 0.0)
            .then_some(self.snap_threshold)
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        ConstraintSet::default().snap_config()
    }
}

/// Settings captured by a gesture session when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionSettings {
    pub constraints: ConstraintSet,
    /// Container extents; invalid bounds are treated as absent.
    pub bounds: Option<Bounds>,
}

impl SessionSettings {
    #[must_use]
    pub fn new(constraints: ConstraintSet, bounds: Option<Bounds>) -> Self {
        Self {
            constraints,
            bounds,
        }
    }

    /// Bounds when present and usable.
    #[must_use]
    pub fn effective_bounds(&self) -> Option<Bounds> {
        self.bounds.filter(Bounds::is_valid)
    }
}

/// Move-gesture tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragTuning {
    /// Pointer travel (layout units) before an armed move starts dragging.
    pub activation_threshold: f64,
}

impl DragTuning {
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if self.activation_threshold.is_finite() && self.activation_threshold >= 0.0 {
            Ok(())
        } else {
            Err(LayoutConfigError::InvalidThreshold {
                field: "activation_threshold",
                value: self.activation_threshold,
            })
        }
    }
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_DRAG_ACTIVATION_THRESHOLD,
        }
    }
}

/// Display smoothing tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlideConfig {
    /// Fraction-per-second approach rate.
    pub rate: f64,
    /// Distance at which a glide snaps onto its target.
    pub epsilon: f64,
}

impl GlideConfig {
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(LayoutConfigError::InvalidThreshold {
                field: "glide.rate",
                value: self.rate,
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(LayoutConfigError::InvalidThreshold {
                field: "glide.epsilon",
                value: self.epsilon,
            });
        }
        Ok(())
    }
}

impl Default for GlideConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_GLIDE_RATE,
            epsilon: DEFAULT_GLIDE_EPSILON,
        }
    }
}

/// Device-pixel to layout-unit scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutScale {
    pub pixels_per_unit: f64,
}

impl LayoutScale {
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if self.pixels_per_unit.is_finite() && self.pixels_per_unit > 0.0 {
            Ok(())
        } else {
            Err(LayoutConfigError::InvalidScale {
                pixels_per_unit: self.pixels_per_unit,
            })
        }
    }

    /// Convert a device-pixel pointer sample into layout units.
    #[must_use]
    pub fn to_layout(&self, device: PointerPosition) -> PointerPosition {
        PointerPosition::new(
            device.x / self.pixels_per_unit,
            device.y / self.pixels_per_unit,
        )
    }

    /// Convert a layout-unit length into device pixels.
    #[must_use]
    pub fn to_pixels(&self, units: f64) -> f64 {
        units * self.pixels_per_unit
    }
}

impl Default for LayoutScale {
    fn default() -> Self {
        Self {
            pixels_per_unit: 1.0,
        }
    }
}

/// Complete engine configuration. Every section defaults independently.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub constraints: ConstraintSet,
    pub roll_numbers: RollNumberConfig,
    pub drag: DragTuning,
    pub glide: GlideConfig,
    pub scale: LayoutScale,
}

impl LayoutConfig {
    /// Validate and return `self`.
    pub fn validated(self) -> Result<Self, LayoutConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        self.constraints
            .validate()
            .map_err(LayoutConfigError::Constraints)?;
        self.roll_numbers
            .validate()
            .map_err(LayoutConfigError::RollNumbers)?;
        self.drag.validate()?;
        self.glide.validate()?;
        self.scale.validate()
    }
}

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutConfigError {
    Constraints(ConstraintSetError),
    RollNumbers(RollNumberConfigError),
    InvalidThreshold { field: &'static str, value: f64 },
    InvalidScale { pixels_per_unit: f64 },
}

impl fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constraints(error) => write!(f, "invalid constraint set: {error}"),
            Self::RollNumbers(error) => write!(f, "invalid roll-number config: {error}"),
            Self::InvalidThreshold { field, value } => {
                write!(f, "invalid {field} value {value}")
            }
            Self::InvalidScale { pixels_per_unit } => {
                write!(f, "pixels per unit must be finite and > 0 (got {pixels_per_unit})")
            }
        }
    }
}

impl std::error::Error for LayoutConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Constraints(error) => Some(error),
            Self::RollNumbers(error) => Some(error),
            Self::InvalidThreshold { .. } | Self::InvalidScale { .. } => None,
        }
    }
}
