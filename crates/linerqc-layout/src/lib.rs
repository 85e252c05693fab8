#![forbid(unsafe_code)]

//! Interactive resize, move, and snap engine for liner panel layouts.
//!
//! # Role in linerqc
//! `linerqc-layout` turns raw pointer motion into validated panel geometry.
//! It never draws: every tick yields geometry plus a [`VisualFeedback`]
//! descriptor for an external canvas renderer.
//!
//! # Pipeline
//!
//! ```text
//! resize: handle math -> constraint::apply -> snap::snap -> container fit
//! move:   translate   -> bounds clamp      -> snap::snap (position only)
//! ```
//!
//! Pure stages ([`constraint::apply`], [`snap::snap`],
//! [`resize::resolve_resize`], [`drag::move_geometry`],
//! [`roll::assign_roll_numbers`]) are usable on their own. The gesture
//! machines ([`ResizeMachine`], [`DragController`]) and the
//! [`LayoutEngine`] facade add session lifecycle on top.

pub mod config;
pub mod constraint;
pub mod drag;
pub mod engine;
pub mod feedback;
pub mod handle;
pub mod panels;
pub mod resize;
pub mod roll;
pub mod session;
pub mod smoothing;
pub mod snap;

pub use config::{
    ConstraintSet, ConstraintSetError, DragTuning, GlideConfig, LayoutConfig, LayoutConfigError,
    LayoutScale, PackedRgba, SessionSettings, SnapConfig,
};
pub use constraint::{Anchor, AnchorSide, ConstraintOutcome};
pub use drag::{DragController, MoveEffect, MovePhase, MoveTransition, NudgeDirection};
pub use engine::{CaptureLost, LayoutEngine};
pub use feedback::VisualFeedback;
pub use handle::{Axis, CursorHint, ResizeHandle, classify_handle, resize_cursor};
pub use panels::PanelSet;
pub use resize::{ResizeEffect, ResizeMachine, ResizeSession, ResizeState, ResizeTransition};
pub use roll::{
    CardinalDirection, ColumnOrder, RollDirection, RollDirectionParseError, RollNumberConfig,
    RollNumberConfigError, RowOrder, assign_roll_numbers,
};
pub use session::{CancelReason, NoopReason};
pub use smoothing::DisplaySmoother;
pub use snap::{SnapLine, SnapMode, SnapOutcome};

pub use linerqc_core::geometry::{
    Bounds, Geometry, Panel, PanelId, PointerPosition, SizeLimits, is_valid_geometry,
};
