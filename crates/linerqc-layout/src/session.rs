//! Diagnostics shared by the resize and move gesture machines.

use serde::{Deserialize, Serialize};

/// Why a live session ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The host asked for it (e.g. Escape).
    Explicit,
    /// The pointer left the interactive surface or capture was revoked.
    PointerCaptureLost,
    /// A gesture of the other kind started on the same panel.
    ConflictingSession,
    /// The panel disappeared from the collection before commit.
    PanelRemoved,
}

/// Explicit diagnostics for calls that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    /// Update, end, or cancel without a live session.
    IdleWithoutSession,
    /// Pointer coordinates were NaN or infinite.
    NonFinitePointer,
    /// No panel with the requested id.
    UnknownPanel,
    /// The panel's current geometry is not finite and positive.
    InvalidStartGeometry,
    /// The constraint set failed validation.
    InvalidConstraints,
    /// The pipeline produced non-finite geometry for this tick.
    NonFiniteResult,
    /// An armed move has not travelled far enough to start dragging.
    ThresholdNotReached,
    /// Another gesture owns the panel.
    PanelBusy,
}
