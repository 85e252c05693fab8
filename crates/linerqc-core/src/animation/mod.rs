#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Animations are advanced by an external redraw scheduler via
//! [`Animation::tick`]; they never read the clock themselves.

pub mod glide;

use std::time::Duration;

pub use glide::{Glide, Glide2};

/// A value that evolves over time when ticked.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has settled.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}
