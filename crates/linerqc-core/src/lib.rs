// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: panel geometry, display smoothing, and the logging facade.
//!
//! # Role in linerqc
//! `linerqc-core` is the leaf crate. It owns the panel geometry model and the
//! single validity predicate every engine runs before committing a result.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Panel`], [`geometry::Geometry`],
//!   [`geometry::Bounds`], [`geometry::SizeLimits`] and
//!   [`geometry::is_valid_geometry`].
//! - **Animation**: the frame-driven [`animation::Glide`] smoother used for
//!   display-only transforms.
//! - **Logging**: `tracing` re-exports (or no-op twins) at the crate root.
//!
//! # How it fits in the system
//! `linerqc-layout` builds the constraint solver, snap engine, and gesture
//! state machines on top of these types. Nothing here performs I/O.

pub mod animation;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
