#![forbid(unsafe_code)]

//! Exponential glide toward a moving target.
//!
//! Each tick closes a fixed fraction of the remaining distance per second:
//!
//!   position += (target - position) × (1 − e^(−rate × dt))
//!
//! The result is frame-rate independent and never overshoots.
//!
//! # Invariants
//!
//! 1. `position()` always lies between its previous value and the target.
//! 2. Once `|target − position| < epsilon` the glide snaps onto the target
//!    and reports `is_complete() == true`.
//! 3. `set_target()` wakes a settled glide only when the target moves by more
//!    than `epsilon`.
//!
//! # Failure Modes
//!
//! - Non-finite targets are ignored; the glide keeps its last target.
//! - Non-positive or non-finite rates are clamped to [`MIN_RATE`].

use std::time::Duration;

use super::Animation;

/// Default approach rate (per second).
pub const DEFAULT_GLIDE_RATE: f64 = 18.0;

/// Default rest epsilon in layout units.
pub const DEFAULT_GLIDE_EPSILON: f64 = 0.01;

/// Lowest accepted rate.
pub const MIN_RATE: f64 = 0.1;

/// One-dimensional exponential smoother.
#[derive(Debug, Clone, PartialEq)]
pub struct Glide {
    position: f64,
    target: f64,
    initial: f64,
    rate: f64,
    epsilon: f64,
    at_rest: bool,
}

impl Glide {
    /// Start at `initial`, heading for `target`.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        let mut glide = Self {
            position: initial,
            target,
            initial,
            rate: DEFAULT_GLIDE_RATE,
            epsilon: DEFAULT_GLIDE_EPSILON,
            at_rest: false,
        };
        glide.settle_if_close();
        glide
    }

    /// Set the approach rate (builder pattern).
    #[must_use]
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = sanitize_rate(rate);
        self
    }

    /// Set the rest epsilon (builder pattern).
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon.is_finite() { epsilon.abs() } else { DEFAULT_GLIDE_EPSILON };
        self.settle_if_close();
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Retarget. Wakes the glide if the target moved beyond epsilon.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        if (self.target - target).abs() > self.epsilon {
            self.initial = self.position;
            self.target = target;
            self.at_rest = false;
            self.settle_if_close();
        }
    }

    /// Jump straight to the target.
    pub fn finish(&mut self) {
        self.position = self.target;
        self.at_rest = true;
    }

    /// Advance by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let secs = dt.as_secs_f64();
        if secs <= 0.0 {
            return;
        }
        let blend = 1.0 - (-self.rate * secs).exp();
        self.position += (self.target - self.position) * blend;
        self.settle_if_close();
    }

    fn settle_if_close(&mut self) {
        if (self.target - self.position).abs() < self.epsilon {
            self.position = self.target;
            self.at_rest = true;
        }
    }
}

impl Animation for Glide {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        let span = (self.target - self.initial).abs();
        if span <= f64::EPSILON {
            return 1.0;
        }
        let remaining = (self.target - self.position).abs();
        (1.0 - remaining / span).clamp(0.0, 1.0) as f32
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.at_rest = false;
        self.settle_if_close();
    }
}

/// Two independent glides for a display-space `(x, y)` offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Glide2 {
    x: Glide,
    y: Glide,
}

impl Glide2 {
    #[must_use]
    pub fn new(initial: (f64, f64), target: (f64, f64), rate: f64, epsilon: f64) -> Self {
        Self {
            x: Glide::new(initial.0, target.0)
                .with_rate(rate)
                .with_epsilon(epsilon),
            y: Glide::new(initial.1, target.1)
                .with_rate(rate)
                .with_epsilon(epsilon),
        }
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x.position(), self.y.position())
    }

    pub fn set_target(&mut self, target: (f64, f64)) {
        self.x.set_target(target.0);
        self.y.set_target(target.1);
    }

    pub fn finish(&mut self) {
        self.x.finish();
        self.y.finish();
    }
}

impl Animation for Glide2 {
    fn tick(&mut self, dt: Duration) {
        self.x.advance(dt);
        self.y.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.x.is_complete() && self.y.is_complete()
    }

    fn value(&self) -> f32 {
        self.x.value().min(self.y.value())
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() { rate.max(MIN_RATE) } else { MIN_RATE }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn converges_without_overshoot() {
        let mut glide = Glide::new(0.0, 100.0);
        let mut previous = glide.position();
        for _ in 0..200 {
            glide.tick(FRAME);
            assert!(glide.position() >= previous);
            assert!(glide.position() <= 100.0);
            previous = glide.position();
        }
        assert!(glide.is_complete());
        assert_eq!(glide.position(), 100.0);
    }

    #[test]
    fn frame_rate_independent() {
        let mut coarse = Glide::new(0.0, 100.0);
        let mut fine = Glide::new(0.0, 100.0);
        coarse.tick(Duration::from_millis(32));
        fine.tick(FRAME);
        fine.tick(FRAME);
        assert!((coarse.position() - fine.position()).abs() < 1e-9);
    }

    #[test]
    fn retarget_wakes_settled_glide() {
        let mut glide = Glide::new(5.0, 5.0);
        assert!(glide.is_complete());
        glide.set_target(50.0);
        assert!(!glide.is_complete());
        glide.tick(FRAME);
        assert!(glide.position() > 5.0);
    }

    #[test]
    fn non_finite_target_is_ignored() {
        let mut glide = Glide::new(0.0, 10.0);
        glide.set_target(f64::NAN);
        assert_eq!(glide.target(), 10.0);
    }

    #[test]
    fn zero_dt_is_noop() {
        let mut glide = Glide::new(0.0, 10.0);
        glide.tick(Duration::ZERO);
        assert_eq!(glide.position(), 0.0);
    }

    #[test]
    fn degenerate_rate_is_clamped() {
        let glide = Glide::new(0.0, 1.0).with_rate(-4.0);
        assert_eq!(glide.rate(), MIN_RATE);
    }

    #[test]
    fn glide2_completes_when_both_axes_settle() {
        let mut glide = Glide2::new((0.0, 0.0), (10.0, 0.0), 30.0, 0.01);
        assert!(!glide.is_complete());
        for _ in 0..120 {
            glide.tick(FRAME);
        }
        assert!(glide.is_complete());
        assert_eq!(glide.position(), (10.0, 0.0));
    }
}
