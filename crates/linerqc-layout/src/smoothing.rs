//! Display-only smoothing of dragged panels.
//!
//! Each live gesture gets a 2-D glide from where the panel is drawn toward
//! the session's authoritative geometry. The smoother never writes panel
//! geometry; renderers read [`DisplaySmoother::position`] for the draw
//! transform and fall back to the panel's own geometry when it is `None`.

use std::time::Duration;

use linerqc_core::animation::{Animation, Glide2};
use linerqc_core::geometry::PanelId;
use rustc_hash::FxHashMap;

use crate::config::GlideConfig;

/// Per-panel exponential smoothing, advanced by the host's frame clock.
#[derive(Debug, Clone, Default)]
pub struct DisplaySmoother {
    glides: FxHashMap<PanelId, Glide2>,
    config: GlideConfig,
}

impl DisplaySmoother {
    #[must_use]
    pub fn new(config: GlideConfig) -> Self {
        Self {
            glides: FxHashMap::default(),
            config,
        }
    }

    /// Aim `panel_id` at `target`. A panel not yet tracked starts gliding
    /// from `drawn_at`.
    pub fn track(&mut self, panel_id: PanelId, drawn_at: (f64, f64), target: (f64, f64)) {
        let GlideConfig { rate, epsilon } = self.config;
        self.glides
            .entry(panel_id)
            .and_modify(|glide| glide.set_target(target))
            .or_insert_with(|| Glide2::new(drawn_at, target, rate, epsilon));
    }

    /// Stop smoothing `panel_id`; the renderer goes back to panel geometry.
    pub fn release(&mut self, panel_id: PanelId) {
        self.glides.remove(&panel_id);
    }

    pub fn clear(&mut self) {
        self.glides.clear();
    }

    /// Advance every glide by `dt` and drop the ones that settled.
    ///
    /// Returns the number still moving.
    pub fn tick(&mut self, dt: Duration) -> usize {
        for glide in self.glides.values_mut() {
            glide.tick(dt);
        }
        self.glides.retain(|_, glide| !glide.is_complete());
        self.glides.len()
    }

    /// Display position of `panel_id` while it is being smoothed.
    #[must_use]
    pub fn position(&self, panel_id: PanelId) -> Option<(f64, f64)> {
        self.glides.get(&panel_id).map(Glide2::position)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.glides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn glides_toward_target_and_retires() {
        let mut smoother = DisplaySmoother::new(GlideConfig::default());
        let id = PanelId::new(7);
        smoother.track(id, (0.0, 0.0), (100.0, 0.0));

        smoother.tick(FRAME);
        let (x, y) = smoother.position(id).expect("tracked");
        assert!(x > 0.0 && x < 100.0);
        assert_eq!(y, 0.0);

        for _ in 0..200 {
            if smoother.tick(FRAME) == 0 {
                break;
            }
        }
        assert!(smoother.is_idle());
        assert_eq!(smoother.position(id), None);
    }

    #[test]
    fn retarget_keeps_current_display_position() {
        let mut smoother = DisplaySmoother::new(GlideConfig::default());
        let id = PanelId::new(1);
        smoother.track(id, (0.0, 0.0), (100.0, 100.0));
        smoother.tick(FRAME);
        let before = smoother.position(id).expect("tracked");
        smoother.track(id, (999.0, 999.0), (200.0, 200.0));
        assert_eq!(smoother.position(id), Some(before));
    }

    #[test]
    fn release_drops_panel() {
        let mut smoother = DisplaySmoother::new(GlideConfig::default());
        let id = PanelId::new(1);
        smoother.track(id, (0.0, 0.0), (50.0, 50.0));
        smoother.release(id);
        assert!(smoother.is_idle());
    }
}
