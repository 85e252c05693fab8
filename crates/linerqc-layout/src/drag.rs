//! Whole-panel move sessions.
//!
//! ```text
//! Idle -> Armed -> Dragging -> Idle
//!           \---------------> Idle (release without travel)
//! ```
//!
//! A session arms on pointer-down and only starts dragging once the pointer
//! has travelled `activation_threshold` from where it went down, so a plain
//! click never snaps a panel. Each tick translates, contains, then snaps:
//!
//! ```text
//! translate -> bounds clamp -> grid + panel snap (position only)
//! ```
//!
//! At most one session exists per panel; different panels may be dragged
//! at the same time (multi-touch).

use linerqc_core::geometry::{Bounds, Geometry, PanelId, PointerPosition};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::{DragTuning, SessionSettings, SnapConfig};
use crate::constraint::contain_translate;
use crate::feedback::VisualFeedback;
use crate::panels::PanelSet;
use crate::session::{CancelReason, NoopReason};
use crate::snap::{self, SnapLine, SnapMode};

/// Phase of one panel's move session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePhase {
    Idle,
    Armed,
    Dragging,
}

/// Effect of one move-lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum MoveEffect {
    Armed {
        start: Geometry,
    },
    /// A live session on the same panel was dropped for a new one.
    Superseded {
        restored: Geometry,
        start: Geometry,
    },
    DragStarted {
        geometry: Geometry,
    },
    Updated {
        geometry: Geometry,
    },
    Committed {
        geometry: Geometry,
    },
    /// Armed session released before it started dragging.
    Released,
    Cancelled {
        restored: Geometry,
        reason: CancelReason,
    },
    Nudged {
        geometry: Geometry,
    },
    Noop {
        reason: NoopReason,
    },
}

/// One move transition with telemetry fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveTransition {
    pub transition_id: u64,
    pub panel_id: PanelId,
    pub from: MovePhase,
    pub to: MovePhase,
    pub effect: MoveEffect,
}

impl MoveTransition {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, MoveEffect::Noop { .. })
    }
}

/// Result of one move tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTick {
    pub geometry: Geometry,
    pub lines: Vec<SnapLine>,
}

/// Translate `start` by `delta`, keep it inside `bounds`, then snap its
/// position to the grid and to `neighbors`. Size never changes.
///
/// A snap that would leave the container is dropped for the tick.
#[must_use]
pub fn move_geometry(
    start: &Geometry,
    delta: (f64, f64),
    bounds: Option<Bounds>,
    config: &SnapConfig,
    neighbors: &[Geometry],
) -> MoveTick {
    let translated = start.translate(delta.0, delta.1);
    let contained = match bounds {
        Some(bounds) => contain_translate(translated, bounds),
        None => translated,
    };
    let snapped = snap::snap(contained, neighbors, config, SnapMode::Move);
    let fits = bounds.is_none_or(|bounds| {
        bounds.contains(&snapped.geometry) || !bounds.contains(&contained)
    });
    if fits {
        MoveTick {
            geometry: snapped.geometry,
            lines: snapped.lines,
        }
    } else {
        MoveTick {
            geometry: contained,
            lines: Vec::new(),
        }
    }
}

/// Keyboard nudge direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NudgeDirection {
    /// Unit vector in layout space (`y` grows southwards).
    #[must_use]
    pub const fn unit(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Live move session for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveSession {
    panel_id: PanelId,
    phase: MovePhase,
    anchor_pointer: PointerPosition,
    start_geometry: Geometry,
    settings: SessionSettings,
    activation_threshold: f64,
    current: Geometry,
    lines: Vec<SnapLine>,
}

impl MoveSession {
    #[must_use]
    pub const fn panel_id(&self) -> PanelId {
        self.panel_id
    }

    #[must_use]
    pub const fn phase(&self) -> MovePhase {
        self.phase
    }

    #[must_use]
    pub const fn start_geometry(&self) -> Geometry {
        self.start_geometry
    }

    #[must_use]
    pub const fn current(&self) -> Geometry {
        self.current
    }

    #[must_use]
    pub fn snap_lines(&self) -> &[SnapLine] {
        &self.lines
    }

    fn travelled_enough(&self, pointer: PointerPosition) -> bool {
        let (dx, dy) = pointer.delta_from(self.anchor_pointer);
        dx.hypot(dy) >= self.activation_threshold
    }
}

/// Move sessions keyed by panel.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    sessions: FxHashMap<PanelId, MoveSession>,
    transition_counter: u64,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self, panel_id: PanelId) -> MovePhase {
        self.sessions
            .get(&panel_id)
            .map_or(MovePhase::Idle, MoveSession::phase)
    }

    #[must_use]
    pub fn session(&self, panel_id: PanelId) -> Option<&MoveSession> {
        self.sessions.get(&panel_id)
    }

    #[must_use]
    pub fn is_active(&self, panel_id: PanelId) -> bool {
        self.sessions.contains_key(&panel_id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Panels with a live session, ascending.
    #[must_use]
    pub fn active_panels(&self) -> Vec<PanelId> {
        let mut ids: Vec<PanelId> = self.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Snap guides of every dragging session, in panel order.
    #[must_use]
    pub fn feedback(&self) -> VisualFeedback {
        let lines = self
            .active_panels()
            .into_iter()
            .filter_map(|id| self.sessions.get(&id))
            .flat_map(|session| session.lines.iter().copied())
            .collect();
        VisualFeedback::from_tick(lines, None)
    }

    /// Arm a move of `panel_id`. A live session on the same panel is
    /// superseded; sessions on other panels are unaffected.
    pub fn start(
        &mut self,
        panels: &mut PanelSet,
        panel_id: PanelId,
        pointer: PointerPosition,
        settings: SessionSettings,
        tuning: DragTuning,
    ) -> MoveTransition {
        let from = self.phase(panel_id);
        if !pointer.is_finite() {
            return self.noop(panel_id, from, NoopReason::NonFinitePointer);
        }
        if settings.constraints.validate().is_err() || tuning.validate().is_err() {
            return self.noop(panel_id, from, NoopReason::InvalidConstraints);
        }
        let Some(start) = panels.geometry(panel_id) else {
            return self.noop(panel_id, from, NoopReason::UnknownPanel);
        };
        if !start.is_valid() {
            return self.noop(panel_id, from, NoopReason::InvalidStartGeometry);
        }

        let prior = self.sessions.insert(
            panel_id,
            MoveSession {
                panel_id,
                phase: MovePhase::Armed,
                anchor_pointer: pointer,
                start_geometry: start,
                settings,
                activation_threshold: tuning.activation_threshold,
                current: start,
                lines: Vec::new(),
            },
        );
        let effect = match prior {
            Some(prior) => {
                panels.set_geometry(panel_id, prior.start_geometry);
                linerqc_core::debug!(panel = panel_id.get(), "move session superseded");
                MoveEffect::Superseded {
                    restored: prior.start_geometry,
                    start,
                }
            }
            None => {
                linerqc_core::debug!(panel = panel_id.get(), "move session armed");
                MoveEffect::Armed { start }
            }
        };
        self.transition(panel_id, from, effect)
    }

    /// Feed a pointer sample to the session on `panel_id`.
    pub fn update(
        &mut self,
        panels: &PanelSet,
        panel_id: PanelId,
        pointer: PointerPosition,
    ) -> MoveTransition {
        let from = self.phase(panel_id);
        let Some(session) = self.sessions.get_mut(&panel_id) else {
            return self.noop(panel_id, from, NoopReason::IdleWithoutSession);
        };
        if !pointer.is_finite() {
            return self.noop(panel_id, from, NoopReason::NonFinitePointer);
        }
        if session.phase == MovePhase::Armed && !session.travelled_enough(pointer) {
            return self.noop(panel_id, from, NoopReason::ThresholdNotReached);
        }

        let delta = pointer.delta_from(session.anchor_pointer);
        let tick = move_geometry(
            &session.start_geometry,
            delta,
            session.settings.effective_bounds(),
            &session.settings.constraints.snap_config(),
            &panels.neighbors_of(panel_id),
        );
        if !tick.geometry.is_valid() {
            return self.noop(panel_id, from, NoopReason::NonFiniteResult);
        }

        linerqc_core::trace!(
            panel = panel_id.get(),
            x = tick.geometry.x,
            y = tick.geometry.y,
            snap_lines = tick.lines.len(),
            "move tick"
        );
        let first = session.phase == MovePhase::Armed;
        session.phase = MovePhase::Dragging;
        session.current = tick.geometry;
        session.lines = tick.lines;
        let effect = if first {
            MoveEffect::DragStarted {
                geometry: tick.geometry,
            }
        } else {
            MoveEffect::Updated {
                geometry: tick.geometry,
            }
        };
        self.transition(panel_id, from, effect)
    }

    /// Commit the session on `panel_id`.
    pub fn end(&mut self, panels: &mut PanelSet, panel_id: PanelId) -> MoveTransition {
        let from = self.phase(panel_id);
        let Some(session) = self.sessions.remove(&panel_id) else {
            return self.noop(panel_id, from, NoopReason::IdleWithoutSession);
        };
        let effect = match session.phase {
            MovePhase::Armed | MovePhase::Idle => MoveEffect::Released,
            MovePhase::Dragging => {
                if panels.set_geometry(panel_id, session.current) {
                    linerqc_core::debug!(
                        panel = panel_id.get(),
                        x = session.current.x,
                        y = session.current.y,
                        "move committed"
                    );
                    MoveEffect::Committed {
                        geometry: session.current,
                    }
                } else {
                    linerqc_core::warn!(panel = panel_id.get(), "moved panel removed before commit");
                    MoveEffect::Cancelled {
                        restored: session.start_geometry,
                        reason: CancelReason::PanelRemoved,
                    }
                }
            }
        };
        self.transition(panel_id, from, effect)
    }

    /// Abort the session on `panel_id`, restoring its start geometry.
    pub fn cancel(
        &mut self,
        panels: &mut PanelSet,
        panel_id: PanelId,
        reason: CancelReason,
    ) -> MoveTransition {
        let from = self.phase(panel_id);
        let Some(session) = self.sessions.remove(&panel_id) else {
            return self.noop(panel_id, from, NoopReason::IdleWithoutSession);
        };
        let reason = if panels.set_geometry(panel_id, session.start_geometry) {
            reason
        } else {
            CancelReason::PanelRemoved
        };
        linerqc_core::debug!(panel = panel_id.get(), ?reason, "move cancelled");
        self.transition(
            panel_id,
            from,
            MoveEffect::Cancelled {
                restored: session.start_geometry,
                reason,
            },
        )
    }

    /// Cancel every live session, in panel order.
    pub fn cancel_all(&mut self, panels: &mut PanelSet, reason: CancelReason) -> Vec<MoveTransition> {
        self.active_panels()
            .into_iter()
            .map(|panel_id| self.cancel(panels, panel_id, reason))
            .collect()
    }

    /// Move `panel_id` by `steps` grid cells (one layout unit per step when
    /// grid snapping is off) and commit at once.
    ///
    /// Runs the bounds clamp and grid snap of a move but not panel snapping,
    /// which would pull a panel back onto the edge it is being nudged away
    /// from. Ignored while the panel has a live move session.
    pub fn nudge(
        &mut self,
        panels: &mut PanelSet,
        panel_id: PanelId,
        direction: NudgeDirection,
        steps: u32,
        settings: &SessionSettings,
    ) -> MoveTransition {
        let from = self.phase(panel_id);
        if self.sessions.contains_key(&panel_id) {
            return self.noop(panel_id, from, NoopReason::PanelBusy);
        }
        if settings.constraints.validate().is_err() {
            return self.noop(panel_id, from, NoopReason::InvalidConstraints);
        }
        let Some(start) = panels.geometry(panel_id) else {
            return self.noop(panel_id, from, NoopReason::UnknownPanel);
        };
        if !start.is_valid() {
            return self.noop(panel_id, from, NoopReason::InvalidStartGeometry);
        }

        let grid_only = SnapConfig {
            snap_to_other_panels: false,
            ..settings.constraints.snap_config()
        };
        let step = grid_only.grid().unwrap_or(1.0) * f64::from(steps);
        let (ux, uy) = direction.unit();
        let tick = move_geometry(
            &start,
            (ux * step, uy * step),
            settings.effective_bounds(),
            &grid_only,
            &[],
        );
        if !tick.geometry.is_valid() {
            return self.noop(panel_id, from, NoopReason::NonFiniteResult);
        }
        panels.set_geometry(panel_id, tick.geometry);
        linerqc_core::debug!(panel = panel_id.get(), ?direction, steps, "panel nudged");
        self.transition(
            panel_id,
            from,
            MoveEffect::Nudged {
                geometry: tick.geometry,
            },
        )
    }

    /// Record a call refused for a reason the controller cannot see.
    pub(crate) fn refuse(&mut self, panel_id: PanelId, reason: NoopReason) -> MoveTransition {
        let from = self.phase(panel_id);
        self.noop(panel_id, from, reason)
    }

    fn noop(&mut self, panel_id: PanelId, from: MovePhase, reason: NoopReason) -> MoveTransition {
        linerqc_core::trace!(panel = panel_id.get(), ?reason, "move call ignored");
        self.transition(panel_id, from, MoveEffect::Noop { reason })
    }

    fn transition(&mut self, panel_id: PanelId, from: MovePhase, effect: MoveEffect) -> MoveTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        MoveTransition {
            transition_id: self.transition_counter,
            panel_id,
            from,
            to: self.phase(panel_id),
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConstraintSet;
    use linerqc_core::geometry::Panel;

    fn id(raw: u64) -> PanelId {
        PanelId::new(raw)
    }

    fn no_snap() -> ConstraintSet {
        ConstraintSet {
            snap_to_other_panels: false,
            ..ConstraintSet::default()
        }
    }

    fn tuning(threshold: f64) -> DragTuning {
        DragTuning {
            activation_threshold: threshold,
        }
    }

    fn set() -> PanelSet {
        [
            Panel::new(id(1), Geometry::new(10.0, 10.0, 50.0, 40.0)),
            Panel::new(id(2), Geometry::new(200.0, 10.0, 50.0, 40.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn move_keeps_size_and_clamps_to_bounds() {
        let start = Geometry::new(10.0, 10.0, 50.0, 40.0);
        let tick = move_geometry(
            &start,
            (500.0, -500.0),
            Some(Bounds::new(300.0, 200.0)),
            &no_snap().snap_config(),
            &[],
        );
        assert_eq!(tick.geometry, Geometry::new(250.0, 0.0, 50.0, 40.0));
    }

    #[test]
    fn grid_snap_that_would_leave_container_is_dropped() {
        let config = ConstraintSet {
            snap_to_grid: true,
            grid_size: 100.0,
            ..no_snap()
        }
        .snap_config();
        let start = Geometry::new(0.0, 0.0, 100.0, 50.0);
        let tick = move_geometry(&start, (60.0, 0.0), Some(Bounds::new(150.0, 100.0)), &config, &[]);
        assert_eq!(tick.geometry.x, 50.0);
    }

    #[test]
    fn armed_session_waits_for_activation_threshold() {
        let mut panels = set();
        let mut drags = DragController::new();
        let armed = drags.start(
            &mut panels,
            id(1),
            PointerPosition::new(20.0, 20.0),
            SessionSettings::new(no_snap(), None),
            tuning(5.0),
        );
        assert_eq!(armed.to, MovePhase::Armed);

        let idle = drags.update(&panels, id(1), PointerPosition::new(22.0, 21.0));
        assert_eq!(
            idle.effect,
            MoveEffect::Noop {
                reason: NoopReason::ThresholdNotReached
            }
        );
        let started = drags.update(&panels, id(1), PointerPosition::new(30.0, 20.0));
        assert_eq!(
            started.effect,
            MoveEffect::DragStarted {
                geometry: Geometry::new(20.0, 10.0, 50.0, 40.0)
            }
        );
        assert_eq!(started.to, MovePhase::Dragging);
    }

    #[test]
    fn release_without_travel_leaves_panel_alone() {
        let mut panels = set();
        let mut drags = DragController::new();
        drags.start(
            &mut panels,
            id(1),
            PointerPosition::new(20.0, 20.0),
            SessionSettings::new(no_snap(), None),
            tuning(5.0),
        );
        let released = drags.end(&mut panels, id(1));
        assert_eq!(released.effect, MoveEffect::Released);
        assert_eq!(panels.geometry(id(1)), Some(Geometry::new(10.0, 10.0, 50.0, 40.0)));
    }

    #[test]
    fn new_drag_on_same_panel_supersedes() {
        let mut panels = set();
        let mut drags = DragController::new();
        let settings = SessionSettings::new(no_snap(), None);
        drags.start(&mut panels, id(1), PointerPosition::new(0.0, 0.0), settings, tuning(0.0));
        drags.update(&panels, id(1), PointerPosition::new(40.0, 0.0));
        let again = drags.start(&mut panels, id(1), PointerPosition::new(5.0, 5.0), settings, tuning(0.0));
        assert!(matches!(again.effect, MoveEffect::Superseded { .. }));
        assert_eq!(drags.active_count(), 1);
        assert_eq!(drags.phase(id(1)), MovePhase::Armed);
    }

    #[test]
    fn sessions_on_different_panels_are_independent() {
        let mut panels = set();
        let mut drags = DragController::new();
        let settings = SessionSettings::new(no_snap(), None);
        drags.start(&mut panels, id(1), PointerPosition::new(0.0, 0.0), settings, tuning(0.0));
        drags.start(&mut panels, id(2), PointerPosition::new(0.0, 0.0), settings, tuning(0.0));
        drags.update(&panels, id(1), PointerPosition::new(5.0, 0.0));
        drags.update(&panels, id(2), PointerPosition::new(0.0, 5.0));
        drags.end(&mut panels, id(1));
        let cancelled = drags.cancel_all(&mut panels, CancelReason::PointerCaptureLost);
        assert_eq!(cancelled.len(), 1);
        assert_eq!(panels.geometry(id(1)).map(|g| g.x), Some(15.0));
        assert_eq!(panels.geometry(id(2)).map(|g| g.y), Some(10.0));
    }

    #[test]
    fn nudge_steps_by_grid_cells_and_respects_bounds() {
        let mut panels = set();
        let mut drags = DragController::new();
        let settings = SessionSettings::new(
            ConstraintSet {
                snap_to_grid: true,
                grid_size: 10.0,
                ..ConstraintSet::default()
            },
            Some(Bounds::new(260.0, 100.0)),
        );
        let nudged = drags.nudge(&mut panels, id(1), NudgeDirection::Right, 2, &settings);
        assert_eq!(
            nudged.effect,
            MoveEffect::Nudged {
                geometry: Geometry::new(30.0, 10.0, 50.0, 40.0)
            }
        );
        drags.nudge(&mut panels, id(2), NudgeDirection::Right, 5, &settings);
        assert_eq!(panels.geometry(id(2)).map(|g| g.x), Some(210.0));
    }

    #[test]
    fn nudge_is_refused_while_dragging() {
        let mut panels = set();
        let mut drags = DragController::new();
        let settings = SessionSettings::new(no_snap(), None);
        drags.start(&mut panels, id(1), PointerPosition::new(0.0, 0.0), settings, tuning(0.0));
        let refused = drags.nudge(&mut panels, id(1), NudgeDirection::Up, 1, &settings);
        assert_eq!(
            refused.effect,
            MoveEffect::Noop {
                reason: NoopReason::PanelBusy
            }
        );
    }
}
