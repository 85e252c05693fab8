//! Resize session state machine.
//!
//! ```text
//! Idle -> Resizing -> Idle
//!           |  \----> commit: last tick's geometry written to the panel
//!           \-------> cancel: start geometry written back
//! ```
//!
//! Every tick runs the same pipeline, in order:
//!
//! ```text
//! handle math -> constraint solver -> snap engine -> container fit
//! ```
//!
//! The preview lives in the session; the panel collection is only written
//! on commit or cancel. Every call returns a [`ResizeTransition`], and calls
//! that do nothing say why through [`NoopReason`].

use linerqc_core::geometry::{Geometry, PanelId, PointerPosition, is_valid_geometry};
use serde::{Deserialize, Serialize};

use crate::config::SessionSettings;
use crate::constraint::{self, Anchor, aspect_holds};
use crate::feedback::VisualFeedback;
use crate::handle::{EdgeSide, ResizeHandle};
use crate::panels::PanelSet;
use crate::session::{CancelReason, NoopReason};
use crate::snap::{self, SnapLine, SnapMode};

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResizeState {
    Idle,
    Resizing {
        panel_id: PanelId,
        handle: ResizeHandle,
    },
}

/// Effect of one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ResizeEffect {
    Started {
        panel_id: PanelId,
        handle: ResizeHandle,
        start: Geometry,
    },
    /// A live session was cancelled so a new one could start.
    Superseded {
        previous: PanelId,
        restored: Geometry,
        panel_id: PanelId,
        handle: ResizeHandle,
        start: Geometry,
    },
    Updated {
        panel_id: PanelId,
        geometry: Geometry,
        violated: bool,
    },
    Committed {
        panel_id: PanelId,
        geometry: Geometry,
    },
    Cancelled {
        panel_id: PanelId,
        restored: Geometry,
        reason: CancelReason,
    },
    Noop {
        reason: NoopReason,
    },
}

/// One state-machine transition with telemetry fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeTransition {
    pub transition_id: u64,
    pub from: ResizeState,
    pub to: ResizeState,
    pub effect: ResizeEffect,
}

impl ResizeTransition {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, ResizeEffect::Noop { .. })
    }
}

/// Result of one pipeline tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeTick {
    pub geometry: Geometry,
    /// Some constraint changed the requested geometry.
    pub violated: bool,
    pub message: Option<String>,
    pub lines: Vec<SnapLine>,
}

/// Raw geometry for dragging `handle` by `delta` from `start`.
///
/// Corner handles move two edges, edge-center handles one; the opposite
/// edges never move. Dragging past the opposite edge yields a negative
/// extent, which the constraint solver clamps against the fixed edge.
#[must_use]
pub fn candidate_for_handle(handle: ResizeHandle, start: &Geometry, delta: (f64, f64)) -> Geometry {
    let (mut left, mut top, mut right, mut bottom) =
        (start.left(), start.top(), start.right(), start.bottom());
    match handle.horizontal_edge() {
        Some(EdgeSide::Start) => left += delta.0,
        Some(EdgeSide::End) => right += delta.0,
        None => {}
    }
    match handle.vertical_edge() {
        Some(EdgeSide::Start) => top += delta.1,
        Some(EdgeSide::End) => bottom += delta.1,
        None => {}
    }
    Geometry::from_edges(left, top, right, bottom)
}

/// Run one resize tick. `None` when the result is not finite.
///
/// A snap that would break the size limits, the aspect lock, or the
/// container is dropped for the tick. The container fit runs last, so the
/// result is always inside valid bounds unless the minimum size alone does
/// not fit, in which case minimum size wins and the tick is flagged.
#[must_use]
pub fn resolve_resize(
    start: &Geometry,
    handle: ResizeHandle,
    delta: (f64, f64),
    settings: &SessionSettings,
    neighbors: &[Geometry],
) -> Option<ResizeTick> {
    let constraints = &settings.constraints;
    let limits = constraints.size_limits();
    let bounds = settings.effective_bounds();
    let aspect = constraints.locked_aspect();

    let candidate = candidate_for_handle(handle, start, delta);
    let anchor = Anchor::for_handle(handle, start, delta);
    let solved = constraint::apply(candidate, constraints, anchor);
    if !solved.geometry.is_valid() {
        return None;
    }

    let mut notes: Vec<String> = solved.message.into_iter().collect();
    let snapped = snap::snap(
        solved.geometry,
        neighbors,
        &constraints.snap_config(),
        SnapMode::Resize(handle),
    );
    let aspect_before = aspect.is_none_or(|ratio| {
        aspect_holds(solved.geometry.width, solved.geometry.height, ratio)
    });
    let keeps_aspect = !aspect_before
        || aspect.is_none_or(|ratio| {
            aspect_holds(snapped.geometry.width, snapped.geometry.height, ratio)
        });
    let keeps_bounds = bounds.is_none_or(|bounds| {
        bounds.contains(&snapped.geometry) || !bounds.contains(&solved.geometry)
    });
    let (mut geometry, mut lines) = if snapped.geometry.is_valid()
        && limits.admits(&snapped.geometry)
        && keeps_aspect
        && keeps_bounds
    {
        (snapped.geometry, snapped.lines)
    } else {
        (solved.geometry, Vec::new())
    };

    if let Some(bounds) = bounds {
        let fit = constraint::fit_resize_within(
            geometry,
            bounds,
            anchor,
            (constraints.min_width, constraints.min_height),
        );
        if fit.overflow {
            notes.push("minimum size exceeds container; minimum size takes precedence".to_string());
        } else if fit.clipped {
            notes.push("clamped to container".to_string());
        }
        if fit.geometry != geometry {
            lines.clear();
            if let Some(ratio) = aspect
                && aspect_before
                && !aspect_holds(fit.geometry.width, fit.geometry.height, ratio)
            {
                notes.push(format!("container bounds override aspect ratio {ratio}"));
            }
        }
        geometry = fit.geometry;
    }

    if !geometry.is_valid() {
        return None;
    }
    if notes.is_empty() && !is_valid_geometry(&geometry, &limits, bounds) {
        notes.push("geometry outside constraints".to_string());
    }
    let violated = !notes.is_empty();
    Some(ResizeTick {
        geometry,
        violated,
        message: violated.then(|| notes.join("; ")),
        lines,
    })
}

/// Live resize session. Exclusively owned by a [`ResizeMachine`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    panel_id: PanelId,
    handle: ResizeHandle,
    anchor_pointer: PointerPosition,
    start_geometry: Geometry,
    settings: SessionSettings,
    current: Geometry,
    violated: bool,
    message: Option<String>,
    lines: Vec<SnapLine>,
}

impl ResizeSession {
    #[must_use]
    pub const fn panel_id(&self) -> PanelId {
        self.panel_id
    }

    #[must_use]
    pub const fn handle(&self) -> ResizeHandle {
        self.handle
    }

    #[must_use]
    pub const fn anchor_pointer(&self) -> PointerPosition {
        self.anchor_pointer
    }

    #[must_use]
    pub const fn start_geometry(&self) -> Geometry {
        self.start_geometry
    }

    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Live preview geometry (last valid tick).
    #[must_use]
    pub const fn current(&self) -> Geometry {
        self.current
    }

    #[must_use]
    pub const fn violated(&self) -> bool {
        self.violated
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn snap_lines(&self) -> &[SnapLine] {
        &self.lines
    }

    #[must_use]
    pub fn feedback(&self) -> VisualFeedback {
        VisualFeedback::from_tick(self.lines.clone(), self.message())
    }
}

/// Runtime lifecycle machine for panel resizing.
#[derive(Debug, Clone, Default)]
pub struct ResizeMachine {
    session: Option<ResizeSession>,
    transition_counter: u64,
}

impl ResizeMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ResizeState {
        match &self.session {
            None => ResizeState::Idle,
            Some(session) => ResizeState::Resizing {
                panel_id: session.panel_id,
                handle: session.handle,
            },
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// Panel owned by the live session, if any.
    #[must_use]
    pub fn active_panel(&self) -> Option<PanelId> {
        self.session.as_ref().map(|session| session.panel_id)
    }

    /// Overlay for the current tick; empty while idle.
    #[must_use]
    pub fn feedback(&self) -> VisualFeedback {
        self.session
            .as_ref()
            .map_or_else(VisualFeedback::none, ResizeSession::feedback)
    }

    /// Begin resizing `panel_id` from `handle`.
    ///
    /// Invalid requests are ignored and leave any live session untouched. A
    /// valid request while resizing cancels the live session first.
    pub fn start(
        &mut self,
        panels: &mut PanelSet,
        panel_id: PanelId,
        handle: ResizeHandle,
        pointer: PointerPosition,
        settings: SessionSettings,
    ) -> ResizeTransition {
        let from = self.state();
        if !pointer.is_finite() {
            return self.noop(from, NoopReason::NonFinitePointer);
        }
        if settings.constraints.validate().is_err() {
            return self.noop(from, NoopReason::InvalidConstraints);
        }
        let Some(start) = panels.geometry(panel_id) else {
            return self.noop(from, NoopReason::UnknownPanel);
        };
        if !start.is_valid() {
            return self.noop(from, NoopReason::InvalidStartGeometry);
        }

        let previous = self.session.take().map(|prior| {
            panels.set_geometry(prior.panel_id, prior.start_geometry);
            (prior.panel_id, prior.start_geometry)
        });
        self.session = Some(ResizeSession {
            panel_id,
            handle,
            anchor_pointer: pointer,
            start_geometry: start,
            settings,
            current: start,
            violated: false,
            message: None,
            lines: Vec::new(),
        });

        let effect = match previous {
            Some((previous, restored)) => {
                linerqc_core::debug!(
                    previous = previous.get(),
                    panel = panel_id.get(),
                    ?handle,
                    "resize session superseded"
                );
                ResizeEffect::Superseded {
                    previous,
                    restored,
                    panel_id,
                    handle,
                    start,
                }
            }
            None => {
                linerqc_core::debug!(panel = panel_id.get(), ?handle, "resize session started");
                ResizeEffect::Started {
                    panel_id,
                    handle,
                    start,
                }
            }
        };
        self.transition(from, effect)
    }

    /// Recompute the preview for a new pointer sample.
    ///
    /// Non-finite samples and ticks that produce non-finite geometry are
    /// ignored; the session keeps its last valid preview.
    pub fn update(&mut self, panels: &PanelSet, pointer: PointerPosition) -> ResizeTransition {
        let from = self.state();
        let Some(session) = self.session.as_mut() else {
            return self.noop(from, NoopReason::IdleWithoutSession);
        };
        if !pointer.is_finite() {
            return self.noop(from, NoopReason::NonFinitePointer);
        }

        let delta = pointer.delta_from(session.anchor_pointer);
        let neighbors = panels.neighbors_of(session.panel_id);
        let Some(tick) = resolve_resize(
            &session.start_geometry,
            session.handle,
            delta,
            &session.settings,
            &neighbors,
        ) else {
            return self.noop(from, NoopReason::NonFiniteResult);
        };

        linerqc_core::trace!(
            panel = session.panel_id.get(),
            x = tick.geometry.x,
            y = tick.geometry.y,
            width = tick.geometry.width,
            height = tick.geometry.height,
            violated = tick.violated,
            snap_lines = tick.lines.len(),
            "resize tick"
        );
        session.current = tick.geometry;
        session.violated = tick.violated;
        session.message = tick.message;
        session.lines = tick.lines;
        let effect = ResizeEffect::Updated {
            panel_id: session.panel_id,
            geometry: tick.geometry,
            violated: tick.violated,
        };
        self.transition(from, effect)
    }

    /// Commit the last tick's geometry to the panel.
    pub fn end(&mut self, panels: &mut PanelSet) -> ResizeTransition {
        let from = self.state();
        let Some(session) = self.session.take() else {
            return self.noop(from, NoopReason::IdleWithoutSession);
        };
        let effect = if panels.set_geometry(session.panel_id, session.current) {
            linerqc_core::debug!(
                panel = session.panel_id.get(),
                width = session.current.width,
                height = session.current.height,
                violated = session.violated,
                "resize committed"
            );
            ResizeEffect::Committed {
                panel_id: session.panel_id,
                geometry: session.current,
            }
        } else {
            linerqc_core::warn!(panel = session.panel_id.get(), "resized panel removed before commit");
            ResizeEffect::Cancelled {
                panel_id: session.panel_id,
                restored: session.start_geometry,
                reason: CancelReason::PanelRemoved,
            }
        };
        self.transition(from, effect)
    }

    /// Abandon the session and restore the panel's start geometry.
    pub fn cancel(&mut self, panels: &mut PanelSet, reason: CancelReason) -> ResizeTransition {
        let from = self.state();
        let Some(session) = self.session.take() else {
            return self.noop(from, NoopReason::IdleWithoutSession);
        };
        let reason = if panels.set_geometry(session.panel_id, session.start_geometry) {
            reason
        } else {
            CancelReason::PanelRemoved
        };
        linerqc_core::debug!(panel = session.panel_id.get(), ?reason, "resize cancelled");
        self.transition(
            from,
            ResizeEffect::Cancelled {
                panel_id: session.panel_id,
                restored: session.start_geometry,
                reason,
            },
        )
    }

    fn noop(&mut self, from: ResizeState, reason: NoopReason) -> ResizeTransition {
        linerqc_core::trace!(?reason, "resize call ignored");
        self.transition(from, ResizeEffect::Noop { reason })
    }

    fn transition(&mut self, from: ResizeState, effect: ResizeEffect) -> ResizeTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        ResizeTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state(),
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConstraintSet;
    use linerqc_core::geometry::{Bounds, Panel};

    fn id(raw: u64) -> PanelId {
        PanelId::new(raw)
    }

    fn panels() -> PanelSet {
        [
            Panel::new(id(1), Geometry::new(0.0, 0.0, 100.0, 50.0)),
            Panel::new(id(2), Geometry::new(300.0, 300.0, 100.0, 100.0)),
        ]
        .into_iter()
        .collect()
    }

    fn settings(constraints: ConstraintSet) -> SessionSettings {
        SessionSettings::new(constraints, None)
    }

    fn plain() -> ConstraintSet {
        ConstraintSet {
            snap_to_other_panels: false,
            ..ConstraintSet::default()
        }
    }

    #[test]
    fn candidate_moves_only_dragged_edges() {
        let start = Geometry::new(10.0, 10.0, 100.0, 50.0);
        assert_eq!(
            candidate_for_handle(ResizeHandle::TopLeft, &start, (5.0, 5.0)),
            Geometry::new(15.0, 15.0, 95.0, 45.0)
        );
        assert_eq!(
            candidate_for_handle(ResizeHandle::MiddleRight, &start, (20.0, 99.0)),
            Geometry::new(10.0, 10.0, 120.0, 50.0)
        );
        assert_eq!(
            candidate_for_handle(ResizeHandle::BottomCenter, &start, (99.0, -10.0)),
            Geometry::new(10.0, 10.0, 100.0, 40.0)
        );
    }

    #[test]
    fn every_handle_keeps_the_opposite_edges_fixed() {
        let start = Geometry::new(50.0, 50.0, 100.0, 100.0);
        for handle in ResizeHandle::ALL {
            let tick = resolve_resize(&start, handle, (10.0, 10.0), &settings(plain()), &[])
                .expect("finite tick");
            let g = tick.geometry;
            match handle.horizontal_edge() {
                Some(EdgeSide::Start) => assert_eq!(g.right(), start.right(), "{handle:?}"),
                Some(EdgeSide::End) => assert_eq!(g.left(), start.left(), "{handle:?}"),
                None => assert_eq!((g.left(), g.right()), (start.left(), start.right())),
            }
            match handle.vertical_edge() {
                Some(EdgeSide::Start) => assert_eq!(g.bottom(), start.bottom(), "{handle:?}"),
                Some(EdgeSide::End) => assert_eq!(g.top(), start.top(), "{handle:?}"),
                None => assert_eq!((g.top(), g.bottom()), (start.top(), start.bottom())),
            }
        }
    }

    #[test]
    fn lifecycle_start_update_end() {
        let mut set = panels();
        let mut machine = ResizeMachine::new();
        let started = machine.start(
            &mut set,
            id(1),
            ResizeHandle::BottomRight,
            PointerPosition::new(100.0, 50.0),
            settings(plain()),
        );
        assert!(matches!(started.effect, ResizeEffect::Started { .. }));
        assert_eq!(started.from, ResizeState::Idle);

        let updated = machine.update(&set, PointerPosition::new(130.0, 70.0));
        assert!(matches!(
            updated.effect,
            ResizeEffect::Updated { violated: false, .. }
        ));
        // Preview only; the panel is untouched until commit.
        assert_eq!(set.geometry(id(1)), Some(Geometry::new(0.0, 0.0, 100.0, 50.0)));

        let ended = machine.end(&mut set);
        assert_eq!(ended.to, ResizeState::Idle);
        assert_eq!(set.geometry(id(1)), Some(Geometry::new(0.0, 0.0, 130.0, 70.0)));
        assert_eq!(ended.transition_id, 3);
    }

    #[test]
    fn cancel_restores_start_geometry() {
        let mut set = panels();
        let mut machine = ResizeMachine::new();
        machine.start(
            &mut set,
            id(1),
            ResizeHandle::TopLeft,
            PointerPosition::new(0.0, 0.0),
            settings(plain()),
        );
        machine.update(&set, PointerPosition::new(-40.0, -40.0));
        let cancelled = machine.cancel(&mut set, CancelReason::PointerCaptureLost);
        assert!(matches!(
            cancelled.effect,
            ResizeEffect::Cancelled {
                reason: CancelReason::PointerCaptureLost,
                ..
            }
        ));
        assert_eq!(set.geometry(id(1)), Some(Geometry::new(0.0, 0.0, 100.0, 50.0)));
        assert!(!machine.is_active());
    }

    #[test]
    fn non_finite_pointer_keeps_last_valid_preview() {
        let mut set = panels();
        let mut machine = ResizeMachine::new();
        machine.start(
            &mut set,
            id(1),
            ResizeHandle::MiddleRight,
            PointerPosition::new(100.0, 25.0),
            settings(plain()),
        );
        machine.update(&set, PointerPosition::new(150.0, 25.0));
        let ignored = machine.update(&set, PointerPosition::new(f64::NAN, 25.0));
        assert_eq!(
            ignored.effect,
            ResizeEffect::Noop {
                reason: NoopReason::NonFinitePointer
            }
        );
        assert!(machine.is_active());
        let current = machine.session().map(ResizeSession::current);
        assert_eq!(current.map(|g| g.width), Some(150.0));
    }

    #[test]
    fn stray_calls_while_idle_are_noops() {
        let mut set = panels();
        let mut machine = ResizeMachine::new();
        for transition in [
            machine.update(&set, PointerPosition::new(1.0, 1.0)),
            machine.end(&mut set),
            machine.cancel(&mut set, CancelReason::Explicit),
        ] {
            assert_eq!(
                transition.effect,
                ResizeEffect::Noop {
                    reason: NoopReason::IdleWithoutSession
                }
            );
            assert_eq!(transition.to, ResizeState::Idle);
        }
        assert_eq!(set.geometry(id(1)), Some(Geometry::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn new_start_supersedes_live_session() {
        let mut set = panels();
        let mut machine = ResizeMachine::new();
        machine.start(
            &mut set,
            id(1),
            ResizeHandle::BottomRight,
            PointerPosition::new(100.0, 50.0),
            settings(plain()),
        );
        machine.update(&set, PointerPosition::new(180.0, 90.0));
        let superseding = machine.start(
            &mut set,
            id(2),
            ResizeHandle::TopLeft,
            PointerPosition::new(300.0, 300.0),
            settings(plain()),
        );
        assert!(matches!(
            superseding.effect,
            ResizeEffect::Superseded { previous, .. } if previous == id(1)
        ));
        assert_eq!(machine.active_panel(), Some(id(2)));
        assert_eq!(set.geometry(id(1)), Some(Geometry::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn invalid_start_requests_are_ignored() {
        let mut set = panels();
        let mut machine = ResizeMachine::new();
        let unknown = machine.start(
            &mut set,
            id(42),
            ResizeHandle::TopLeft,
            PointerPosition::new(0.0, 0.0),
            settings(plain()),
        );
        assert_eq!(
            unknown.effect,
            ResizeEffect::Noop {
                reason: NoopReason::UnknownPanel
            }
        );
        let bad_constraints = ConstraintSet {
            min_width: -1.0,
            ..plain()
        };
        let rejected = machine.start(
            &mut set,
            id(1),
            ResizeHandle::TopLeft,
            PointerPosition::new(0.0, 0.0),
            settings(bad_constraints),
        );
        assert_eq!(
            rejected.effect,
            ResizeEffect::Noop {
                reason: NoopReason::InvalidConstraints
            }
        );
        assert!(!machine.is_active());
    }

    #[test]
    fn locked_aspect_follows_driving_axis() {
        let constraints = ConstraintSet {
            lock_aspect_ratio: true,
            aspect_ratio: 2.0,
            ..plain()
        };
        let start = Geometry::new(0.0, 0.0, 100.0, 50.0);
        let tick = resolve_resize(
            &start,
            ResizeHandle::BottomRight,
            (60.0, 5.0),
            &settings(constraints),
            &[],
        )
        .expect("finite tick");
        assert_eq!(tick.geometry, Geometry::new(0.0, 0.0, 160.0, 80.0));
        assert!(!tick.violated);
    }

    #[test]
    fn container_clips_moving_edge() {
        let bounded = SessionSettings::new(plain(), Some(Bounds::new(120.0, 100.0)));
        let start = Geometry::new(0.0, 0.0, 100.0, 50.0);
        let tick = resolve_resize(&start, ResizeHandle::MiddleRight, (80.0, 0.0), &bounded, &[])
            .expect("finite tick");
        assert_eq!(tick.geometry, Geometry::new(0.0, 0.0, 120.0, 50.0));
        assert!(tick.violated);
        assert_eq!(tick.message.as_deref(), Some("clamped to container"));
    }

    #[test]
    fn minimum_wins_over_too_small_container() {
        let constraints = ConstraintSet {
            min_width: 200.0,
            ..plain()
        };
        let bounded = SessionSettings::new(constraints, Some(Bounds::new(150.0, 100.0)));
        let start = Geometry::new(0.0, 0.0, 100.0, 50.0);
        let tick = resolve_resize(&start, ResizeHandle::MiddleRight, (0.0, 0.0), &bounded, &[])
            .expect("finite tick");
        assert_eq!(tick.geometry.width, 200.0);
        assert_eq!(tick.geometry.x, 0.0);
        assert!(tick.violated);
    }

    #[test]
    fn resize_snaps_moving_edge_to_neighbor() {
        let constraints = ConstraintSet {
            snap_to_other_panels: true,
            snap_threshold: 8.0,
            ..ConstraintSet::default()
        };
        let neighbor = Geometry::new(205.0, 400.0, 50.0, 50.0);
        let start = Geometry::new(0.0, 0.0, 100.0, 50.0);
        let tick = resolve_resize(
            &start,
            ResizeHandle::MiddleRight,
            (101.0, 0.0),
            &settings(constraints),
            &[neighbor],
        )
        .expect("finite tick");
        assert_eq!(tick.geometry.right(), 205.0);
        assert_eq!(tick.lines.len(), 1);
        assert!(tick.lines[0].is_vertical());
    }

    #[test]
    fn grid_rounds_width_with_off_grid_anchor() {
        let constraints = ConstraintSet {
            snap_to_grid: true,
            grid_size: 20.0,
            ..plain()
        };
        let start = Geometry::new(13.0, 0.0, 100.0, 40.0);
        let tick = resolve_resize(
            &start,
            ResizeHandle::MiddleRight,
            (34.0, 0.0),
            &settings(constraints),
            &[],
        )
        .expect("finite tick");
        assert_eq!(tick.geometry, Geometry::new(13.0, 0.0, 140.0, 40.0));
        assert_eq!(tick.geometry.width % 20.0, 0.0);
    }

    #[test]
    fn feedback_reflects_violation() {
        let mut set = panels();
        let mut machine = ResizeMachine::new();
        let constraints = ConstraintSet {
            min_width: 50.0,
            ..plain()
        };
        machine.start(
            &mut set,
            id(1),
            ResizeHandle::TopRight,
            PointerPosition::new(100.0, 0.0),
            settings(constraints),
        );
        machine.update(&set, PointerPosition::new(10.0, 0.0));
        let feedback = machine.feedback();
        assert!(feedback.show_constraint_indicator);
        assert_eq!(feedback.constraint_message, "width clamped to minimum");
        assert!(!feedback.show_snap_lines);
    }
}
