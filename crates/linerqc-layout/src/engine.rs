//! Host-facing facade over the gesture machines.
//!
//! The host owns the [`PanelSet`] and passes it into every call; the engine
//! owns the configuration, the live sessions, and the display smoother.
//! Sessions capture the constraint set and bounds current at their start,
//! so changing either mid-gesture affects only the next gesture.

use std::time::Duration;

use linerqc_core::geometry::{Bounds, Panel, PanelId, PointerPosition};

use crate::config::{
    ConstraintSet, ConstraintSetError, LayoutConfig, LayoutConfigError, SessionSettings,
};
use crate::drag::{DragController, MoveEffect, MovePhase, MoveTransition, NudgeDirection};
use crate::feedback::VisualFeedback;
use crate::handle::{CursorHint, DEFAULT_HANDLE_INSET, ResizeHandle, classify_handle};
use crate::panels::PanelSet;
use crate::resize::{ResizeMachine, ResizeSession, ResizeState, ResizeTransition};
use crate::roll::assign_roll_numbers;
use crate::session::{CancelReason, NoopReason};
use crate::smoothing::DisplaySmoother;

/// Transitions produced by [`LayoutEngine::pointer_capture_lost`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureLost {
    pub resize: Option<ResizeTransition>,
    pub moves: Vec<MoveTransition>,
}

/// Interactive layout engine for one canvas.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    bounds: Option<Bounds>,
    resize: ResizeMachine,
    drags: DragController,
    smoother: DisplaySmoother,
}

impl LayoutEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutConfigError> {
        config.validate()?;
        Ok(Self {
            smoother: DisplaySmoother::new(config.glide),
            config,
            bounds: None,
            resize: ResizeMachine::new(),
            drags: DragController::new(),
        })
    }

    /// Set the container extents used by gestures started from now on.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub const fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    /// Replace the constraint set for gestures started from now on.
    pub fn set_constraints(&mut self, constraints: ConstraintSet) -> Result<(), ConstraintSetError> {
        self.config.constraints = constraints.validated()?;
        Ok(())
    }

    fn settings(&self) -> SessionSettings {
        SessionSettings::new(self.config.constraints, self.bounds)
    }

    /// Convert a device-pixel pointer sample into layout units.
    #[must_use]
    pub fn pointer_from_device(&self, device: PointerPosition) -> PointerPosition {
        self.config.scale.to_layout(device)
    }

    /// Handle under `pointer` on `panel_id`, if any.
    #[must_use]
    pub fn hit_test(
        &self,
        panels: &PanelSet,
        panel_id: PanelId,
        pointer: PointerPosition,
    ) -> Option<ResizeHandle> {
        let geometry = panels.geometry(panel_id)?;
        classify_handle(&geometry, pointer, DEFAULT_HANDLE_INSET)
    }

    /// Cursor to show for `pointer` over `panel_id`: a resize cursor near a
    /// handle, the move cursor inside the panel, nothing outside.
    #[must_use]
    pub fn cursor_at(
        &self,
        panels: &PanelSet,
        panel_id: PanelId,
        pointer: PointerPosition,
    ) -> Option<CursorHint> {
        if let Some(handle) = self.hit_test(panels, panel_id, pointer) {
            return Some(handle.cursor());
        }
        let geometry = panels.geometry(panel_id)?;
        let inside = pointer.x >= geometry.left()
            && pointer.x <= geometry.right()
            && pointer.y >= geometry.top()
            && pointer.y <= geometry.bottom();
        inside.then_some(CursorHint::Move)
    }

    // --- resize -----------------------------------------------------------

    #[must_use]
    pub fn resize_state(&self) -> ResizeState {
        self.resize.state()
    }

    #[must_use]
    pub fn resize_session(&self) -> Option<&ResizeSession> {
        self.resize.session()
    }

    /// Begin resizing. A move in progress on the same panel is cancelled.
    pub fn start_resize(
        &mut self,
        panels: &mut PanelSet,
        handle: ResizeHandle,
        panel_id: PanelId,
        pointer: PointerPosition,
    ) -> ResizeTransition {
        let settings = self.settings();
        let transition = self.resize.start(panels, panel_id, handle, pointer, settings);
        if !transition.is_noop() && self.drags.is_active(panel_id) {
            self.drags
                .cancel(panels, panel_id, CancelReason::ConflictingSession);
            self.smoother.release(panel_id);
            linerqc_core::debug!(panel = panel_id.get(), "move cancelled by resize");
        }
        transition
    }

    pub fn update_resize(&mut self, panels: &PanelSet, pointer: PointerPosition) -> ResizeTransition {
        self.resize.update(panels, pointer)
    }

    pub fn end_resize(&mut self, panels: &mut PanelSet) -> ResizeTransition {
        self.resize.end(panels)
    }

    pub fn cancel_resize(&mut self, panels: &mut PanelSet) -> ResizeTransition {
        self.resize.cancel(panels, CancelReason::Explicit)
    }

    // --- move -------------------------------------------------------------

    #[must_use]
    pub fn move_phase(&self, panel_id: PanelId) -> MovePhase {
        self.drags.phase(panel_id)
    }

    /// Arm a move. A resize in progress on the same panel is cancelled.
    pub fn start_move(
        &mut self,
        panels: &mut PanelSet,
        panel_id: PanelId,
        pointer: PointerPosition,
    ) -> MoveTransition {
        let settings = self.settings();
        let transition = self
            .drags
            .start(panels, panel_id, pointer, settings, self.config.drag);
        if transition.is_noop() {
            return transition;
        }
        if self.resize.active_panel() == Some(panel_id) {
            self.resize.cancel(panels, CancelReason::ConflictingSession);
            linerqc_core::debug!(panel = panel_id.get(), "resize cancelled by move");
        }
        if matches!(transition.effect, MoveEffect::Superseded { .. }) {
            self.smoother.release(panel_id);
        }
        transition
    }

    /// Feed a pointer sample to the move on `panel_id` and retarget its
    /// display glide.
    pub fn update_move(
        &mut self,
        panels: &PanelSet,
        panel_id: PanelId,
        pointer: PointerPosition,
    ) -> MoveTransition {
        // A settled glide is dropped, leaving the panel drawn at the last
        // preview; a fresh glide starts from there.
        let drawn_at = self
            .drags
            .session(panel_id)
            .map(|session| (session.current().x, session.current().y));
        let transition = self.drags.update(panels, panel_id, pointer);
        if let MoveEffect::DragStarted { geometry } | MoveEffect::Updated { geometry } =
            transition.effect
        {
            let drawn_at = drawn_at.unwrap_or((geometry.x, geometry.y));
            self.smoother
                .track(panel_id, drawn_at, (geometry.x, geometry.y));
        }
        transition
    }

    pub fn end_move(&mut self, panels: &mut PanelSet, panel_id: PanelId) -> MoveTransition {
        let transition = self.drags.end(panels, panel_id);
        self.smoother.release(panel_id);
        transition
    }

    pub fn cancel_move(&mut self, panels: &mut PanelSet, panel_id: PanelId) -> MoveTransition {
        let transition = self.drags.cancel(panels, panel_id, CancelReason::Explicit);
        self.smoother.release(panel_id);
        transition
    }

    /// Keyboard nudge by `steps` grid cells. Refused while any gesture owns
    /// the panel.
    pub fn nudge(
        &mut self,
        panels: &mut PanelSet,
        panel_id: PanelId,
        direction: NudgeDirection,
        steps: u32,
    ) -> MoveTransition {
        if self.resize.active_panel() == Some(panel_id) {
            return self.drags.refuse(panel_id, NoopReason::PanelBusy);
        }
        let settings = self.settings();
        self.drags
            .nudge(panels, panel_id, direction, steps, &settings)
    }

    // --- shared -----------------------------------------------------------

    /// Cancel every live gesture as if each had been cancelled explicitly.
    pub fn pointer_capture_lost(&mut self, panels: &mut PanelSet) -> CaptureLost {
        let resize = self
            .resize
            .is_active()
            .then(|| self.resize.cancel(panels, CancelReason::PointerCaptureLost));
        let moves = self
            .drags
            .cancel_all(panels, CancelReason::PointerCaptureLost);
        self.smoother.clear();
        linerqc_core::debug!(
            resize = resize.is_some(),
            moves = moves.len(),
            "pointer capture lost"
        );
        CaptureLost { resize, moves }
    }

    /// Overlay for the current tick.
    #[must_use]
    pub fn feedback(&self) -> VisualFeedback {
        self.resize.feedback().merged(&self.drags.feedback())
    }

    /// Advance display smoothing by one frame. Returns the number of panels
    /// still gliding.
    pub fn tick(&mut self, dt: Duration) -> usize {
        self.smoother.tick(dt)
    }

    /// Display-only position of `panel_id` while it is gliding.
    #[must_use]
    pub fn display_position(&self, panel_id: PanelId) -> Option<(f64, f64)> {
        self.smoother.position(panel_id)
    }

    /// Label every panel with a roll number, write the labels back, and
    /// return the panels in labeling order.
    pub fn assign_roll_numbers(&self, panels: &mut PanelSet) -> Vec<Panel> {
        let labeled = assign_roll_numbers(panels.as_slice(), &self.config.roll_numbers);
        for panel in &labeled {
            panels.set_roll_number(panel.id, panel.roll_number.clone());
        }
        labeled
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        let config = LayoutConfig::default();
        Self {
            smoother: DisplaySmoother::new(config.glide),
            config,
            bounds: None,
            resize: ResizeMachine::new(),
            drags: DragController::new(),
        }
    }
}
