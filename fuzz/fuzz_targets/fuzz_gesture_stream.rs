#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use linerqc_layout::{
    Bounds, ConstraintSet, Geometry, LayoutConfig, LayoutEngine, NudgeDirection, Panel, PanelId,
    PanelSet, PointerPosition, ResizeHandle, ResizeState,
};
use std::time::Duration;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 800.0;

#[derive(Debug, Arbitrary)]
struct Input {
    panels: Vec<(u8, u8, u8, u8)>,
    grid: Option<u8>,
    lock_aspect: bool,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    StartResize { panel: u8, handle: u8, x: i16, y: i16 },
    UpdateResize { x: i16, y: i16 },
    EndResize,
    CancelResize,
    StartMove { panel: u8, x: i16, y: i16 },
    UpdateMove { panel: u8, x: i16, y: i16 },
    EndMove { panel: u8 },
    CancelMove { panel: u8 },
    Nudge { panel: u8, dir: u8, steps: u8 },
    CaptureLost,
    Tick { ms: u8 },
}

fn panel_id(raw: u8) -> PanelId {
    PanelId::new(u64::from(raw % 8))
}

fn pointer(x: i16, y: i16) -> PointerPosition {
    PointerPosition::new(f64::from(x) / 4.0, f64::from(y) / 4.0)
}

fuzz_target!(|input: Input| {
    // Every panel starts inside the container.
    let mut panels: PanelSet = input
        .panels
        .iter()
        .take(8)
        .enumerate()
        .map(|(i, &(x, y, w, h))| {
            let width = f64::from(w).max(1.0);
            let height = f64::from(h).max(1.0);
            let x = (f64::from(x) * 4.0).min(WIDTH - width);
            let y = (f64::from(y) * 3.0).min(HEIGHT - height);
            Panel::new(PanelId::new(i as u64), Geometry::new(x, y, width, height))
        })
        .collect();

    let constraints = ConstraintSet {
        snap_to_grid: input.grid.is_some_and(|g| g > 0),
        grid_size: input.grid.map_or(10.0, |g| f64::from(g.max(1))),
        lock_aspect_ratio: input.lock_aspect,
        aspect_ratio: 1.5,
        ..ConstraintSet::default()
    };
    let config = LayoutConfig {
        constraints,
        ..LayoutConfig::default()
    };
    let Ok(engine) = LayoutEngine::new(config) else {
        return;
    };
    let bounds = Bounds::new(WIDTH, HEIGHT);
    let mut engine = engine.with_bounds(Some(bounds));

    for op in input.ops.iter().take(256) {
        match *op {
            Op::StartResize { panel, handle, x, y } => {
                let handle = ResizeHandle::ALL[usize::from(handle) % ResizeHandle::ALL.len()];
                engine.start_resize(&mut panels, handle, panel_id(panel), pointer(x, y));
            }
            Op::UpdateResize { x, y } => {
                engine.update_resize(&panels, pointer(x, y));
            }
            Op::EndResize => {
                engine.end_resize(&mut panels);
                assert_eq!(engine.resize_state(), ResizeState::Idle);
            }
            Op::CancelResize => {
                engine.cancel_resize(&mut panels);
                assert_eq!(engine.resize_state(), ResizeState::Idle);
            }
            Op::StartMove { panel, x, y } => {
                engine.start_move(&mut panels, panel_id(panel), pointer(x, y));
            }
            Op::UpdateMove { panel, x, y } => {
                engine.update_move(&panels, panel_id(panel), pointer(x, y));
            }
            Op::EndMove { panel } => {
                engine.end_move(&mut panels, panel_id(panel));
            }
            Op::CancelMove { panel } => {
                engine.cancel_move(&mut panels, panel_id(panel));
            }
            Op::Nudge { panel, dir, steps } => {
                let direction = match dir % 4 {
                    0 => NudgeDirection::Up,
                    1 => NudgeDirection::Down,
                    2 => NudgeDirection::Left,
                    _ => NudgeDirection::Right,
                };
                engine.nudge(&mut panels, panel_id(panel), direction, u32::from(steps % 16));
            }
            Op::CaptureLost => {
                engine.pointer_capture_lost(&mut panels);
                assert_eq!(engine.resize_state(), ResizeState::Idle);
                assert!(engine.feedback().is_empty());
            }
            Op::Tick { ms } => {
                engine.tick(Duration::from_millis(u64::from(ms)));
            }
        }

        // Committed geometry is always valid and contained.
        for panel in panels.iter() {
            assert!(panel.geometry.is_valid(), "invalid {:?}", panel.geometry);
            assert!(
                bounds.contains(&panel.geometry),
                "{:?} escaped {bounds:?}",
                panel.geometry
            );
        }
    }

    engine.pointer_capture_lost(&mut panels);
    assert!(engine.feedback().is_empty());
});
