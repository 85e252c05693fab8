//! Benchmarks for the per-tick snap scan and roll-number assignment.
//!
//! Run with: cargo bench -p linerqc-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use linerqc_layout::resize::resolve_resize;
use linerqc_layout::snap::snap;
use linerqc_layout::{
    ConstraintSet, Geometry, Panel, PanelId, ResizeHandle, RollNumberConfig, SessionSettings,
    SnapMode, assign_roll_numbers,
};
use std::hint::black_box;

/// A `cols` x `rows` field of panels with small seams between them.
fn field(cols: u32, rows: u32) -> Vec<Geometry> {
    (0..rows)
        .flat_map(|r| {
            (0..cols).map(move |c| {
                Geometry::new(f64::from(c) * 125.0, f64::from(r) * 105.0, 120.0, 100.0)
            })
        })
        .collect()
}

fn bench_snap_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap/scan");
    let config = ConstraintSet {
        snap_to_grid: true,
        grid_size: 10.0,
        ..ConstraintSet::default()
    }
    .snap_config();
    let moving = Geometry::new(243.0, 211.0, 120.0, 100.0);

    for n in [10u32, 50, 200] {
        let neighbors = field(n / 10 + 1, 10);
        group.bench_with_input(BenchmarkId::new("move", n), &neighbors, |b, neighbors| {
            b.iter(|| black_box(snap(moving, neighbors, &config, SnapMode::Move)))
        });
        group.bench_with_input(BenchmarkId::new("resize", n), &neighbors, |b, neighbors| {
            b.iter(|| {
                black_box(snap(
                    moving,
                    neighbors,
                    &config,
                    SnapMode::Resize(ResizeHandle::BottomRight),
                ))
            })
        });
    }
    group.finish();
}

fn bench_resize_tick(c: &mut Criterion) {
    let neighbors = field(10, 10);
    let settings = SessionSettings::new(
        ConstraintSet {
            lock_aspect_ratio: true,
            aspect_ratio: 1.2,
            max_width: Some(600.0),
            ..ConstraintSet::default()
        },
        None,
    );
    let start = Geometry::new(240.0, 210.0, 120.0, 100.0);
    c.bench_function("resize/tick_100_neighbors", |b| {
        b.iter(|| {
            black_box(resolve_resize(
                &start,
                ResizeHandle::TopLeft,
                black_box((-37.0, -12.0)),
                &settings,
                &neighbors,
            ))
        })
    });
}

fn bench_roll_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("roll/assign");
    let config = RollNumberConfig::default();
    for (cols, rows) in [(5u32, 4u32), (20, 10)] {
        let panels: Vec<Panel> = field(cols, rows)
            .into_iter()
            .enumerate()
            .rev()
            .map(|(i, g)| Panel::new(PanelId::new(i as u64), g))
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(panels.len()),
            &panels,
            |b, panels| b.iter(|| black_box(assign_roll_numbers(panels, &config))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_snap_scan, bench_resize_tick, bench_roll_numbers);
criterion_main!(benches);
