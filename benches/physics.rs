//! Benchmarks for the wobbly deformation engine.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wobbly::*;

const SCREEN: Rect<f32> = Rect { x: 0.0, y: 0.0, width: 2560.0, height: 1440.0 };

fn bench_model_step(c: &mut Criterion) {
    c.bench_function("grabbed_window_120_frames", |b| {
        b.iter(|| {
            let mut engine: Engine<f32> =
                Engine::with_rng(Config::new(), SmallRng::seed_from_u64(1));
            let id = WindowId(1);
            engine
                .reset(id, Rect::new(100.0, 100.0, 640.0, 480.0), SCREEN, WindowKind::Normal, false)
                .unwrap();
            engine.grab_begin(id, Vec2::new(420.0, 340.0));
            engine.moved(id, 80.0, 40.0, true);
            let ws = Workspace::<f32>::empty(SCREEN);
            for _ in 0..120 {
                engine.step(id, 16.0, &ws).unwrap();
            }
            engine.model(id).unwrap().positions()
        });
    });
}

fn bench_step_with_snapping(c: &mut Criterion) {
    c.bench_function("snapping_window_120_frames", |b| {
        b.iter(|| {
            let mut engine: Engine<f32> =
                Engine::with_rng(Config::new(), SmallRng::seed_from_u64(1));
            let id = WindowId(1);
            engine
                .reset(id, Rect::new(5.0, 5.0, 400.0, 300.0), SCREEN, WindowKind::Normal, false)
                .unwrap();
            engine.set_snapping(true);
            let neighbors = [
                Neighbor::new(Rect::new(500.0, 0.0, 400.0, 900.0), NeighborKind::Normal),
                Neighbor::new(Rect::new(0.0, 1400.0, 2560.0, 40.0), NeighborKind::Panel),
            ];
            let ws = Workspace::new(SCREEN, &neighbors);
            engine.grab_begin(id, Vec2::new(200.0, 150.0));
            for _ in 0..120 {
                engine.moved(id, 2.0, 1.0, true);
                engine.step(id, 16.0, &ws).unwrap();
            }
            engine.model(id).unwrap().snapped_total()
        });
    });
}

fn bench_tessellation(c: &mut Criterion) {
    c.bench_function("tessellate_640x480_8px_cells", |b| {
        let mut engine: Engine<f32> = Engine::with_rng(Config::new(), SmallRng::seed_from_u64(1));
        let id = WindowId(1);
        let rect = Rect::new(100.0, 100.0, 640.0, 480.0);
        engine.reset(id, rect, SCREEN, WindowKind::Normal, false).unwrap();
        engine.grab_begin(id, Vec2::new(420.0, 340.0));
        engine.moved(id, 80.0, 40.0, true);
        let ws = Workspace::<f32>::empty(SCREEN);
        engine.step(id, 16.0, &ws).unwrap();

        let layers = [TextureTransform::identity()];
        let mut mesh = Mesh::new();
        b.iter(|| {
            engine
                .tessellate(id, &[rect], &layers, 8.0, 8, &mut mesh)
                .unwrap();
            mesh.vertex_count()
        });
    });
}

criterion_group!(benches, bench_model_step, bench_step_with_snapping, bench_tessellation);
criterion_main!(benches);
