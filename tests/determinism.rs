use rand::rngs::SmallRng;
use rand::SeedableRng;
use wobbly::{Config, Engine, Rect, Vec2, WindowId, WindowKind, Workspace};

const SCREEN: Rect<f32> = Rect { x: 0.0, y: 0.0, width: 1024.0, height: 768.0 };

/// Run a scenario that exercises springs, grabs, and the randomly damped
/// multi-snap release path, and return the final node positions.
fn run(seed: u64) -> Vec<Vec2<f32>> {
    let mut engine: Engine<f32> = Engine::with_rng(Config::new(), SmallRng::seed_from_u64(seed));
    let id = WindowId(1);
    // Parked in the screen corner: both the west column and north row
    // snap, so escape thresholds take the random damping path.
    engine
        .reset(id, Rect::new(5.0, 5.0, 90.0, 90.0), SCREEN, WindowKind::Normal, false)
        .unwrap();
    engine.set_snapping(true);

    let ws = Workspace::<f32>::empty(SCREEN);
    engine.step(id, 16.0, &ws).unwrap();

    engine.grab_begin(id, Vec2::new(50.0, 50.0));
    for _ in 0..120 {
        engine.moved(id, 2.0, 1.0, true);
        engine.step(id, 16.0, &ws).unwrap();
    }
    engine.grab_end(id);
    for _ in 0..60 {
        engine.step(id, 16.0, &ws).unwrap();
    }

    engine.model(id).unwrap().positions()
}

#[test]
fn same_seed_reproduces_the_trajectory_exactly() {
    let first = run(7);
    for _ in 0..4 {
        let again = run(7);
        for (a, b) in first.iter().zip(again.iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
        }
    }
}

#[test]
fn simulation_without_snapping_is_seed_independent() {
    // The random source only feeds the multi-snap escape damping; with
    // snapping disabled two differently seeded engines agree bit for bit.
    let run_plain = |seed: u64| -> Vec<Vec2<f32>> {
        let mut engine: Engine<f32> =
            Engine::with_rng(Config::new(), SmallRng::seed_from_u64(seed));
        let id = WindowId(1);
        engine
            .reset(id, Rect::new(200.0, 200.0, 100.0, 100.0), SCREEN, WindowKind::Normal, false)
            .unwrap();
        engine.grab_begin(id, Vec2::new(250.0, 250.0));
        engine.moved(id, 40.0, -20.0, true);
        let ws = Workspace::<f32>::empty(SCREEN);
        for _ in 0..100 {
            engine.step(id, 16.0, &ws).unwrap();
        }
        engine.model(id).unwrap().positions()
    };

    let a = run_plain(1);
    let b = run_plain(2);
    for (a, b) in a.iter().zip(b.iter()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y);
    }
}
