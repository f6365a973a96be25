use rand::rngs::SmallRng;
use rand::SeedableRng;
use wobbly::{
    Config, EdgeMask, Model, NoOpStepObserver, Rect, StepObserver, Vec2, Workspace, NODE_COUNT,
};

fn work_area() -> Rect<f32> {
    Rect::new(0.0, 0.0, 1024.0, 768.0)
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn aggregate_velocity(model: &Model<f32>) -> f32 {
    model.nodes().iter().map(|n| n.velocity.abs_sum()).sum()
}

#[test]
fn all_pinned_model_never_moves() {
    let mut model = Model::new(Rect::new(100.0, 100.0, 90.0, 90.0), false, EdgeMask::NONE);
    for i in 0..NODE_COUNT {
        model.node_mut(i).pinned = true;
    }
    let before = model.positions();

    let config = Config::new();
    let ws = Workspace::<f32>::empty(work_area());
    let mut rng = rng();
    let mut result = Default::default();
    for _ in 0..200 {
        result = model.step(16.0, &ws, &config, &mut rng, &mut NoOpStepObserver);
    }

    assert_eq!(model.positions(), before);
    assert!(!result.residual_force);
    assert!(!result.residual_velocity);
}

#[test]
fn rest_state_is_idempotent() {
    // A freshly built, ungrabbed model has every spring at rest length;
    // with zero external stimulus nothing should drift.
    let mut model = Model::new(Rect::new(200.0, 150.0, 120.0, 90.0), false, EdgeMask::NONE);
    let before = model.positions();

    let config = Config::new();
    let ws = Workspace::<f32>::empty(work_area());
    let mut rng = rng();
    for _ in 0..500 {
        model.step(16.0, &ws, &config, &mut rng, &mut NoOpStepObserver);
    }

    for (a, b) in before.iter().zip(model.positions().iter()) {
        assert!((a.x - b.x).abs() < 1e-3, "{} vs {}", a.x, b.x);
        assert!((a.y - b.y).abs() < 1e-3, "{} vs {}", a.y, b.y);
    }
}

#[test]
fn anchor_displacement_rises_then_decays() {
    let mut model = Model::new(Rect::new(200.0, 150.0, 90.0, 90.0), false, EdgeMask::NONE);
    let anchor = model.anchor().unwrap();
    let pos = model.node(anchor).position;
    model.node_mut(anchor).position = pos + Vec2::new(40.0, 0.0);

    let config = Config::new();
    let ws = Workspace::<f32>::empty(work_area());
    let mut rng = rng();

    let mut peaks = [0.0f32; 3];
    let mut last = Default::default();
    for step in 0..300 {
        last = model.step(16.0, &ws, &config, &mut rng, &mut NoOpStepObserver);
        let v = aggregate_velocity(&model);
        let window = match step {
            0..=49 => 0,
            100..=149 => 1,
            250..=299 => 2,
            _ => continue,
        };
        peaks[window] = peaks[window].max(v);
    }

    assert!(peaks[0] > 0.5, "velocity never rose: {}", peaks[0]);
    assert!(peaks[1] < peaks[0], "envelope not decaying: {:?}", peaks);
    assert!(peaks[2] < peaks[1], "envelope not decaying: {:?}", peaks);
    assert!(!last.residual_velocity, "residual velocity never cleared");
}

struct SubStepCounter {
    sub_steps: usize,
}

impl StepObserver for SubStepCounter {
    fn on_sub_step(&mut self) {
        self.sub_steps += 1;
    }
}

#[test]
fn short_frames_bank_into_the_quantum() {
    let mut model = Model::new(Rect::new(10.0, 10.0, 90.0, 90.0), false, EdgeMask::NONE);
    let config = Config::new();
    let ws = Workspace::<f32>::empty(work_area());
    let mut rng = rng();
    let mut counter = SubStepCounter { sub_steps: 0 };

    // 10 ms is below the 15 ms quantum: no sub-step runs yet.
    model.step(10.0, &ws, &config, &mut rng, &mut counter);
    assert_eq!(counter.sub_steps, 0);

    // The banked remainder plus another 10 ms crosses the quantum once.
    model.step(10.0, &ws, &config, &mut rng, &mut counter);
    assert_eq!(counter.sub_steps, 1);

    // A long frame runs several sub-steps at once.
    model.step(46.0, &ws, &config, &mut rng, &mut counter);
    assert_eq!(counter.sub_steps, 1 + 3);
}

#[test]
fn zero_substep_frames_report_previous_activity() {
    let mut model = Model::new(Rect::new(10.0, 10.0, 90.0, 90.0), false, EdgeMask::NONE);
    let config = Config::new();
    let ws = Workspace::<f32>::empty(work_area());
    let mut rng = rng();

    // A fresh rebuild marks the model active, so sub-quantum frames keep
    // the host animating until a real sub-step has run.
    let result = model.step(5.0, &ws, &config, &mut rng, &mut NoOpStepObserver);
    assert!(result.is_active());
}

#[test]
fn friction_scales_settle_time() {
    let settle_steps = |friction: f32| -> usize {
        let mut model = Model::new(Rect::new(200.0, 150.0, 90.0, 90.0), false, EdgeMask::NONE);
        let anchor = model.anchor().unwrap();
        let pos = model.node(anchor).position;
        model.node_mut(anchor).position = pos + Vec2::new(40.0, 0.0);

        let config = Config::new().with_friction(friction);
        let ws = Workspace::<f32>::empty(work_area());
        let mut rng = rng();
        for step in 0..2000 {
            let result = model.step(16.0, &ws, &config, &mut rng, &mut NoOpStepObserver);
            if step > 0 && !result.is_active() {
                return step;
            }
        }
        2000
    };

    let heavy = settle_steps(8.0);
    let light = settle_steps(0.5);
    assert!(
        heavy < light,
        "higher friction should settle sooner: {} vs {}",
        heavy,
        light
    );
}
