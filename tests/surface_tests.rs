use rand::rngs::SmallRng;
use rand::SeedableRng;
use wobbly::surface;
use wobbly::{
    Config, EdgeMask, Model, NoOpStepObserver, Rect, Vec2, Workspace, GRID_HEIGHT, GRID_WIDTH,
};

fn deformed_model() -> Model<f32> {
    // Wobble a grabbed model for a few frames so the grid is genuinely
    // bent when the surface properties are checked.
    let mut model = Model::new(Rect::new(100.0, 100.0, 120.0, 90.0), false, EdgeMask::NONE);
    model.begin_grab(Vec2::new(160.0, 145.0));
    model.move_by(Vec2::new(35.0, -20.0), true);

    let config = Config::new();
    let ws = Workspace::<f32>::empty(Rect::new(0.0, 0.0, 1024.0, 768.0));
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..5 {
        model.step(16.0, &ws, &config, &mut rng, &mut NoOpStepObserver);
    }
    model
}

#[test]
fn corner_parameters_reproduce_corner_nodes() {
    let model = deformed_model();
    let cases = [
        (0.0, 0.0, 0, 0),
        (1.0, 0.0, GRID_WIDTH - 1, 0),
        (0.0, 1.0, 0, GRID_HEIGHT - 1),
        (1.0, 1.0, GRID_WIDTH - 1, GRID_HEIGHT - 1),
    ];
    for (u, v, col, row) in cases {
        let p = surface::eval(&model, u, v);
        let corner = model.node_at(col, row).position;
        assert!(
            (p.x - corner.x).abs() < 1e-3 && (p.y - corner.y).abs() < 1e-3,
            "({}, {}): evaluated ({}, {}), corner ({}, {})",
            u,
            v,
            p.x,
            p.y,
            corner.x,
            corner.y
        );
    }
}

#[test]
fn evaluation_stays_inside_the_control_hull() {
    // Bernstein weights are a convex combination, so every sample lies in
    // the axis-aligned hull of the sixteen control points.
    let model = deformed_model();
    let bounds = {
        let mut m = model.clone();
        m.recalc_bounds();
        m.bounds()
    };
    let eps = 1e-3;
    let mut t = 0.0f32;
    while t <= 1.0 {
        let mut s = 0.0f32;
        while s <= 1.0 {
            let p = surface::eval(&model, s, t);
            assert!(p.x >= bounds.x - eps && p.x <= bounds.right() + eps);
            assert!(p.y >= bounds.y - eps && p.y <= bounds.bottom() + eps);
            s += 0.125;
        }
        t += 0.125;
    }
}

#[test]
fn undeformed_patch_is_the_window_rect() {
    let rect: Rect<f32> = Rect::new(40.0, 60.0, 200.0, 100.0);
    let model = Model::new(rect, false, EdgeMask::NONE);
    for (u, v) in [(0.5, 0.5), (0.1, 0.9), (0.75, 0.25)] {
        let p = surface::eval(&model, u, v);
        assert!((p.x - (rect.x + rect.width * u)).abs() < 1e-2);
        assert!((p.y - (rect.y + rect.height * v)).abs() < 1e-2);
    }
}
