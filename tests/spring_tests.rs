use wobbly::{Node, Spring, Vec2};

#[test]
fn forces_are_exact_negations() {
    // Antisymmetry must hold for arbitrary positions, not just rest states.
    let states = [
        (Vec2::new(0.0f32, 0.0), Vec2::new(30.0, 0.0)),
        (Vec2::new(-5.0, 12.0), Vec2::new(40.0, -3.0)),
        (Vec2::new(100.0, 100.0), Vec2::new(90.0, 110.0)),
    ];
    for (a, b) in states {
        let mut nodes = [Node::at(a), Node::at(b)];
        let spring = Spring::new(0, 1, Vec2::new(30.0, 0.0));
        spring.exert(8.0, &mut nodes);
        assert_eq!(nodes[0].force.x, -nodes[1].force.x);
        assert_eq!(nodes[0].force.y, -nodes[1].force.y);
    }
}

#[test]
fn rest_offset_produces_no_force() {
    let mut nodes = [
        Node::at(Vec2::new(7.0f32, -2.0)),
        Node::at(Vec2::new(7.0, 28.0)),
    ];
    let spring = Spring::new(0, 1, Vec2::new(0.0, 30.0));
    spring.exert(8.0, &mut nodes);
    assert_eq!(nodes[0].force, Vec2::zero());
    assert_eq!(nodes[1].force, Vec2::zero());
}

#[test]
fn force_is_half_the_deviation_times_k() {
    let mut nodes = [
        Node::at(Vec2::new(0.0f32, 0.0)),
        Node::at(Vec2::new(36.0, 8.0)),
    ];
    let spring = Spring::new(0, 1, Vec2::new(30.0, 0.0));
    spring.exert(4.0, &mut nodes);
    // Deviation (6, 8); half of it times k = (12, 16).
    assert!((nodes[0].force.x - 12.0).abs() < 1e-5);
    assert!((nodes[0].force.y - 16.0).abs() < 1e-5);
    assert!((nodes[1].force.x + 12.0).abs() < 1e-5);
    assert!((nodes[1].force.y + 16.0).abs() < 1e-5);
}

#[test]
fn forces_accumulate_across_springs() {
    // A node shared by two springs receives the sum of both.
    let mut nodes = [
        Node::at(Vec2::new(0.0f32, 0.0)),
        Node::at(Vec2::new(40.0, 0.0)),
        Node::at(Vec2::new(0.0, 40.0)),
    ];
    Spring::new(0, 1, Vec2::new(30.0, 0.0)).exert(2.0, &mut nodes);
    Spring::new(0, 2, Vec2::new(0.0, 30.0)).exert(2.0, &mut nodes);
    assert!((nodes[0].force.x - 10.0).abs() < 1e-5);
    assert!((nodes[0].force.y - 10.0).abs() < 1e-5);
}

#[test]
fn pinned_endpoint_swallows_its_half() {
    let mut nodes = [
        Node::at(Vec2::new(0.0f32, 0.0)),
        Node::at(Vec2::new(40.0, 0.0)),
    ];
    nodes[0].pinned = true;
    let spring = Spring::new(0, 1, Vec2::new(30.0, 0.0));
    spring.exert(8.0, &mut nodes);
    assert_eq!(nodes[0].force, Vec2::zero());
    assert!(nodes[1].force.x < 0.0);
}
