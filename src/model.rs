//! The per-window spring-mass grid: nodes, springs, anchoring, and
//! snap bookkeeping.

use crate::edge::{Direction, EdgeMask};
use crate::float::Float;
use crate::geometry::Rect;
use crate::integrator::StepResult;
use crate::node::Node;
use crate::spring::Spring;
use crate::vec::{Axis, Vec2};
use alloc::vec::Vec as AllocVec;

/// Grid points per row.
pub const GRID_WIDTH: usize = 4;
/// Grid points per column.
pub const GRID_HEIGHT: usize = 4;
/// Total grid points per window.
pub const NODE_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;
/// Upper bound on springs per window. Structural construction uses 24.
pub const MAX_SPRINGS: usize = NODE_COUNT * 2;

/// Fraction of a spring's rest offset seeded as outward velocity on the far
/// endpoint when a grab is released.
const RELEASE_IMPULSE: f32 = 0.05;

/// The complete deformation state of one window: a fixed 4x4 grid of point
/// masses joined by structural springs, plus anchoring, scaling, and
/// magnetic-snap bookkeeping.
///
/// A model is rebuilt from the window's current geometry whenever that
/// geometry changes; it carries no state that outlives the window.
#[derive(Clone, Debug)]
pub struct Model<F: Float> {
    nodes: [Node<F>; NODE_COUNT],
    springs: AllocVec<Spring<F>>,
    anchor: Option<usize>,
    rect: Rect<F>,
    maximized: bool,
    grab: Option<Vec2<F>>,
    edge_mask: EdgeMask,
    snap_count: [u32; 4],
    scale: Vec2<F>,
    scale_origin: Vec2<F>,
    transformed: bool,
    top_left: Vec2<F>,
    bottom_right: Vec2<F>,
    pub(crate) remainder: F,
    pub(crate) activity: StepResult,
}

impl<F: Float> Model<F> {
    /// Build a model spanning `rect`. `edge_mask` is the window-level snap
    /// eligibility (empty for windows that never snap); `maximized` selects
    /// corner anchoring over the single middle anchor.
    pub fn new(rect: Rect<F>, maximized: bool, edge_mask: EdgeMask) -> Self {
        let mut model = Model {
            nodes: [Node::default(); NODE_COUNT],
            springs: AllocVec::with_capacity(MAX_SPRINGS),
            anchor: None,
            rect,
            maximized,
            grab: None,
            edge_mask,
            snap_count: [0; 4],
            scale: Vec2::new(F::one(), F::one()),
            scale_origin: Vec2::zero(),
            transformed: false,
            top_left: Vec2::zero(),
            bottom_right: Vec2::zero(),
            remainder: F::zero(),
            activity: StepResult::settled(),
        };
        model.rebuild(rect);
        model
    }

    /// Row-major node index for a grid coordinate.
    pub fn index(col: usize, row: usize) -> usize {
        row * GRID_WIDTH + col
    }

    /// The rest position of grid point `(col, row)` within `rect`.
    fn rest_position(rect: Rect<F>, col: usize, row: usize) -> Vec2<F> {
        let fx = F::from_f32(col as f32) / F::from_f32((GRID_WIDTH - 1) as f32);
        let fy = F::from_f32(row as f32) / F::from_f32((GRID_HEIGHT - 1) as f32);
        Vec2::new(rect.x + rect.width * fx, rect.y + rect.height * fy)
    }

    /// Reinitialize every node and spring to span `rect` evenly, then
    /// re-anchor: four pinned corners while maximized, otherwise the node
    /// nearest an active grab, otherwise the middle anchor.
    pub fn rebuild(&mut self, rect: Rect<F>) {
        self.rect = rect;

        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                self.nodes[Self::index(col, row)] = Node::at(Self::rest_position(rect, col, row));
            }
        }

        self.springs.clear();
        let hpad = rect.width / F::from_f32((GRID_WIDTH - 1) as f32);
        let vpad = rect.height / F::from_f32((GRID_HEIGHT - 1) as f32);
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                let i = Self::index(col, row);
                if col > 0 {
                    self.springs.push(Spring::new(i - 1, i, Vec2::new(hpad, F::zero())));
                }
                if row > 0 {
                    self.springs.push(Spring::new(i - GRID_WIDTH, i, Vec2::new(F::zero(), vpad)));
                }
            }
        }
        debug_assert!(self.springs.len() <= MAX_SPRINGS);

        self.snap_count = [0; 4];
        self.anchor = None;

        if self.maximized {
            self.pin_corners();
        } else if let Some(pointer) = self.grab {
            self.pin_anchor(self.nearest_node(pointer));
        } else {
            self.pin_anchor(Self::index((GRID_WIDTH - 1) / 2, (GRID_HEIGHT - 1) / 2));
        }

        self.recalc_bounds();
        self.mark_active();
    }

    /// React to a window resize. A maximize-state flip switches the anchor
    /// mode; an active grab keeps its anchor, re-selected against the
    /// current pointer position by the rebuild.
    pub fn resize(&mut self, rect: Rect<F>, maximized: bool) {
        self.maximized = maximized;
        self.rebuild(rect);
    }

    fn pin_anchor(&mut self, index: usize) {
        if let Some(old) = self.anchor.take() {
            self.nodes[old].pinned = false;
        }
        self.nodes[index].pinned = true;
        self.anchor = Some(index);
    }

    fn pin_corners(&mut self) {
        for &(col, row) in &[(0, 0), (GRID_WIDTH - 1, 0), (0, GRID_HEIGHT - 1), (GRID_WIDTH - 1, GRID_HEIGHT - 1)] {
            self.nodes[Self::index(col, row)].pinned = true;
        }
    }

    /// Index of the node nearest to `point`.
    pub fn nearest_node(&self, point: Vec2<F>) -> usize {
        let mut nearest = 0;
        let mut nearest_dist = self.nodes[0].distance_sq_to(point);
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            let d = node.distance_sq_to(point);
            if d < nearest_dist {
                nearest_dist = d;
                nearest = i;
            }
        }
        nearest
    }

    /// Pin the node nearest the pointer as the grab anchor. While
    /// maximized the corner anchors already hold the window; only the
    /// pointer position is recorded.
    pub fn begin_grab(&mut self, pointer: Vec2<F>) {
        self.grab = Some(pointer);
        if !self.maximized {
            self.pin_anchor(self.nearest_node(pointer));
        }
        self.mark_active();
    }

    /// Release the grab anchor and flick the sheet: every spring touching
    /// the former anchor seeds an outward velocity impulse on its far
    /// endpoint, proportional to the spring's rest offset.
    pub fn end_grab(&mut self) {
        self.grab = None;
        if let Some(a) = self.anchor.take() {
            self.nodes[a].pinned = false;
            let k = F::from_f32(RELEASE_IMPULSE);
            for i in 0..self.springs.len() {
                let spring = self.springs[i];
                if spring.a == a {
                    let far = &mut self.nodes[spring.b];
                    far.velocity = far.velocity + spring.offset.scale(k);
                } else if spring.b == a {
                    let far = &mut self.nodes[spring.a];
                    far.velocity = far.velocity - spring.offset.scale(k);
                }
            }
        }
        self.mark_active();
    }

    /// Move the window by `(dx, dy)`. While grabbed only the anchor (or,
    /// maximized, the pinned corners) moves and the spring network drags
    /// the rest behind; otherwise every node translates rigidly with no
    /// lag, as for a workspace switch.
    pub fn move_by(&mut self, delta: Vec2<F>, grabbed: bool) {
        self.rect.x += delta.x;
        self.rect.y += delta.y;
        if grabbed {
            if let Some(pointer) = self.grab.as_mut() {
                *pointer = *pointer + delta;
            }
            if self.maximized {
                for node in self.nodes.iter_mut() {
                    if node.pinned {
                        node.position = node.position + delta;
                    }
                }
            } else if let Some(a) = self.anchor {
                self.nodes[a].position = self.nodes[a].position + delta;
            }
            self.mark_active();
        } else {
            for node in self.nodes.iter_mut() {
                node.position = node.position + delta;
            }
        }
        self.recalc_bounds();
    }

    /// Recompute every node's permitted snap directions.
    ///
    /// Boundary rows and columns receive the bit of the side they lie on
    /// (corners two bits), interior nodes none. A side opposite an actively
    /// snapped side is suppressed so the window cannot pin itself between
    /// two opposing boundaries. Directions a node loses release their snap
    /// on the spot, without the escape-velocity test.
    pub fn refresh_node_masks(&mut self, snapping_enabled: bool) {
        let mut mask = if snapping_enabled { self.edge_mask } else { EdgeMask::NONE };

        if self.snap_count[Direction::North.index()] > 0 {
            mask = mask.without(EdgeMask::SOUTH);
        } else if self.snap_count[Direction::South.index()] > 0 {
            mask = mask.without(EdgeMask::NORTH);
        }
        if self.snap_count[Direction::West.index()] > 0 {
            mask = mask.without(EdgeMask::EAST);
        } else if self.snap_count[Direction::East.index()] > 0 {
            mask = mask.without(EdgeMask::WEST);
        }

        for row in 0..GRID_HEIGHT {
            let row_mask = if row == 0 {
                mask & EdgeMask::NORTH
            } else if row == GRID_HEIGHT - 1 {
                mask & EdgeMask::SOUTH
            } else {
                EdgeMask::NONE
            };

            for col in 0..GRID_WIDTH {
                let mut node_mask = row_mask;
                if col == 0 {
                    node_mask = node_mask | (mask & EdgeMask::WEST);
                } else if col == GRID_WIDTH - 1 {
                    node_mask = node_mask | (mask & EdgeMask::EAST);
                }

                let node = &mut self.nodes[Self::index(col, row)];
                for axis in [Axis::Horizontal, Axis::Vertical] {
                    if let Some(dir) = node.edge_mask.direction_on(axis) {
                        if !node_mask.contains(dir.mask()) && node.edge(axis).snapped {
                            node.edge_mut(axis).snapped = false;
                            self.snap_count[dir.index()] -= 1;
                        }
                    }
                }
                node.edge_mask = node_mask;
            }
        }
    }

    /// Drop every active snap and edge candidate without escape checks.
    pub fn release_all_snaps(&mut self) {
        for node in self.nodes.iter_mut() {
            node.clear_edges();
        }
        self.snap_count = [0; 4];
    }

    /// Total number of edges currently snapped across the model.
    pub fn snapped_total(&self) -> u32 {
        self.snap_count.iter().sum()
    }

    /// Number of edges snapped in one direction.
    pub fn snapped_in(&self, direction: Direction) -> u32 {
        self.snap_count[direction.index()]
    }

    pub(crate) fn note_snap(&mut self, direction: Direction) {
        self.snap_count[direction.index()] += 1;
    }

    pub(crate) fn note_release(&mut self, direction: Direction) {
        let count = &mut self.snap_count[direction.index()];
        debug_assert!(*count > 0);
        *count = count.saturating_sub(1);
    }

    /// Recompute the bounding box as the min/max of all node positions.
    pub fn recalc_bounds(&mut self) {
        let mut tl = self.nodes[0].position;
        let mut br = self.nodes[0].position;
        for node in &self.nodes[1..] {
            tl.x = tl.x.min(node.position.x);
            tl.y = tl.y.min(node.position.y);
            br.x = br.x.max(node.position.x);
            br.y = br.y.max(node.position.y);
        }
        self.top_left = tl;
        self.bottom_right = br;
    }

    /// The current deformed bounding box.
    pub fn bounds(&self) -> Rect<F> {
        Rect::new(
            self.top_left.x,
            self.top_left.y,
            self.bottom_right.x - self.top_left.x,
            self.bottom_right.y - self.top_left.y,
        )
    }

    /// Scale the rendered surface about `origin`. The simulation itself
    /// always runs in unscaled window coordinates; only mesh generation
    /// applies the transform.
    pub fn set_scale(&mut self, scale: Vec2<F>, origin: Vec2<F>) {
        self.scale = scale;
        self.scale_origin = origin;
        self.transformed = !(scale.x == F::one() && scale.y == F::one());
    }

    pub fn clear_scale(&mut self) {
        self.scale = Vec2::new(F::one(), F::one());
        self.transformed = false;
    }

    pub(crate) fn mark_active(&mut self) {
        self.activity = StepResult::active();
    }

    pub fn rect(&self) -> Rect<F> { self.rect }
    pub fn maximized(&self) -> bool { self.maximized }
    pub fn grabbed(&self) -> bool { self.grab.is_some() }
    pub fn anchor(&self) -> Option<usize> { self.anchor }
    pub fn edge_mask(&self) -> EdgeMask { self.edge_mask }
    pub fn scale(&self) -> Vec2<F> { self.scale }
    pub fn scale_origin(&self) -> Vec2<F> { self.scale_origin }
    pub fn transformed(&self) -> bool { self.transformed }

    pub fn node(&self, index: usize) -> &Node<F> { &self.nodes[index] }
    pub fn node_mut(&mut self, index: usize) -> &mut Node<F> { &mut self.nodes[index] }
    pub fn node_at(&self, col: usize, row: usize) -> &Node<F> { &self.nodes[Self::index(col, row)] }
    pub fn nodes(&self) -> &[Node<F>; NODE_COUNT] { &self.nodes }
    pub fn springs(&self) -> &[Spring<F>] { &self.springs }
    pub(crate) fn springs_and_nodes_mut(&mut self) -> (&[Spring<F>], &mut [Node<F>; NODE_COUNT]) {
        (&self.springs, &mut self.nodes)
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    /// Nodes currently snapped in any direction.
    pub fn any_snapped(&self) -> bool {
        self.snapped_total() > 0
    }
}

impl<F: Float> Model<F> {
    /// Sum of per-direction snap counters, split by direction, mostly
    /// useful for diagnostics.
    pub fn snap_counts(&self) -> [u32; 4] {
        self.snap_count
    }
}
