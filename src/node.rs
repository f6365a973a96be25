//! Grid point masses for the deformation lattice.

use crate::edge::{Edge, EdgeMask};
use crate::float::Float;
use crate::vec::{Axis, Vec2};

/// Mass of every grid point.
pub const MASS: f32 = 15.0;

/// One point mass of a window's 4x4 deformation grid.
///
/// A pinned node never integrates: it is the grab anchor, or one of the
/// four corner anchors while the window is maximized. The two edge slots
/// track the nearest magnetic boundary per motion axis; `vertical_edge`
/// belongs to a vertical boundary line and therefore constrains horizontal
/// motion.
#[derive(Copy, Clone, Debug)]
pub struct Node<F: Float> {
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    pub force: Vec2<F>,
    pub pinned: bool,
    pub edge_mask: EdgeMask,
    pub vertical_edge: Edge<F>,
    pub horizontal_edge: Edge<F>,
}

impl<F: Float> Default for Node<F> {
    fn default() -> Self {
        Node {
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            pinned: false,
            edge_mask: EdgeMask::NONE,
            vertical_edge: Edge::default(),
            horizontal_edge: Edge::default(),
        }
    }
}

impl<F: Float> Node<F> {
    /// A node at rest at `position`.
    pub fn at(position: Vec2<F>) -> Self {
        Node { position, ..Node::default() }
    }

    /// Accumulate an external force; pinned nodes swallow it.
    pub fn apply_force(&mut self, force: Vec2<F>) {
        if !self.pinned {
            self.force = self.force + force;
        }
    }

    pub fn distance_sq_to(&self, point: Vec2<F>) -> F {
        self.position.distance_sq(point)
    }

    /// The edge slot constraining motion on `axis`.
    pub fn edge(&self, axis: Axis) -> &Edge<F> {
        match axis {
            Axis::Horizontal => &self.vertical_edge,
            Axis::Vertical => &self.horizontal_edge,
        }
    }

    pub fn edge_mut(&mut self, axis: Axis) -> &mut Edge<F> {
        match axis {
            Axis::Horizontal => &mut self.vertical_edge,
            Axis::Vertical => &mut self.horizontal_edge,
        }
    }

    /// Forget both edge candidates and any active snap.
    pub fn clear_edges(&mut self) {
        self.vertical_edge = Edge::default();
        self.horizontal_edge = Edge::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_node_swallows_force() {
        let mut node: Node<f32> = Node::at(Vec2::new(1.0, 2.0));
        node.pinned = true;
        node.apply_force(Vec2::new(100.0, 100.0));
        assert_eq!(node.force, Vec2::zero());
    }

    #[test]
    fn force_accumulates() {
        let mut node: Node<f32> = Node::default();
        node.apply_force(Vec2::new(1.0, 0.0));
        node.apply_force(Vec2::new(2.0, -1.0));
        assert_eq!(node.force, Vec2::new(3.0, -1.0));
    }

    #[test]
    fn edge_slot_per_axis() {
        let mut node: Node<f32> = Node::default();
        node.edge_mut(Axis::Horizontal).next = 42.0;
        assert_eq!(node.vertical_edge.next, 42.0);
        assert_eq!(node.edge(Axis::Horizontal).next, 42.0);
    }
}
