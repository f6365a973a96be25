//! Rectangles and the per-frame description of a window's surroundings.

use crate::float::Float;
use crate::vec::Vec2;

/// An axis-aligned rectangle in screen coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect<F: Float> {
    pub x: F,
    pub y: F,
    pub width: F,
    pub height: F,
}

impl<F: Float> Rect<F> {
    pub fn new(x: F, y: F, width: F, height: F) -> Self {
        Rect { x, y, width, height }
    }

    /// The x coordinate of the right boundary.
    pub fn right(&self) -> F { self.x + self.width }

    /// The y coordinate of the bottom boundary.
    pub fn bottom(&self) -> F { self.y + self.height }

    /// The top-left corner.
    pub fn origin(&self) -> Vec2<F> { Vec2::new(self.x, self.y) }

    /// The center point.
    pub fn center(&self) -> Vec2<F> {
        Vec2::new(
            self.x + self.width * F::half(),
            self.y + self.height * F::half(),
        )
    }

    pub fn contains(&self, point: Vec2<F>) -> bool {
        point.x >= self.x && point.x <= self.right()
            && point.y >= self.y && point.y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect<F>) -> bool {
        self.x < other.right() && other.x < self.right()
            && self.y < other.bottom() && other.y < self.bottom()
    }

    /// The overlapping region of two rectangles, if any.
    pub fn intersection(&self, other: &Rect<F>) -> Option<Rect<F>> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Whether `other` lies entirely within self.
    pub fn covers(&self, other: &Rect<F>) -> bool {
        self.x <= other.x && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }
}

/// Classification of a sibling surface for edge scanning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NeighborKind {
    /// A regular application window; its boundaries attract.
    Normal,
    /// A dock/panel style surface; its boundaries attract.
    Panel,
    /// Anything else (menus, tooltips, unmapped surfaces); skipped.
    Ignored,
}

impl NeighborKind {
    pub fn attracts(self) -> bool {
        matches!(self, NeighborKind::Normal | NeighborKind::Panel)
    }
}

/// A sibling surface visible this frame, as supplied by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor<F: Float> {
    pub rect: Rect<F>,
    pub kind: NeighborKind,
}

impl<F: Float> Neighbor<F> {
    pub fn new(rect: Rect<F>, kind: NeighborKind) -> Self {
        Neighbor { rect, kind }
    }
}

/// The read-only frame context for edge scanning: the work area of the
/// output the window occupies, plus every sibling surface on it.
///
/// The host rebuilds (or reuses) this per frame; the engine never walks any
/// live window list of its own.
#[derive(Copy, Clone, Debug)]
pub struct Workspace<'a, F: Float> {
    pub work_area: Rect<F>,
    pub neighbors: &'a [Neighbor<F>],
}

impl<'a, F: Float> Workspace<'a, F> {
    pub fn new(work_area: Rect<F>, neighbors: &'a [Neighbor<F>]) -> Self {
        Workspace { work_area, neighbors }
    }

    /// A workspace with no snappable siblings.
    pub fn empty(work_area: Rect<F>) -> Workspace<'static, F> {
        Workspace { work_area, neighbors: &[] }
    }
}
