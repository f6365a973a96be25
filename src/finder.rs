//! Directional scan for the nearest magnetic boundary.

use crate::edge::{Direction, Edge, EDGE_DISTANCE, EDGE_VELOCITY, SCAN_LIMIT};
use crate::float::Float;
use crate::geometry::Workspace;
use crate::vec::{Axis, Vec2};

/// Locate the nearest snap candidate in `direction` for a probe point.
///
/// Scans every attracting neighbor whose cross-axis extent overlaps the
/// probe: the facing boundary nearest the probe on the near side becomes
/// `next`, the nearest on the far side `prev`, and the cross-axis band
/// `[start, end]` shrinks to the tightest bracket consistent with all
/// overlapping neighbors. Non-overlapping neighbors only trim the band.
/// With no constraining neighbor the work-area edge is the candidate; a
/// probe already outside the work area on the scan side gets that edge as
/// its far coordinate instead, so it cannot snap backward onto a boundary
/// it has already crossed.
///
/// The result is only recomputed when the previous candidate goes stale
/// (band exit, `prev` crossing, or snap release); in between it stays valid
/// and is cheap to test against every sub-step.
pub fn find_edge<F: Float>(workspace: &Workspace<'_, F>, direction: Direction, probe: Vec2<F>) -> Edge<F> {
    let limit = F::from_f32(SCAN_LIMIT);
    let axis = direction.motion_axis();
    let main = probe.component(axis);
    let cross = probe.component(axis.cross());
    let low_side = direction.is_low_side();

    let mut start = -limit;
    let mut end = limit;
    let mut near = if low_side { -limit } else { limit };
    let mut far = if low_side { limit } else { -limit };

    let work_edge = work_area_edge(workspace, direction);
    let inside = if low_side { main >= work_edge } else { main <= work_edge };

    if inside {
        near = work_edge;

        for neighbor in workspace.neighbors {
            if !neighbor.kind.attracts() {
                continue;
            }

            let (lo, hi) = cross_extent(&neighbor.rect, axis);
            if lo > cross {
                // Entirely past the probe on the cross axis: the band ends
                // where this neighbor begins.
                if lo < end {
                    end = lo;
                }
            } else if hi < cross {
                if hi > start {
                    start = hi;
                }
            } else {
                if lo > start {
                    start = lo;
                }
                if hi < end {
                    end = hi;
                }

                let face = facing_boundary(&neighbor.rect, direction);
                if low_side {
                    if face <= main {
                        near = near.max(face);
                    } else {
                        far = far.min(face);
                    }
                } else if face >= main {
                    near = near.min(face);
                } else {
                    far = far.max(face);
                }
            }
        }
    } else {
        far = work_edge;
    }

    let distance = F::from_f32(EDGE_DISTANCE);
    let attract = if low_side { near + distance } else { near - distance };

    Edge {
        next: near,
        prev: far,
        start,
        end,
        attract,
        velocity: F::from_f32(EDGE_VELOCITY),
        snapped: false,
    }
}

/// The work-area boundary a probe scanning in `direction` would reach.
fn work_area_edge<F: Float>(workspace: &Workspace<'_, F>, direction: Direction) -> F {
    match direction {
        Direction::West => workspace.work_area.x,
        Direction::East => workspace.work_area.right(),
        Direction::North => workspace.work_area.y,
        Direction::South => workspace.work_area.bottom(),
    }
}

/// A neighbor's extent on the cross axis of a scan.
fn cross_extent<F: Float>(rect: &crate::geometry::Rect<F>, motion_axis: Axis) -> (F, F) {
    match motion_axis {
        Axis::Horizontal => (rect.y, rect.bottom()),
        Axis::Vertical => (rect.x, rect.right()),
    }
}

/// The boundary of a neighbor that faces a probe scanning in `direction`:
/// a west scan meets the neighbor's east face, and so on.
fn facing_boundary<F: Float>(rect: &crate::geometry::Rect<F>, direction: Direction) -> F {
    match direction {
        Direction::West => rect.right(),
        Direction::East => rect.x,
        Direction::North => rect.bottom(),
        Direction::South => rect.y,
    }
}
