//! Fixed-step advancement of a model: spring pass, friction, edge
//! interaction, and the per-frame residual flags.

use crate::config::Config;
use crate::edge::{Direction, EdgeOutcome};
use crate::finder::find_edge;
use crate::float::Float;
use crate::geometry::Workspace;
use crate::model::{Model, NODE_COUNT};
use crate::node::{Node, MASS};
use crate::observer::StepObserver;
use crate::vec::Axis;
use rand::Rng;
use rand::RngCore;

/// Duration of one simulation sub-step in milliseconds.
pub const STEP_MS: f32 = 15.0;

/// Frame-aggregate force above which the simulation still has unconsumed
/// stimulus (springs or snaps still pulling).
const FORCE_REST_THRESHOLD: f32 = 20.0;

/// Frame-aggregate velocity above which the sheet is still in motion.
/// Deliberately smaller than the force threshold so "settled but still
/// snapping" is distinguishable.
const VELOCITY_REST_THRESHOLD: f32 = 0.5;

/// Whether a window's simulation still needs animation and repainting.
///
/// The two flags are independent: `residual_force` means constraints are
/// still injecting energy, `residual_velocity` that the sheet is still
/// moving. Hosts keep stepping while either is set; force-only means
/// kinetic motion has settled but a constraint (typically a snap) is still
/// active.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepResult {
    pub residual_force: bool,
    pub residual_velocity: bool,
}

impl StepResult {
    /// Both flags clear: nothing left to animate.
    pub fn settled() -> Self {
        StepResult { residual_force: false, residual_velocity: false }
    }

    /// Both flags set, for freshly stimulated models that have not yet run
    /// a full sub-step.
    pub fn active() -> Self {
        StepResult { residual_force: true, residual_velocity: true }
    }

    pub fn is_active(&self) -> bool {
        self.residual_force || self.residual_velocity
    }
}

/// What one sub-step did to one edge-constrained axis, for counter upkeep.
#[derive(Copy, Clone)]
enum EdgeEvent {
    Snapped(Direction),
    Released(Direction),
}

impl<F: Float> Model<F> {
    /// Advance the simulation by a wall-clock delta.
    ///
    /// Accumulates `elapsed_ms` against the fixed 15 ms quantum and runs
    /// the whole sub-steps that fit, each one spring pass followed by one
    /// integration pass over all nodes. Frames shorter than the quantum
    /// bank their time and report the previous activity state so the host
    /// keeps animating across them.
    pub fn step<R, O>(
        &mut self,
        elapsed_ms: F,
        workspace: &Workspace<'_, F>,
        config: &Config<F>,
        rng: &mut R,
        observer: &mut O,
    ) -> StepResult
    where
        R: RngCore,
        O: StepObserver,
    {
        self.remainder += elapsed_ms / F::from_f32(STEP_MS);
        let whole = self.remainder.floor();
        self.remainder -= whole;
        let steps = whole.to_f32() as u32;

        if steps == 0 {
            return self.activity;
        }

        let mut total_force = F::zero();
        let mut total_velocity = F::zero();

        for _ in 0..steps {
            {
                let (springs, nodes) = self.springs_and_nodes_mut();
                for spring in springs {
                    spring.exert(config.spring_k, nodes);
                }
            }

            for i in 0..NODE_COUNT {
                let multi_snap = self.snapped_total() > 1;
                let mut node = *self.node(i);
                let mut events = [None; 4];

                let (force, velocity) = step_node(
                    &mut node,
                    config.friction,
                    workspace,
                    multi_snap,
                    rng,
                    &mut events,
                );
                *self.node_mut(i) = node;

                for event in events.into_iter().flatten() {
                    match event {
                        EdgeEvent::Snapped(direction) => {
                            self.note_snap(direction);
                            log::trace!("edge snapped: {:?}", direction);
                            observer.on_snap(direction);
                        }
                        EdgeEvent::Released(direction) => {
                            self.note_release(direction);
                            log::trace!("edge released: {:?}", direction);
                            observer.on_release(direction);
                        }
                    }
                }

                total_force += force;
                total_velocity += velocity;
            }

            observer.on_sub_step();
        }

        self.recalc_bounds();

        let result = StepResult {
            residual_force: total_force > F::from_f32(FORCE_REST_THRESHOLD),
            residual_velocity: total_velocity > F::from_f32(VELOCITY_REST_THRESHOLD),
        };
        self.activity = result;
        observer.on_step_complete();
        result
    }
}

/// Advance one node by one sub-step, returning its aggregate force and
/// velocity magnitudes (abs-sum of components, force taken before the
/// accumulator reset).
fn step_node<F, R>(
    node: &mut Node<F>,
    friction: F,
    workspace: &Workspace<'_, F>,
    multi_snap: bool,
    rng: &mut R,
    events: &mut [Option<EdgeEvent>; 4],
) -> (F, F)
where
    F: Float,
    R: RngCore,
{
    if node.pinned {
        node.velocity = crate::vec::Vec2::zero();
        node.force = crate::vec::Vec2::zero();
        return (F::zero(), F::zero());
    }

    node.force = node.force - node.velocity.scale(friction);
    node.velocity = node.velocity + node.force.scale(F::one() / F::from_f32(MASS));

    for (slot, axis) in [Axis::Horizontal, Axis::Vertical].into_iter().enumerate() {
        match node.edge_mask.direction_on(axis) {
            Some(direction) => {
                let (dropped, transition) =
                    step_axis_with_edge(node, axis, direction, workspace, multi_snap, rng);
                events[slot * 2] = dropped;
                events[slot * 2 + 1] = transition;
            }
            None => {
                let velocity = node.velocity.component(axis);
                *node.position.component_mut(axis) += velocity;
            }
        }
    }

    let force = node.force.abs_sum();
    node.force = crate::vec::Vec2::zero();

    (force, node.velocity.abs_sum())
}

/// Advance one edge-constrained axis, re-scanning the candidate whenever
/// it is stale. Returns a snap dropped by candidate invalidation (if any)
/// and the transition produced by the advance itself.
fn step_axis_with_edge<F, R>(
    node: &mut Node<F>,
    axis: Axis,
    direction: Direction,
    workspace: &Workspace<'_, F>,
    multi_snap: bool,
    rng: &mut R,
) -> (Option<EdgeEvent>, Option<EdgeEvent>)
where
    F: Float,
    R: RngCore,
{
    let mut dropped = None;

    let cross = node.position.component(axis.cross());
    if node.edge(axis).out_of_band(cross) && refresh_candidate(node, axis, direction, workspace) {
        dropped = Some(EdgeEvent::Released(direction));
    }

    // Conflicting simultaneous snaps would deadlock the window; damping the
    // escape threshold randomly lets one of them win.
    let escape_scale = if multi_snap && node.edge(axis).snapped {
        F::from_f32(rng.gen::<f32>())
    } else {
        F::one()
    };

    let mut pos = node.position.component(axis);
    let mut vel = node.velocity.component(axis);
    let outcome = node
        .edge_mut(axis)
        .advance(&mut pos, &mut vel, direction.is_low_side(), escape_scale);
    *node.position.component_mut(axis) = pos;
    *node.velocity.component_mut(axis) = vel;

    let transition = match outcome {
        EdgeOutcome::Free => None,
        EdgeOutcome::Snapped => Some(EdgeEvent::Snapped(direction)),
        EdgeOutcome::Released => {
            refresh_candidate(node, axis, direction, workspace);
            Some(EdgeEvent::Released(direction))
        }
        EdgeOutcome::Stale => {
            // Stale never fires while snapped, so no counter can drop here.
            refresh_candidate(node, axis, direction, workspace);
            None
        }
    };

    (dropped, transition)
}

/// Re-run the edge finder for one axis of a node. An active snap survives
/// only if the fresh candidate is the same coordinate; returns whether a
/// snap was dropped so the caller can settle the counters.
fn refresh_candidate<F: Float>(
    node: &mut Node<F>,
    axis: Axis,
    direction: Direction,
    workspace: &Workspace<'_, F>,
) -> bool {
    let fresh = find_edge(workspace, direction, node.position);
    let edge = node.edge_mut(axis);
    let was_snapped = edge.snapped;
    let keep = was_snapped && fresh.next == edge.next;
    *edge = fresh;
    edge.snapped = keep;
    was_snapped && !keep
}
