//! Step observer trait for monitoring the simulation.

use crate::edge::Direction;

/// Trait for observing simulation progress.
///
/// Implement this to monitor stepping (e.g., for debugging, effect
/// telemetry, or triggering sounds on snap). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after each completed 15 ms sub-step.
    fn on_sub_step(&mut self) {}

    /// Called when a grid point snaps onto a boundary.
    fn on_snap(&mut self, _direction: Direction) {}

    /// Called when a grid point breaks or loses a snap.
    fn on_release(&mut self, _direction: Direction) {}

    /// Called when a full step (one frame advance) completes.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
