//! Simulation tunables.

use crate::float::Float;

/// Tunable parameters of the spring simulation.
///
/// # Builder Pattern
/// ```
/// use wobbly::Config;
///
/// let config: Config<f32> = Config::new()
///     .with_spring_k(5.0)
///     .with_friction(4.5);
/// ```
pub struct Config<F: Float> {
    /// Spring constant applied to the half-deviation of every spring.
    /// Sensible range roughly 0.1..=10.0. Default: 8.0.
    pub spring_k: F,
    /// Velocity-proportional friction. Sensible range roughly 0.1..=10.0.
    /// Default: 3.0.
    pub friction: F,
}

impl<F: Float> Config<F> {
    /// Create a config with default values.
    pub fn new() -> Self {
        Config {
            spring_k: F::from_f32(8.0),
            friction: F::from_f32(3.0),
        }
    }

    /// Set the spring constant.
    pub fn with_spring_k(mut self, spring_k: F) -> Self {
        self.spring_k = spring_k;
        self
    }

    /// Set the friction coefficient.
    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }
}

impl<F: Float> Default for Config<F> {
    fn default() -> Self {
        Self::new()
    }
}
