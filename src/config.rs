//! Configuration for building and stepping a cloth.

use crate::arrangement::FixedPointArrangement;
use crate::constraint::{FLOOR_PLANE_FRICTION, FLOOR_PLANE_Y};
use crate::error::ClothError;
use crate::float::Float;
use crate::solver::{DEFAULT_TIME_STEP, PHYSICS_ITERATIONS};
use crate::vec::{Vec, Vec3};

/// Default lattice side.
pub const DEFAULT_SIDE_VERTEX_COUNT: usize = 32;

/// Configuration for a [`Cloth`](crate::Cloth).
///
/// # Builder Pattern
/// ```
/// use drape::config::ClothConfig;
/// use drape::arrangement::FixedPointArrangement;
/// use drape::vec::Vec3;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_vertex_count(24)
///     .with_arrangement(FixedPointArrangement::AllTop)
///     .with_wind(Vec3::new(0.5, 0.0, -0.2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    /// Vertices per lattice side. Must be at least 2. Default: 32.
    pub vertex_count: usize,
    /// Side length of the undeformed cloth; also the per-vertex mass.
    /// Default: 1.
    pub scale: F,
    /// Which vertices start pinned. Default: `Curtain`.
    pub arrangement: FixedPointArrangement,
    /// Gravity acceleration. Default: `(0, -9.8, 0)`.
    pub gravity: Vec3<F>,
    /// Wind force. Default: zero.
    pub wind: Vec3<F>,
    /// Physics substep in seconds. Default: 1/60.
    pub time_step: F,
    /// Relaxation passes per substep. Default: 16.
    pub iterations: usize,
    /// Floor height as a multiple of scale. Default: -1.15.
    pub floor_height: F,
    /// Fraction of horizontal motion kept on floor contact. Default: 0.1.
    pub floor_friction: F,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            vertex_count: DEFAULT_SIDE_VERTEX_COUNT,
            scale: F::one(),
            arrangement: FixedPointArrangement::Curtain,
            gravity: Vec3::new(F::zero(), F::from_f32(-9.8), F::zero()),
            wind: Vec3::zero(),
            time_step: F::from_f32(DEFAULT_TIME_STEP),
            iterations: PHYSICS_ITERATIONS,
            floor_height: F::from_f32(FLOOR_PLANE_Y),
            floor_friction: F::from_f32(FLOOR_PLANE_FRICTION),
        }
    }

    /// Set the number of vertices per side.
    pub fn with_vertex_count(mut self, n: usize) -> Self {
        self.vertex_count = n;
        self
    }

    /// Set the cloth scale.
    pub fn with_scale(mut self, scale: F) -> Self {
        self.scale = scale;
        self
    }

    /// Set the pinned-vertex arrangement.
    pub fn with_arrangement(mut self, arrangement: FixedPointArrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the wind force.
    pub fn with_wind(mut self, wind: Vec3<F>) -> Self {
        self.wind = wind;
        self
    }

    /// Set the physics substep.
    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    /// Set the number of relaxation passes.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the floor height factor and friction.
    pub fn with_floor(mut self, height: F, friction: F) -> Self {
        self.floor_height = height;
        self.floor_friction = friction;
        self
    }

    /// Check the values a cloth cannot be built from.
    pub fn validate(&self) -> Result<(), ClothError> {
        validate_vertex_count(self.vertex_count)?;
        validate_scale(self.scale)?;
        if !(self.time_step > F::zero() && self.time_step.is_finite()) {
            return Err(ClothError::InvalidTimeStep);
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_vertex_count(n: usize) -> Result<(), ClothError> {
    if n < 2 {
        return Err(ClothError::InvalidVertexCount { count: n });
    }
    Ok(())
}

pub(crate) fn validate_scale<F: Float>(scale: F) -> Result<(), ClothError> {
    if !(scale > F::zero() && scale.is_finite()) {
        return Err(ClothError::InvalidScale);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ClothConfig::<f32>::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_single_vertex_side() {
        let config: ClothConfig<f32> = ClothConfig::new().with_vertex_count(1);
        assert_eq!(config.validate(), Err(ClothError::InvalidVertexCount { count: 1 }));
    }

    #[test]
    fn rejects_bad_scale_and_step() {
        let zero_scale: ClothConfig<f64> = ClothConfig::new().with_scale(0.0);
        assert_eq!(zero_scale.validate(), Err(ClothError::InvalidScale));
        let nan_step: ClothConfig<f64> = ClothConfig::new().with_time_step(f64::NAN);
        assert_eq!(nan_step.validate(), Err(ClothError::InvalidTimeStep));
    }
}
