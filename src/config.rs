//! Configuration types for the cloth simulator.

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::{Vec, Vec3};

/// Which particles are fixed in place for the whole simulation.
///
/// Pinning is a per-particle attribute decided once at construction;
/// pinned particles receive no external force and are never integrated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Anchors {
    /// The two top corners, grid nodes `(0, 0)` and `(width - 1, 0)`.
    #[default]
    TopCorners,
    /// Every node of row 0.
    TopRow,
    /// Nothing is pinned.
    None,
}

/// When the spring pass runs relative to the Euler update.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ForceOrdering {
    /// Springs are evaluated after particles move; their force acts on the
    /// following tick.
    #[default]
    Lagged,
    /// Springs are evaluated before the Euler update and act in the same
    /// tick. Produces different trajectories than `Lagged`.
    Immediate,
}

/// Physical parameters of the cloth.
///
/// # Builder Pattern
/// ```
/// use drape::config::{Anchors, ClothConfig};
/// use drape::vec::Vec3;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_total_mass(1.0)
///     .with_stiffness(40.0)
///     .with_air_resistance(0.001)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_anchors(Anchors::TopCorners);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    /// Mass shared evenly by all particles. Default: 1.0.
    pub total_mass: F,
    /// Stiffness of every spring. Default: 40.0.
    pub stiffness: F,
    /// Quadratic drag coefficient per particle. Default: 0.001.
    pub air_resistance: F,
    /// Gravity acceleration. Default: (0, -9.81, 0).
    pub gravity: Vec3<F>,
    /// Pinned particles. Default: top corners.
    pub anchors: Anchors,
    /// Spring pass placement. Default: lagged.
    pub force_ordering: ForceOrdering,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            total_mass: F::one(),
            stiffness: F::from_f32(40.0),
            air_resistance: F::from_f32(0.001),
            gravity: Vec3::new(F::zero(), F::from_f32(-9.81), F::zero()),
            anchors: Anchors::default(),
            force_ordering: ForceOrdering::default(),
        }
    }

    pub fn with_total_mass(mut self, total_mass: F) -> Self {
        self.total_mass = total_mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_air_resistance(mut self, air_resistance: F) -> Self {
        self.air_resistance = air_resistance;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn with_force_ordering(mut self, force_ordering: ForceOrdering) -> Self {
        self.force_ordering = force_ordering;
        self
    }

    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), ClothError> {
        if !(self.total_mass.is_finite() && self.total_mass > F::zero()) {
            return Err(ClothError::InvalidMass);
        }
        if !(self.stiffness.is_finite() && self.stiffness > F::zero()) {
            return Err(ClothError::InvalidStiffness);
        }
        if !(self.air_resistance.is_finite() && self.air_resistance >= F::zero()) {
            return Err(ClothError::InvalidAirResistance);
        }
        if !self.gravity.is_finite() {
            return Err(ClothError::InvalidGravity);
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
