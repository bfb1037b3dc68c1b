//! External perturbations applied at the end of each tick.

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::{Vec, Vec3};

/// Pseudo-turbulent wind evaluated at a given time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wind<F: Float> {
    /// Elapsed time in seconds fed into the turbulence function.
    pub time: F,
    /// Scale applied to the unit turbulence field. Default: 0.01.
    pub strength: F,
}

impl<F: Float> Wind<F> {
    pub fn new(time: F) -> Self {
        Wind { time, strength: F::from_f32(0.01) }
    }

    pub fn with_strength(mut self, strength: F) -> Self {
        self.strength = strength;
        self
    }

    /// `strength · (sin(x·y·t), cos(z·t), sin(cos(5·x·y·z)))`
    pub fn force_at(&self, position: Vec3<F>) -> Vec3<F> {
        let Vec3 { x, y, z } = position;
        let t = self.time;
        let five = F::from_f32(5.0);
        Vec3::new(
            (x * y * t).sin(),
            (z * t).cos(),
            (five * x * y * z).cos().sin(),
        )
        .scale(self.strength)
    }
}

/// Static sphere the cloth cannot penetrate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Result<Self, ClothError> {
        if !center.is_finite() || !(radius.is_finite() && radius > F::zero()) {
            return Err(ClothError::InvalidSphere);
        }
        Ok(Sphere { center, radius })
    }

    pub fn contains(&self, point: Vec3<F>) -> bool {
        (point - self.center).length() < self.radius
    }

    /// Radially project a point lying strictly inside onto the surface.
    ///
    /// A point at the exact center is pushed straight up (+Y).
    pub fn project(&self, point: Vec3<F>) -> Option<Vec3<F>> {
        if !self.contains(point) {
            return None;
        }
        let mut direction = (point - self.center).normalize();
        if direction == Vec3::zero() {
            direction = Vec3::unit_y();
        }
        Some(self.center + direction.scale(self.radius))
    }
}

impl<F: Float> Default for Sphere<F> {
    fn default() -> Self {
        Sphere {
            center: Vec3::new(F::from_f32(0.1), F::from_f32(-2.0), F::from_f32(-0.3)),
            radius: F::one(),
        }
    }
}

/// The optional perturbation for one tick. Wind and collision are
/// mutually exclusive by construction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Perturbation<F: Float> {
    #[default]
    None,
    Wind(Wind<F>),
    Collision(Sphere<F>),
}

/// Payload-free tag of a [`Perturbation`], reported to observers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PerturbationKind {
    None,
    Wind,
    Collision,
}

impl<F: Float> Perturbation<F> {
    pub fn kind(&self) -> PerturbationKind {
        match self {
            Perturbation::None => PerturbationKind::None,
            Perturbation::Wind(_) => PerturbationKind::Wind,
            Perturbation::Collision(_) => PerturbationKind::Collision,
        }
    }
}
