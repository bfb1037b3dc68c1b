//! Undamped Hookean springs between two particles.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Vec, Vec3};

/// Which grid relation a spring was built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpringKind {
    /// Horizontal or vertical neighbors, rest length `dx`.
    Structural,
    /// Diagonal neighbors, rest length `dx·√2`.
    Shear,
}

/// A Hookean connector with a fixed rest length.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    pub from: usize,
    pub to: usize,
    pub stiffness: F,
    pub rest_length: F,
    pub kind: SpringKind,
}

impl<F: Float> Spring<F> {
    pub fn new(from: usize, to: usize, stiffness: F, rest_length: F, kind: SpringKind) -> Self {
        Spring { from, to, stiffness, rest_length, kind }
    }

    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.to].position.distance(particles[self.from].position)
    }

    /// Force on the "from" endpoint: `k·(len − rest)` along from→to.
    ///
    /// `None` when both endpoints coincide; the direction is undefined there.
    pub fn force_on_from(&self, particles: &[Particle<F>]) -> Option<Vec3<F>> {
        let delta = particles[self.to].position - particles[self.from].position;
        let length = delta.length();
        if length.is_near_zero(F::from_f32(1e-10)) {
            return None;
        }
        let magnitude = self.stiffness * (length - self.rest_length);
        Some(delta.scale(magnitude / length))
    }

    /// Accumulate the force into both endpoints (equal and opposite).
    ///
    /// Returns `false` for a zero-length spring, which contributes nothing.
    pub fn apply(&self, particles: &mut [Particle<F>]) -> bool {
        match self.force_on_from(particles) {
            Some(force) => {
                particles[self.from].apply_force(force);
                particles[self.to].apply_force(-force);
                true
            }
            None => false,
        }
    }

    pub fn potential_energy(&self, particles: &[Particle<F>]) -> F {
        let stretch = self.length(particles) - self.rest_length;
        F::half() * self.stiffness * stretch * stretch
    }
}
