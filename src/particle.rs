//! Point masses integrated with semi-implicit Euler.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;

/// A point mass at one grid node of the cloth.
///
/// `outgoing_springs` / `incoming_springs` hold indices into the simulator's
/// spring array for which this particle is the "from" / "to" endpoint.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub velocity: Vec3<F>,
    pub force: Vec3<F>,
    mass: F,
    pinned: bool,
    outgoing_springs: AllocVec<usize>,
    incoming_springs: AllocVec<usize>,
}

impl<F: Float> Particle<F> {
    pub fn new(position: Vec3<F>, mass: F) -> Self {
        debug_assert!(mass > F::zero(), "particle mass must be positive");
        Particle {
            position,
            velocity: Vec3::zero(),
            force: Vec3::zero(),
            mass,
            pinned: false,
            outgoing_springs: AllocVec::new(),
            incoming_springs: AllocVec::new(),
        }
    }

    pub fn anchored(position: Vec3<F>, mass: F) -> Self {
        let mut particle = Particle::new(position, mass);
        particle.pinned = true;
        particle
    }

    pub fn mass(&self) -> F { self.mass }
    pub fn is_pinned(&self) -> bool { self.pinned }
    pub fn outgoing_springs(&self) -> &[usize] { &self.outgoing_springs }
    pub fn incoming_springs(&self) -> &[usize] { &self.incoming_springs }

    pub(crate) fn link_outgoing(&mut self, spring: usize) {
        self.outgoing_springs.push(spring);
    }

    pub(crate) fn link_incoming(&mut self, spring: usize) {
        self.incoming_springs.push(spring);
    }

    pub fn apply_force(&mut self, force: Vec3<F>) {
        self.force += force;
    }

    /// Gravity plus quadratic drag `-c·|v|²·v̂`. Drag is zero at rest.
    pub fn apply_external(&mut self, gravity: Vec3<F>, air_resistance: F) {
        self.force += gravity.scale(self.mass);
        if self.velocity != Vec3::zero() {
            let speed_sq = self.velocity.length_sq();
            self.force -= self.velocity.normalize().scale(air_resistance * speed_sq);
        }
    }

    /// `v += f/m·dt`, then `x += v·dt` with the new velocity, then clear `f`.
    pub fn integrate(&mut self, dt: F) {
        self.velocity += self.force.scale(dt / self.mass);
        self.position += self.velocity.scale(dt);
        self.force = Vec3::zero();
    }

    pub fn clear_force(&mut self) {
        self.force = Vec3::zero();
    }

    pub fn kinetic_energy(&self) -> F {
        F::half() * self.mass * self.velocity.length_sq()
    }
}
