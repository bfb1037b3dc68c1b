//! Step observer trait for monitoring simulation progress.

use crate::perturbation::PerturbationKind;

/// Trait for observing simulation ticks.
///
/// Implement this trait to monitor the integrator (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after gravity and drag were accumulated into every free particle.
    fn on_external_forces(&mut self, _free_particles: usize) {}

    /// Called after the semi-implicit Euler update.
    fn on_integrate(&mut self) {}

    /// Called after the spring pass. `degenerate` counts zero-length springs
    /// that contributed no force.
    fn on_springs(&mut self, _springs: usize, _degenerate: usize) {}

    /// Called after the perturbation. `affected` is the number of particles
    /// pushed by wind or projected out of the collider.
    fn on_perturbation(&mut self, _kind: PerturbationKind, _affected: usize) {}

    /// Called once positions were written to the grid.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards step events to the `log` facade.
///
/// Per-phase events go to `trace`, collisions and degenerate springs to `debug`.
#[derive(Debug, Default)]
pub struct LogObserver {
    ticks: u64,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed ticks seen so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl StepObserver for LogObserver {
    fn on_external_forces(&mut self, free_particles: usize) {
        log::trace!("tick {}: external forces on {} particles", self.ticks, free_particles);
    }

    fn on_integrate(&mut self) {
        log::trace!("tick {}: integrated", self.ticks);
    }

    fn on_springs(&mut self, springs: usize, degenerate: usize) {
        log::trace!("tick {}: accumulated {} springs", self.ticks, springs);
        if degenerate > 0 {
            log::debug!("tick {}: skipped {} zero-length springs", self.ticks, degenerate);
        }
    }

    fn on_perturbation(&mut self, kind: PerturbationKind, affected: usize) {
        match kind {
            PerturbationKind::None => {}
            PerturbationKind::Wind => {
                log::trace!("tick {}: wind on {} particles", self.ticks, affected);
            }
            PerturbationKind::Collision if affected > 0 => {
                log::debug!("tick {}: projected {} particles out of sphere", self.ticks, affected);
            }
            PerturbationKind::Collision => {}
        }
    }

    fn on_step_complete(&mut self) {
        self.ticks += 1;
    }
}
