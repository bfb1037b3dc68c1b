//! Mass-spring cloth: the per-tick force, integration and constraint pipeline.

use crate::config::{ClothConfig, ForceOrdering};
use crate::error::ClothError;
use crate::float::Float;
use crate::grid::{GridGeometry, PositionSink, Topology};
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::perturbation::Perturbation;
use crate::spring::Spring;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// A rectangular cloth simulated as a mass-spring network.
///
/// Particles and springs are created once from a [`GridGeometry`]; only
/// particle position, velocity and force change afterwards. The grid
/// itself stays with the caller and receives positions through a
/// [`PositionSink`] at the end of every [`step`](Self::step).
///
/// ```
/// use drape::{ClothConfig, ClothSimulator, NoOpStepObserver, Perturbation, RectGrid};
///
/// let mut grid = RectGrid::new(8, 6, 0.1f32);
/// let mut cloth = ClothSimulator::new(&grid, &ClothConfig::new()).unwrap();
/// for _ in 0..10 {
///     cloth.step(0.002, &Perturbation::None, &mut grid, &mut NoOpStepObserver);
/// }
/// assert_eq!(grid.positions(), &cloth.positions()[..]);
/// ```
#[derive(Clone, Debug)]
pub struct ClothSimulator<F: Float> {
    particles: AllocVec<Particle<F>>,
    springs: AllocVec<Spring<F>>,
    width: usize,
    height: usize,
    /// Flat grid index of node `(col, row)`, stored row-major.
    node_index: AllocVec<usize>,
    gravity: Vec3<F>,
    air_resistance: F,
    force_ordering: ForceOrdering,
}

impl<F: Float> ClothSimulator<F> {
    pub fn new<G: GridGeometry<F> + ?Sized>(
        grid: &G,
        config: &ClothConfig<F>,
    ) -> Result<Self, ClothError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected cloth config: {}", err);
            return Err(err);
        }
        let topology = Topology::build(grid, config.total_mass, config.stiffness, config.anchors)
            .inspect_err(|err| log::warn!("rejected cloth grid: {}", err))?;
        let Topology { particles, springs, width, height } = topology;

        let mut node_index = AllocVec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                node_index.push(grid.index(col, row));
            }
        }

        log::debug!(
            "built {}x{} cloth: {} particles, {} springs, {} pinned",
            width,
            height,
            particles.len(),
            springs.len(),
            particles.iter().filter(|p| p.is_pinned()).count()
        );

        Ok(ClothSimulator {
            particles,
            springs,
            width,
            height,
            node_index,
            gravity: config.gravity,
            air_resistance: config.air_resistance,
            force_ordering: config.force_ordering,
        })
    }

    /// Advance the cloth by `dt` seconds and write positions to `sink`.
    ///
    /// Order within a tick:
    /// 1. gravity and quadratic drag on every free particle;
    /// 2. semi-implicit Euler on every free particle, clearing its force;
    /// 3. spring pass, accumulating into `force` only;
    /// 4. wind force or sphere projection, depending on `perturbation`;
    /// 5. geometry sync.
    ///
    /// With [`ForceOrdering::Lagged`] the spring forces of step 3 are
    /// consumed by the next call. With [`ForceOrdering::Immediate`] step 3
    /// runs first instead.
    pub fn step<S, O>(
        &mut self,
        dt: F,
        perturbation: &Perturbation<F>,
        sink: &mut S,
        observer: &mut O,
    ) where
        S: PositionSink<F> + ?Sized,
        O: StepObserver,
    {
        debug_assert!(dt.is_finite() && dt > F::zero(), "time step must be positive");

        if self.force_ordering == ForceOrdering::Immediate {
            self.accumulate_springs(observer);
        }

        let mut free = 0;
        for p in self.particles.iter_mut().filter(|p| !p.is_pinned()) {
            p.apply_external(self.gravity, self.air_resistance);
            free += 1;
        }
        observer.on_external_forces(free);

        for p in self.particles.iter_mut() {
            if p.is_pinned() {
                p.clear_force();
            } else {
                p.integrate(dt);
            }
        }
        observer.on_integrate();

        if self.force_ordering == ForceOrdering::Lagged {
            self.accumulate_springs(observer);
        }

        let affected = match perturbation {
            Perturbation::None => 0,
            Perturbation::Wind(wind) => {
                for p in self.particles.iter_mut() {
                    p.apply_force(wind.force_at(p.position));
                }
                self.particles.len()
            }
            Perturbation::Collision(sphere) => {
                let mut projected = 0;
                for p in self.particles.iter_mut().filter(|p| !p.is_pinned()) {
                    if let Some(surface) = sphere.project(p.position) {
                        p.position = surface;
                        projected += 1;
                    }
                }
                projected
            }
        };
        observer.on_perturbation(perturbation.kind(), affected);

        self.sync_geometry(sink);
        observer.on_step_complete();
    }

    fn accumulate_springs<O: StepObserver>(&mut self, observer: &mut O) {
        let mut degenerate = 0;
        for spring in self.springs.iter() {
            if !spring.apply(&mut self.particles) {
                degenerate += 1;
            }
        }
        observer.on_springs(self.springs.len(), degenerate);
    }

    /// Write every particle position to `sink` under its grid index.
    ///
    /// `sink` must accept every index below [`particle_count`](Self::particle_count).
    pub fn sync_geometry<S: PositionSink<F> + ?Sized>(&self, sink: &mut S) {
        for (index, p) in self.particles.iter().enumerate() {
            sink.set_position(index, p.position);
        }
    }

    /// Move a particle, e.g. when the user drags the cloth. Velocity is kept.
    pub fn set_position(&mut self, index: usize, position: Vec3<F>) -> Result<(), ClothError> {
        let count = self.particles.len();
        let p = self
            .particles
            .get_mut(index)
            .ok_or(ClothError::ParticleOutOfBounds { index, count })?;
        p.position = position;
        Ok(())
    }

    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn springs(&self) -> &[Spring<F>] { &self.springs }
    pub fn particle(&self, index: usize) -> Option<&Particle<F>> { self.particles.get(index) }

    pub fn particle_at(&self, col: usize, row: usize) -> Option<&Particle<F>> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.particles.get(self.node_index[row * self.width + col])
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }
    pub fn gravity(&self) -> Vec3<F> { self.gravity }
    pub fn air_resistance(&self) -> F { self.air_resistance }
    pub fn force_ordering(&self) -> ForceOrdering { self.force_ordering }

    pub fn total_mass(&self) -> F {
        self.particles.iter().fold(F::zero(), |acc, p| acc + p.mass())
    }

    pub fn kinetic_energy(&self) -> F {
        self.particles.iter().fold(F::zero(), |acc, p| acc + p.kinetic_energy())
    }

    pub fn potential_energy(&self) -> F {
        self.springs
            .iter()
            .fold(F::zero(), |acc, s| acc + s.potential_energy(&self.particles))
    }
}
