//! Fixed-timestep driver that catches up with wall-clock time.

use crate::error::ClothError;
use crate::float::Float;

/// Runs a fixed-size tick as many times as real time requires.
///
/// Each frame adds the elapsed time to a running total and runs the ticks
/// still owed, rounded to the nearest whole tick. If running them takes
/// longer than the frame's own delta, the loop stops early and the excess
/// is subtracted from the next frame's delta, so a slow machine falls
/// behind instead of spiralling.
///
/// ```
/// use drape::stepper::FixedStepper;
///
/// let mut stepper = FixedStepper::new(0.01f64, 0.0).unwrap();
/// let mut ticks = 0;
/// // Ticking is instantaneous: the clock always reads the frame start.
/// let ran = stepper.frame(0.05, || 0.05, |_dt| ticks += 1);
/// assert_eq!(ran, 5);
/// assert_eq!(ticks, 5);
/// ```
#[derive(Clone, Debug)]
pub struct FixedStepper<F: Float> {
    time_step: F,
    last_time: F,
    accumulated: F,
    consumed: F,
    overrun: F,
    total_ticks: u64,
}

impl<F: Float> FixedStepper<F> {
    pub fn new(time_step: F, start_time: F) -> Result<Self, ClothError> {
        if !(time_step.is_finite() && time_step > F::zero()) {
            return Err(ClothError::InvalidTimeStep);
        }
        Ok(FixedStepper {
            time_step,
            last_time: start_time,
            accumulated: F::zero(),
            consumed: F::zero(),
            overrun: F::zero(),
            total_ticks: 0,
        })
    }

    /// Advance to wall time `now`, calling `tick(time_step)` for each owed tick.
    ///
    /// `clock` is polled after every tick and must return the current wall
    /// time on the same scale as `now`. Returns the number of ticks run.
    pub fn frame<C, T>(&mut self, now: F, mut clock: C, mut tick: T) -> usize
    where
        C: FnMut() -> F,
        T: FnMut(F),
    {
        let delta = now - self.last_time - self.overrun;
        self.overrun = F::zero();
        self.last_time = now;
        self.accumulated = self.accumulated + delta;

        let owed = ((self.accumulated - self.consumed) / self.time_step).round_half_up();
        let mut ran = 0;
        let mut done = F::zero();
        while done < owed {
            self.consumed = self.consumed + self.time_step;
            self.total_ticks += 1;
            ran += 1;
            done = done + F::one();
            tick(self.time_step);

            let taken = clock() - now;
            if taken > delta {
                self.overrun = taken - delta;
                log::debug!(
                    "stepper overran frame by {} after {} ticks; deferring",
                    self.overrun,
                    ran
                );
                break;
            }
        }
        ran
    }

    pub fn time_step(&self) -> F { self.time_step }
    pub fn total_ticks(&self) -> u64 { self.total_ticks }

    /// Simulated time not yet covered by a tick (may be negative by up to half a tick).
    pub fn backlog(&self) -> F {
        self.accumulated - self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_step() {
        assert_eq!(FixedStepper::new(0.0f32, 0.0).unwrap_err(), ClothError::InvalidTimeStep);
        assert_eq!(FixedStepper::new(-1.0f32, 0.0).unwrap_err(), ClothError::InvalidTimeStep);
    }

    #[test]
    fn rounds_to_nearest_tick() {
        let mut stepper = FixedStepper::new(1.0f64, 0.0).unwrap();
        assert_eq!(stepper.frame(1.4, || 1.4, |_| {}), 1);
        // 2.6 accumulated, 1 consumed: 1.6 rounds to 2
        assert_eq!(stepper.frame(2.6, || 2.6, |_| {}), 2);
        assert_eq!(stepper.total_ticks(), 3);
    }
}
