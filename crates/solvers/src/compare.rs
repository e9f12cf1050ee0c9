//! Side-by-side runs of every integration scheme on identical inputs.

use serde::Serialize;

use oscillate_core::{Oscillator, State, TimeGrid};

use crate::{simulate, stepper::Scheme, trajectory::Trajectory};

/// The Euler and RK4 trajectories for one set of inputs.
///
/// Both trajectories come from the same grid, so they have the same length
/// and the same sample times and can be subtracted sample by sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub euler: Trajectory,
    pub rk4: Trajectory,
}

/// Runs the oscillator once per scheme over the same grid and initial state.
///
/// # Example
///
/// ```
/// use oscillate_core::{Oscillator, PhysicalParams, State, TimeGrid, Waveform};
/// use oscillate_solvers::compare;
///
/// let params = PhysicalParams::from_si(1.0, 0.0, 1.0).unwrap();
/// let oscillator = Oscillator::new(params, Waveform::rectangular(1.0, 5.0).unwrap());
///
/// let comparison = compare(&oscillator, &TimeGrid::default(), State::default());
///
/// assert_eq!(comparison.euler.len(), comparison.rk4.len());
/// ```
#[must_use]
pub fn compare(oscillator: &Oscillator, grid: &TimeGrid, initial: State) -> Comparison {
    Comparison {
        euler: simulate::run(Scheme::Euler, oscillator, grid, initial),
        rk4: simulate::run(Scheme::Rk4, oscillator, grid, initial),
    }
}

impl Comparison {
    /// Returns the trajectory produced by `scheme`.
    #[must_use]
    pub fn trajectory(&self, scheme: Scheme) -> &Trajectory {
        match scheme {
            Scheme::Euler => &self.euler,
            Scheme::Rk4 => &self.rk4,
        }
    }

    /// Splits into `(euler, rk4)`.
    #[must_use]
    pub fn into_pair(self) -> (Trajectory, Trajectory) {
        (self.euler, self.rk4)
    }

    /// Euler position minus RK4 position at each sample.
    #[must_use]
    pub fn position_difference(&self) -> Vec<f64> {
        self.euler
            .positions()
            .zip(self.rk4.positions())
            .map(|(euler, rk4)| euler - rk4)
            .collect()
    }

    /// Euler velocity minus RK4 velocity at each sample.
    #[must_use]
    pub fn velocity_difference(&self) -> Vec<f64> {
        self.euler
            .velocities()
            .zip(self.rk4.velocities())
            .map(|(euler, rk4)| euler - rk4)
            .collect()
    }

    /// Largest absolute position difference over the run.
    ///
    /// NaN if either run produced a NaN, so a blow-up is never hidden.
    #[must_use]
    pub fn max_position_divergence(&self) -> f64 {
        self.position_difference()
            .into_iter()
            .map(f64::abs)
            .fold(0.0, |max, diff| {
                if max.is_nan() || diff.is_nan() {
                    f64::NAN
                } else {
                    max.max(diff)
                }
            })
    }
}
