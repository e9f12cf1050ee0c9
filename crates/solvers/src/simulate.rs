//! Fixed-grid simulation driver.
//!
//! [`run`] integrates an oscillator across every sample of a [`TimeGrid`]:
//!
//! ```text
//! sample_0     = (t_0, initial)
//! sample_{i+1} = (t_{i+1}, stepper.step(t_i, state_i, dt))
//! ```
//!
//! # Example
//!
//! ```
//! use oscillate_core::{Oscillator, PhysicalParams, State, TimeGrid, Waveform};
//! use oscillate_solvers::{Scheme, simulate};
//!
//! let params = PhysicalParams::from_si(1.0, 0.5, 4.0).unwrap();
//! let forcing = Waveform::triangular(2.0, 1.0).unwrap();
//! let oscillator = Oscillator::new(params, forcing);
//! let grid = TimeGrid::default();
//!
//! let trajectory = simulate::run(Scheme::Rk4, &oscillator, &grid, State::default());
//!
//! assert_eq!(trajectory.len(), grid.len());
//! ```

mod action;
mod event;
mod solution;

pub use action::Action;
pub use event::Event;
pub use solution::{Solution, Status};

use oscillate_core::{Observer, Oscillator, State, TimeGrid};

use crate::{
    stepper::Stepper,
    trajectory::{Sample, Trajectory},
};

/// Integrates `oscillator` from `initial` across every sample of `grid`.
///
/// The result holds exactly `grid.len()` samples at the grid's times.
/// Identical inputs always produce bit-identical trajectories.
#[must_use]
pub fn run<S: Stepper>(
    stepper: S,
    oscillator: &Oscillator,
    grid: &TimeGrid,
    initial: State,
) -> Trajectory {
    run_observed(stepper, oscillator, grid, initial, ()).trajectory
}

/// Integrates like [`run`], reporting each sample to an observer.
///
/// # Algorithm
///
/// 1. Seed sample 0 with `(t_0, initial)` and emit it.
/// 2. For each grid index `i` in `1..n`:
///    - Step the previous state from `t_{i-1}` by `dt`.
///    - Record the sample at `t_i` and emit it.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the trajectory with its termination status.
///
/// The observer only sees samples; it cannot change them.
pub fn run_observed<S, Obs>(
    stepper: S,
    oscillator: &Oscillator,
    grid: &TimeGrid,
    initial: State,
    mut observer: Obs,
) -> Solution
where
    S: Stepper,
    Obs: Observer<Event, Action>,
{
    let dt = grid.step();
    let mut samples = Vec::with_capacity(grid.len());

    let mut current = Sample {
        time: grid.start(),
        state: initial,
    };
    samples.push(current);

    let event = Event {
        step: 0,
        sample: current,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Solution {
            status: Status::StoppedByObserver,
            trajectory: Trajectory::new(samples),
            steps: 0,
        };
    }

    for step in 1..grid.len() {
        let state = stepper.step(oscillator, current.time, current.state, dt);
        current = Sample {
            time: grid.time(step),
            state,
        };
        samples.push(current);

        let event = Event {
            step,
            sample: current,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Solution {
                status: Status::StoppedByObserver,
                trajectory: Trajectory::new(samples),
                steps: step,
            };
        }
    }

    Solution {
        status: Status::Complete,
        trajectory: Trajectory::new(samples),
        steps: grid.len() - 1,
    }
}
