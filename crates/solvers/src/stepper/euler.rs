use oscillate_core::{Oscillator, State, StepIntegrable};

use super::Stepper;

/// Explicit (forward) Euler.
///
/// ```text
/// v_{i+1} = v_i + a(t_i, x_i, v_i) · dt
/// x_{i+1} = x_i + v_i · dt
/// ```
///
/// Position advances with the velocity from the start of the step, not the
/// updated one. This is plain explicit Euler, not the symplectic Euler-Cromer
/// variant, and it gains energy on an undamped oscillator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl Stepper for Euler {
    fn step(&self, oscillator: &Oscillator, t: f64, state: State, dt: f64) -> State {
        let derivative = oscillator.derivative(t, state);
        state.step(&derivative, dt)
    }
}
