use oscillate_core::{Oscillator, State, StepIntegrable};

use super::Stepper;

/// Classic fixed-step fourth-order Runge-Kutta.
///
/// ```text
/// k1 = f(t,        y)
/// k2 = f(t + dt/2, y + k1·dt/2)
/// k3 = f(t + dt/2, y + k2·dt/2)
/// k4 = f(t + dt,   y + k3·dt)
/// y_{i+1} = y_i + (k1 + 2·k2 + 2·k3 + k4) · dt/6
/// ```
///
/// where `y = (x, v)` and `f = (v, a)`. The position slope of each stage is
/// the velocity carried into that stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rk4;

impl Stepper for Rk4 {
    fn step(&self, oscillator: &Oscillator, t: f64, state: State, dt: f64) -> State {
        let half = dt / 2.0;

        let k1 = oscillator.derivative(t, state);
        let k2 = oscillator.derivative(t + half, state.step(&k1, half));
        let k3 = oscillator.derivative(t + half, state.step(&k2, half));
        let k4 = oscillator.derivative(t + dt, state.step(&k3, dt));

        let weighted =
            |s1: f64, s2: f64, s3: f64, s4: f64| (s1 + 2.0 * s2 + 2.0 * s3 + s4) * dt / 6.0;

        State {
            position: state.position
                + weighted(k1.position, k2.position, k3.position, k4.position),
            velocity: state.velocity
                + weighted(k1.velocity, k2.velocity, k3.velocity, k4.velocity),
        }
    }
}
