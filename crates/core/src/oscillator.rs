//! The forced, damped mass-spring-damper `M·x'' + b·x' + k·x = F(t)`.
//!
//! [`acceleration`] is the one place the equation of motion is written down.
//! Both integration schemes reach it through [`Oscillator::derivative`], so
//! they can only differ in how they step, never in the physics they step.

use std::f64::consts::TAU;

use thiserror::Error;
use uom::{
    si::{
        Quantity, ISQ, SI,
        acceleration::meter_per_second_squared,
        energy::joule,
        f64::{Acceleration, Energy, Force, Length, Mass, Velocity},
        force::newton,
        length::meter,
        mass::kilogram,
        velocity::meter_per_second,
    },
    typenum::{N1, N2, P1, Z0},
};

use crate::{
    constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive, finite},
    forcing::Waveform,
    step::StepIntegrable,
};

/// Viscous damping coefficient: force per unit velocity (N·s/m or kg/s).
pub type Damping = Quantity<ISQ<Z0, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Spring stiffness: force per unit length (N/m or kg/s²).
pub type Stiffness = Quantity<ISQ<Z0, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Errors that can occur when building [`PhysicalParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("invalid mass: {0}")]
    Mass(#[source] ConstraintError),

    #[error("invalid damping: {0}")]
    Damping(#[source] ConstraintError),

    #[error("invalid stiffness: {0}")]
    Stiffness(#[source] ConstraintError),
}

/// Physical constants of the oscillator.
///
/// Mass is strictly positive, damping and stiffness are non-negative, and all
/// three are finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParams {
    mass: Constrained<Mass, StrictlyPositive>,
    damping: Constrained<Damping, NonNegative>,
    stiffness: Constrained<Stiffness, NonNegative>,
}

impl PhysicalParams {
    /// Creates parameters from unit-safe quantities.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamsError`] naming the first invalid parameter.
    pub fn new(mass: Mass, damping: Damping, stiffness: Stiffness) -> Result<Self, ParamsError> {
        Self::from_si(mass.value, damping.value, stiffness.value)
    }

    /// Creates parameters from SI values: kg, kg/s, and N/m.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamsError`] naming the first invalid parameter.
    pub fn from_si(mass: f64, damping: f64, stiffness: f64) -> Result<Self, ParamsError> {
        let mass = finite(mass)
            .map(Mass::new::<kilogram>)
            .and_then(StrictlyPositive::new)
            .map_err(ParamsError::Mass)?;

        let damping = finite(damping)
            .map(|b| Force::new::<newton>(b) / Velocity::new::<meter_per_second>(1.0))
            .and_then(NonNegative::new)
            .map_err(ParamsError::Damping)?;

        let stiffness = finite(stiffness)
            .map(|k| Force::new::<newton>(k) / Length::new::<meter>(1.0))
            .and_then(NonNegative::new)
            .map_err(ParamsError::Stiffness)?;

        Ok(Self {
            mass,
            damping,
            stiffness,
        })
    }

    #[must_use]
    pub fn mass(&self) -> Mass {
        self.mass.get()
    }

    #[must_use]
    pub fn damping(&self) -> Damping {
        self.damping.get()
    }

    #[must_use]
    pub fn stiffness(&self) -> Stiffness {
        self.stiffness.get()
    }
}

/// Position (m) and velocity (m/s) of the mass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub position: f64,
    pub velocity: f64,
}

impl State {
    #[must_use]
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }
}

/// Time derivative of [`State`]: velocity (m/s) and acceleration (m/s²).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateDerivative {
    pub position: f64,
    pub velocity: f64,
}

impl StepIntegrable<f64> for State {
    type Derivative = StateDerivative;

    fn step(&self, derivative: &StateDerivative, dt: f64) -> Self {
        Self {
            position: self.position + derivative.position * dt,
            velocity: self.velocity + derivative.velocity * dt,
        }
    }
}

/// Acceleration of the mass at time `t`: `(F(t) − b·v − k·x) / M`.
///
/// Non-finite states are not an error; they flow through the arithmetic
/// unchanged.
#[must_use]
pub fn acceleration(t: f64, state: State, params: &PhysicalParams, waveform: &Waveform) -> f64 {
    let force = Force::new::<newton>(waveform.evaluate(t));
    let position = Length::new::<meter>(state.position);
    let velocity = Velocity::new::<meter_per_second>(state.velocity);

    let net: Force = force - params.damping() * velocity - params.stiffness() * position;
    let acceleration: Acceleration = net / params.mass();

    acceleration.get::<meter_per_second_squared>()
}

/// A forced oscillator: physical constants paired with a forcing waveform.
///
/// # Example
///
/// ```
/// use oscillate_core::{Oscillator, PhysicalParams, State, Waveform};
///
/// let params = PhysicalParams::from_si(2.0, 0.0, 8.0).unwrap();
/// let forcing = Waveform::rectangular(4.0, 1.0).unwrap();
/// let oscillator = Oscillator::new(params, forcing);
///
/// // (4 N − 8 N/m · 0.5 m) / 2 kg
/// assert_eq!(oscillator.acceleration(0.5, State::new(0.5, 0.0)), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    params: PhysicalParams,
    waveform: Waveform,
}

impl Oscillator {
    #[must_use]
    pub fn new(params: PhysicalParams, waveform: Waveform) -> Self {
        Self { params, waveform }
    }

    #[must_use]
    pub fn params(&self) -> &PhysicalParams {
        &self.params
    }

    #[must_use]
    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// See [`acceleration`].
    #[must_use]
    pub fn acceleration(&self, t: f64, state: State) -> f64 {
        acceleration(t, state, &self.params, &self.waveform)
    }

    /// Returns `(x', v') = (v, a)` at time `t`.
    #[must_use]
    pub fn derivative(&self, t: f64, state: State) -> StateDerivative {
        StateDerivative {
            position: state.velocity,
            velocity: self.acceleration(t, state),
        }
    }

    /// Mechanical energy `½M·v² + ½k·x²` in joules.
    #[must_use]
    pub fn energy(&self, state: State) -> f64 {
        let position = Length::new::<meter>(state.position);
        let velocity = Velocity::new::<meter_per_second>(state.velocity);

        let kinetic: Energy = 0.5 * self.params.mass() * velocity * velocity;
        let potential: Energy = 0.5 * self.params.stiffness() * position * position;

        (kinetic + potential).get::<joule>()
    }

    /// Undamped natural frequency `√(k/M) / 2π` in hertz.
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        (self.params.stiffness().value / self.params.mass().value).sqrt() / TAU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn unforced() -> Waveform {
        Waveform::rectangular(0.0, 1.0).unwrap()
    }

    #[test]
    fn params_from_quantities_match_si() {
        let typed = PhysicalParams::new(
            Mass::new::<kilogram>(4.0),
            Force::new::<newton>(0.5) / Velocity::new::<meter_per_second>(1.0),
            Force::new::<newton>(2.0) / Length::new::<meter>(1.0),
        )
        .unwrap();

        assert_eq!(typed, PhysicalParams::from_si(4.0, 0.5, 2.0).unwrap());
        assert_eq!(typed.mass().get::<kilogram>(), 4.0);
    }

    #[test]
    fn invalid_params_are_rejected() {
        assert_eq!(
            PhysicalParams::from_si(0.0, 1.0, 1.0),
            Err(ParamsError::Mass(ConstraintError::Zero))
        );
        assert_eq!(
            PhysicalParams::from_si(-1.0, 1.0, 1.0),
            Err(ParamsError::Mass(ConstraintError::Negative))
        );
        assert_eq!(
            PhysicalParams::from_si(1.0, -0.1, 1.0),
            Err(ParamsError::Damping(ConstraintError::Negative))
        );
        assert_eq!(
            PhysicalParams::from_si(1.0, 0.0, f64::NAN),
            Err(ParamsError::Stiffness(ConstraintError::NotANumber))
        );
        assert_eq!(
            PhysicalParams::from_si(f64::INFINITY, 0.0, 1.0),
            Err(ParamsError::Mass(ConstraintError::NotFinite))
        );
    }

    #[test]
    fn zero_damping_and_stiffness_are_allowed() {
        assert!(PhysicalParams::from_si(1.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn acceleration_at_rest_is_forcing_over_mass() {
        let params = PhysicalParams::from_si(2.0, 3.0, 5.0).unwrap();
        let forcing = Waveform::rectangular(6.0, 1.0).unwrap();

        let a = acceleration(0.5, State::default(), &params, &forcing);

        assert_eq!(a, 3.0);
    }

    #[test]
    fn acceleration_combines_every_term() {
        let params = PhysicalParams::from_si(2.0, 3.0, 5.0).unwrap();
        let forcing = Waveform::rectangular(6.0, 1.0).unwrap();
        let state = State::new(0.4, -1.0);

        // (6 − 3·(−1) − 5·0.4) / 2
        assert_relative_eq!(acceleration(0.5, state, &params, &forcing), 3.5);

        // Forcing has switched off.
        assert_relative_eq!(acceleration(1.5, state, &params, &forcing), 0.5);
    }

    #[test]
    fn derivative_pairs_velocity_with_acceleration() {
        let params = PhysicalParams::from_si(1.0, 0.0, 1.0).unwrap();
        let oscillator = Oscillator::new(params, unforced());

        let derivative = oscillator.derivative(0.0, State::new(2.0, 1.0));

        assert_eq!(
            derivative,
            StateDerivative {
                position: 1.0,
                velocity: -2.0
            }
        );
    }

    #[test]
    fn non_finite_state_propagates() {
        let params = PhysicalParams::from_si(1.0, 1.0, 1.0).unwrap();
        let oscillator = Oscillator::new(params, unforced());

        assert!(oscillator.acceleration(0.0, State::new(f64::INFINITY, 0.0)).is_infinite());
        assert!(oscillator.acceleration(0.0, State::new(f64::NAN, 0.0)).is_nan());
    }

    #[test]
    fn state_steps_along_derivative() {
        let state = State::new(1.0, 2.0);
        let derivative = StateDerivative {
            position: 2.0,
            velocity: -4.0,
        };

        assert_eq!(state.step(&derivative, 0.25), State::new(1.5, 1.0));
    }

    #[test]
    fn energy_sums_kinetic_and_potential() {
        let params = PhysicalParams::from_si(2.0, 0.0, 8.0).unwrap();
        let oscillator = Oscillator::new(params, unforced());

        assert_relative_eq!(oscillator.energy(State::new(0.0, 3.0)), 9.0);
        assert_relative_eq!(oscillator.energy(State::new(0.5, 0.0)), 1.0);
        assert_relative_eq!(oscillator.energy(State::new(0.5, 3.0)), 10.0);
    }

    #[test]
    fn natural_frequency_in_hertz() {
        let params = PhysicalParams::from_si(1.0, 0.0, TAU * TAU).unwrap();
        let oscillator = Oscillator::new(params, unforced());

        assert_relative_eq!(oscillator.natural_frequency(), 1.0, epsilon = 1e-12);
    }
}
