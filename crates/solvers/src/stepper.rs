//! Explicit single-step integration schemes.
//!
//! A [`Stepper`] advances a [`State`] by one time increment. Every scheme gets
//! its derivatives from [`Oscillator::derivative`], so schemes differ only in
//! how they combine derivatives.
//!
//! # Schemes
//!
//! - [`Euler`] — explicit first-order Euler, global error `O(dt)`
//! - [`Rk4`] — classic fourth-order Runge-Kutta, global error `O(dt⁴)`
//!
//! Neither scheme has an error path. A step that overflows returns the
//! overflowed state.

mod euler;
mod rk4;

pub use euler::Euler;
pub use rk4::Rk4;

use std::fmt;

use oscillate_core::{Oscillator, State};

/// Advances an oscillator's state across one time step.
pub trait Stepper {
    /// Returns the state at `t + dt` given `state` at `t`.
    fn step(&self, oscillator: &Oscillator, t: f64, state: State, dt: f64) -> State;
}

/// The available integration schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Euler,
    Rk4,
}

impl Scheme {
    /// Every scheme, in comparison order.
    pub const ALL: [Scheme; 2] = [Scheme::Euler, Scheme::Rk4];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Euler => "Euler",
            Self::Rk4 => "RK4",
        }
    }

    /// Order of the global truncation error.
    #[must_use]
    pub fn order(self) -> u32 {
        match self {
            Self::Euler => 1,
            Self::Rk4 => 4,
        }
    }
}

impl Stepper for Scheme {
    fn step(&self, oscillator: &Oscillator, t: f64, state: State, dt: f64) -> State {
        match self {
            Self::Euler => Euler.step(oscillator, t, state, dt),
            Self::Rk4 => Rk4.step(oscillator, t, state, dt),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
