//! Core types for simulating a forced, damped mass-spring-damper.
//!
//! This crate defines everything an integrator needs to know about the system
//! being integrated, and nothing about how it is integrated:
//!
//! - [`Waveform`] — the external forcing `F(t)`
//! - [`PhysicalParams`] and [`Oscillator`] — mass, damping, stiffness, and the
//!   shared equation of motion
//! - [`State`] — position and velocity, stepped via [`StepIntegrable`]
//! - [`TimeGrid`] — the uniform grid every scheme runs on
//! - [`Observer`] — receives simulation events and optionally returns actions
//!
//! All invalid configuration is rejected by constructors; once built, every
//! value here is valid for the rest of its life.

pub mod constraint;
pub mod forcing;
pub mod grid;
pub mod oscillator;

mod observer;
mod step;

pub use forcing::{ForcingError, Waveform, WaveformKind};
pub use grid::{GridError, TimeGrid};
pub use observer::Observer;
pub use oscillator::{
    Damping, Oscillator, ParamsError, PhysicalParams, State, StateDerivative, Stiffness,
    acceleration,
};
pub use step::StepIntegrable;
