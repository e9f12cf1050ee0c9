//! Explicit integrators for the forced mass-spring-damper, run side by side.
//!
//! # Modules
//!
//! - [`stepper`] — single-step schemes: [`Euler`] and [`Rk4`]
//! - [`simulate`] — drives a scheme across a [`TimeGrid`], with observers
//! - [`compare`] — runs every scheme on the same inputs
//! - [`request`] — the parameter record a front end submits, loadable from
//!   TOML or JSON
//!
//! [`TimeGrid`]: oscillate_core::TimeGrid

pub mod compare;
pub mod request;
pub mod simulate;
pub mod stepper;

mod trajectory;

pub use compare::{Comparison, compare};
pub use request::{GridSpec, Request, RequestError};
pub use stepper::{Euler, Rk4, Scheme, Stepper};
pub use trajectory::{Sample, Trajectory};
