//! The request record a presentation layer submits for each recomputation.
//!
//! A [`Request`] carries every knob the user can turn: forcing shape and
//! parameters, and the oscillator's physical constants. The grid and initial
//! state are optional and default to `0..5 s` in `0.05 s` steps, starting at
//! rest. Requests load from TOML or JSON:
//!
//! ```
//! use oscillate_solvers::Request;
//!
//! let request = Request::from_toml_str(
//!     r#"
//!     waveform_kind = "harmonic"
//!     forcing_amplitude = 1.0
//!     forcing_frequency = 0.5
//!     mass = 1.0
//!     damping = 0.2
//!     stiffness = 4.0
//!     "#,
//! )
//! .unwrap();
//!
//! let comparison = request.simulate().unwrap();
//! assert_eq!(comparison.euler.len(), 100);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use oscillate_core::{
    ForcingError, GridError, Oscillator, ParamsError, PhysicalParams, State, TimeGrid, Waveform,
    WaveformKind,
};

use crate::compare::{Comparison, compare};

/// Errors that can occur when loading or validating a [`Request`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Forcing(#[from] ForcingError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("invalid TOML request: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Time grid settings, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSpec {
    pub t0: f64,
    pub tf: f64,
    pub dt: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        let grid = TimeGrid::default();
        Self {
            t0: grid.start(),
            tf: grid.end(),
            dt: grid.step(),
        }
    }
}

/// One simulation request, in SI units.
///
/// Only one of `forcing_duration` and `forcing_frequency` is read, depending
/// on `waveform_kind`; the other may be missing or hold any value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    pub waveform_kind: WaveformKind,
    pub forcing_amplitude: f64,
    #[serde(default)]
    pub forcing_duration: f64,
    #[serde(default)]
    pub forcing_frequency: f64,
    pub mass: f64,
    pub damping: f64,
    pub stiffness: f64,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub initial: State,
}

impl Request {
    /// Parses a request from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Toml`] if the text is not a valid request.
    pub fn from_toml_str(text: &str) -> Result<Self, RequestError> {
        Ok(toml::from_str(text)?)
    }

    /// Parses a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Json`] if the text is not a valid request.
    pub fn from_json_str(text: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the forcing waveform selected by `waveform_kind`.
    ///
    /// # Errors
    ///
    /// Fails if a forcing parameter the kind uses is invalid.
    pub fn waveform(&self) -> Result<Waveform, ForcingError> {
        Waveform::from_kind(
            self.waveform_kind,
            self.forcing_amplitude,
            self.forcing_duration,
            self.forcing_frequency,
        )
    }

    /// Builds the oscillator: physical constants plus forcing.
    ///
    /// # Errors
    ///
    /// Fails if a physical or forcing parameter is invalid.
    pub fn oscillator(&self) -> Result<Oscillator, RequestError> {
        let params = PhysicalParams::from_si(self.mass, self.damping, self.stiffness)?;
        Ok(Oscillator::new(params, self.waveform()?))
    }

    /// Builds the time grid.
    ///
    /// # Errors
    ///
    /// Fails if the grid settings are invalid.
    pub fn time_grid(&self) -> Result<TimeGrid, GridError> {
        TimeGrid::new(self.grid.t0, self.grid.tf, self.grid.dt)
    }

    /// Validates the request and runs both schemes.
    ///
    /// Nothing is integrated unless every parameter is valid.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn simulate(&self) -> Result<Comparison, RequestError> {
        let oscillator = self.oscillator()?;
        let grid = self.time_grid()?;
        Ok(compare(&oscillator, &grid, self.initial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use oscillate_core::constraint::ConstraintError;

    fn rectangular() -> Request {
        Request {
            waveform_kind: WaveformKind::Rectangular,
            forcing_amplitude: 1.0,
            forcing_duration: 5.0,
            forcing_frequency: 1.0,
            mass: 1.0,
            damping: 0.0,
            stiffness: 1.0,
            grid: GridSpec::default(),
            initial: State::default(),
        }
    }

    #[test]
    fn toml_uses_defaults_for_grid_and_initial_state() {
        let request = Request::from_toml_str(
            r#"
            waveform_kind = "rectangular"
            forcing_amplitude = 1.0
            forcing_duration = 5.0
            mass = 1.0
            damping = 0.0
            stiffness = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(request.grid, GridSpec::default());
        assert_eq!(request.initial, State::default());
        assert_eq!(request.forcing_frequency, 0.0);
        assert_eq!(request.time_grid().unwrap(), TimeGrid::default());
    }

    #[test]
    fn toml_overrides_grid_and_initial_state() {
        let request = Request::from_toml_str(
            r#"
            waveform_kind = "triangular"
            forcing_amplitude = 2.0
            forcing_duration = 1.0
            mass = 1.0
            damping = 0.1
            stiffness = 1.0

            [grid]
            tf = 2.0
            dt = 0.1

            [initial]
            position = 0.5
            velocity = 0.0
            "#,
        )
        .unwrap();

        let comparison = request.simulate().unwrap();

        assert_eq!(comparison.rk4.len(), 20);
        assert_eq!(comparison.rk4.first().unwrap().state, State::new(0.5, 0.0));
    }

    #[test]
    fn json_round_trips() {
        let request = rectangular();
        let json = serde_json::to_string(&request).unwrap();

        assert_eq!(Request::from_json_str(&json).unwrap(), request);
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(
            Request::from_toml_str("waveform_kind = \"square\""),
            Err(RequestError::Toml(_))
        ));
        assert!(matches!(
            Request::from_json_str("{\"mass\": 1.0}"),
            Err(RequestError::Json(_))
        ));
    }

    #[test]
    fn unused_forcing_parameter_is_not_validated() {
        let request = Request {
            forcing_frequency: -10.0,
            ..rectangular()
        };
        assert!(request.simulate().is_ok());

        let request = Request {
            waveform_kind: WaveformKind::Harmonic,
            forcing_duration: f64::NAN,
            ..rectangular()
        };
        assert!(request.simulate().is_ok());
    }

    #[test]
    fn zero_mass_fails_before_stepping() {
        let request = Request {
            mass: 0.0,
            ..rectangular()
        };

        assert!(matches!(
            request.simulate(),
            Err(RequestError::Params(ParamsError::Mass(ConstraintError::Zero)))
        ));
    }

    #[test]
    fn invalid_grid_is_reported() {
        let request = Request {
            grid: GridSpec {
                dt: 0.0,
                ..GridSpec::default()
            },
            ..rectangular()
        };

        assert!(matches!(request.simulate(), Err(RequestError::Grid(_))));
    }

    #[test]
    fn output_serializes_for_plotting() {
        let comparison = rectangular().simulate().unwrap();
        let json = serde_json::to_value(&comparison).unwrap();

        assert_eq!(json["euler"]["time"].as_array().unwrap().len(), 100);
        assert_eq!(json["rk4"]["position"].as_array().unwrap().len(), 100);
    }
}
