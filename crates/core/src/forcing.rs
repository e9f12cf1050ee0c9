//! External forcing `F(t)` applied to the oscillator.
//!
//! A [`Waveform`] is a closed set of forcing shapes, each carrying only the
//! parameters it needs. Parameters are validated when the waveform is built,
//! so [`Waveform::evaluate`] is total: it accepts any `t`, in any order, and
//! never fails.
//!
//! All values are SI: amplitude in newtons, duration in seconds, frequency in
//! hertz, and `t` in seconds.

use std::f64::consts::TAU;

use thiserror::Error;

use crate::constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive, finite};

/// Forcing shape tag, as selected by a caller before parameters are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WaveformKind {
    Rectangular,
    Triangular,
    Harmonic,
}

/// Errors that can occur when building a [`Waveform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForcingError {
    #[error("invalid forcing amplitude: {0}")]
    Amplitude(#[source] ConstraintError),

    #[error("invalid forcing duration: {0}")]
    Duration(#[source] ConstraintError),

    #[error("invalid forcing frequency: {0}")]
    Frequency(#[source] ConstraintError),
}

/// A validated forcing waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// Constant `amplitude` while `0 ≤ t ≤ duration`, zero elsewhere.
    Rectangular {
        amplitude: Constrained<f64, NonNegative>,
        duration: Constrained<f64, StrictlyPositive>,
    },

    /// Symmetric ramp from zero at `t = 0` up to `amplitude` at
    /// `t = duration / 2` and back to zero at `t = duration`; zero outside.
    Triangular {
        amplitude: Constrained<f64, NonNegative>,
        duration: Constrained<f64, StrictlyPositive>,
    },

    /// `amplitude · sin(2π · frequency · t)` for every `t`.
    Harmonic {
        amplitude: Constrained<f64, NonNegative>,
        frequency: Constrained<f64, StrictlyPositive>,
    },
}

impl Waveform {
    /// Creates a rectangular pulse.
    ///
    /// # Errors
    ///
    /// Fails if `amplitude` is negative or `duration` is not strictly positive,
    /// or if either is not finite.
    pub fn rectangular(amplitude: f64, duration: f64) -> Result<Self, ForcingError> {
        Ok(Self::Rectangular {
            amplitude: amplitude_of(amplitude)?,
            duration: duration_of(duration)?,
        })
    }

    /// Creates a triangular pulse.
    ///
    /// # Errors
    ///
    /// Fails if `amplitude` is negative or `duration` is not strictly positive,
    /// or if either is not finite.
    pub fn triangular(amplitude: f64, duration: f64) -> Result<Self, ForcingError> {
        Ok(Self::Triangular {
            amplitude: amplitude_of(amplitude)?,
            duration: duration_of(duration)?,
        })
    }

    /// Creates a harmonic (sinusoidal) forcing.
    ///
    /// # Errors
    ///
    /// Fails if `amplitude` is negative or `frequency` is not strictly positive,
    /// or if either is not finite.
    pub fn harmonic(amplitude: f64, frequency: f64) -> Result<Self, ForcingError> {
        let frequency = finite(frequency)
            .and_then(StrictlyPositive::new)
            .map_err(ForcingError::Frequency)?;
        Ok(Self::Harmonic {
            amplitude: amplitude_of(amplitude)?,
            frequency,
        })
    }

    /// Builds the waveform selected by `kind`.
    ///
    /// Only the parameter that `kind` uses is read: `duration` for the pulses,
    /// `frequency` for the harmonic. The other one is ignored and never
    /// validated.
    ///
    /// # Errors
    ///
    /// Fails if a parameter read by `kind` is invalid.
    pub fn from_kind(
        kind: WaveformKind,
        amplitude: f64,
        duration: f64,
        frequency: f64,
    ) -> Result<Self, ForcingError> {
        match kind {
            WaveformKind::Rectangular => Self::rectangular(amplitude, duration),
            WaveformKind::Triangular => Self::triangular(amplitude, duration),
            WaveformKind::Harmonic => Self::harmonic(amplitude, frequency),
        }
    }

    /// Returns the tag for this waveform.
    #[must_use]
    pub fn kind(&self) -> WaveformKind {
        match self {
            Self::Rectangular { .. } => WaveformKind::Rectangular,
            Self::Triangular { .. } => WaveformKind::Triangular,
            Self::Harmonic { .. } => WaveformKind::Harmonic,
        }
    }

    /// Returns the peak force in newtons.
    #[must_use]
    pub fn amplitude(&self) -> f64 {
        match self {
            Self::Rectangular { amplitude, .. }
            | Self::Triangular { amplitude, .. }
            | Self::Harmonic { amplitude, .. } => amplitude.get(),
        }
    }

    /// Evaluates the force at time `t`.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        match *self {
            Self::Rectangular {
                amplitude,
                duration,
            } => {
                if (0.0..=duration.get()).contains(&t) {
                    amplitude.get()
                } else {
                    0.0
                }
            }
            Self::Triangular {
                amplitude,
                duration,
            } => {
                if (0.0..=duration.get()).contains(&t) {
                    // Scaled by the half-width so the apex and both ends are exact.
                    let half = duration.get() / 2.0;
                    amplitude.get() * (1.0 - (t - half).abs() / half)
                } else {
                    0.0
                }
            }
            Self::Harmonic {
                amplitude,
                frequency,
            } => amplitude.get() * (TAU * frequency.get() * t).sin(),
        }
    }
}

fn amplitude_of(amplitude: f64) -> Result<Constrained<f64, NonNegative>, ForcingError> {
    finite(amplitude)
        .and_then(NonNegative::new)
        .map_err(ForcingError::Amplitude)
}

fn duration_of(duration: f64) -> Result<Constrained<f64, StrictlyPositive>, ForcingError> {
    finite(duration)
        .and_then(StrictlyPositive::new)
        .map_err(ForcingError::Duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const EPS: f64 = 1e-9;

    #[test]
    fn rectangular_is_amplitude_inside_and_zero_outside() {
        let f = Waveform::rectangular(2.0, 4.0).unwrap();

        assert_eq!(f.evaluate(0.0), 2.0);
        assert_eq!(f.evaluate(2.0), 2.0);
        assert_eq!(f.evaluate(4.0), 2.0);
        assert_eq!(f.evaluate(-EPS), 0.0);
        assert_eq!(f.evaluate(4.0 + EPS), 0.0);
        assert_eq!(f.evaluate(-100.0), 0.0);
    }

    #[test]
    fn triangular_ramps_up_and_down() {
        let f = Waveform::triangular(3.0, 2.0).unwrap();

        assert_eq!(f.evaluate(0.0), 0.0);
        assert_eq!(f.evaluate(1.0), 3.0);
        assert_eq!(f.evaluate(2.0), 0.0);
        assert_relative_eq!(f.evaluate(0.5), 1.5);
        assert_relative_eq!(f.evaluate(1.5), 1.5);
        assert_eq!(f.evaluate(-EPS), 0.0);
        assert_eq!(f.evaluate(2.0 + EPS), 0.0);
    }

    #[test]
    fn triangular_apex_is_exact_for_awkward_durations() {
        for duration in [0.1, 0.3, 0.7, 5.0, 9.9] {
            let f = Waveform::triangular(1.7, duration).unwrap();
            assert_eq!(f.evaluate(duration / 2.0), 1.7, "duration {duration}");
            assert_eq!(f.evaluate(duration), 0.0, "duration {duration}");
        }
    }

    #[test]
    fn triangular_is_symmetric_about_the_midpoint() {
        let f = Waveform::triangular(1.0, 5.0).unwrap();
        for offset in [0.1, 0.75, 1.3, 2.4] {
            assert_relative_eq!(
                f.evaluate(2.5 - offset),
                f.evaluate(2.5 + offset),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn harmonic_starts_at_zero_and_repeats_each_period() {
        let f = Waveform::harmonic(4.0, 1.25).unwrap();
        let period = 1.0 / 1.25;

        assert_eq!(f.evaluate(0.0), 0.0);
        assert_relative_eq!(f.evaluate(period / 4.0), 4.0, epsilon = 1e-12);
        for t in [-3.3, -0.2, 0.1, 0.77, 12.0] {
            assert_relative_eq!(f.evaluate(t), f.evaluate(t + period), epsilon = 1e-9);
        }
    }

    #[test]
    fn harmonic_is_defined_for_negative_time() {
        let f = Waveform::harmonic(1.0, 1.0).unwrap();
        assert_relative_eq!(f.evaluate(-0.25), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn evaluation_order_does_not_matter() {
        let f = Waveform::triangular(1.0, 1.0).unwrap();
        let forward: Vec<_> = [0.1, 0.5, 0.5, 0.9].iter().map(|&t| f.evaluate(t)).collect();
        let backward: Vec<_> = [0.9, 0.5, 0.5, 0.1].iter().map(|&t| f.evaluate(t)).collect();
        assert_eq!(forward, backward.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            Waveform::rectangular(-1.0, 1.0),
            Err(ForcingError::Amplitude(ConstraintError::Negative))
        );
        assert_eq!(
            Waveform::triangular(1.0, 0.0),
            Err(ForcingError::Duration(ConstraintError::Zero))
        );
        assert_eq!(
            Waveform::harmonic(1.0, -2.0),
            Err(ForcingError::Frequency(ConstraintError::Negative))
        );
        assert_eq!(
            Waveform::harmonic(f64::INFINITY, 1.0),
            Err(ForcingError::Amplitude(ConstraintError::NotFinite))
        );
        assert_eq!(
            Waveform::rectangular(1.0, f64::NAN),
            Err(ForcingError::Duration(ConstraintError::NotANumber))
        );
    }

    #[test]
    fn from_kind_ignores_the_unused_parameter() {
        let pulse = Waveform::from_kind(WaveformKind::Rectangular, 1.0, 2.0, -1.0).unwrap();
        assert_eq!(pulse.kind(), WaveformKind::Rectangular);

        let wave = Waveform::from_kind(WaveformKind::Harmonic, 1.0, 0.0, 3.0).unwrap();
        assert_eq!(wave.kind(), WaveformKind::Harmonic);
        assert_eq!(wave.amplitude(), 1.0);

        assert!(Waveform::from_kind(WaveformKind::Triangular, 1.0, 0.0, 3.0).is_err());
    }
}
