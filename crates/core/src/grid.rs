//! Time grids shared by every integration scheme.

use thiserror::Error;

use crate::constraint::{ConstraintError, StrictlyPositive, finite};

/// Largest sample count a grid may hold.
pub const MAX_SAMPLES: usize = 1 << 24;

/// Errors that can occur when building a [`TimeGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("invalid start time: {0}")]
    Start(#[source] ConstraintError),

    #[error("invalid end time: {0}")]
    End(#[source] ConstraintError),

    #[error("invalid time step: {0}")]
    Step(#[source] ConstraintError),

    #[error("end time {tf} s must be after start time {t0} s")]
    EmptySpan { t0: f64, tf: f64 },

    #[error("time step {dt} s does not fit in a {span} s span")]
    TooFewSamples { span: f64, dt: f64 },

    #[error("grid would hold {0} samples, more than the maximum allowed")]
    TooManySamples(f64),
}

/// `n` evenly spaced sample times from `t0` to `tf` inclusive, stepped by `dt`.
///
/// The sample count is `n = floor((tf − t0) / dt)` and is always at least one.
/// Sample `i` sits at `t0 + (tf − t0)·i/(n − 1)` and the last sample is `tf`
/// exactly. A one-sample grid holds only `t0`.
///
/// `dt` is the integration increment. It is not the sample spacing: the
/// schemes step the state by `dt` while forcing is evaluated at the sample
/// times, so `(tf − t0)/(n − 1)` and `dt` differ whenever `dt` does not
/// divide the span into `n − 1` steps.
///
/// # Example
///
/// ```
/// use oscillate_core::TimeGrid;
///
/// let grid = TimeGrid::new(0.0, 1.0, 0.25).unwrap();
///
/// assert_eq!(grid.len(), 4);
/// assert_eq!(grid.step(), 0.25);
/// assert_eq!(grid.time(0), 0.0);
/// assert_eq!(grid.time(3), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeGrid {
    t0: f64,
    tf: f64,
    dt: f64,
    samples: usize,
}

impl TimeGrid {
    /// Creates a grid from `t0` to `tf` with step `dt`, all in seconds.
    ///
    /// # Errors
    ///
    /// Fails if any value is not finite, if `dt` is not strictly positive,
    /// if `tf ≤ t0`, or if the span holds no whole step.
    pub fn new(t0: f64, tf: f64, dt: f64) -> Result<Self, GridError> {
        let t0 = finite(t0).map_err(GridError::Start)?;
        let tf = finite(tf).map_err(GridError::End)?;
        let dt = finite(dt)
            .and_then(StrictlyPositive::new)
            .map_err(GridError::Step)?
            .into_inner();

        if tf <= t0 {
            return Err(GridError::EmptySpan { t0, tf });
        }

        let span = tf - t0;
        let steps = (span / dt).floor();
        if steps < 1.0 {
            return Err(GridError::TooFewSamples { span, dt });
        }
        if steps > MAX_SAMPLES as f64 {
            return Err(GridError::TooManySamples(steps));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let samples = steps as usize;

        Ok(Self {
            t0,
            tf,
            dt,
            samples,
        })
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.t0
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.tf
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.dt
    }

    /// Number of samples, `n`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples
    }

    /// Always `false`; a valid grid holds at least one sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Time of sample `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time(&self, index: usize) -> f64 {
        if self.samples == 1 || index == 0 {
            return self.t0;
        }
        if index == self.samples - 1 {
            return self.tf;
        }
        let spacing = (self.tf - self.t0) / (self.samples - 1) as f64;
        index as f64 * spacing + self.t0
    }

    /// Iterates over every sample time in order.
    pub fn times(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.samples).map(|i| self.time(i))
    }
}

/// The default request grid: 0 s to 5 s in 0.05 s steps, 100 samples.
impl Default for TimeGrid {
    fn default() -> Self {
        let (t0, tf, dt): (f64, f64, f64) = (0.0, 5.0, 0.05);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let samples = ((tf - t0) / dt).floor() as usize;
        Self {
            t0,
            tf,
            dt,
            samples,
        }
    }
}
