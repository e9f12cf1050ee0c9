//! Numeric constraints checked once, at construction.
//!
//! Every physical and numerical parameter in this crate carries an invariant:
//! mass is strictly positive, damping is non-negative, a time step is strictly
//! positive. Wrapping a value in [`Constrained<T, C>`] records that the check
//! has already happened, so code downstream of a constructor never re-validates
//! and the stepping loops have no error path.
//!
//! # Provided Constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//!
//! Both work with plain floats and with `uom` quantities.

mod non_negative;
mod strictly_positive;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value must be finite")]
    NotFinite,
}

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use oscillate_core::constraint::{Constrained, StrictlyPositive};
///
/// let mass = Constrained::<_, StrictlyPositive>::new(2.5).unwrap();
/// assert_eq!(mass.into_inner(), 2.5);
///
/// assert!(Constrained::<_, StrictlyPositive>::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    /// Returns a copy of the inner value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }
}

/// Returns a reference to the inner unconstrained value.
impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Rejects infinite floats before any ordering constraint is applied.
///
/// # Errors
///
/// Returns [`ConstraintError::NotANumber`] for NaN and
/// [`ConstraintError::NotFinite`] for either infinity.
pub fn finite(value: f64) -> Result<f64, ConstraintError> {
    if value.is_nan() {
        Err(ConstraintError::NotANumber)
    } else if value.is_infinite() {
        Err(ConstraintError::NotFinite)
    } else {
        Ok(value)
    }
}
