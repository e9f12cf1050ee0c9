/// A state that can be advanced along its derivative.
///
/// Explicit integrators only ever need one primitive from a state: "move
/// `delta` along this derivative". Euler applies it once per step; RK4 applies
/// it to build each intermediate stage. Keeping that primitive on the state
/// type means the steppers never reach into its fields.
///
/// `Delta` is the independent variable's increment, almost always a time step
/// in seconds.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns `self + derivative * delta`.
    #[must_use]
    fn step(&self, derivative: &Self::Derivative, delta: Delta) -> Self;
}
