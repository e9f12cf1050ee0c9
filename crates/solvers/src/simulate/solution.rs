use crate::trajectory::Trajectory;

/// Indicates how a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Produced every sample on the grid.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an observed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// Samples produced, starting with the initial condition.
    pub trajectory: Trajectory,

    /// Number of integration steps completed.
    pub steps: usize,
}
