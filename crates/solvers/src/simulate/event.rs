use crate::trajectory::Sample;

/// Event emitted by the simulator for each sample it produces.
///
/// Step 0 is the initial condition. Steps `1..n` follow each integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Index of the sample on the time grid.
    pub step: usize,

    /// The sample just produced.
    pub sample: Sample,
}
