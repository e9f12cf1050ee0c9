/// Control actions an observer may return to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run and return the trajectory so far.
    StopEarly,
}
