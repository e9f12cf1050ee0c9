/// Receives simulation events and decides whether the run should continue.
///
/// Observers let callers watch a run as it happens (printing progress,
/// collecting diagnostics, stopping once a blow-up is visible) without
/// changing the simulator's API.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// simulator-specific action and `None` lets the run continue unchanged.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
