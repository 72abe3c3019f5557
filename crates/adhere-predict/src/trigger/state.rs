/// Lifecycle of one (user, habit) key. Terminal only on habit deletion,
/// which removes the state entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No model exists; entered at habit creation.
    #[default]
    Uninitialized,
    /// A model exists and is current.
    Trained,
    /// Enough new entries accumulated that the model needs a refit.
    Stale,
    /// A fit is in flight. Further requests for this key coalesce.
    Retraining,
}

/// Per-key trigger bookkeeping, kept in a DashMap entry.
#[derive(Debug, Default)]
pub(crate) struct KeyState {
    pub phase: Phase,
    /// Entries appended since the last successful fit.
    pub new_entries: u32,
    /// A retrain was requested while one was already in flight; re-evaluated
    /// when the in-flight fit completes.
    pub pending: bool,
    /// Phase to restore if the in-flight fit fails.
    pub resume_phase: Phase,
}
