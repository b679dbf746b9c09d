use filament_core::{Checkpoint, Trajectory};

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Advanced to the end of the requested time span.
    ReachedEnd,
    /// Exhausted the wall-clock budget; resume from the checkpoint.
    TimedOut,
    /// The step size underflowed: adding it to the current time no longer
    /// changes the time at f64 precision. The dynamics are stiffer than
    /// the tolerance allows at the checkpoint time.
    StepSizeCollapsed,
    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an adaptive integration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// How the solver terminated.
    pub status: Status,

    /// Decimated record of the run. The first point is the start of
    /// integration; the last point always equals the checkpoint.
    pub trajectory: Trajectory,

    /// Final time and state, sufficient to resume integration.
    pub checkpoint: Checkpoint,

    /// Number of accepted steps.
    pub steps: usize,

    /// Number of rejected step attempts.
    pub rejected: usize,
}
