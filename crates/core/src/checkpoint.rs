/// The final time and full state of a run.
///
/// A checkpoint is sufficient to resume integration exactly: feed `state`
/// back as the initial state and `t` as the start time of a follow-up call
/// and the trajectory continues as if uninterrupted. Step-size adaptation
/// restarts from the configured maximum step on resumption, which is a
/// discontinuity in step-size history only, never in the trajectory values
/// at the checkpoint itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    /// Time of the last accepted step.
    pub t: f64,
    /// Full state at `t`.
    pub state: Vec<f64>,
}
