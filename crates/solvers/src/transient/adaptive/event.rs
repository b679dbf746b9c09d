/// Event emitted after each accepted step.
///
/// Every accepted step produces an event, including steps too fine to be
/// recorded in the trajectory. Rejected attempts are not observable; they
/// are retried internally with a smaller step.
#[derive(Debug)]
pub struct Event<'a> {
    /// Count of accepted steps so far (1-based).
    pub step: usize,
    /// Simulated time after the step.
    pub t: f64,
    /// State after the step, including any jump applied at this boundary.
    pub state: &'a [f64],
    /// Step size that produced this step.
    pub h: f64,
    /// Whether a jump fired at this step boundary.
    pub jumped: bool,
}
