use filament_core::Drift;

/// A proposed step from `t` to `t + h`.
#[derive(Debug, Clone)]
pub struct Proposal {
    /// Proposed state at `t + h`.
    pub y_next: Vec<f64>,
    /// Elementwise local error estimate for the proposal.
    ///
    /// An all-zero estimate means the scheme offers no error information
    /// and every proposal should be accepted as-is.
    pub error: Vec<f64>,
}

/// A single-step integration scheme with a local error estimate.
///
/// Steppers are stateless: the adaptive loop owns all bookkeeping and may
/// call [`propose`](Self::propose) any number of times at the same `t`
/// while it searches for an acceptable step size.
pub trait Stepper {
    /// Proposes the state at `t + h` from the state `y` at `t`.
    fn propose<D>(&self, drift: &D, t: f64, y: &[f64], h: f64) -> Proposal
    where
        D: Drift + ?Sized;
}
