use filament_core::Drift;

use super::{Proposal, Stepper};

/// First-order forward Euler:
///
/// ```text
/// y_{n+1} = y_n + drift(t_n, y_n) * h
/// ```
///
/// The error estimate is identically zero, so under the adaptive loop
/// every proposal is accepted and the step size grows until the
/// configured maximum: fixed stepping, one drift evaluation per step.
/// Useful for cheap previews and for tests that need exact arithmetic.
#[derive(Debug, Default, Clone, Copy)]
pub struct Euler;

impl Stepper for Euler {
    fn propose<D>(&self, drift: &D, t: f64, y: &[f64], h: f64) -> Proposal
    where
        D: Drift + ?Sized,
    {
        let mut dydt = vec![0.0; y.len()];
        drift.eval(t, y, &mut dydt);

        let y_next = y.iter().zip(&dydt).map(|(y, d)| y + d * h).collect();

        Proposal {
            y_next,
            error: vec![0.0; y.len()],
        }
    }
}
