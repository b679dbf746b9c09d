/// The continuous right-hand side of a hybrid system.
///
/// A drift computes `dy/dt` for the full state vector at a given time. The
/// adaptive solver evaluates it several times per attempted step (once per
/// Runge–Kutta stage), so implementations must be pure functions of
/// `(t, y)`: no side effects, and repeated evaluations at the same point
/// must agree.
pub trait Drift {
    /// Writes the state derivative at `(t, y)` into `dydt`.
    ///
    /// `dydt` has the same length as `y` and arrives zeroed or holding a
    /// previous evaluation; implementations must write every slot they are
    /// responsible for.
    fn eval(&self, t: f64, y: &[f64], dydt: &mut [f64]);
}

impl<F> Drift for F
where
    F: Fn(f64, &[f64], &mut [f64]),
{
    fn eval(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        self(t, y, dydt);
    }
}

/// Outcome of applying a discrete transition to a state vector.
///
/// A tagged result rather than a truthy value: `Changed` carries the full
/// replacement state, so a caller never has to guess whether a returned
/// vector means "new state" or merely "something happened."
#[derive(Debug, Clone, PartialEq)]
pub enum JumpOutcome {
    /// No transition fired; the caller keeps its current state.
    Unchanged,
    /// At least one transition fired; this state replaces the current one.
    Changed(Vec<f64>),
}

impl JumpOutcome {
    /// Returns `true` if a transition fired.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// A discrete, instantaneous state transition evaluated at accepted-step
/// boundaries.
///
/// Jumps encode resets and threshold crossings: "if the voltage exceeds
/// threshold, reset it." The solver applies a jump at most once per
/// accepted step, after the continuous update and never during stage
/// evaluation. A [`JumpOutcome::Changed`] state replaces the solver's state
/// wholesale and is not subject to error control.
pub trait Jump {
    /// Evaluates the transition at `(t, y)`.
    fn apply(&self, t: f64, y: &[f64]) -> JumpOutcome;
}

/// The trivial jump: no discrete dynamics.
impl Jump for () {
    fn apply(&self, _t: f64, _y: &[f64]) -> JumpOutcome {
        JumpOutcome::Unchanged
    }
}

impl<F> Jump for F
where
    F: Fn(f64, &[f64]) -> JumpOutcome,
{
    fn apply(&self, t: f64, y: &[f64]) -> JumpOutcome {
        self(t, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decay(_t: f64, y: &[f64], dydt: &mut [f64]) {
        for (d, y) in dydt.iter_mut().zip(y) {
            *d = -y;
        }
    }

    #[test]
    fn closures_and_fns_are_drifts() {
        let mut dydt = [0.0; 2];
        decay.eval(0.0, &[2.0, -4.0], &mut dydt);
        assert_eq!(dydt, [-2.0, 4.0]);
    }

    #[test]
    fn unit_jump_never_fires() {
        assert_eq!(().apply(1.0, &[10.0]), JumpOutcome::Unchanged);
    }

    #[test]
    fn closure_jump_reports_replacement_state() {
        let reset = |_t: f64, y: &[f64]| {
            if y[0] >= 1.0 {
                JumpOutcome::Changed(vec![0.0])
            } else {
                JumpOutcome::Unchanged
            }
        };

        assert_eq!(reset.apply(0.0, &[0.5]), JumpOutcome::Unchanged);

        let outcome = reset.apply(0.0, &[1.5]);
        assert!(outcome.is_changed());
        assert_eq!(outcome, JumpOutcome::Changed(vec![0.0]));
    }
}
