//! Adaptive time integration with embedded error control.
//!
//! This module wraps any [`Stepper`] in the control loop that turns single
//! step proposals into a full trajectory: local-error step-size control,
//! discrete-jump application at accepted-step boundaries, decimated output
//! recording, and cooperative wall-clock timeout with exact resumption.
//!
//! # Algorithm
//!
//! 1. Start with `h = min(max_step, span)`; clamp every attempt so the
//!    step never overshoots the end of the span.
//! 2. Ask the stepper for a proposal and take the largest magnitude of its
//!    error estimate, `delta_max`.
//! 3. Propose the next step size `0.95 * h * (abs_tol / delta_max)^(1/5)`,
//!    clamped to grow by at most 10x and shrink by at most 5x per attempt,
//!    and clamped above by `max_step`.
//! 4. Accept the step iff `delta_max < abs_tol`; otherwise retry the same
//!    time with the smaller step. Rejections are silent.
//! 5. If the proposed next step no longer changes `t` when added to it at
//!    f64 precision, stop: the dynamics are stiffer than the tolerance
//!    allows at this time. This surfaces as
//!    [`Status::StepSizeCollapsed`], not an error — the trajectory so far
//!    is still valid.
//! 6. After each accepted step, apply the jump exactly once. A
//!    [`JumpOutcome::Changed`] state replaces the solver state wholesale
//!    and is not error-controlled.
//! 7. Record the (post-jump) point if at least `min_record_interval` of
//!    simulated time has passed since the last recorded point, or the end
//!    of the span is reached. The final checkpoint is always recorded.
//! 8. Emit an [`Event`] per accepted step; [`Action::StopEarly`] ends the
//!    run with a valid checkpoint. When a wall-clock `timeout` is
//!    configured and exceeded at a step boundary, the run ends with
//!    [`Status::TimedOut`] and resumes from the checkpoint bit-for-bit.
//!
//! # Example
//!
//! ```ignore
//! use filament_solvers::transient::{DormandPrince, adaptive};
//!
//! let solution = adaptive::solve_unobserved(
//!     &DormandPrince,
//!     &drift,
//!     &jump,
//!     &y0,
//!     [0.0, 100.0],
//!     &adaptive::Config::default(),
//! )?;
//!
//! match solution.status {
//!     adaptive::Status::ReachedEnd => { /* done */ }
//!     adaptive::Status::TimedOut => { /* resume from solution.checkpoint */ }
//!     _ => { /* inspect the partial trajectory */ }
//! }
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::Config;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use std::time::Instant;

use tracing::{debug, trace};

use filament_core::{Checkpoint, Drift, Jump, JumpOutcome, Observer, Trajectory};

use super::Stepper;

/// Step-size safety factor applied to every proposal.
const SAFETY: f64 = 0.95;
/// Largest per-attempt growth of the step size.
const MAX_GROWTH: f64 = 10.0;
/// Largest per-attempt shrink of the step size.
const MAX_SHRINK: f64 = 0.2;

/// Integrates a hybrid system over `t_span`.
///
/// The observer receives an [`Event`] after every accepted step (including
/// steps too fine to be recorded) and may return [`Action::StopEarly`] to
/// terminate with [`Status::StoppedByObserver`].
///
/// Numerical conditions never surface as errors: rejected steps are
/// retried internally, and step-size collapse and timeout are reported
/// through [`Solution::status`] so the trajectory computed so far is
/// always inspectable.
///
/// # Errors
///
/// Returns an error only for invalid inputs detected before stepping
/// begins: a bad config, a non-finite or reversed time span, or a
/// non-finite initial state.
pub fn solve<S, D, J, Obs>(
    stepper: &S,
    drift: &D,
    jump: &J,
    y0: &[f64],
    t_span: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    S: Stepper,
    D: Drift + ?Sized,
    J: Jump + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let [t_start, t_end] = t_span;
    for &value in &t_span {
        if !value.is_finite() {
            return Err(Error::NonFiniteSpan { value });
        }
    }
    if t_start > t_end {
        return Err(Error::ReversedSpan {
            start: t_start,
            end: t_end,
        });
    }
    for (slot, &value) in y0.iter().enumerate() {
        if !value.is_finite() {
            return Err(Error::NonFiniteState { slot, value });
        }
    }

    let clock = Instant::now();

    let mut t = t_start;
    let mut y = y0.to_vec();
    let mut h = config.max_step.min(t_end - t_start);

    let mut trajectory = Trajectory::new(y.len());
    trajectory.push(t, &y);
    let mut t_recorded = t;

    let mut steps = 0;
    let mut rejected = 0;

    if t >= t_end {
        return Ok(finish(
            Status::ReachedEnd,
            trajectory,
            t_recorded,
            t,
            y,
            steps,
            rejected,
        ));
    }

    loop {
        let reaches_end = t + h >= t_end;
        let h_attempt = if reaches_end { t_end - t } else { h };

        let proposal = stepper.propose(drift, t, &y, h_attempt);

        // Largest error magnitude, with NaN propagated rather than ignored
        // so a NaN-producing drift shrinks the step instead of passing the
        // acceptance test.
        let mut delta_max: f64 = 0.0;
        for e in &proposal.error {
            if e.is_nan() {
                delta_max = f64::NAN;
                break;
            }
            delta_max = delta_max.max(e.abs());
        }

        let factor = if delta_max > 0.0 {
            (SAFETY * (config.abs_tol / delta_max).powf(0.2)).clamp(MAX_SHRINK, MAX_GROWTH)
        } else if delta_max.is_nan() {
            MAX_SHRINK
        } else {
            MAX_GROWTH
        };
        h = (h_attempt * factor).min(config.max_step);

        if delta_max < config.abs_tol {
            t = if reaches_end { t_end } else { t + h_attempt };
            y = proposal.y_next;
            steps += 1;

            // Discrete transitions fire at accepted-step boundaries only,
            // after the continuous update.
            let jumped = match jump.apply(t, &y) {
                JumpOutcome::Changed(state) => {
                    y = state;
                    true
                }
                JumpOutcome::Unchanged => false,
            };

            if reaches_end || t - t_recorded >= config.min_record_interval {
                trajectory.push(t, &y);
                t_recorded = t;
            }

            let event = Event {
                step: steps,
                t,
                state: &y,
                h: h_attempt,
                jumped,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(finish(
                    Status::StoppedByObserver,
                    trajectory,
                    t_recorded,
                    t,
                    y,
                    steps,
                    rejected,
                ));
            }

            if reaches_end {
                return Ok(finish(
                    Status::ReachedEnd,
                    trajectory,
                    t_recorded,
                    t,
                    y,
                    steps,
                    rejected,
                ));
            }

            if let Some(timeout) = config.timeout {
                if clock.elapsed() >= timeout {
                    return Ok(finish(
                        Status::TimedOut,
                        trajectory,
                        t_recorded,
                        t,
                        y,
                        steps,
                        rejected,
                    ));
                }
            }
        } else {
            rejected += 1;
            trace!(t, h = h_attempt, delta_max, "step rejected");
        }

        // Degeneracy guard: the next attempt would not move time at all.
        // Deliberately an exact comparison, not an epsilon — "the addition
        // has no effect at f64 precision" is the condition.
        if t + h == t {
            return Ok(finish(
                Status::StepSizeCollapsed,
                trajectory,
                t_recorded,
                t,
                y,
                steps,
                rejected,
            ));
        }
    }
}

/// Integrates without observation.
///
/// A convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<S, D, J>(
    stepper: &S,
    drift: &D,
    jump: &J,
    y0: &[f64],
    t_span: [f64; 2],
    config: &Config,
) -> Result<Solution, Error>
where
    S: Stepper,
    D: Drift + ?Sized,
    J: Jump + ?Sized,
{
    solve(stepper, drift, jump, y0, t_span, config, ())
}

fn finish(
    status: Status,
    mut trajectory: Trajectory,
    t_recorded: f64,
    t: f64,
    y: Vec<f64>,
    steps: usize,
    rejected: usize,
) -> Solution {
    // The checkpoint is always the last recorded point, even when it lands
    // closer to its predecessor than the record interval.
    if t > t_recorded {
        trajectory.push(t, &y);
    }

    debug!(?status, steps, rejected, t, "integration finished");

    Solution {
        status,
        trajectory,
        checkpoint: Checkpoint { t, state: y },
        steps,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, time::Duration};

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use filament_core::JumpOutcome;

    use crate::transient::{DormandPrince, Euler, Proposal};

    use super::*;

    /// Stub stepper that triples the state and claims a perfect estimate.
    struct Tripler;

    impl Stepper for Tripler {
        fn propose<D>(&self, _drift: &D, _t: f64, y: &[f64], _h: f64) -> Proposal
        where
            D: Drift + ?Sized,
        {
            Proposal {
                y_next: y.iter().map(|y| 3.0 * y).collect(),
                error: vec![0.0; y.len()],
            }
        }
    }

    /// Stub stepper whose proposals always fail the error test.
    struct Hopeless;

    impl Stepper for Hopeless {
        fn propose<D>(&self, _drift: &D, _t: f64, y: &[f64], _h: f64) -> Proposal
        where
            D: Drift + ?Sized,
        {
            Proposal {
                y_next: y.to_vec(),
                error: vec![f64::INFINITY; y.len()],
            }
        }
    }

    fn growth(_t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = 3.0 * y[0];
    }

    fn constant_three(_t: f64, _y: &[f64], dydt: &mut [f64]) {
        dydt[0] = 3.0;
    }

    fn constant_two(_t: f64, _y: &[f64], dydt: &mut [f64]) {
        dydt[0] = 2.0;
    }

    fn decay(_t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = -y[0];
    }

    fn oscillator(_t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = y[1];
        dydt[1] = -y[0];
    }

    fn fixed_step(max_step: f64) -> Config {
        Config {
            max_step,
            ..Config::default()
        }
    }

    #[test]
    fn stubbed_stepper_drives_the_loop() {
        let config = fixed_step(0.5);
        let solution =
            solve_unobserved(&Tripler, &growth, &(), &[1.0], [0.0, 1.0], &config).unwrap();

        assert_eq!(solution.status, Status::ReachedEnd);
        assert_eq!(solution.trajectory.times(), &[0.0, 0.5, 1.0]);
        assert_eq!(solution.trajectory.column(0), &[1.0, 3.0, 9.0]);
        assert_eq!(solution.steps, 2);
        assert_eq!(solution.checkpoint.t, 1.0);
        assert_eq!(solution.checkpoint.state, vec![9.0]);
    }

    #[test]
    fn jump_driven_sawtooth() {
        let reset = |_t: f64, y: &[f64]| {
            if y[0] >= 10.0 {
                JumpOutcome::Changed(vec![y[0] - 10.0])
            } else {
                JumpOutcome::Unchanged
            }
        };

        let config = fixed_step(1.0);
        let solution =
            solve_unobserved(&Euler, &constant_three, &reset, &[1.0], [0.0, 10.0], &config)
                .unwrap();

        assert_eq!(solution.status, Status::ReachedEnd);
        assert_eq!(
            solution.trajectory.column(0),
            &[1.0, 4.0, 7.0, 0.0, 3.0, 6.0, 9.0, 2.0, 5.0, 8.0, 1.0]
        );
    }

    #[test]
    fn events_report_jumps() {
        let reset = |_t: f64, y: &[f64]| {
            if y[0] >= 10.0 {
                JumpOutcome::Changed(vec![y[0] - 10.0])
            } else {
                JumpOutcome::Unchanged
            }
        };

        let mut jump_times = Vec::new();
        let observer = |event: &Event<'_>| {
            if event.jumped {
                jump_times.push(event.t);
            }
            None::<Action>
        };

        let config = fixed_step(1.0);
        solve(&Euler, &constant_three, &reset, &[1.0], [0.0, 10.0], &config, observer).unwrap();

        assert_eq!(jump_times, vec![3.0, 7.0, 10.0]);
    }

    #[test]
    fn fixed_step_resumption_is_bitwise() {
        let config = fixed_step(0.25);

        let whole =
            solve_unobserved(&Euler, &decay, &(), &[1.0], [0.0, 1.0], &config).unwrap();

        let first =
            solve_unobserved(&Euler, &decay, &(), &[1.0], [0.0, 0.5], &config).unwrap();
        let second = solve_unobserved(
            &Euler,
            &decay,
            &(),
            &first.checkpoint.state,
            [first.checkpoint.t, 1.0],
            &config,
        )
        .unwrap();

        assert_eq!(first.checkpoint.t, 0.5);
        assert_eq!(second.checkpoint.t, whole.checkpoint.t);
        assert_eq!(second.checkpoint.state, whole.checkpoint.state);
    }

    #[test]
    fn adaptive_resumption_agrees_with_one_shot() {
        let config = Config {
            abs_tol: 1e-9,
            ..Config::default()
        };

        let whole =
            solve_unobserved(&DormandPrince, &decay, &(), &[1.0], [0.0, 2.0], &config).unwrap();

        let first =
            solve_unobserved(&DormandPrince, &decay, &(), &[1.0], [0.0, 0.8], &config).unwrap();
        let second = solve_unobserved(
            &DormandPrince,
            &decay,
            &(),
            &first.checkpoint.state,
            [first.checkpoint.t, 2.0],
            &config,
        )
        .unwrap();

        assert_eq!(first.checkpoint.t, 0.8);
        assert_relative_eq!(
            second.checkpoint.state[0],
            whole.checkpoint.state[0],
            epsilon = 1e-7
        );
    }

    #[test]
    fn dormand_prince_tracks_known_solutions() {
        let config = Config {
            abs_tol: 1e-9,
            ..Config::default()
        };

        let solution =
            solve_unobserved(&DormandPrince, &decay, &(), &[1.0], [0.0, 1.0], &config).unwrap();
        assert_eq!(solution.status, Status::ReachedEnd);
        assert_abs_diff_eq!(solution.checkpoint.state[0], (-1.0_f64).exp(), epsilon = 1e-6);

        let solution = solve_unobserved(
            &DormandPrince,
            &oscillator,
            &(),
            &[1.0, 0.0],
            [0.0, 1.0],
            &config,
        )
        .unwrap();
        assert_abs_diff_eq!(solution.checkpoint.state[0], 1.0_f64.cos(), epsilon = 1e-6);
        assert_abs_diff_eq!(solution.checkpoint.state[1], -1.0_f64.sin(), epsilon = 1e-6);
    }

    #[test]
    fn recording_is_decimated() {
        let config = Config {
            max_step: 0.1,
            min_record_interval: 0.25,
            ..Config::default()
        };
        let solution =
            solve_unobserved(&Euler, &constant_two, &(), &[0.0], [0.0, 1.0], &config).unwrap();

        let times = solution.trajectory.times();
        assert!(times.len() > 2);
        for pair in times.windows(2).rev().skip(1) {
            assert!(pair[1] - pair[0] >= 0.25);
        }
        assert_relative_eq!(*times.last().unwrap(), 1.0);
    }

    #[test]
    fn hopeless_error_estimates_collapse_the_step() {
        let solution = solve_unobserved(
            &Hopeless,
            &constant_two,
            &(),
            &[1.0],
            [0.0, 1.0],
            &Config::default(),
        )
        .unwrap();

        assert_eq!(solution.status, Status::StepSizeCollapsed);
        assert_eq!(solution.steps, 0);
        assert!(solution.rejected > 0);
        // The partial trajectory is still valid: the initial point.
        assert_eq!(solution.trajectory.times(), &[0.0]);
        assert_eq!(solution.checkpoint.t, 0.0);
    }

    #[test]
    fn nan_drift_collapses_instead_of_looping() {
        fn poison(_t: f64, _y: &[f64], dydt: &mut [f64]) {
            dydt[0] = f64::NAN;
        }

        let solution = solve_unobserved(
            &DormandPrince,
            &poison,
            &(),
            &[1.0],
            [0.0, 1.0],
            &Config::default(),
        )
        .unwrap();

        assert_eq!(solution.status, Status::StepSizeCollapsed);
    }

    #[test]
    fn zero_timeout_pauses_after_first_step_and_resumes() {
        let config = Config {
            max_step: 0.25,
            timeout: Some(Duration::ZERO),
            ..Config::default()
        };
        let paused =
            solve_unobserved(&Euler, &constant_two, &(), &[0.0], [0.0, 1.0], &config).unwrap();

        assert_eq!(paused.status, Status::TimedOut);
        assert_eq!(paused.checkpoint.t, 0.25);
        assert_eq!(
            *paused.trajectory.times().last().unwrap(),
            paused.checkpoint.t
        );

        let resumed = solve_unobserved(
            &Euler,
            &constant_two,
            &(),
            &paused.checkpoint.state,
            [paused.checkpoint.t, 1.0],
            &fixed_step(0.25),
        )
        .unwrap();

        assert_eq!(resumed.status, Status::ReachedEnd);
        assert_eq!(resumed.checkpoint.t, 1.0);
        assert_relative_eq!(resumed.checkpoint.state[0], 2.0);
    }

    #[test]
    fn jump_fires_once_per_accepted_step() {
        let calls = Cell::new(0);
        let counting = |_t: f64, _y: &[f64]| {
            calls.set(calls.get() + 1);
            JumpOutcome::Unchanged
        };

        let solution = solve_unobserved(
            &DormandPrince,
            &decay,
            &counting,
            &[1.0],
            [0.0, 1.0],
            &Config::default(),
        )
        .unwrap();

        assert_eq!(calls.get(), solution.steps);
    }

    #[test]
    fn observer_can_stop_early() {
        struct StopAfter(usize);

        impl<'a> Observer<Event<'a>, Action> for StopAfter {
            fn observe(&mut self, event: &Event<'a>) -> Option<Action> {
                (event.step >= self.0).then_some(Action::StopEarly)
            }
        }

        let config = fixed_step(0.1);
        let solution = solve(
            &Euler,
            &constant_two,
            &(),
            &[0.0],
            [0.0, 10.0],
            &config,
            StopAfter(5),
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert!(solution.checkpoint.t < 10.0);
    }

    #[test]
    fn zero_width_span_records_a_single_point() {
        let solution = solve_unobserved(
            &DormandPrince,
            &decay,
            &(),
            &[4.0],
            [2.0, 2.0],
            &Config::default(),
        )
        .unwrap();

        assert_eq!(solution.status, Status::ReachedEnd);
        assert_eq!(solution.trajectory.times(), &[2.0]);
        assert_eq!(solution.checkpoint.t, 2.0);
        assert_eq!(solution.checkpoint.state, vec![4.0]);
    }

    #[test]
    fn invalid_inputs_are_rejected_up_front() {
        let config = Config {
            abs_tol: 0.0,
            ..Config::default()
        };
        let result = solve_unobserved(&Euler, &decay, &(), &[1.0], [0.0, 1.0], &config);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));

        let result =
            solve_unobserved(&Euler, &decay, &(), &[1.0], [1.0, 0.0], &Config::default());
        assert!(matches!(result, Err(Error::ReversedSpan { .. })));

        let result = solve_unobserved(
            &Euler,
            &decay,
            &(),
            &[f64::NAN],
            [0.0, 1.0],
            &Config::default(),
        );
        assert!(matches!(result, Err(Error::NonFiniteState { slot: 0, .. })));
    }
}
