use std::cell::Cell;

use thiserror::Error;

use filament_core::{Drift, Jump, JumpOutcome};
use filament_solvers::transient::adaptive;

use crate::slots::{Slot, SlotRange};

type DriftFn = Box<dyn Fn(f64, &[f64], &mut [f64])>;
type JumpFn = Box<dyn Fn(f64, &mut [f64]) -> JumpEffect>;

struct DriftEntry {
    owned: SlotRange,
    callback: DriftFn,
}

/// Signal returned by a registered jump callback.
///
/// A tagged signal instead of a truthy value: `Changed` means the callback
/// mutated the state it was handed, `Unchanged` means it left the state
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEffect {
    /// The callback did not touch the state.
    Unchanged,
    /// The callback mutated its owned slots.
    Changed,
}

/// Errors from assembling or launching an integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("initial state override has length {got}, expected {expected}")]
    StateLength { expected: usize, got: usize },

    #[error(transparent)]
    Solver(#[from] adaptive::Error),
}

/// A global hybrid system assembled from independently authored
/// components.
///
/// One instance per simulation: the model owns the initial-value list for
/// the shared state vector and the registered drift/jump callbacks, and
/// nothing else — simulation state lives in solver results, never in the
/// model, so `integrate` may be called repeatedly (for resumption or
/// parameter sweeps) against the same instance.
///
/// # Lifecycle
///
/// Created empty; components reserve slots and register callbacks during
/// setup; the first call to [`integrate`](Self::integrate) seals the state
/// layout. Reserving or registering after sealing is a programming error
/// in the component layer and panics — tolerating it would silently
/// corrupt slot ownership.
#[derive(Default)]
pub struct SystemModel {
    initial: Vec<f64>,
    drifts: Vec<DriftEntry>,
    jumps: Vec<JumpFn>,
    sealed: Cell<bool>,
}

impl SystemModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reserved state slots.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.initial.len()
    }

    /// Reserves the next sequential slot with an initial value.
    ///
    /// Slots are allocated in call order, starting at index 0, and are
    /// never reassigned. The caller keeps the returned [`Slot`] to read
    /// its value out of the full state in its own callbacks.
    ///
    /// # Panics
    ///
    /// Panics if called after the first `integrate`.
    pub fn add_state(&mut self, initial: f64) -> Slot {
        self.assert_open("add_state");
        let slot = Slot(self.initial.len());
        self.initial.push(initial);
        slot
    }

    /// Reserves a contiguous block of slots with initial values.
    ///
    /// # Panics
    ///
    /// Panics if called after the first `integrate`.
    pub fn add_states(&mut self, initials: &[f64]) -> SlotRange {
        self.assert_open("add_states");
        let range = SlotRange {
            start: self.initial.len(),
            len: initials.len(),
        };
        self.initial.extend_from_slice(initials);
        range
    }

    /// Registers a drift contribution for an owned range of slots.
    ///
    /// The callback is invoked as `f(t, state, derivative)` where `state`
    /// is the full state vector (readable anywhere) and `derivative` is a
    /// mutable view covering *only* the owned range, indexed from 0 — use
    /// [`SlotRange::offset`] to address individual slots in it. Writing
    /// outside the owned range is impossible by construction.
    ///
    /// Invocation order among registered callbacks is unspecified;
    /// correctness must not depend on it.
    ///
    /// # Panics
    ///
    /// Panics if called after the first `integrate`.
    pub fn register_drift<R, F>(&mut self, owned: R, callback: F)
    where
        R: Into<SlotRange>,
        F: Fn(f64, &[f64], &mut [f64]) + 'static,
    {
        self.assert_open("register_drift");
        self.drifts.push(DriftEntry {
            owned: owned.into(),
            callback: Box::new(callback),
        });
    }

    /// Registers a jump contribution.
    ///
    /// The callback is invoked as `f(t, state)` with a mutable view of the
    /// full state and reports whether it mutated anything. Callbacks must
    /// mutate only slots they own; reads may range anywhere.
    ///
    /// # Panics
    ///
    /// Panics if called after the first `integrate`.
    pub fn register_jump<F>(&mut self, callback: F)
    where
        F: Fn(f64, &mut [f64]) -> JumpEffect + 'static,
    {
        self.assert_open("register_jump");
        self.jumps.push(Box::new(callback));
    }

    /// Returns a copy of the accumulated initial values.
    ///
    /// Always a fresh copy: mutating the returned vector never affects the
    /// model's defaults.
    #[must_use]
    pub fn initial_values(&self) -> Vec<f64> {
        self.initial.clone()
    }

    pub(crate) fn seal(&self) {
        self.sealed.set(true);
    }

    fn assert_open(&self, operation: &str) {
        assert!(
            !self.sealed.get(),
            "{operation} called after integration started: the state layout is sealed"
        );
    }
}

/// The aggregated continuous dynamics: every registered drift callback
/// writes its contribution into its own restricted view of the shared
/// derivative vector.
impl Drift for SystemModel {
    fn eval(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt.fill(0.0);
        for entry in &self.drifts {
            let view = &mut dydt[entry.owned.start()..entry.owned.end()];
            (entry.callback)(t, y, view);
        }
    }
}

/// The aggregated discrete dynamics: every registered jump callback runs
/// against a scratch copy of the state; if at least one reports
/// [`JumpEffect::Changed`], the (possibly multiply-mutated) scratch state
/// is the outcome.
impl Jump for SystemModel {
    fn apply(&self, t: f64, y: &[f64]) -> JumpOutcome {
        let mut scratch = y.to_vec();
        let mut changed = false;
        for jump in &self.jumps {
            if jump(t, &mut scratch) == JumpEffect::Changed {
                changed = true;
            }
        }
        if changed {
            JumpOutcome::Changed(scratch)
        } else {
            JumpOutcome::Unchanged
        }
    }
}
