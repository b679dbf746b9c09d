use filament_core::{Checkpoint, Observer};
use filament_solvers::transient::{
    DormandPrince,
    adaptive::{self, Action, Config, Event, Solution},
};

use crate::system::{Error, SystemModel};

/// Options for one `integrate` call.
///
/// Everything a call needs beyond the model itself: the time span, an
/// optional initial-state override, and the solver configuration. Defaults
/// flow from the model — when `y0` is `None`, the model's accumulated
/// initial values are used — and every field may be overridden per call,
/// which is what makes chunked, resumable simulation a matter of feeding a
/// prior checkpoint back in.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrateOptions {
    /// Time span to integrate over.
    pub t_span: [f64; 2],

    /// Initial state override.
    ///
    /// `None` uses the model's initial values. An override must match the
    /// model's dimension.
    pub y0: Option<Vec<f64>>,

    /// Solver configuration.
    pub solver: Config,
}

impl IntegrateOptions {
    /// Options for a fresh run over `[t_start, t_end]` with model
    /// defaults.
    #[must_use]
    pub fn new(t_start: f64, t_end: f64) -> Self {
        Self {
            t_span: [t_start, t_end],
            y0: None,
            solver: Config::default(),
        }
    }

    /// Options that continue a prior run from its checkpoint to `t_end`.
    #[must_use]
    pub fn from_checkpoint(checkpoint: &Checkpoint, t_end: f64) -> Self {
        Self {
            t_span: [checkpoint.t, t_end],
            y0: Some(checkpoint.state.clone()),
            solver: Config::default(),
        }
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: Config) -> Self {
        self.solver = solver;
        self
    }
}

impl SystemModel {
    /// Integrates the assembled system over the requested span.
    ///
    /// Seals the model on first call, then hands the aggregated drift and
    /// jump to the adaptive Dormand–Prince solver. The returned
    /// [`Solution`] carries the decimated trajectory, the termination
    /// status, and the checkpoint for resumption.
    ///
    /// # Errors
    ///
    /// Returns an error if a `y0` override does not match the model's
    /// dimension, or if the solver rejects the options before stepping.
    pub fn integrate(&self, options: &IntegrateOptions) -> Result<Solution, Error> {
        self.integrate_observed(options, ())
    }

    /// Integrates with an observer receiving accepted-step events.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as
    /// [`integrate`](Self::integrate).
    pub fn integrate_observed<Obs>(
        &self,
        options: &IntegrateOptions,
        observer: Obs,
    ) -> Result<Solution, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        self.seal();

        let y0 = match &options.y0 {
            Some(y0) => {
                if y0.len() != self.dim() {
                    return Err(Error::StateLength {
                        expected: self.dim(),
                        got: y0.len(),
                    });
                }
                y0.clone()
            }
            None => self.initial_values(),
        };

        let solution = adaptive::solve(
            &DormandPrince,
            self,
            self,
            &y0,
            options.t_span,
            &options.solver,
            observer,
        )?;

        Ok(solution)
    }
}
