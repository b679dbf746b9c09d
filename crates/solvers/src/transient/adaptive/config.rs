use std::time::Duration;

/// Configuration for the adaptive transient solver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Largest step size the controller may adopt.
    ///
    /// May be infinite, in which case only the remaining span bounds the
    /// step. Resumed runs restart step-size adaptation from this value.
    pub max_step: f64,

    /// Minimum simulated-time spacing between recorded points.
    ///
    /// Internal steps finer than this are integrated but not recorded,
    /// which bounds trajectory size independently of how small the solver
    /// steps internally. The final point is always recorded, so the last
    /// recorded pair may be closer together than this.
    pub min_record_interval: f64,

    /// Absolute tolerance on the per-step local error estimate.
    pub abs_tol: f64,

    /// Wall-clock budget for a single call.
    ///
    /// Checked at accepted-step boundaries; when exceeded, the solver
    /// returns `Status::TimedOut` with a checkpoint from which a follow-up
    /// call continues the trajectory. `None` means run to completion.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_step: f64::INFINITY,
            min_record_interval: 0.0,
            abs_tol: 1e-6,
            timeout: None,
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_step` is not positive, or if a tolerance
    /// is negative or non-finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            return Err("max_step must be positive");
        }
        if !self.min_record_interval.is_finite() || self.min_record_interval < 0.0 {
            return Err("min_record_interval must be finite and non-negative");
        }
        if !self.abs_tol.is_finite() || self.abs_tol <= 0.0 {
            return Err("abs_tol must be finite and positive");
        }
        Ok(())
    }
}
