use thiserror::Error;

/// Errors detected before integration begins.
///
/// Once stepping starts, nothing is reported through `Err`: numerical
/// conditions (step-size collapse, timeout) surface as
/// [`Status`](super::Status) variants so the partial trajectory stays
/// inspectable.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("time span contains non-finite value: {value}")]
    NonFiniteSpan { value: f64 },

    #[error("time span is reversed: start {start} is after end {end}")]
    ReversedSpan { start: f64, end: f64 },

    #[error("initial state slot {slot} is non-finite: {value}")]
    NonFiniteState { slot: usize, value: f64 },
}
