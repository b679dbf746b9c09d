//! Time integration of hybrid continuous/discrete systems.
//!
//! A [`Stepper`] proposes one integration step together with a local error
//! estimate; the [`adaptive`] module wraps any stepper in step-size
//! control, discrete-jump application, decimated recording, and
//! cooperative timeout.
//!
//! # Steppers
//!
//! - [`DormandPrince`] — embedded 4th/5th-order Runge–Kutta, the default
//!   for production runs
//! - [`Euler`] — forward Euler with a zero error estimate, so the adaptive
//!   loop degenerates to fixed stepping at the configured maximum step

pub mod adaptive;

mod dormand_prince;
mod euler;
mod stepper;

pub use dormand_prince::DormandPrince;
pub use euler::Euler;
pub use stepper::{Proposal, Stepper};
