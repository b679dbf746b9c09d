//! Numerical solvers for the Filament framework.
//!
//! # Solvers
//!
//! - [`transient`] — time integration of hybrid continuous/discrete
//!   systems: single-step schemes ([`transient::Euler`],
//!   [`transient::DormandPrince`]) and the adaptive control loop
//!   ([`transient::adaptive`]) that wraps them with error control, jump
//!   handling, output decimation, and cooperative timeout.

pub mod transient;
