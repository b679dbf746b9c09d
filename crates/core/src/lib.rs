//! Core traits and types for the Filament framework.
//!
//! This crate defines the shared abstractions that solvers, models, and
//! components build on:
//!
//! - [`Drift`] — the continuous right-hand side of a hybrid system
//! - [`Jump`] — a discrete transition applied at accepted-step boundaries,
//!   reporting [`JumpOutcome::Unchanged`] or [`JumpOutcome::Changed`]
//! - [`Trajectory`] — a decimated time/state record with point-wise and
//!   whole-trace observation views
//! - [`Checkpoint`] — the final time and state of a run, sufficient to
//!   resume integration
//! - [`Observer`] — receives solver events and optionally returns control
//!   actions

mod checkpoint;
mod observer;
mod system;
mod trajectory;

pub use checkpoint::Checkpoint;
pub use observer::Observer;
pub use system::{Drift, Jump, JumpOutcome};
pub use trajectory::Trajectory;
