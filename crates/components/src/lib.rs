//! Biophysical components for the Filament framework.
//!
//! Each component reserves its own slots in a
//! [`SystemModel`](filament_model::SystemModel) and registers the drift
//! (and, where it has discrete dynamics, jump) callbacks that animate
//! them. Components read anything in the full state vector but write only
//! the slots they own; the handle a component returns from `attach` is how
//! other components and observables find its slots.
//!
//! - [`LifMembrane`] — leaky integrate-and-fire membrane: continuous leak
//!   toward rest plus a threshold-reset jump
//! - [`GradedSynapse`] — conductance that relaxes toward a sigmoid of its
//!   presynaptic membrane's voltage, entirely continuous

mod membrane;
mod synapse;

pub use membrane::{LifMembrane, MembraneHandle};
pub use synapse::{GradedSynapse, SynapseHandle};
