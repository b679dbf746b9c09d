//! Component model for the Filament framework.
//!
//! A [`SystemModel`] assembles one global hybrid system out of
//! independently authored components. During setup, each component
//! reserves slots in the shared state vector ([`SystemModel::add_state`],
//! [`SystemModel::add_states`]) and registers the callbacks that give
//! those slots dynamics ([`SystemModel::register_drift`],
//! [`SystemModel::register_jump`]). Slot ownership is structural: the
//! returned [`Slot`]/[`SlotRange`] tokens cannot be forged, and a drift
//! callback only ever receives a mutable view of the derivative slots it
//! owns.
//!
//! Once assembled, [`SystemModel::integrate`] hands the aggregated system
//! to the adaptive solver. The model itself holds no simulation state
//! between calls — results and resumption checkpoints live in the returned
//! [`Solution`], so chunked and resumed runs are just repeated `integrate`
//! calls with overridden options.

mod integrate;
mod slots;
mod system;

pub use integrate::IntegrateOptions;
pub use slots::{Slot, SlotRange};
pub use system::{Error, JumpEffect, SystemModel};

pub use filament_solvers::transient::adaptive::{Action, Config, Event, Solution, Status};
