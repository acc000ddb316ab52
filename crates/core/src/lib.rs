//! # FlightDesk Core
//!
//! Domain types, traits, and error definitions for the FlightDesk agent.
//! This crate has **no HTTP dependencies**: it defines the model that the
//! backend client, the operations, the planner and the front door all
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every seam is a trait here:
//! - [`Operation`]: one typed backend action the planner can dispatch
//! - [`Planner`]: the oracle that decides the next action
//!
//! Implementations live in their own crates, so the loop can be tested
//! against scripted planners and fake operations.

pub mod error;
pub mod operation;
pub mod planner;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use error::{Error, OperationError, PlannerError, Result};
pub use operation::{
    FieldKind, FieldSpec, Operation, OperationDescriptor, OperationRegistry, OperationResult,
};
pub use planner::{PlannedAction, Planner, PlannerStep};
pub use session::Session;
