//! Component definitions for the ECS session.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod common;
mod flight;

pub use common::*;
pub use flight::*;
