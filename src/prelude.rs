//! Gravwell prelude module
//!
//! Re-exports the types most systems need. The physics `World` is left out on
//! purpose so it never shadows the ECS `World` from Bevy's prelude.

// External crate re-exports
pub use bevy::prelude::*;
pub use rand::Rng;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - Events and states
pub use crate::events::SimulationCommand;
pub use crate::states::AppState;

// Internal re-exports - Core types
pub use crate::interaction::{DragController, DragState, PointerSample};
pub use crate::physics::math::{Scalar, Vector};
pub use crate::physics::{Body, BodyColor, FieldSampler, Stepper};
