//! Physics core: bodies, the softened force law, integrators, field sampling
//!
//! Nothing in this module touches the ECS. The host wraps these types in
//! resources and drives them once per fixed tick.

pub mod body;
pub mod field;
pub mod forces;
pub mod integrators;
pub mod math;
pub mod params;
pub mod simulation;
pub mod world;

pub use body::{Body, BodyColor, BodyError};
pub use field::{FieldGrid, FieldLine, FieldLineStyle, FieldSampler, SingularityPolicy};
pub use forces::ForceModel;
pub use params::PhysicsParameters;
pub use simulation::Stepper;
pub use world::World;
