//! Centralized event definitions
//!
//! Input handlers never touch simulation state directly. They emit a
//! [`SimulationCommand`] and the owning plugin reacts to it.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    /// Reload the startup scenario and drop spawned bodies
    Restart,
    TogglePause,
    ToggleFieldOverlay,
    Quit,
}
