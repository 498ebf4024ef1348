//! Simulation plugin - Self-contained plugin pattern
//!
//! Owns the physics world and everything that mutates it: the stepper, the
//! drag controller, and the handlers for restart and pause commands. Runs
//! without a window, so the same plugin drives both the interactive app and
//! headless runs.

use crate::prelude::*;
use crate::resources::{
    DragGesture, FieldOverlay, PointerState, RenderingRng, SimulationStepper, SimulationWorld,
};

mod actions;
mod physics;

use actions::{
    handle_quit_event, handle_restart_simulation_event, handle_toggle_field_overlay_event,
    handle_toggle_pause_simulation_event,
};
pub use physics::PhysicsSet;
use physics::{advance_world, apply_drag_gesture, update_field_overlay};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Commands,
    Overlay,
}

#[derive(Default)]
pub struct SimulationPlugin {
    config: SimulationConfig,
    start_paused: bool,
}

impl SimulationPlugin {
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config,
            start_paused: false,
        }
    }

    pub fn start_paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();

        match config.to_toml() {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let world = config.build_world().unwrap_or_else(|e| {
            warn!("Scenario is invalid, starting empty: {e}");
            Default::default()
        });
        info!(
            "Simulating {} bodies with {} at dt = {}",
            world.len(),
            config.physics.integrator,
            config.physics.time_step
        );

        app.insert_resource(RenderingRng::from_optional_seed(config.rendering.seed));
        app.insert_resource(SimulationWorld(world));
        app.insert_resource(SimulationStepper(config.stepper()));
        app.insert_resource(DragGesture(DragController::new(
            config.interaction.spawn_settings(),
        )));
        app.init_resource::<PointerState>();
        app.insert_resource(FieldOverlay::new(config.field.enabled));
        app.insert_resource(Time::<Fixed>::from_hz(config.rendering.tick_rate_hz));
        app.insert_resource(config);

        app.insert_state(if self.start_paused {
            AppState::Paused
        } else {
            AppState::Running
        });
        app.add_event::<SimulationCommand>();

        app.configure_sets(
            FixedUpdate,
            (PhysicsSet::Interaction, PhysicsSet::Integrate).chain(),
        );
        app.configure_sets(
            Update,
            (SimulationSet::Commands, SimulationSet::Overlay).chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                apply_drag_gesture.in_set(PhysicsSet::Interaction),
                advance_world
                    .in_set(PhysicsSet::Integrate)
                    .run_if(in_state(AppState::Running)),
            ),
        );
        app.add_systems(
            Update,
            (
                handle_restart_simulation_event,
                handle_toggle_pause_simulation_event,
                handle_toggle_field_overlay_event,
                handle_quit_event,
            )
                .in_set(SimulationSet::Commands),
        );
        app.add_systems(Update, update_field_overlay.in_set(SimulationSet::Overlay));
    }
}
