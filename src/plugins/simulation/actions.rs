//! Action handlers for simulation commands

use crate::prelude::*;
use crate::resources::{DragGesture, FieldOverlay, SimulationWorld};

/// Replace the world with the configured scenario
pub fn handle_restart_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    config: Res<SimulationConfig>,
    mut world: ResMut<SimulationWorld>,
    mut gesture: ResMut<DragGesture>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::Restart) {
            continue;
        }
        gesture.cancel();
        match config.build_world() {
            Ok(scenario) => {
                info!("Restarting simulation with {} bodies", scenario.len());
                world.0 = scenario;
            }
            Err(e) => {
                warn!("Scenario is invalid, restarting empty: {e}");
                world.clear();
            }
        }
    }
}

pub fn handle_toggle_pause_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    current_state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::TogglePause) {
            continue;
        }
        match current_state.get() {
            AppState::Running => next_state.set(AppState::Paused),
            AppState::Paused => next_state.set(AppState::Running),
        }
    }
}

pub fn handle_toggle_field_overlay_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut overlay: ResMut<FieldOverlay>,
) {
    for command in commands_reader.read() {
        if matches!(command, SimulationCommand::ToggleFieldOverlay) {
            overlay.enabled = !overlay.enabled;
            debug!("Field overlay {}", if overlay.enabled { "on" } else { "off" });
        }
    }
}

pub fn handle_quit_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut exit: EventWriter<AppExit>,
) {
    if commands_reader
        .read()
        .any(|command| matches!(command, SimulationCommand::Quit))
    {
        exit.write(AppExit::Success);
    }
}
