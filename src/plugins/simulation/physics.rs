use crate::config::SimulationConfig;
use crate::physics::{FieldGrid, FieldSampler};
use crate::resources::{
    DragGesture, FieldOverlay, PointerState, RenderingRng, SimulationStepper, SimulationWorld,
};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    Interaction,
    Integrate,
}

/// Feed this tick's pointer state to the drag controller, spawning a body on release
pub fn apply_drag_gesture(
    pointer: Res<PointerState>,
    mut gesture: ResMut<DragGesture>,
    mut world: ResMut<SimulationWorld>,
    mut rng: ResMut<RenderingRng>,
) {
    match gesture.update_world(**pointer, &mut world.0, &mut rng.0) {
        Ok(Some(index)) => {
            if let Some(body) = world.get(index) {
                info!(
                    "Spawned body {index} at ({:.1}, {:.1}) with velocity ({:.1}, {:.1})",
                    body.position.x, body.position.y, body.velocity.x, body.velocity.y
                );
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Discarded drag gesture: {e}"),
    }
}

/// Advance every body by one fixed step
pub fn advance_world(stepper: Res<SimulationStepper>, mut world: ResMut<SimulationWorld>) {
    stepper.advance(&mut world.0);
}

/// Recompute the field overlay over the visible area
///
/// Uses the primary window's logical size when there is one, and the
/// configured window size otherwise.
pub fn update_field_overlay(
    mut overlay: ResMut<FieldOverlay>,
    world: Res<SimulationWorld>,
    config: Res<SimulationConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if !overlay.enabled {
        if !overlay.lines.is_empty() {
            overlay.lines.clear();
        }
        return;
    }

    let viewport = windows.single().map(Window::size).unwrap_or(Vec2::new(
        config.rendering.window_width,
        config.rendering.window_height,
    ));
    let parameters = config.parameters();
    let grid = FieldGrid::for_viewport(viewport.as_dvec2(), &parameters);
    let sampler = FieldSampler::from_parameters(&parameters, config.field.singularity);

    overlay.lines = sampler.field_lines(&world, &grid, &config.field_line_style());
}
