//! Camera plugin - Self-contained plugin pattern
//!
//! A fixed 2-D camera looking at the world origin, so world coordinates are
//! pixels from the centre of the window with y pointing up.

use crate::prelude::*;

/// Marks the camera pointer positions are projected through
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Main Camera"), Camera2d, MainCamera));
}
