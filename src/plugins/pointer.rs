//! Pointer plugin
//!
//! Projects the primary window's cursor through the main camera and records it,
//! with the left mouse button state, in [`PointerState`] once per frame. The
//! drag controller reads that resource on the fixed schedule.

use crate::interaction::PointerSample;
use crate::plugins::camera::MainCamera;
use crate::prelude::*;
use crate::resources::PointerState;
use bevy::input::InputSystem;
use bevy::window::PrimaryWindow;

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>();
        app.add_systems(PreUpdate, capture_pointer.after(InputSystem));
    }
}

fn capture_pointer(
    mut pointer: ResMut<PointerState>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    let position = match (windows.single(), cameras.single()) {
        (Ok(window), Ok((camera, camera_transform))) => window
            .cursor_position()
            .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok())
            .map(|world| world.as_dvec2()),
        _ => None,
    };

    let sample = PointerSample {
        position,
        pressed: buttons.pressed(MouseButton::Left),
    };
    if **pointer != sample {
        **pointer = sample;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_app;

    #[test]
    fn test_button_state_without_window() {
        let mut app = create_test_app();
        app.add_plugins(PointerPlugin);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();

        let pointer = app.world().resource::<PointerState>();
        assert!(pointer.pressed);
        assert_eq!(pointer.position, None);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        app.update();
        assert!(!app.world().resource::<PointerState>().pressed);
    }
}
