//! Controls plugin - Self-contained plugin pattern
//!
//! Translates keyboard shortcuts into [`SimulationCommand`] events. Pointer
//! gestures are handled separately by the pointer plugin.
//!
//! | Key    | Command              |
//! |--------|----------------------|
//! | Space  | pause / resume       |
//! | R      | restart the scenario |
//! | F      | toggle field overlay |
//! | Escape | quit                 |

use crate::prelude::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SimulationCommand>();
        app.add_systems(Update, keyboard_input_handler);
    }
}

/// Handles keyboard input and emits SimulationCommand events
fn keyboard_input_handler(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<SimulationCommand>,
) {
    for &keycode in keys.get_just_pressed() {
        match keycode {
            KeyCode::KeyR => {
                commands.write(SimulationCommand::Restart);
            }
            KeyCode::Space => {
                commands.write(SimulationCommand::TogglePause);
            }
            KeyCode::KeyF => {
                commands.write(SimulationCommand::ToggleFieldOverlay);
            }
            KeyCode::Escape => {
                commands.write(SimulationCommand::Quit);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, press_key, written_commands};

    #[test]
    fn test_keys_map_to_commands() {
        let cases = [
            (KeyCode::Space, SimulationCommand::TogglePause),
            (KeyCode::KeyR, SimulationCommand::Restart),
            (KeyCode::KeyF, SimulationCommand::ToggleFieldOverlay),
            (KeyCode::Escape, SimulationCommand::Quit),
        ];

        for (key, expected) in cases {
            let mut app = create_test_app();
            app.add_plugins(ControlsPlugin);
            press_key(&mut app, key);
            app.world_mut().run_schedule(Update);
            assert_eq!(written_commands(&app), vec![expected], "key {key:?}");
        }
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut app = create_test_app();
        app.add_plugins(ControlsPlugin);
        press_key(&mut app, KeyCode::KeyQ);
        app.world_mut().run_schedule(Update);
        assert!(written_commands(&app).is_empty());
    }
}
