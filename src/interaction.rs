//! Drag-to-spawn gesture handling
//!
//! A drag starts when the pointer button goes down, follows the pointer while
//! the button is held, and spawns a body at the starting point when the
//! button is released. The launch velocity points from the release point back
//! toward the start, like pulling back a slingshot.

use crate::physics::math::{Scalar, Vector};
use crate::physics::{Body, BodyColor, BodyError, World};
use rand::Rng;
use std::ops::RangeInclusive;

/// Pointer state as seen by one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// `None` while the pointer is outside the canvas
    pub position: Option<Vector>,
    pub pressed: bool,
}

impl PointerSample {
    pub fn pressed_at(position: Vector) -> Self {
        Self {
            position: Some(position),
            pressed: true,
        }
    }

    pub fn released_at(position: Vector) -> Self {
        Self {
            position: Some(position),
            pressed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        start: Vector,
        current: Vector,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// A completed drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub start: Vector,
    pub end: Vector,
}

/// What a released drag turns into
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSettings {
    /// Velocity per unit of drag distance
    pub drag_scale: Scalar,
    /// Extra factor applied on top of `drag_scale`
    pub velocity_multiplier: Scalar,
    pub mass: Scalar,
    pub radius: Scalar,
    /// Range every color channel is drawn from
    pub color_range: RangeInclusive<u8>,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            drag_scale: 0.1,
            velocity_multiplier: 25.0,
            mass: 1.0,
            radius: 7.0,
            color_range: 50..=255,
        }
    }
}

impl SpawnSettings {
    /// Fails if bodies built from these settings would be rejected
    pub fn check(&self) -> Result<(), BodyError> {
        Body::new(self.mass, self.radius, Vector::ZERO, Vector::ZERO)?;
        if self.drag_scale.is_finite() && self.velocity_multiplier.is_finite() {
            Ok(())
        } else {
            Err(BodyError::NonFiniteState)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragController {
    state: DragState,
    settings: SpawnSettings,
}

impl DragController {
    pub fn new(settings: SpawnSettings) -> Self {
        Self {
            state: DragState::Idle,
            settings,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn settings(&self) -> &SpawnSettings {
        &self.settings
    }

    /// Abandons any drag in progress without spawning
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Advances the gesture by one tick, returning the finished drag on release
    pub fn update(&mut self, pointer: PointerSample) -> Option<DragRelease> {
        match (self.state, pointer.pressed) {
            (DragState::Idle, true) => {
                if let Some(position) = pointer.position {
                    self.state = DragState::Dragging {
                        start: position,
                        current: position,
                    };
                }
                None
            }
            (DragState::Dragging { start, current }, true) => {
                self.state = DragState::Dragging {
                    start,
                    current: pointer.position.unwrap_or(current),
                };
                None
            }
            (DragState::Dragging { start, current }, false) => {
                self.state = DragState::Idle;
                Some(DragRelease {
                    start,
                    end: current,
                })
            }
            (DragState::Idle, false) => None,
        }
    }

    /// Launch velocity for a drag from `start` to `end`
    pub fn release_velocity(&self, start: Vector, end: Vector) -> Vector {
        (start - end) * self.settings.drag_scale * self.settings.velocity_multiplier
    }

    /// Body launched by a finished drag
    pub fn spawn(&self, release: &DragRelease, rng: &mut impl Rng) -> Result<Body, BodyError> {
        let velocity = self.release_velocity(release.start, release.end);
        let color = BodyColor::random(rng, self.settings.color_range.clone());
        Ok(
            Body::new(self.settings.mass, self.settings.radius, release.start, velocity)?
                .with_color(color),
        )
    }

    /// Runs one tick of the gesture and appends the spawned body, if any,
    /// returning its index
    pub fn update_world(
        &mut self,
        pointer: PointerSample,
        world: &mut World,
        rng: &mut impl Rng,
    ) -> Result<Option<usize>, BodyError> {
        let Some(release) = self.update(pointer) else {
            return Ok(None);
        };
        let body = self.spawn(&release, rng)?;
        Ok(Some(world.push(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_idle_stays_idle_without_press() {
        let mut controller = DragController::default();
        assert_eq!(
            controller.update(PointerSample::released_at(Vector::new(1.0, 1.0))),
            None
        );
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_press_starts_drag_and_moves_track_current() {
        let mut controller = DragController::default();
        controller.update(PointerSample::pressed_at(Vector::new(100.0, 100.0)));
        assert_eq!(
            controller.state(),
            DragState::Dragging {
                start: Vector::new(100.0, 100.0),
                current: Vector::new(100.0, 100.0)
            }
        );

        controller.update(PointerSample::pressed_at(Vector::new(80.0, 90.0)));
        assert_eq!(
            controller.state(),
            DragState::Dragging {
                start: Vector::new(100.0, 100.0),
                current: Vector::new(80.0, 90.0)
            }
        );
    }

    #[test]
    fn test_press_outside_canvas_does_not_start_drag() {
        let mut controller = DragController::default();
        controller.update(PointerSample {
            position: None,
            pressed: true,
        });
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_lost_pointer_keeps_last_position() {
        let mut controller = DragController::default();
        controller.update(PointerSample::pressed_at(Vector::new(10.0, 10.0)));
        controller.update(PointerSample::pressed_at(Vector::new(20.0, 10.0)));
        controller.update(PointerSample {
            position: None,
            pressed: true,
        });

        let release = controller.update(PointerSample {
            position: None,
            pressed: false,
        });
        assert_eq!(
            release,
            Some(DragRelease {
                start: Vector::new(10.0, 10.0),
                end: Vector::new(20.0, 10.0)
            })
        );
    }

    #[test]
    fn test_release_velocity_end_to_end() {
        let mut controller = DragController::default();
        let mut world = World::new();
        let mut rng = rng();

        let pointer_frames = [
            PointerSample::pressed_at(Vector::new(100.0, 100.0)),
            PointerSample::pressed_at(Vector::new(75.0, 100.0)),
            PointerSample::pressed_at(Vector::new(50.0, 100.0)),
        ];
        for frame in pointer_frames {
            assert_eq!(controller.update_world(frame, &mut world, &mut rng), Ok(None));
        }

        let spawned = controller
            .update_world(
                PointerSample::released_at(Vector::new(50.0, 100.0)),
                &mut world,
                &mut rng,
            )
            .unwrap();
        assert_eq!(spawned, Some(0));

        let body = &world.bodies()[0];
        assert!((body.velocity - Vector::new(125.0, 0.0)).length() < 1e-9);
        assert_eq!(body.position, Vector::new(100.0, 100.0));
        assert_eq!(body.mass(), 1.0);
        assert_eq!(body.radius, 7.0);
        assert!(!body.stationary);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_second_drag_spawns_independent_body() {
        let mut controller = DragController::default();
        let mut world = World::new();
        let mut rng = rng();

        controller
            .update_world(PointerSample::pressed_at(Vector::ZERO), &mut world, &mut rng)
            .unwrap();
        let first = controller
            .update_world(
                PointerSample::released_at(Vector::new(0.0, 10.0)),
                &mut world,
                &mut rng,
            )
            .unwrap();

        controller
            .update_world(
                PointerSample::pressed_at(Vector::new(300.0, 300.0)),
                &mut world,
                &mut rng,
            )
            .unwrap();
        controller
            .update_world(
                PointerSample::pressed_at(Vector::new(310.0, 300.0)),
                &mut world,
                &mut rng,
            )
            .unwrap();
        let second = controller
            .update_world(
                PointerSample::released_at(Vector::new(310.0, 300.0)),
                &mut world,
                &mut rng,
            )
            .unwrap();

        assert_eq!((first, second), (Some(0), Some(1)));
        assert_eq!(world.bodies()[0].position, Vector::ZERO);
        assert_eq!(world.bodies()[1].position, Vector::new(300.0, 300.0));
        assert!(world.bodies()[0].velocity.y < 0.0);
        assert!(world.bodies()[1].velocity.x < 0.0);
    }

    #[test]
    fn test_click_without_motion_spawns_resting_body() {
        let mut controller = DragController::default();
        let mut world = World::new();
        let mut rng = rng();
        controller
            .update_world(PointerSample::pressed_at(Vector::ONE), &mut world, &mut rng)
            .unwrap();
        controller
            .update_world(PointerSample::released_at(Vector::ONE), &mut world, &mut rng)
            .unwrap();
        assert_eq!(world.bodies()[0].velocity, Vector::ZERO);
    }

    #[test]
    fn test_invalid_spawn_mass_is_reported() {
        let mut controller = DragController::new(SpawnSettings {
            mass: 0.0,
            ..SpawnSettings::default()
        });
        let mut world = World::new();
        let mut rng = rng();
        controller
            .update_world(PointerSample::pressed_at(Vector::ONE), &mut world, &mut rng)
            .unwrap();
        let result =
            controller.update_world(PointerSample::released_at(Vector::ONE), &mut world, &mut rng);
        assert_eq!(result, Err(BodyError::InvalidMass(0.0)));
        assert!(world.is_empty());
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_spawn_colors_follow_seed() {
        let controller = DragController::default();
        let release = DragRelease {
            start: Vector::ZERO,
            end: Vector::ZERO,
        };
        let a = controller.spawn(&release, &mut rng()).unwrap();
        let b = controller.spawn(&release, &mut rng()).unwrap();
        assert_eq!(a.color, b.color);
    }

    #[test]
    fn test_cancel_discards_drag() {
        let mut controller = DragController::default();
        controller.update(PointerSample::pressed_at(Vector::ONE));
        controller.cancel();
        assert_eq!(
            controller.update(PointerSample::released_at(Vector::ONE)),
            None
        );
    }
}
