use crate::interaction::{DragController, PointerSample};
use crate::physics::{FieldLine, Stepper, World};
use crate::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

/// Randomness for spawn colors and the starfield
///
/// Physics never draws from it, so seeding it makes the visuals repeatable
/// without affecting trajectories.
#[derive(Resource, Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct RenderingRng(pub ChaCha8Rng);

impl RenderingRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }
}

impl Default for RenderingRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

/// The bodies being simulated
#[derive(Resource, Deref, DerefMut, Debug, Clone, Default, PartialEq)]
pub struct SimulationWorld(pub World);

#[derive(Resource, Deref, DerefMut, Debug)]
pub struct SimulationStepper(pub Stepper);

#[derive(Resource, Deref, DerefMut, Debug, Clone, Default, PartialEq)]
pub struct DragGesture(pub DragController);

/// Cursor position in world coordinates and left button state, refreshed
/// every frame
#[derive(Resource, Deref, DerefMut, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState(pub PointerSample);

/// Field overlay toggle and the lines computed for the current frame
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FieldOverlay {
    pub enabled: bool,
    pub lines: Vec<FieldLine>,
}

impl FieldOverlay {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            lines: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::SpawnSettings;
    use crate::physics::BodyColor;

    fn spawn_colors(rng: &mut RenderingRng, count: usize) -> Vec<BodyColor> {
        let range = SpawnSettings::default().color_range;
        (0..count)
            .map(|_| BodyColor::random(&mut rng.0, range.clone()))
            .collect()
    }

    #[test]
    fn test_configured_seed_repeats_spawn_colors() {
        let mut configured = RenderingRng::from_optional_seed(Some(54321));
        let mut direct = RenderingRng::from_seed(54321);

        let colors = spawn_colors(&mut configured, 10);
        assert_eq!(colors, spawn_colors(&mut direct, 10));
        assert!(colors.iter().all(|c| c.r >= 50 && c.g >= 50 && c.b >= 50));
    }

    #[test]
    fn test_spawn_colors_depend_on_seed() {
        let a = spawn_colors(&mut RenderingRng::from_seed(1), 10);
        let b = spawn_colors(&mut RenderingRng::from_seed(2), 10);
        assert_ne!(a, b);
    }

    #[test]
    fn test_unseeded_rngs_give_different_colors() {
        let a = spawn_colors(&mut RenderingRng::from_optional_seed(None), 8);
        let b = spawn_colors(&mut RenderingRng::from_optional_seed(None), 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_overlay_starts_empty() {
        let overlay = FieldOverlay::new(true);
        assert!(overlay.enabled);
        assert!(overlay.lines.is_empty());
    }
}
