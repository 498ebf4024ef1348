//! Visualization plugin - Self-contained plugin pattern
//!
//! Draws the starfield backdrop, one filled disc per body, the field overlay
//! and the line of a drag in progress. Reads simulation resources and never
//! writes them.

use crate::interaction::DragState;
use crate::physics::BodyColor;
use crate::physics::math::Scalar;
use crate::prelude::*;
use crate::resources::{DragGesture, FieldOverlay, RenderingRng, SimulationWorld};

const STAR_Z: f32 = -10.0;
const BODY_Z: f32 = 1.0;

/// Star radii are drawn from this range
const STAR_RADIUS_RANGE: std::ops::RangeInclusive<u8> = 1..=3;

pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_starfield);
        app.add_systems(
            Update,
            (
                apply_background_color,
                sync_body_visuals,
                draw_field_lines.run_if(|overlay: Res<FieldOverlay>| overlay.enabled),
                draw_drag_line,
            )
                .after(crate::plugins::simulation::SimulationSet::Overlay),
        );
    }
}

/// The disc drawn for `SimulationWorld` body `index`
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodyVisual {
    pub index: usize,
    radius: Scalar,
    color: BodyColor,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Star;

/// A backdrop star: centre, radius and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSpec {
    pub position: Vec2,
    pub radius: u8,
    pub color: BodyColor,
}

/// Scatter `count` stars uniformly over a viewport centred on the origin
pub fn generate_starfield(rng: &mut impl Rng, count: usize, viewport: Vec2) -> Vec<StarSpec> {
    let half = viewport / 2.0;
    (0..count)
        .map(|_| {
            let x = rng.random_range(-half.x..=half.x);
            let y = rng.random_range(-half.y..=half.y);
            let radius = rng.random_range(STAR_RADIUS_RANGE);
            StarSpec {
                position: Vec2::new(x, y),
                radius,
                color: BodyColor::new(120, 120, radius.saturating_mul(40)),
            }
        })
        .collect()
}

fn to_color([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

fn apply_background_color(mut commands: Commands, config: Res<SimulationConfig>) {
    if config.is_changed() {
        commands.insert_resource(ClearColor(to_color(config.rendering.background_color)));
    }
}

fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut rng: ResMut<RenderingRng>,
    config: Res<SimulationConfig>,
) {
    let viewport = Vec2::new(config.rendering.window_width, config.rendering.window_height);
    for star in generate_starfield(&mut rng.0, config.rendering.star_count, viewport) {
        commands.spawn((
            Star,
            Mesh2d(meshes.add(Circle::new(star.radius as f32))),
            MeshMaterial2d(materials.add(Color::from(star.color))),
            Transform::from_translation(star.position.extend(STAR_Z)),
        ));
    }
}

/// Keep one disc entity per body, respawning it if the body behind an index changed
fn sync_body_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    world: Res<SimulationWorld>,
    mut visuals: Query<(Entity, &BodyVisual, &mut Transform)>,
) {
    let mut drawn = vec![false; world.len()];

    for (entity, visual, mut transform) in &mut visuals {
        match world.get(visual.index) {
            Some(body) if body.radius == visual.radius && body.color == visual.color => {
                transform.translation = body.position.as_vec2().extend(BODY_Z);
                drawn[visual.index] = true;
            }
            _ => commands.entity(entity).despawn(),
        }
    }

    for (index, body) in world.iter().enumerate() {
        if drawn[index] {
            continue;
        }
        commands.spawn((
            BodyVisual {
                index,
                radius: body.radius,
                color: body.color,
            },
            Mesh2d(meshes.add(Circle::new(body.radius as f32))),
            MeshMaterial2d(materials.add(Color::from(body.color))),
            Transform::from_translation(body.position.as_vec2().extend(BODY_Z)),
        ));
    }
}

fn draw_field_lines(
    mut gizmos: Gizmos,
    overlay: Res<FieldOverlay>,
    config: Res<SimulationConfig>,
) {
    let color = to_color(config.field.line_color);
    for line in &overlay.lines {
        gizmos.line_2d(line.start.as_vec2(), line.end.as_vec2(), color);
    }
}

fn draw_drag_line(mut gizmos: Gizmos, gesture: Res<DragGesture>, config: Res<SimulationConfig>) {
    if let DragState::Dragging { start, current } = gesture.state() {
        gizmos.line_2d(
            start.as_vec2(),
            current.as_vec2(),
            to_color(config.interaction.drag_line_color),
        );
    }
}
