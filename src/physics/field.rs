//! Gravitational field sampling for the visual overlay
//!
//! The overlay uses its own, unsoftened inverse-square law with a separate
//! scale constant. Nothing here feeds back into the simulation: sampling takes
//! the world by shared reference and keeps no state between calls, so every
//! grid point can be evaluated independently.

use crate::physics::math::{Scalar, Vector, length, sqrt};
use crate::physics::params::PhysicsParameters;
use crate::physics::world::World;
use serde::{Deserialize, Serialize};

/// Default scale constant of the overlay's field law
pub const DEFAULT_FIELD_SCALE: Scalar = 50.0;

/// Default distance between neighbouring grid points
pub const DEFAULT_GRID_SPACING: Scalar = 15.0;

/// How a sample point sitting exactly on a body centre is treated
///
/// Without softening the field is undefined there. Both policies keep every
/// sample finite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SingularityPolicy {
    /// The coincident body contributes nothing to that sample
    #[default]
    SkipBody,
    /// Distances below `min_distance` are raised to it before computing the
    /// magnitude; a coincident body still has no direction and adds zero
    ClampDistance { min_distance: Scalar },
}

/// Computes the overlay field at arbitrary points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSampler {
    pub field_scale: Scalar,
    pub policy: SingularityPolicy,
}

impl Default for FieldSampler {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_SCALE, SingularityPolicy::default())
    }
}

impl FieldSampler {
    pub fn new(field_scale: Scalar, policy: SingularityPolicy) -> Self {
        Self {
            field_scale,
            policy,
        }
    }

    pub fn from_parameters(parameters: &PhysicsParameters, policy: SingularityPolicy) -> Self {
        Self::new(parameters.field_scale_constant, policy)
    }

    /// Net field vector at `point`; zero for an empty world
    pub fn sample(&self, point: Vector, world: &World) -> Vector {
        world.iter().fold(Vector::ZERO, |total, body| {
            let delta = body.position - point;
            let mut distance = sqrt(delta.length_squared());

            if distance == 0.0 {
                return total;
            }
            if let SingularityPolicy::ClampDistance { min_distance } = self.policy {
                let direction = delta / distance;
                distance = distance.max(min_distance);
                let magnitude = self.field_scale * body.mass() / (distance * distance);
                return total + direction * magnitude;
            }

            let magnitude = self.field_scale * body.mass() / (distance * distance);
            total + delta * (magnitude / distance)
        })
    }

    /// Drawable lines for every point of `grid`
    pub fn field_lines(
        &self,
        world: &World,
        grid: &FieldGrid,
        style: &FieldLineStyle,
    ) -> Vec<FieldLine> {
        let max_length = style.max_length.unwrap_or(grid.spacing);
        grid.points()
            .filter_map(|point| style.line(point, self.sample(point, world), max_length))
            .collect()
    }
}

/// Regular lattice of sample points covering a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGrid {
    /// Corner with the smallest coordinates
    pub origin: Vector,
    /// Width and height of the covered rectangle
    pub size: Vector,
    pub spacing: Scalar,
}

impl FieldGrid {
    pub fn new(origin: Vector, size: Vector, spacing: Scalar) -> Self {
        Self {
            origin,
            size,
            spacing,
        }
    }

    /// Grid over a viewport of the given size centred on the origin
    ///
    /// Rows are laid out from the top edge down and columns from the left
    /// edge right, so the lattice matches a screen-space grid starting at the
    /// window's top-left corner.
    pub fn centered(size: Vector, spacing: Scalar) -> Self {
        let rows = Self::count(size.y, spacing).saturating_sub(1);
        let bottom = size.y / 2.0 - rows as Scalar * spacing;
        Self::new(Vector::new(-size.x / 2.0, bottom), size, spacing)
    }

    /// Centred grid at the spacing fixed in `parameters`
    pub fn for_viewport(size: Vector, parameters: &PhysicsParameters) -> Self {
        Self::centered(size, parameters.grid_spacing)
    }

    fn count(extent: Scalar, spacing: Scalar) -> usize {
        if spacing.is_nan() || extent.is_nan() || spacing <= 0.0 || extent <= 0.0 {
            return 0;
        }
        (extent / spacing).ceil() as usize
    }

    pub fn columns(&self) -> usize {
        Self::count(self.size.x, self.spacing)
    }

    pub fn rows(&self) -> usize {
        Self::count(self.size.y, self.spacing)
    }

    pub fn len(&self) -> usize {
        self.columns() * self.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Points column by column, each column from the smallest y upward
    pub fn points(&self) -> impl Iterator<Item = Vector> + '_ {
        let rows = self.rows();
        (0..self.columns()).flat_map(move |column| {
            (0..rows).map(move |row| {
                self.origin + Vector::new(column as Scalar, row as Scalar) * self.spacing
            })
        })
    }
}

/// Maps a field sample to an on-screen line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLineStyle {
    /// Length per unit of field magnitude
    pub magnitude_scale: Scalar,
    /// Added to every line so weak samples stay visible
    pub min_length: Scalar,
    /// Cap before `min_length` is added; the grid spacing when unset
    pub max_length: Option<Scalar>,
}

impl Default for FieldLineStyle {
    fn default() -> Self {
        Self {
            magnitude_scale: 10.0,
            min_length: 5.0,
            max_length: None,
        }
    }
}

impl FieldLineStyle {
    /// Line from `point` along `sample`, or `None` for a zero sample
    pub fn line(&self, point: Vector, sample: Vector, max_length: Scalar) -> Option<FieldLine> {
        let magnitude = length(sample);
        if magnitude == 0.0 || !magnitude.is_finite() {
            return None;
        }

        let direction = sample / magnitude;
        let line_length = (magnitude * self.magnitude_scale).min(max_length) + self.min_length;

        Some(FieldLine {
            start: point,
            end: point + direction * line_length,
            magnitude,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLine {
    pub start: Vector,
    pub end: Vector,
    /// Raw field magnitude at `start`
    pub magnitude: Scalar,
}
