//! Softened pairwise gravity

use crate::physics::body::Body;
use crate::physics::math::{Scalar, Vector, sqrt};

/// Default scale constant standing in for the gravitational constant
pub const DEFAULT_FORCE_SCALE: Scalar = 100_000.0;

/// Default softening length added in quadrature to every separation
pub const DEFAULT_SOFTENING: Scalar = 2.0;

/// Softened inverse-square attraction between bodies
///
/// The separation used in the force law is `sqrt(dx² + dy² + S²)`, which caps
/// the acceleration near coincident bodies. The constants are tuned for a
/// pixel-scale world, not physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    pub force_scale: Scalar,
    pub softening: Scalar,
}

impl Default for ForceModel {
    fn default() -> Self {
        Self::new(DEFAULT_FORCE_SCALE, DEFAULT_SOFTENING)
    }
}

impl ForceModel {
    pub fn new(force_scale: Scalar, softening: Scalar) -> Self {
        Self {
            force_scale,
            softening,
        }
    }

    /// Acceleration on `target` caused by `source`
    ///
    /// A body exerts nothing on itself. The target's own mass cancels out of
    /// the result.
    pub fn acceleration(&self, target: &Body, source: &Body) -> Vector {
        if std::ptr::eq(target, source) {
            return Vector::ZERO;
        }
        self.acceleration_at(target.position, source)
    }

    /// Acceleration that `source` would impart on a body located at `position`
    #[inline]
    pub fn acceleration_at(&self, position: Vector, source: &Body) -> Vector {
        let delta = source.position - position;
        let distance = sqrt(delta.length_squared() + self.softening * self.softening);

        if distance == 0.0 {
            return Vector::ZERO;
        }

        let magnitude = self.force_scale * source.mass() / (distance * distance);
        delta * (magnitude / distance)
    }

    /// Sum of accelerations on `bodies[index]` from every other body
    pub fn total_acceleration(&self, index: usize, bodies: &[Body]) -> Vector {
        match bodies.get(index) {
            Some(target) => self.acceleration_excluding(target.position, index, bodies),
            None => Vector::ZERO,
        }
    }

    /// Sum of accelerations at `position` from every body except `bodies[excluded]`
    pub fn acceleration_excluding(
        &self,
        position: Vector,
        excluded: usize,
        bodies: &[Body],
    ) -> Vector {
        bodies
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != excluded)
            .fold(Vector::ZERO, |total, (_, source)| {
                total + self.acceleration_at(position, source)
            })
    }

    /// Tangential speed of a circular orbit of the given radius around a
    /// fixed central mass, under this softened law
    pub fn circular_speed(&self, central_mass: Scalar, radius: Scalar) -> Scalar {
        let distance = sqrt(radius * radius + self.softening * self.softening);
        if distance == 0.0 {
            return 0.0;
        }
        radius * sqrt(self.force_scale * central_mass / (distance * distance * distance))
    }
}
