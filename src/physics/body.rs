//! Point-mass bodies

use crate::physics::math::{Scalar, Vector};
use bevy::color::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Errors raised when a body would violate its invariants
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyError {
    /// Mass must be strictly positive and finite
    InvalidMass(Scalar),
    /// Radius must be non-negative and finite
    InvalidRadius(Scalar),
    /// Position and velocity components must be finite
    NonFiniteState,
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::InvalidMass(mass) => {
                write!(f, "body mass must be positive and finite, got {mass}")
            }
            BodyError::InvalidRadius(radius) => {
                write!(f, "body radius must be non-negative and finite, got {radius}")
            }
            BodyError::NonFiniteState => write!(f, "body position and velocity must be finite"),
        }
    }
}

impl std::error::Error for BodyError {}

/// 8-bit sRGB display color of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BodyColor {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draws each channel uniformly from `channel_range`
    pub fn random(rng: &mut impl Rng, channel_range: RangeInclusive<u8>) -> Self {
        Self {
            r: rng.random_range(channel_range.clone()),
            g: rng.random_range(channel_range.clone()),
            b: rng.random_range(channel_range),
        }
    }
}

impl Default for BodyColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 3]> for BodyColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<BodyColor> for Color {
    fn from(color: BodyColor) -> Self {
        Color::srgb_u8(color.r, color.g, color.b)
    }
}

/// A single point mass
///
/// `mass` is private so that every body in existence has passed the
/// positivity check in [`Body::new`]. The remaining fields are plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    mass: Scalar,
    /// Display radius; plays no part in the force law
    pub radius: Scalar,
    pub position: Vector,
    pub velocity: Vector,
    /// Stationary bodies are never integrated but still attract others
    pub stationary: bool,
    pub color: BodyColor,
}

impl Body {
    pub fn new(
        mass: Scalar,
        radius: Scalar,
        position: Vector,
        velocity: Vector,
    ) -> Result<Self, BodyError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BodyError::InvalidMass(mass));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(BodyError::InvalidRadius(radius));
        }
        if !(position.is_finite() && velocity.is_finite()) {
            return Err(BodyError::NonFiniteState);
        }

        Ok(Self {
            mass,
            radius,
            position,
            velocity,
            stationary: false,
            color: BodyColor::default(),
        })
    }

    pub fn with_stationary(mut self, stationary: bool) -> Self {
        self.stationary = stationary;
        self
    }

    pub fn with_color(mut self, color: BodyColor) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_body_is_mobile_and_white() {
        let body = Body::new(2.0, 1.0, Vector::new(1.0, 2.0), Vector::ZERO).unwrap();
        assert_eq!(body.mass(), 2.0);
        assert!(!body.stationary);
        assert_eq!(body.color, BodyColor::WHITE);
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        assert_eq!(
            Body::new(0.0, 1.0, Vector::ZERO, Vector::ZERO),
            Err(BodyError::InvalidMass(0.0))
        );
        assert_eq!(
            Body::new(-3.0, 1.0, Vector::ZERO, Vector::ZERO),
            Err(BodyError::InvalidMass(-3.0))
        );
        assert!(matches!(
            Body::new(Scalar::NAN, 1.0, Vector::ZERO, Vector::ZERO),
            Err(BodyError::InvalidMass(_))
        ));
    }

    #[test]
    fn test_rejects_negative_radius_and_non_finite_state() {
        assert_eq!(
            Body::new(1.0, -1.0, Vector::ZERO, Vector::ZERO),
            Err(BodyError::InvalidRadius(-1.0))
        );
        assert_eq!(
            Body::new(1.0, 0.0, Vector::new(Scalar::INFINITY, 0.0), Vector::ZERO),
            Err(BodyError::NonFiniteState)
        );
        assert_eq!(
            Body::new(1.0, 0.0, Vector::ZERO, Vector::new(0.0, Scalar::NAN)),
            Err(BodyError::NonFiniteState)
        );
    }

    #[test]
    fn test_builders() {
        let body = Body::new(1.0, 0.0, Vector::ZERO, Vector::ZERO)
            .unwrap()
            .with_stationary(true)
            .with_color(BodyColor::new(1, 2, 3));
        assert!(body.stationary);
        assert_eq!(body.color, BodyColor::new(1, 2, 3));
    }

    #[test]
    fn test_random_color_respects_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let color = BodyColor::random(&mut rng, 50..=255);
            assert!(color.r >= 50 && color.g >= 50 && color.b >= 50);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BodyError::InvalidMass(0.0).to_string(),
            "body mass must be positive and finite, got 0"
        );
    }
}
