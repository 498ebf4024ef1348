//! Fixed-step numerical integrators for a single body

use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod runge_kutta;

pub use runge_kutta::{FixedAccelerationRungeKutta, RungeKuttaFourthOrder, VelocitySource};

/// Acceleration as a function of position
///
/// Integrators call this to evaluate the derivative of velocity. For a body
/// in the world this is the summed pull of every other body.
pub trait AccelerationField {
    fn at(&self, position: Vector) -> Vector;
}

impl<F> AccelerationField for F
where
    F: Fn(Vector) -> Vector,
{
    fn at(&self, position: Vector) -> Vector {
        self(position)
    }
}

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Advance one body's state by one time step
    ///
    /// # Arguments
    /// * `position` - Mutable reference to position
    /// * `velocity` - Mutable reference to velocity
    /// * `field` - Acceleration field acting on the body
    /// * `dt` - Time step
    fn step(
        &self,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    );

    /// Get the name of this integrator
    fn name(&self) -> &str;
}

/// Integrator selection as it appears in configuration and on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    /// Runge-Kutta blend over an acceleration sampled once per step
    #[default]
    FixedAccelerationRk4,
    /// Textbook RK4 that re-evaluates the field at every stage
    ClassicRk4,
}

impl IntegratorKind {
    pub const ALL: [IntegratorKind; 2] = [Self::FixedAccelerationRk4, Self::ClassicRk4];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntegratorKind::FixedAccelerationRk4 => "fixed_acceleration_rk4",
            IntegratorKind::ClassicRk4 => "classic_rk4",
        }
    }

    /// Instantiate the integrator; `velocity_source` only affects the fixed
    /// acceleration variant
    pub fn build(&self, velocity_source: VelocitySource) -> Box<dyn Integrator> {
        match self {
            IntegratorKind::FixedAccelerationRk4 => {
                Box::new(FixedAccelerationRungeKutta::new(velocity_source))
            }
            IntegratorKind::ClassicRk4 => Box::new(RungeKuttaFourthOrder),
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fixed_acceleration_rk4" | "fixed_rk4" | "default" => Ok(Self::FixedAccelerationRk4),
            "classic_rk4" | "rk4" => Ok(Self::ClassicRk4),
            other => Err(format!(
                "unknown integrator '{other}', expected one of: {}",
                Self::ALL.map(|kind| kind.as_str()).join(", ")
            )),
        }
    }
}
