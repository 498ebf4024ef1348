//! Numerical parameters fixed at simulation construction

use crate::physics::field::{DEFAULT_FIELD_SCALE, DEFAULT_GRID_SPACING};
use crate::physics::forces::{DEFAULT_FORCE_SCALE, DEFAULT_SOFTENING};
use crate::physics::math::Scalar;

/// Default fixed time step, independent of how often the host ticks
pub const DEFAULT_TIME_STEP: Scalar = 1.0 / 60.0;

/// The constants every physics component is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParameters {
    pub time_step: Scalar,
    pub softening_constant: Scalar,
    pub force_scale_constant: Scalar,
    pub field_scale_constant: Scalar,
    pub grid_spacing: Scalar,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            softening_constant: DEFAULT_SOFTENING,
            force_scale_constant: DEFAULT_FORCE_SCALE,
            field_scale_constant: DEFAULT_FIELD_SCALE,
            grid_spacing: DEFAULT_GRID_SPACING,
        }
    }
}
