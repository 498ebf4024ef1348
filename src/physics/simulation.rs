//! Per-frame stepping of every body in a world

use crate::physics::body::Body;
use crate::physics::forces::ForceModel;
use crate::physics::integrators::{AccelerationField, Integrator, IntegratorKind, VelocitySource};
use crate::physics::math::{Scalar, Vector};
use crate::physics::params::PhysicsParameters;
use crate::physics::world::World;

/// Pull of every other body on the body at `index`
///
/// The position argument lets multi-stage integrators probe the field away
/// from the body's current position; the body itself is always excluded.
struct BodyAccelerationField<'a> {
    model: &'a ForceModel,
    bodies: &'a [Body],
    index: usize,
}

impl AccelerationField for BodyAccelerationField<'_> {
    fn at(&self, position: Vector) -> Vector {
        self.model.acceleration_excluding(position, self.index, self.bodies)
    }
}

/// Advances worlds by fixed time steps
pub struct Stepper {
    force_model: ForceModel,
    integrator: Box<dyn Integrator>,
    time_step: Scalar,
}

impl Stepper {
    pub fn new(
        force_model: ForceModel,
        integrator: Box<dyn Integrator>,
        time_step: Scalar,
    ) -> Self {
        Self {
            force_model,
            integrator,
            time_step,
        }
    }

    /// Default integrator over the given parameters
    pub fn from_parameters(parameters: &PhysicsParameters) -> Self {
        Self::with_integrator(
            parameters,
            IntegratorKind::default(),
            VelocitySource::default(),
        )
    }

    pub fn with_integrator(
        parameters: &PhysicsParameters,
        kind: IntegratorKind,
        velocity_source: VelocitySource,
    ) -> Self {
        Self::new(
            ForceModel::new(
                parameters.force_scale_constant,
                parameters.softening_constant,
            ),
            kind.build(velocity_source),
            parameters.time_step,
        )
    }

    pub fn force_model(&self) -> &ForceModel {
        &self.force_model
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn time_step(&self) -> Scalar {
        self.time_step
    }

    /// One frame at the configured time step
    pub fn advance(&self, world: &mut World) {
        self.advance_by(world, self.time_step);
    }

    /// One frame at an explicit time step
    ///
    /// Bodies are integrated one after another, in world order, and written
    /// back immediately. A body later in the order therefore feels the
    /// already-moved positions of the bodies before it in the same frame.
    pub fn advance_by(&self, world: &mut World, dt: Scalar) {
        for index in 0..world.len() {
            self.step_body(world, index, dt);
        }
    }

    /// Integrate a single body against the current state of the world
    pub fn step_body(&self, world: &mut World, index: usize, dt: Scalar) {
        let Some(body) = world.bodies.get(index) else {
            return;
        };
        if body.stationary {
            return;
        }

        let mut position = body.position;
        let mut velocity = body.velocity;
        let field = BodyAccelerationField {
            model: &self.force_model,
            bodies: &world.bodies,
            index,
        };
        self.integrator.step(&mut position, &mut velocity, &field, dt);

        let body = &mut world.bodies[index];
        body.position = position;
        body.velocity = velocity;
    }
}

impl std::fmt::Debug for Stepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stepper")
            .field("force_model", &self.force_model)
            .field("integrator", &self.integrator.name())
            .field("time_step", &self.time_step)
            .finish()
    }
}
