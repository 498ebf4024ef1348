//! Runge-Kutta integration methods

use super::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};

/// Which velocity drives the position stages of [`FixedAccelerationRungeKutta`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocitySource {
    /// The velocity produced by this step's velocity update
    #[default]
    Updated,
    /// The velocity the body had when the step began
    Initial,
}

/// Runge-Kutta blend over a once-per-step acceleration
///
/// The acceleration is sampled a single time, at the pre-step position, and
/// fed to every stage:
///
/// - k1 = a*dt
/// - k2 = (a + k1/2)*dt
/// - k3 = (a + k2/2)*dt
/// - k4 = (a + k3)*dt
/// - v += (k1 + 2*k2 + 2*k3 + k4) / 6
///
/// Position follows the same pattern with `v` in place of `a`. This is not a
/// true fourth-order method; the stage weights only scale the step by roughly
/// `1 + dt/2`. Trajectories of the interactive simulator depend on this exact
/// arithmetic, so it must not be replaced by a textbook RK4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedAccelerationRungeKutta {
    pub velocity_source: VelocitySource,
}

impl FixedAccelerationRungeKutta {
    pub fn new(velocity_source: VelocitySource) -> Self {
        Self { velocity_source }
    }

    /// Weighted stage combination for a derivative held constant over `dt`
    #[inline]
    fn blend(derivative: Vector, dt: Scalar) -> Vector {
        let k1 = derivative * dt;
        let k2 = (derivative + k1 / 2.0) * dt;
        let k3 = (derivative + k2 / 2.0) * dt;
        let k4 = (derivative + k3) * dt;
        (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
    }
}

impl Integrator for FixedAccelerationRungeKutta {
    fn step(
        &self,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    ) {
        let acceleration = field.at(*position);
        let initial_velocity = *velocity;

        *velocity += Self::blend(acceleration, dt);

        let driving_velocity = match self.velocity_source {
            VelocitySource::Updated => *velocity,
            VelocitySource::Initial => initial_velocity,
        };
        *position += Self::blend(driving_velocity, dt);
    }

    fn name(&self) -> &str {
        "fixed_acceleration_rk4"
    }
}

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// 1. k1 = f(t, y)
/// 2. k2 = f(t + dt/2, y + k1*dt/2)
/// 3. k3 = f(t + dt/2, y + k2*dt/2)
/// 4. k4 = f(t + dt, y + k3*dt)
/// 5. y(t+dt) = y(t) + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl Integrator for RungeKuttaFourthOrder {
    fn step(
        &self,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    ) {
        let half_dt = dt * 0.5;

        let dx1 = *velocity;
        let dv1 = field.at(*position);

        let dx2 = *velocity + dv1 * half_dt;
        let dv2 = field.at(*position + dx1 * half_dt);

        let dx3 = *velocity + dv2 * half_dt;
        let dv3 = field.at(*position + dx2 * half_dt);

        let dx4 = *velocity + dv3 * dt;
        let dv4 = field.at(*position + dx3 * dt);

        *position += (dx1 + dx2 * 2.0 + dx3 * 2.0 + dx4) * (dt / 6.0);
        *velocity += (dv1 + dv2 * 2.0 + dv3 * 2.0 + dv4) * (dt / 6.0);
    }

    fn name(&self) -> &str {
        "classic_rk4"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingField {
        acceleration: Vector,
        calls: Cell<usize>,
    }

    impl AccelerationField for CountingField {
        fn at(&self, _position: Vector) -> Vector {
            self.calls.set(self.calls.get() + 1);
            self.acceleration
        }
    }

    /// Reference arithmetic for one axis, written out stage by stage
    fn blended_delta(derivative: Scalar, dt: Scalar) -> Scalar {
        let k1 = derivative * dt;
        let k2 = (derivative + k1 / 2.0) * dt;
        let k3 = (derivative + k2 / 2.0) * dt;
        let k4 = (derivative + k3) * dt;
        (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
    }

    #[test]
    fn test_fixed_acceleration_samples_field_once() {
        let integrator = FixedAccelerationRungeKutta::default();
        let field = CountingField {
            acceleration: Vector::new(1.0, -2.0),
            calls: Cell::new(0),
        };
        let mut position = Vector::ZERO;
        let mut velocity = Vector::ZERO;

        integrator.step(&mut position, &mut velocity, &field, 1.0 / 60.0);
        assert_eq!(field.calls.get(), 1);
    }

    #[test]
    fn test_fixed_acceleration_stage_weights() {
        let integrator = FixedAccelerationRungeKutta::new(VelocitySource::Updated);
        let dt = 1.0 / 60.0;
        let acceleration = Vector::new(120.0, -45.0);
        let field = move |_: Vector| acceleration;

        let mut position = Vector::new(10.0, 20.0);
        let mut velocity = Vector::new(3.0, -7.0);
        integrator.step(&mut position, &mut velocity, &field, dt);

        let vx = 3.0 + blended_delta(120.0, dt);
        let vy = -7.0 + blended_delta(-45.0, dt);
        assert_eq!(velocity, Vector::new(vx, vy));
        assert_eq!(
            position,
            Vector::new(10.0 + blended_delta(vx, dt), 20.0 + blended_delta(vy, dt))
        );
    }

    #[test]
    fn test_fixed_acceleration_initial_velocity_source() {
        let integrator = FixedAccelerationRungeKutta::new(VelocitySource::Initial);
        let dt = 0.1;
        let field = |_: Vector| Vector::new(0.0, -10.0);

        let mut position = Vector::ZERO;
        let mut velocity = Vector::new(2.0, 0.0);
        integrator.step(&mut position, &mut velocity, &field, dt);

        assert_eq!(velocity, Vector::new(2.0, blended_delta(-10.0, dt)));
        // Position only sees the pre-step velocity, so nothing moves vertically yet
        assert_eq!(position, Vector::new(blended_delta(2.0, dt), 0.0));
    }

    #[test]
    fn test_fixed_acceleration_blend_scales_step() {
        // With constant derivative the blend is roughly derivative * dt * (1 + dt/2)
        let dt = 1.0 / 60.0;
        let delta = blended_delta(1.0, dt);
        assert!(delta > dt);
        assert!((delta / dt - (1.0 + dt / 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_fixed_acceleration_zero_field_is_straight_line() {
        let integrator = FixedAccelerationRungeKutta::default();
        let field = |_: Vector| Vector::ZERO;
        let mut position = Vector::ZERO;
        let mut velocity = Vector::new(60.0, 0.0);

        integrator.step(&mut position, &mut velocity, &field, 1.0 / 60.0);
        assert_eq!(velocity, Vector::new(60.0, 0.0));
        assert_eq!(position.y, 0.0);
        assert!((position.x - blended_delta(60.0, 1.0 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rk4_constant_acceleration() {
        let rk4 = RungeKuttaFourthOrder;
        let mut position = Vector::new(1.0, 0.0);
        let mut velocity = Vector::new(0.0, 1.0);
        let field = |_: Vector| Vector::new(0.0, -9.81);
        let dt = 0.01;

        rk4.step(&mut position, &mut velocity, &field, dt);

        // Exact for constant acceleration: v = v0 + a*t, x = x0 + v0*t + a*t²/2
        assert!((velocity - Vector::new(0.0, 1.0 - 0.0981)).length() < 1e-12);
        let expected = Vector::new(1.0, 0.01 - 0.5 * 9.81 * dt * dt);
        assert!(
            (position - expected).length() < 1e-12,
            "Position should match RK4 result, got {position:?}"
        );
    }

    #[test]
    fn test_rk4_harmonic_oscillator_quarter_period() {
        let rk4 = RungeKuttaFourthOrder;
        let omega: Scalar = 1.0;
        let field = move |p: Vector| -omega * omega * p;

        let mut position = Vector::new(1.0, 0.0);
        let mut velocity = Vector::ZERO;
        let steps = 1000;
        let dt = std::f64::consts::FRAC_PI_2 / steps as Scalar;

        for _ in 0..steps {
            rk4.step(&mut position, &mut velocity, &field, dt);
        }

        assert!(position.x.abs() < 1e-9);
        assert!((velocity.x + 1.0).abs() < 1e-9);
    }
}
