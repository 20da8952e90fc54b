//! Force/mass simulator: one body on a horizontal track
//!
//! Newton's second law with explicit Euler integration. The frame is assumed
//! to last [`FORCE_DT`]; wall-clock time is never measured, so the effective
//! speed follows the display refresh rate.

use glam::DVec2;

use super::driver::Simulation;
use super::params::{ForceControls, Mass};
use crate::consts::*;

/// The single body riding the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Position along the track (pixels)
    pub x: f64,
    /// Velocity along the track (units/s; one unit = [`FORCE_PIXELS_PER_UNIT`] px)
    pub vx: f64,
    pub radius: f64,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            x: BODY_START_X,
            vx: 0.0,
            radius: BODY_RADIUS,
        }
    }
}

impl Body {
    /// Screen position; the body never leaves the track line
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, TRACK_Y)
    }

    pub fn velocity(&self) -> DVec2 {
        DVec2::new(self.vx, 0.0)
    }

    /// Leftmost and rightmost centre positions that keep the body on the track
    pub fn limits(&self) -> (f64, f64) {
        (self.radius, TRACK_WIDTH - self.radius)
    }
}

/// a = F / m
#[inline]
pub fn acceleration(force: f64, mass: Mass) -> f64 {
    force / mass.get()
}

/// Advance the body by one fixed frame under a constant force.
///
/// Touching or crossing a wall clamps the body onto it and reverses the
/// velocity, keeping [`RESTITUTION`] of its magnitude.
pub fn step_body(body: &Body, force: f64, mass: Mass) -> Body {
    let a = acceleration(force, mass);
    let vx = body.vx + a * FORCE_DT;
    let x = body.x + vx * FORCE_DT * FORCE_PIXELS_PER_UNIT;

    let (left, right) = body.limits();
    let (x, vx) = if x <= left {
        (left, -vx * RESTITUTION)
    } else if x >= right {
        (right, -vx * RESTITUTION)
    } else {
        (x, vx)
    };

    Body { x, vx, ..*body }
}

/// Force/mass simulator instance: body plus its live controls
#[derive(Debug, Clone, Default)]
pub struct ForceSim {
    pub body: Body,
    pub controls: ForceControls,
}

impl ForceSim {
    pub fn new(controls: ForceControls) -> Self {
        Self {
            body: Body::default(),
            controls,
        }
    }

    /// Acceleration implied by the current controls
    pub fn acceleration(&self) -> f64 {
        acceleration(self.controls.force(), self.controls.mass())
    }
}

impl Simulation for ForceSim {
    fn step(&mut self) {
        self.body = step_body(&self.body, self.controls.force(), self.controls.mass());
    }

    fn reset(&mut self) {
        self.body = Body::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mass(kg: f64) -> Mass {
        Mass::new(kg).unwrap()
    }

    #[test]
    fn test_right_wall_bounce() {
        let body = Body {
            x: TRACK_WIDTH - BODY_RADIUS - 1.0,
            vx: 5.0,
            ..Body::default()
        };
        let next = step_body(&body, 0.0, mass(10.0));
        assert_eq!(next.x, TRACK_WIDTH - BODY_RADIUS);
        assert!((next.vx - (-4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_left_wall_bounce() {
        let body = Body {
            x: BODY_RADIUS + 2.0,
            vx: -10.0,
            ..Body::default()
        };
        let next = step_body(&body, 0.0, mass(1.0));
        assert_eq!(next.x, BODY_RADIUS);
        assert!((next.vx - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_uses_updated_velocity() {
        let body = Body::default();
        let next = step_body(&body, 50.0, mass(10.0));
        let vx = 5.0 * FORCE_DT;
        assert!((next.vx - vx).abs() < 1e-12);
        assert!((next.x - (BODY_START_X + vx * FORCE_DT * FORCE_PIXELS_PER_UNIT)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_force_at_rest_stays_put() {
        let mut sim = ForceSim::default();
        sim.controls.set_force(0.0);
        for _ in 0..120 {
            sim.step();
        }
        assert_eq!(sim.body, Body::default());
    }

    #[test]
    fn test_reset_restores_start() {
        let mut sim = ForceSim::default();
        for _ in 0..30 {
            sim.step();
        }
        assert!(sim.body.x > BODY_START_X);
        sim.reset();
        assert_eq!(sim.body.position(), DVec2::new(100.0, 300.0));
        assert_eq!(sim.body.velocity(), DVec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_acceleration_is_force_over_mass(f in 0.0f64..1000.0, m in 0.001f64..1000.0) {
            let a = acceleration(f, mass(m));
            prop_assert!((a - f / m).abs() < 1e-9);
        }

        #[test]
        fn prop_zero_force_keeps_velocity(vx in -3.0f64..3.0, m in 1.0f64..50.0, ticks in 1usize..20) {
            // Start mid-track so no wall is reached within the run
            let mut body = Body { x: TRACK_WIDTH / 2.0, vx, ..Body::default() };
            let start = body.x;
            for _ in 0..ticks {
                body = step_body(&body, 0.0, mass(m));
            }
            prop_assert!((body.vx - vx).abs() < 1e-12);
            let expected = start + vx * FORCE_DT * FORCE_PIXELS_PER_UNIT * ticks as f64;
            prop_assert!((body.x - expected).abs() < 1e-9);
        }
    }
}
