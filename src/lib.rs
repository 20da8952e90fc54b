//! Physics Lab - classroom physics simulators
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integrators, controls, driver state machine)
//! - `renderer`: Scene geometry and the WebGPU rendering pipeline
//! - `platform`: Frame scheduling for browser/headless hosts
//! - `settings`: Quality preset and initial control values
//! - `hud`: Textual readouts shown next to each canvas

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Force/mass simulator: assumed duration of one display frame (60 Hz)
    pub const FORCE_DT: f64 = 1.0 / 60.0;
    /// Force/mass simulator: pixels per simulated velocity unit
    pub const FORCE_PIXELS_PER_UNIT: f64 = 100.0;
    /// Force/mass simulator: canvas/track dimensions
    pub const TRACK_WIDTH: f64 = 700.0;
    pub const TRACK_HEIGHT: f64 = 400.0;
    /// Vertical position of the track (body never leaves it)
    pub const TRACK_Y: f64 = 300.0;
    /// Body starting x after mount/reset
    pub const BODY_START_X: f64 = 100.0;
    pub const BODY_RADIUS: f64 = 20.0;
    /// Fraction of velocity kept after a wall hit
    pub const RESTITUTION: f64 = 0.8;

    /// Projectile simulator: fixed integration step (seconds)
    pub const PROJECTILE_DT: f64 = 0.02;
    /// Projectile simulator: pixels per meter
    pub const PIXELS_PER_METER: f64 = 10.0;
    /// Projectile simulator: visible field (projectiles retire outside it)
    pub const FIELD_WIDTH: f64 = 750.0;
    pub const FIELD_HEIGHT: f64 = 400.0;
    /// Launch origin
    pub const EMITTER_X: f64 = 80.0;
    pub const EMITTER_Y: f64 = 350.0;
    pub const PROJECTILE_RADIUS: f64 = 6.0;
    /// Maximum trail samples kept per projectile
    pub const TRAIL_CAPACITY: usize = 100;
    /// Drag slider value is divided by this before use
    pub const DRAG_DIVISOR: f64 = 10_000.0;

    /// Height of the ground band drawn at the bottom of both canvases
    pub const GROUND_HEIGHT: f64 = 50.0;
}

/// Launch velocity for an angle in degrees above the horizon.
///
/// Screen y grows downward, so upward launches have negative `y`.
#[inline]
pub fn launch_velocity(angle_deg: f64, speed: f64) -> DVec2 {
    let theta = angle_deg.to_radians();
    DVec2::new(speed * theta.cos(), -speed * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_velocity_points_up_screen() {
        let v = launch_velocity(90.0, 10.0);
        assert!(v.x.abs() < 1e-9);
        assert!((v.y + 10.0).abs() < 1e-9);

        let v = launch_velocity(0.0, 3.0);
        assert!((v.x - 3.0).abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
    }
}
