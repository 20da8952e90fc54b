//! Control parameters for both simulators
//!
//! Every control mirrors a bounded slider (or a checkbox). Setters clamp and
//! snap to the slider grid, so the integrators never see an out-of-range
//! value. Mass is carried as [`Mass`], which cannot be zero or negative.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected control value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),

    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{name} = {value} is not a multiple of {step} from {min}")]
    OffStep {
        name: &'static str,
        value: f64,
        min: f64,
        step: f64,
    },
}

/// Bounds and granularity of a slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub const fn new(name: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            name,
            min,
            max,
            step,
        }
    }

    /// Snap to the nearest step and clamp into range. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Trim float noise from the multiplication (0.1 * 98 != 9.8)
        let snapped = (snapped * 1e9).round() / 1e9;
        snapped.clamp(self.min, self.max)
    }

    /// Accept a value only if it already lies inside the range and on a step
    pub fn check(&self, value: f64) -> Result<f64, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotFinite {
                name: self.name,
                value,
            });
        }
        if value < self.min || value > self.max {
            return Err(ParamError::OutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        let steps = (value - self.min) / self.step;
        if (steps - steps.round()).abs() > STEP_TOLERANCE {
            return Err(ParamError::OffStep {
                name: self.name,
                value,
                min: self.min,
                step: self.step,
            });
        }
        Ok(value)
    }
}

/// Slack, in steps, for decimal steps such as 0.1 that floats cannot hold exactly
const STEP_TOLERANCE: f64 = 1e-6;

pub const FORCE_RANGE: SliderRange = SliderRange::new("force", 0.0, 100.0, 5.0);
pub const FORCE_MASS_RANGE: SliderRange = SliderRange::new("mass", 1.0, 50.0, 1.0);

pub const ANGLE_RANGE: SliderRange = SliderRange::new("angle", 0.0, 90.0, 1.0);
pub const SPEED_RANGE: SliderRange = SliderRange::new("velocity", 1.0, 50.0, 1.0);
pub const PROJECTILE_MASS_RANGE: SliderRange = SliderRange::new("mass", 1.0, 20.0, 0.5);
pub const GRAVITY_RANGE: SliderRange = SliderRange::new("gravity", 0.0, 20.0, 0.1);
pub const DRAG_RANGE: SliderRange = SliderRange::new("air resistance", 0.0, 100.0, 1.0);

/// Strictly positive, finite mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Mass(f64);

impl Mass {
    pub fn new(kg: f64) -> Result<Self, ParamError> {
        if !kg.is_finite() {
            return Err(ParamError::NotFinite {
                name: "mass",
                value: kg,
            });
        }
        if kg <= 0.0 {
            return Err(ParamError::NonPositiveMass(kg));
        }
        Ok(Self(kg))
    }

    /// Clamp through a slider range whose minimum is positive
    fn from_slider(range: &SliderRange, kg: f64) -> Self {
        debug_assert!(range.min > 0.0);
        Self(range.clamp(kg))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Mass {
    type Error = ParamError;

    fn try_from(kg: f64) -> Result<Self, Self::Error> {
        Mass::new(kg)
    }
}

impl From<Mass> for f64 {
    fn from(mass: Mass) -> f64 {
        mass.0
    }
}

/// Controls of the force/mass simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceControls {
    force: f64,
    mass: Mass,
}

impl Default for ForceControls {
    fn default() -> Self {
        Self {
            force: 50.0,
            mass: Mass(10.0),
        }
    }
}

impl ForceControls {
    pub fn force(&self) -> f64 {
        self.force
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    pub fn set_force(&mut self, newtons: f64) {
        self.force = FORCE_RANGE.clamp(newtons);
    }

    pub fn set_mass(&mut self, kg: f64) {
        self.mass = Mass::from_slider(&FORCE_MASS_RANGE, kg);
    }

    /// Reject values outside the slider ranges instead of clamping
    pub fn validate(&self) -> Result<(), ParamError> {
        FORCE_RANGE.check(self.force)?;
        FORCE_MASS_RANGE.check(self.mass.get())?;
        Ok(())
    }
}

/// Controls of the projectile simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileControls {
    angle_deg: f64,
    speed: f64,
    mass: Mass,
    gravity: f64,
    drag: f64,
    pub show_trajectory: bool,
    pub show_vectors: bool,
    pub show_grid: bool,
}

impl Default for ProjectileControls {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            speed: 20.0,
            mass: Mass(5.0),
            gravity: 9.8,
            drag: 0.0,
            show_trajectory: true,
            show_vectors: false,
            show_grid: true,
        }
    }
}

impl ProjectileControls {
    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn drag(&self) -> f64 {
        self.drag
    }

    pub fn set_angle(&mut self, degrees: f64) {
        self.angle_deg = ANGLE_RANGE.clamp(degrees);
    }

    pub fn set_speed(&mut self, meters_per_sec: f64) {
        self.speed = SPEED_RANGE.clamp(meters_per_sec);
    }

    pub fn set_mass(&mut self, kg: f64) {
        self.mass = Mass::from_slider(&PROJECTILE_MASS_RANGE, kg);
    }

    pub fn set_gravity(&mut self, accel: f64) {
        self.gravity = GRAVITY_RANGE.clamp(accel);
    }

    pub fn set_drag(&mut self, coefficient: f64) {
        self.drag = DRAG_RANGE.clamp(coefficient);
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        ANGLE_RANGE.check(self.angle_deg)?;
        SPEED_RANGE.check(self.speed)?;
        PROJECTILE_MASS_RANGE.check(self.mass.get())?;
        GRAVITY_RANGE.check(self.gravity)?;
        DRAG_RANGE.check(self.drag)?;
        Ok(())
    }
}
