//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only (wall-clock time is never read)
//! - Stable iteration order (projectiles by launch id)
//! - No rendering or platform dependencies

pub mod analytic;
pub mod driver;
pub mod force;
pub mod params;
pub mod projectile;

pub use analytic::Trajectory;
pub use driver::{Driver, LoopPhase, Simulation};
pub use force::{Body, ForceSim, acceleration, step_body};
pub use params::{ForceControls, Mass, ParamError, ProjectileControls, SliderRange};
pub use projectile::{EMITTER, Projectile, ProjectileField, ProjectileSim, StepEnv, step_projectile};
