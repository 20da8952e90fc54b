//! Projectile simulator: many ballistic bodies launched from a fixed emitter
//!
//! Gravity is a constant downward acceleration (mass independent). Drag is a
//! per-axis quadratic approximation: each axis is damped by the square of its
//! own velocity component, not by the speed magnitude.

use std::collections::VecDeque;

use glam::DVec2;

use super::driver::Simulation;
use super::params::{Mass, ProjectileControls};
use crate::consts::*;
use crate::launch_velocity;

/// Launch origin in screen pixels
pub const EMITTER: DVec2 = DVec2::new(EMITTER_X, EMITTER_Y);

/// A launched projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    /// Screen position (pixels, y down)
    pub pos: DVec2,
    /// Velocity (m/s, y down)
    pub vel: DVec2,
    /// Seconds since launch
    pub time: f64,
    /// False once the projectile has left the visible field
    pub active: bool,
    /// Past positions, oldest first
    pub trail: VecDeque<DVec2>,
}

impl Projectile {
    fn launch(id: u32, angle_deg: f64, speed: f64) -> Self {
        let mut trail = VecDeque::with_capacity(TRAIL_CAPACITY);
        trail.push_back(EMITTER);
        Self {
            id,
            pos: EMITTER,
            vel: launch_velocity(angle_deg, speed),
            time: 0.0,
            active: true,
            trail,
        }
    }

    /// Append a trail sample, discarding the oldest beyond capacity
    fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }
    }
}

/// True while `pos` lies inside the visible field
#[inline]
pub fn in_field(pos: DVec2) -> bool {
    pos.x < FIELD_WIDTH && pos.y < FIELD_HEIGHT && pos.y > 0.0
}

/// Per-axis quadratic drag force
#[inline]
pub fn drag_force(vel: DVec2, coefficient: f64) -> DVec2 {
    let k = coefficient / DRAG_DIVISOR;
    DVec2::new(-k * vel.x * vel.x.abs(), -k * vel.y * vel.y.abs())
}

/// Environment shared by every projectile during one step
#[derive(Debug, Clone, Copy)]
pub struct StepEnv {
    pub gravity: f64,
    pub drag: f64,
    pub mass: Mass,
    /// Record trail samples; when false every trail is cleared
    pub record_trail: bool,
}

impl From<&ProjectileControls> for StepEnv {
    fn from(controls: &ProjectileControls) -> Self {
        Self {
            gravity: controls.gravity(),
            drag: controls.drag(),
            mass: controls.mass(),
            record_trail: controls.show_trajectory,
        }
    }
}

/// Advance one active projectile by [`PROJECTILE_DT`]
pub fn step_projectile(p: &mut Projectile, env: &StepEnv) {
    let m = env.mass.get();
    let drag = drag_force(p.vel, env.drag);
    let accel = DVec2::new(drag.x / m, env.gravity + drag.y / m);

    p.vel += accel * PROJECTILE_DT;
    p.pos += p.vel * PROJECTILE_DT * PIXELS_PER_METER;
    p.time += PROJECTILE_DT;
    p.active = in_field(p.pos);

    if env.record_trail {
        p.record_trail();
    } else {
        p.trail.clear();
    }

    if !p.active {
        log::debug!(
            "Projectile {} left the field at ({:.1}, {:.1}) after {:.2}s",
            p.id,
            p.pos.x,
            p.pos.y,
            p.time
        );
    }
}

/// All live projectiles plus the identity counter
#[derive(Debug, Clone)]
pub struct ProjectileField {
    /// Sorted by id (launch order)
    pub projectiles: Vec<Projectile>,
    next_id: u32,
}

impl Default for ProjectileField {
    fn default() -> Self {
        Self {
            projectiles: Vec::new(),
            next_id: 1,
        }
    }
}

impl ProjectileField {
    /// Identity the next launch will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Launch a projectile from the emitter, returning its identity
    pub fn launch(&mut self, angle_deg: f64, speed: f64) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.projectiles
            .push(Projectile::launch(id, angle_deg, speed));
        log::debug!("Launched projectile {} at {}° / {} m/s", id, angle_deg, speed);
        id
    }

    /// Advance every active projectile and drop finished ones.
    ///
    /// Inactive projectiles are frozen. They keep their trail while trails
    /// are recorded and are dropped once their trail is empty.
    pub fn step(&mut self, env: &StepEnv) {
        for p in &mut self.projectiles {
            if p.active {
                step_projectile(p, env);
            } else if !env.record_trail {
                p.trail.clear();
            }
        }
        self.projectiles.retain(|p| p.active || !p.trail.is_empty());
    }

    pub fn active_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.active).count()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.next_id = 1;
    }
}

/// Projectile simulator instance: field plus its live controls
#[derive(Debug, Clone, Default)]
pub struct ProjectileSim {
    pub field: ProjectileField,
    pub controls: ProjectileControls,
}

impl ProjectileSim {
    pub fn new(controls: ProjectileControls) -> Self {
        Self {
            field: ProjectileField::default(),
            controls,
        }
    }

    /// Fire using the current angle and speed
    pub fn launch(&mut self) -> u32 {
        self.field
            .launch(self.controls.angle_deg(), self.controls.speed())
    }
}

impl Simulation for ProjectileSim {
    fn step(&mut self) {
        let env = StepEnv::from(&self.controls);
        self.field.step(&env);
    }

    fn reset(&mut self) {
        self.field.clear();
    }
}
