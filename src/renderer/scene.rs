//! Scene geometry for both simulators
//!
//! Builders only read simulation state; they are safe to call at any time,
//! including while paused or with no projectiles in flight.

use glam::{DVec2, Vec2};
use std::f32::consts::PI;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::QualityPreset;
use crate::sim::{ForceSim, Projectile, ProjectileSim};

/// Pixels of arrow per newton of force
const FORCE_ARROW_SCALE: f32 = 2.0;
/// Pixels of bar per unit of body velocity
const BODY_VELOCITY_SCALE: f32 = 10.0;
/// Pixels of vector per m/s of projectile velocity
const PROJECTILE_VECTOR_SCALE: f32 = 2.0;
const ARROW_HEAD_LEN: f32 = 8.0;
const GRID_SPACING: f32 = (PIXELS_PER_METER * 5.0) as f32;

/// Render parameters derived from the quality preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub circle_segments: u32,
    /// Fade trails toward their oldest sample
    pub trail_fade: bool,
}

impl From<QualityPreset> for SceneStyle {
    fn from(quality: QualityPreset) -> Self {
        Self {
            circle_segments: quality.circle_segments(),
            trail_fade: quality.trail_fade(),
        }
    }
}

impl Default for SceneStyle {
    fn default() -> Self {
        QualityPreset::default().into()
    }
}

/// Something that can be drawn onto a fixed-size canvas
pub trait Scene {
    /// Logical canvas size in pixels
    fn canvas_size(&self) -> Vec2;
    /// Triangle list in canvas pixel coordinates
    fn build_vertices(&self, style: &SceneStyle) -> Vec<Vertex>;
}

#[inline]
fn px(v: DVec2) -> Vec2 {
    v.as_vec2()
}

impl Scene for ForceSim {
    fn canvas_size(&self) -> Vec2 {
        Vec2::new(TRACK_WIDTH as f32, TRACK_HEIGHT as f32)
    }

    fn build_vertices(&self, style: &SceneStyle) -> Vec<Vertex> {
        let size = self.canvas_size();
        let ground = GROUND_HEIGHT as f32;
        let mut v = Vec::with_capacity(512);

        v.extend(shapes::rect(Vec2::ZERO, size, colors::TRACK_BACKGROUND));
        v.extend(shapes::rect(
            Vec2::new(0.0, size.y - ground),
            Vec2::new(size.x, ground),
            colors::TRACK_GROUND,
        ));

        let center = px(self.body.position());
        let radius = self.body.radius as f32;
        v.extend(shapes::circle(center, radius, colors::BODY_FILL, style.circle_segments));
        v.extend(shapes::circle_outline(
            center,
            radius,
            3.0,
            colors::BODY_OUTLINE,
            style.circle_segments,
        ));

        let force = self.controls.force() as f32;
        if force > 0.0 {
            let tip = center + Vec2::new(force * FORCE_ARROW_SCALE, 0.0);
            v.extend(shapes::line(center, tip, 4.0, colors::FORCE_ARROW));
            v.extend(shapes::triangle(
                tip,
                tip + Vec2::new(-10.0, -5.0),
                tip + Vec2::new(-10.0, 5.0),
                colors::FORCE_ARROW,
            ));
        }

        let vx = self.body.vx as f32;
        if vx.abs() > 0.1 {
            let start = center - Vec2::new(0.0, radius + 10.0);
            let end = start + Vec2::new(vx * BODY_VELOCITY_SCALE, 0.0);
            v.extend(shapes::line(start, end, 3.0, colors::BODY_VELOCITY));
        }

        v
    }
}

impl Scene for ProjectileSim {
    fn canvas_size(&self) -> Vec2 {
        Vec2::new(FIELD_WIDTH as f32, FIELD_HEIGHT as f32)
    }

    fn build_vertices(&self, style: &SceneStyle) -> Vec<Vertex> {
        let size = self.canvas_size();
        let controls = &self.controls;
        let mut v = Vec::with_capacity(2048);

        v.extend(shapes::vertical_gradient(
            Vec2::ZERO,
            size,
            colors::SKY_TOP,
            colors::SKY_BOTTOM,
        ));

        if controls.show_grid {
            let mut x = 0.0;
            while x < size.x {
                v.extend(shapes::line(Vec2::new(x, 0.0), Vec2::new(x, size.y), 1.0, colors::GRID));
                x += GRID_SPACING;
            }
            let mut y = 0.0;
            while y < size.y {
                v.extend(shapes::line(Vec2::new(0.0, y), Vec2::new(size.x, y), 1.0, colors::GRID));
                y += GRID_SPACING;
            }
        }

        let ground = GROUND_HEIGHT as f32;
        v.extend(shapes::rect(
            Vec2::new(0.0, size.y - ground),
            Vec2::new(size.x, ground),
            colors::FIELD_GROUND,
        ));

        // Emitter: base, barrel rotated up by the launch angle
        let emitter = Vec2::new(EMITTER_X as f32, EMITTER_Y as f32);
        let angle = (controls.angle_deg() as f32).to_radians();
        v.extend(shapes::circle(emitter, 25.0, colors::EMITTER_BASE, style.circle_segments));
        v.extend(shapes::rotated_rect(
            emitter,
            -angle,
            Vec2::new(0.0, -8.0),
            Vec2::new(40.0, 16.0),
            colors::EMITTER_BARREL,
        ));

        for projectile in &self.field.projectiles {
            if controls.show_trajectory {
                v.extend(trail_vertices(projectile, style));
            }
            if projectile.active {
                v.extend(projectile_vertices(projectile, controls.show_vectors, style));
            }
        }

        // Angle indicator sweeps from the horizon up to the barrel
        v.extend(shapes::arc_stroke(
            emitter,
            35.0,
            2.0,
            -angle,
            0.0,
            colors::ANGLE_INDICATOR,
            style.circle_segments,
        ));

        v
    }
}

fn trail_vertices(projectile: &Projectile, style: &SceneStyle) -> Vec<Vertex> {
    if projectile.trail.len() < 2 {
        return Vec::new();
    }
    let points: Vec<Vec2> = projectile.trail.iter().map(|p| px(*p)).collect();
    shapes::polyline(&points, 2.0, colors::TRAIL, style.trail_fade, 0.25)
}

fn projectile_vertices(projectile: &Projectile, show_vectors: bool, style: &SceneStyle) -> Vec<Vertex> {
    let center = px(projectile.pos);
    let radius = PROJECTILE_RADIUS as f32;
    let mut v = shapes::circle(center, radius, colors::PROJECTILE_FILL, style.circle_segments);
    v.extend(shapes::circle_outline(
        center,
        radius,
        2.0,
        colors::PROJECTILE_OUTLINE,
        style.circle_segments,
    ));

    if show_vectors {
        let vel = px(projectile.vel);
        let tip = center + vel * PROJECTILE_VECTOR_SCALE;
        v.extend(shapes::line(center, tip, 3.0, colors::PROJECTILE_VELOCITY));

        let heading = vel.y.atan2(vel.x);
        for side in [-PI / 6.0, PI / 6.0] {
            let barb = tip - Vec2::from_angle(heading + side) * ARROW_HEAD_LEN;
            v.extend(shapes::line(tip, barb, 3.0, colors::PROJECTILE_VELOCITY));
        }
    }

    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Simulation;

    fn style() -> SceneStyle {
        SceneStyle {
            circle_segments: 16,
            trail_fade: true,
        }
    }

    #[test]
    fn test_force_scene_without_force_or_motion() {
        let mut sim = ForceSim::default();
        sim.controls.set_force(0.0);
        let idle = sim.build_vertices(&style());

        sim.controls.set_force(50.0);
        let with_arrow = sim.build_vertices(&style());
        assert!(with_arrow.len() > idle.len());
        assert_eq!(idle.len() % 3, 0);
    }

    #[test]
    fn test_force_scene_adds_velocity_bar_when_moving() {
        let mut sim = ForceSim::default();
        let before = sim.build_vertices(&style()).len();
        for _ in 0..30 {
            sim.step();
        }
        assert!(sim.body.vx > 0.1);
        assert_eq!(sim.build_vertices(&style()).len(), before + 6);
    }

    #[test]
    fn test_empty_projectile_scene_draws_background() {
        let sim = ProjectileSim::default();
        let v = sim.build_vertices(&style());
        assert!(!v.is_empty());
        assert_eq!(v.len() % 3, 0);
        let size = sim.canvas_size();
        assert!(v.iter().all(|v| v.position[0] >= -50.0 && v.position[0] <= size.x + 50.0));
    }

    #[test]
    fn test_projectile_scene_does_not_mutate() {
        let mut sim = ProjectileSim::default();
        sim.controls.show_vectors = true;
        sim.launch();
        for _ in 0..10 {
            sim.step();
        }
        let snapshot = sim.field.projectiles.clone();
        let with_projectile = sim.build_vertices(&style());
        assert_eq!(sim.field.projectiles, snapshot);

        sim.controls.show_grid = false;
        sim.controls.show_vectors = false;
        assert!(sim.build_vertices(&style()).len() < with_projectile.len());
    }

    #[test]
    fn test_hidden_trajectory_skips_trails() {
        let mut sim = ProjectileSim::default();
        sim.launch();
        for _ in 0..10 {
            sim.step();
        }
        let shown = sim.build_vertices(&style()).len();
        sim.controls.show_trajectory = false;
        let hidden = sim.build_vertices(&style()).len();
        // Ten segments of six vertices each
        assert_eq!(shown - hidden, 60);
    }
}
