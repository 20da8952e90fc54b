//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in canvas pixel coordinates
//! (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
    // Corners in order a, b, c, d around the quad
    let [a, b, c, d] = corners;
    let [ca, cb, cc, cd] = colors;
    vertices.push(Vertex::new(a.x, a.y, ca));
    vertices.push(Vertex::new(b.x, b.y, cb));
    vertices.push(Vertex::new(c.x, c.y, cc));

    vertices.push(Vertex::new(a.x, a.y, ca));
    vertices.push(Vertex::new(c.x, c.y, cc));
    vertices.push(Vertex::new(d.x, d.y, cd));
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vertical_gradient(min, size, color, color)
}

/// Axis-aligned rectangle blending from `top` to `bottom`
pub fn vertical_gradient(min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        [top, top, bottom, bottom],
    );
    vertices
}

/// Rectangle in local coordinates, rotated by `angle` and moved to `origin`
pub fn rotated_rect(origin: Vec2, angle: f32, min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let max = min + size;
    let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
        .map(|corner| origin + rot.rotate(corner));
    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, corners, [color; 4]);
    vertices
}

/// Line segment of the given stroke width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_segment(&mut vertices, from, to, width, color, color);
    vertices
}

fn push_segment(
    vertices: &mut Vec<Vertex>,
    from: Vec2,
    to: Vec2,
    width: f32,
    from_color: [f32; 4],
    to_color: [f32; 4],
) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let half = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    push_quad(
        vertices,
        [from + half, to + half, to - half, from - half],
        [from_color, to_color, to_color, from_color],
    );
}

/// Connected line strip. With `fade`, alpha ramps from `min_alpha` of the
/// color's alpha at the first point up to full alpha at the last point.
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4], fade: bool, min_alpha: f32) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let last = (points.len() - 1) as f32;
    let shade = |i: usize| {
        if fade {
            let t = i as f32 / last;
            let alpha = color[3] * (min_alpha + (1.0 - min_alpha) * t);
            [color[0], color[1], color[2], alpha]
        } else {
            color
        }
    };

    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);
    for (i, pair) in points.windows(2).enumerate() {
        push_segment(&mut vertices, pair[0], pair[1], width, shade(i), shade(i + 1));
    }
    vertices
}

/// Filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Circle outline: a stroke of `width` centered on `radius`
pub fn circle_outline(center: Vec2, radius: f32, width: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    arc_stroke(center, radius, width, 0.0, 2.0 * PI, color, segments)
}

/// Stroke along the arc from `theta_start` to `theta_end` (radians, screen
/// orientation: positive angles turn clockwise because y points down)
pub fn arc_stroke(
    center: Vec2,
    radius: f32,
    width: f32,
    theta_start: f32,
    theta_end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let span = theta_end - theta_start;
    // Scale tessellation with the swept fraction of a full turn
    let num_segments = ((segments as f32 * span.abs() / (2.0 * PI)).ceil() as u32).max(4);
    let inner_r = (radius - width / 2.0).max(0.0);
    let outer_r = radius + width / 2.0;
    let at = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    let mut vertices = Vec::with_capacity((num_segments * 6) as usize);
    for i in 0..num_segments {
        let theta1 = theta_start + span * (i as f32 / num_segments as f32);
        let theta2 = theta_start + span * ((i + 1) as f32 / num_segments as f32);
        push_quad(
            &mut vertices,
            [at(inner_r, theta1), at(outer_r, theta1), at(outer_r, theta2), at(inner_r, theta2)],
            [color; 4],
        );
    }

    vertices
}
