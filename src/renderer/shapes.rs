//! Shape generation for 2D primitives
//!
//! All shapes are emitted in playfield pixels (origin top-left, y down) as
//! triangle lists.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    quad(pos, size, [color; 4])
}

/// Rectangle blending left → right
pub fn rect_gradient_h(pos: Vec2, size: Vec2, left: [f32; 4], right: [f32; 4]) -> Vec<Vertex> {
    quad(pos, size, [left, right, right, left])
}

/// Rectangle blending top → bottom
pub fn rect_gradient_v(pos: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    quad(pos, size, [top, top, bottom, bottom])
}

/// Corner colors in order: top-left, top-right, bottom-right, bottom-left
fn quad(pos: Vec2, size: Vec2, c: [[f32; 4]; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, c[0]),
        Vertex::new(x1, y0, c[1]),
        Vertex::new(x1, y1, c[2]),
        Vertex::new(x0, y0, c[0]),
        Vertex::new(x1, y1, c[2]),
        Vertex::new(x0, y1, c[3]),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial(center, radius, color, color, segments)
}

/// Filled circle fading from `inner` at the centre to `outer` at the rim
pub fn radial(
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, inner));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            outer,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            outer,
        ));
    }

    vertices
}

/// Plus sign centred on `center` (score popups)
pub fn plus(center: Vec2, arm: f32, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = thickness / 2.0;
    let mut vertices = rect(
        center - Vec2::new(arm, half),
        Vec2::new(arm * 2.0, thickness),
        color,
    );
    vertices.extend(rect(
        center - Vec2::new(half, arm),
        Vec2::new(thickness, arm * 2.0),
        color,
    ));
    vertices
}
