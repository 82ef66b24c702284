//! Collision detection and response for the rectangular playfield
//!
//! Pure functions over positions and velocities; [`super::tick`] decides what
//! to do with the results.

use glam::Vec2;

use super::state::{Paddle, Wall};

/// Widest paddle deflection from vertical (60°)
pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

/// Reflect the ball off the side and top walls
///
/// Velocity is pointed away from the wall that was crossed and the ball is
/// pushed back inside, so a ball resting against a wall does not re-trigger.
/// Returns the walls hit this frame.
pub fn resolve_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, width: f32) -> Vec<Wall> {
    let mut hits = Vec::new();

    if pos.x - radius < 0.0 {
        vel.x = vel.x.abs();
        pos.x = radius;
        hits.push(Wall::Left);
    } else if pos.x + radius > width {
        vel.x = -vel.x.abs();
        pos.x = (width - radius).max(radius);
        hits.push(Wall::Right);
    }

    if pos.y - radius < 0.0 {
        vel.y = vel.y.abs();
        pos.y = radius;
        hits.push(Wall::Top);
    }

    hits
}

/// Ball overlaps the paddle's vertical band and its centre is strictly
/// within the paddle's horizontal extent
pub fn hits_paddle(pos: Vec2, radius: f32, paddle: &Paddle) -> bool {
    pos.y + radius > paddle.y
        && pos.y - radius < paddle.y + paddle.height
        && pos.x > paddle.x
        && pos.x < paddle.x + paddle.width
}

/// Where along the paddle the ball struck, 0 = left edge, 1 = right edge
pub fn hit_position(ball_x: f32, paddle: &Paddle) -> f32 {
    ((ball_x - paddle.x) / paddle.width).clamp(0.0, 1.0)
}

/// Deflection from vertical for a hit position: -60° .. +60°
pub fn bounce_angle(hit_pos: f32) -> f32 {
    (hit_pos - 0.5) * MAX_BOUNCE_ANGLE * 2.0
}

/// Post-bounce velocity: same speed, upward, angled by hit position
pub fn paddle_bounce(vel: Vec2, hit_pos: f32) -> Vec2 {
    let speed = vel.length();
    let angle = bounce_angle(hit_pos);
    Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs())
}

/// Ball has fallen past the bottom edge
pub fn missed_bottom(pos: Vec2, radius: f32, height: f32) -> bool {
    pos.y + radius > height
}
