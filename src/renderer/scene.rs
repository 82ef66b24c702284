//! Frame state → vertex list
//!
//! Read-only view over the simulation; this is the only place colors, glow
//! and pulse animation are decided.

use glam::Vec2;

use super::shapes::{circle, plus, radial, rect, rect_gradient_h, rect_gradient_v};
use super::vertex::{Vertex, colors};
use crate::sim::{Ball, Brick, Effects, GamePhase, GameState, Paddle};

const CIRCLE_SEGMENTS: u32 = 20;

/// Glow strength for a brick at time `t` (seconds): 0.4 ..= 1.0
pub fn pulse_intensity(time_secs: f32, phase: f32) -> f32 {
    (time_secs * 2.0 + phase).sin() * 0.3 + 0.7
}

/// Dim layer alpha for the current phase, if it gets one
pub fn overlay_alpha(phase: GamePhase) -> Option<f32> {
    match phase {
        GamePhase::Paused => Some(0.7),
        GamePhase::GameOver | GamePhase::Victory => Some(0.85),
        GamePhase::Idle | GamePhase::Running => None,
    }
}

/// Build every vertex for one frame
///
/// `show_overlay` gates the dim layer so terminal screens can appear after a
/// short delay.
pub fn build_scene(
    state: &GameState,
    effects: &Effects,
    time_secs: f32,
    show_overlay: bool,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    for brick in state.bricks.iter().filter(|b| b.is_active()) {
        push_brick(&mut vertices, brick, time_secs);
    }

    for p in &effects.particles {
        // Halo then core
        vertices.extend(circle(p.pos, p.size * 1.8, p.color.with_alpha(p.life * 0.25), 10));
        vertices.extend(circle(p.pos, p.size, p.color.with_alpha(p.life), 10));
    }

    let popup_color = state.config.effects.popup_color;
    for popup in &effects.popups {
        let arm = 5.0 + (popup.points as f32 / 10.0);
        vertices.extend(plus(popup.pos, arm, 3.0, popup_color.with_alpha(popup.life)));
    }

    push_ball(&mut vertices, &state.ball);
    push_paddle(&mut vertices, &state.paddle);

    if show_overlay {
        if let Some(alpha) = overlay_alpha(state.phase) {
            vertices.extend(rect(
                Vec2::ZERO,
                Vec2::new(state.width, state.height),
                colors::OVERLAY.with_alpha(alpha),
            ));
        }
    }

    vertices
}

fn push_brick(vertices: &mut Vec<Vertex>, brick: &Brick, time_secs: f32) {
    let pulse = pulse_intensity(time_secs, brick.pulse);
    let glow = 6.0 * pulse;
    vertices.extend(rect(
        brick.pos - Vec2::splat(glow),
        brick.size + Vec2::splat(glow * 2.0),
        brick.color.with_alpha(0.3 * pulse),
    ));
    vertices.extend(rect(brick.pos, brick.size, brick.color.0));
    // Top sheen fading into a darker bottom
    vertices.extend(rect_gradient_v(
        brick.pos,
        Vec2::new(brick.size.x, brick.size.y / 2.0),
        [1.0, 1.0, 1.0, 0.4],
        [1.0, 1.0, 1.0, 0.1],
    ));
    vertices.extend(rect_gradient_v(
        brick.pos + Vec2::new(0.0, brick.size.y / 2.0),
        Vec2::new(brick.size.x, brick.size.y / 2.0),
        [1.0, 1.0, 1.0, 0.1],
        [0.0, 0.0, 0.0, 0.2],
    ));
}

fn push_ball(vertices: &mut Vec<Vertex>, ball: &Ball) {
    let len = ball.trail.len() as f32;
    for (i, pos) in ball.trail.iter().enumerate() {
        let alpha = (i as f32 / len) * 0.5;
        vertices.extend(circle(
            *pos,
            ball.radius * 0.8,
            colors::BALL.with_alpha(alpha),
            CIRCLE_SEGMENTS,
        ));
    }

    vertices.extend(circle(
        ball.pos,
        ball.radius * 2.2,
        colors::BALL.with_alpha(0.2),
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(radial(
        ball.pos,
        ball.radius,
        [1.0, 1.0, 1.0, 1.0],
        colors::BALL_RIM.0,
        CIRCLE_SEGMENTS,
    ));
}

fn push_paddle(vertices: &mut Vec<Vertex>, paddle: &Paddle) {
    let pos = Vec2::new(paddle.x, paddle.y);
    let size = Vec2::new(paddle.width, paddle.height);
    let half = Vec2::new(size.x / 2.0, size.y);

    vertices.extend(rect(
        pos - Vec2::splat(8.0),
        size + Vec2::splat(16.0),
        colors::PADDLE_CENTER.with_alpha(0.25),
    ));
    vertices.extend(rect_gradient_h(
        pos,
        half,
        colors::PADDLE_EDGE.0,
        colors::PADDLE_CENTER.0,
    ));
    vertices.extend(rect_gradient_h(
        pos + Vec2::new(half.x, 0.0),
        half,
        colors::PADDLE_CENTER.0,
        colors::PADDLE_EDGE.0,
    ));
    vertices.extend(rect(
        pos,
        Vec2::new(size.x, size.y / 3.0),
        [1.0, 1.0, 1.0, 0.3],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn scene_for(state: &GameState, overlay: bool) -> Vec<Vertex> {
        let effects = Effects::new(state.config.effects.clone(), 1);
        build_scene(state, &effects, 0.0, overlay)
    }

    #[test]
    fn test_pulse_bounds() {
        for i in 0..100 {
            let p = pulse_intensity(i as f32 * 0.1, 1.3);
            assert!((0.4 - 1e-5..=1.0 + 1e-5).contains(&p));
        }
    }

    #[test]
    fn test_destroyed_bricks_not_drawn() {
        let mut state = GameState::new(GameConfig::default(), 750.0, 1);
        state.restart();
        let full = scene_for(&state, false).len();
        state.bricks.destroy(0, 0);
        let fewer = scene_for(&state, false).len();
        // glow + body + two sheen halves
        assert_eq!(full - fewer, 24);
    }

    #[test]
    fn test_overlay_only_when_shown() {
        let mut state = GameState::new(GameConfig::default(), 750.0, 1);
        state.restart();
        state.phase = GamePhase::Paused;
        let hidden = scene_for(&state, false);
        let shown = scene_for(&state, true);
        assert_eq!(shown.len(), hidden.len() + 6);
        assert_eq!(shown.last().map(|v| v.color[3]), Some(0.7));

        state.phase = GamePhase::Running;
        assert_eq!(scene_for(&state, true).len(), hidden.len());
    }

    #[test]
    fn test_overlay_alpha() {
        assert_eq!(overlay_alpha(GamePhase::Running), None);
        assert_eq!(overlay_alpha(GamePhase::Victory), Some(0.85));
    }
}
