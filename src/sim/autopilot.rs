//! Demo mode: the paddle plays itself

use super::state::GameState;

/// Paddle target that keeps the paddle under the ball
///
/// The aim point wobbles slowly across the paddle so rallies don't settle
/// into a single vertical loop.
pub fn autopilot_target(state: &GameState) -> f32 {
    let ball = &state.ball;
    let paddle = &state.paddle;

    // Lead the ball while it falls toward the paddle
    let frames_to_paddle = if ball.vel.y > 0.0 {
        ((paddle.y - ball.pos.y) / ball.vel.y).clamp(0.0, 30.0)
    } else {
        0.0
    };
    let lead_x = (ball.pos.x + ball.vel.x * frames_to_paddle * 0.5).clamp(0.0, state.width);

    let time_factor = state.time_ticks as f32 * 0.01;
    let wobble = (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15) * paddle.width * 0.5;

    lead_x - paddle.width / 2.0 + wobble
}
