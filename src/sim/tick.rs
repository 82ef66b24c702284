//! Per-frame simulation tick
//!
//! One call advances the game by exactly one display frame. There is no
//! delta time: ball and paddle speeds are in pixels per frame.

use super::autopilot::autopilot_target;
use super::collision::{hit_position, hits_paddle, missed_bottom, paddle_bounce, resolve_walls};
use super::state::{GameEvent, GamePhase, GameState};

/// Input staged for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// New paddle target (left edge), from pointer or touch
    pub target_x: Option<f32>,
    /// Held arrow keys: -1 left, +1 right, 0 none
    pub nudge: f32,
    /// Pause toggle request
    pub pause: bool,
    /// Full restart request
    pub restart: bool,
    /// Demo mode: paddle follows the ball
    pub autopilot: bool,
}

/// Advance the game by one frame, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        state.restart();
        log::info!("Round started (seed {})", state.seed);
        events.push(GameEvent::Restarted);
        return events;
    }

    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::PauseToggled(true));
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                events.push(GameEvent::PauseToggled(false));
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;

    apply_paddle_input(state, input);
    state.paddle.move_toward_target(state.width);

    advance_ball(state, &mut events);

    if state.phase == GamePhase::Running {
        resolve_bricks(state, &mut events);
    }

    events
}

fn apply_paddle_input(state: &mut GameState, input: &TickInput) {
    if input.autopilot {
        state.paddle.target_x = autopilot_target(state);
        return;
    }
    let paddle = &mut state.paddle;
    if let Some(x) = input.target_x.filter(|x| x.is_finite()) {
        paddle.target_x = x;
    }
    if input.nudge != 0.0 && input.nudge.is_finite() {
        let max_x = paddle.max_x(state.width);
        let step = input.nudge.clamp(-1.0, 1.0) * paddle.speed;
        paddle.target_x = (paddle.target_x + step).clamp(0.0, max_x);
    }
}

/// Move the ball and resolve walls, paddle and the bottom edge
fn advance_ball(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;
    ball.integrate();

    for wall in resolve_walls(&mut ball.pos, &mut ball.vel, ball.radius, state.width) {
        events.push(GameEvent::WallBounce {
            wall,
            pos: ball.pos,
        });
    }

    if hits_paddle(ball.pos, ball.radius, &state.paddle) {
        let hit_pos = hit_position(ball.pos.x, &state.paddle);
        ball.vel = paddle_bounce(ball.vel, hit_pos);
        events.push(GameEvent::PaddleBounce {
            pos: ball.pos,
            hit_pos,
        });
    }

    if missed_bottom(ball.pos, ball.radius, state.height) {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over, final score {}", state.score);
            events.push(GameEvent::GameOver { score: state.score });
        } else {
            log::debug!("Life lost, {} remaining", state.lives);
            state.reset_ball();
        }
    }
}

/// At most one brick per frame: the first hit in row-major order
fn resolve_bricks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some((row, col, center, color)) = state
        .bricks
        .hit_test(state.ball.pos)
        .map(|b| (b.row, b.col, b.center(), b.color))
    else {
        return;
    };

    let Some(points) = state.bricks.destroy(row, col) else {
        return;
    };
    state.ball.vel.y = -state.ball.vel.y;
    state.score += u64::from(points);
    events.push(GameEvent::BrickDestroyed {
        row,
        col,
        points,
        center,
        color,
    });

    if state.bricks.is_cleared() {
        state.phase = GamePhase::Victory;
        log::info!("Victory, final score {}", state.score);
        events.push(GameEvent::Victory { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::grid::BrickStatus;
    use crate::sim::state::Wall;
    use glam::Vec2;

    fn running() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 750.0, 12345);
        state.restart();
        state
    }

    /// Put the ball somewhere empty so nothing but the tested rule fires
    fn park_ball(state: &mut GameState, pos: Vec2, vel: Vec2) {
        state.ball.pos = pos - vel;
        state.ball.vel = vel;
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut state = GameState::new(GameConfig::default(), 750.0, 1);
        let before = state.ball.pos;
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_restart_starts_running_without_moving() {
        let mut state = GameState::new(GameConfig::default(), 750.0, 1);
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.ball.pos, Vec2::new(375.0, 540.0));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_one_step_per_frame() {
        let mut state = running();
        let start = state.ball.pos;
        let vel = state.ball.vel;
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, start + vel * 2.0);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = running();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        let events = tick(&mut state, &pause);
        assert_eq!(events, vec![GameEvent::PauseToggled(true)]);
        assert_eq!(state.phase, GamePhase::Paused);

        let frozen = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, frozen);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Running);
        assert_ne!(state.ball.pos, frozen);
    }

    #[test]
    fn test_pause_ignored_outside_play() {
        let mut state = running();
        state.phase = GamePhase::GameOver;
        let events = tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_left_wall_scenario() {
        let mut state = running();
        state.ball.pos = Vec2::new(state.ball.radius - 1.0 + 5.0, 400.0);
        state.ball.vel = Vec2::new(-5.0, -5.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel.x, 5.0);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::WallBounce {
                wall: Wall::Left,
                ..
            }
        )));
    }

    #[test]
    fn test_paddle_bounce_preserves_speed() {
        let mut state = running();
        state.paddle.x = 300.0;
        state.paddle.target_x = 300.0;
        park_ball(&mut state, Vec2::new(390.0, 555.0), Vec2::new(-3.0, 4.0));
        let events = tick(&mut state, &TickInput::default());

        assert!((state.ball.speed() - 5.0).abs() < 1e-5);
        assert!(state.ball.vel.y < 0.0);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::PaddleBounce { .. }))
        );
    }

    #[test]
    fn test_double_overlap_keeps_ball_rising() {
        let mut state = running();
        state.paddle.x = 300.0;
        state.paddle.target_x = 300.0;
        // Slow ball still overlapping the paddle on the following frame
        park_ball(&mut state, Vec2::new(360.0, 565.0), Vec2::new(0.5, 1.0));
        let first = tick(&mut state, &TickInput::default());
        let second = tick(&mut state, &TickInput::default());
        let bounces = first
            .iter()
            .chain(second.iter())
            .filter(|e| matches!(e, GameEvent::PaddleBounce { .. }))
            .count();
        assert_eq!(bounces, 2);
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_brick_hit_scenario() {
        let mut state = running();
        let brick = state.bricks.get(0, 0).cloned().unwrap();
        park_ball(&mut state, brick.center(), Vec2::new(0.0, -5.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks.status(0, 0), Some(BrickStatus::Destroyed));
        assert_eq!(state.score, 50);
        assert_eq!(state.ball.vel.y, 5.0);
        assert!(events.contains(&GameEvent::BrickDestroyed {
            row: 0,
            col: 0,
            points: 50,
            center: brick.center(),
            color: brick.color,
        }));
    }

    #[test]
    fn test_single_brick_per_frame() {
        let mut config = GameConfig::default();
        // Negative padding stacks neighbouring cells on top of each other
        config.bricks.padding = -35.0;
        let mut state = GameState::new(config, 750.0, 1);
        state.restart();
        let a = state.bricks.get(0, 0).cloned().unwrap();
        // Point inside both (0,0) and (0,1)
        let point = Vec2::new(a.pos.x + 60.0, a.center().y);
        assert!(state.bricks.get(0, 1).unwrap().contains(point));

        park_ball(&mut state, point, Vec2::new(0.0, -5.0));
        let events = tick(&mut state, &TickInput::default());
        let destroyed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
        assert_eq!(state.bricks.status(0, 0), Some(BrickStatus::Destroyed));
        assert_eq!(state.bricks.status(0, 1), Some(BrickStatus::Active));
    }

    #[test]
    fn test_life_lost_resets_ball() {
        let mut state = running();
        state.paddle.x = 0.0;
        state.paddle.target_x = 0.0;
        park_ball(&mut state, Vec2::new(600.0, 595.0), Vec2::new(0.0, 5.0));
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert!(events.contains(&GameEvent::LifeLost { remaining: 2 }));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.ball.pos, Vec2::new(375.0, 540.0));
        assert!(state.ball.trail.is_empty());
    }

    #[test]
    fn test_last_life_ends_game_once() {
        let mut state = running();
        state.lives = 1;
        state.score = 120;
        state.paddle.x = 0.0;
        state.paddle.target_x = 0.0;
        let miss = Vec2::new(600.0, 595.0);
        park_ball(&mut state, miss, Vec2::new(0.0, 5.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 120 }));
        // No reset happened
        assert_eq!(state.ball.pos, miss);

        for _ in 0..10 {
            let events = tick(&mut state, &TickInput::default());
            assert!(events.is_empty());
        }
        assert_eq!(state.ball.pos, miss);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_victory_on_last_brick() {
        let mut state = running();
        for row in 0..5 {
            for col in 0..9 {
                if (row, col) != (4, 8) {
                    state.bricks.destroy(row, col);
                }
            }
        }
        let last = state.bricks.get(4, 8).cloned().unwrap();
        park_ball(&mut state, last.center(), Vec2::new(0.0, -5.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Victory);
        assert!(events.contains(&GameEvent::Victory { score: 10 }));

        let frozen = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, frozen);
    }

    #[test]
    fn test_restart_from_terminal() {
        let mut state = running();
        state.score = 500;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.bricks.destroy(1, 1);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.bricks.active_count(), 45);
    }

    #[test]
    fn test_pointer_target_and_nudge() {
        let mut state = running();
        tick(
            &mut state,
            &TickInput {
                target_x: Some(f32::NAN),
                ..Default::default()
            },
        );
        assert!(state.paddle.target_x.is_finite());

        state.paddle.target_x = 100.0;
        tick(
            &mut state,
            &TickInput {
                nudge: 1.0,
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.target_x, 108.0);

        state.paddle.target_x = 2.0;
        tick(
            &mut state,
            &TickInput {
                nudge: -1.0,
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.target_x, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(GameConfig::default(), 750.0, 99999);
        let mut b = GameState::new(GameConfig::default(), 750.0, 99999);
        let inputs = [
            TickInput {
                restart: true,
                ..Default::default()
            },
            TickInput {
                target_x: Some(500.0),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        ];
        for _ in 0..200 {
            for input in &inputs[1..] {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.ball.pos, b.ball.pos);
        assert!((a.paddle.x - b.paddle.x).abs() < 1e-4);
    }
}
