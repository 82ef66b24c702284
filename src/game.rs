//! Per-frame driver
//!
//! Owns the simulation, the effects and the staged input, and runs the
//! input → tick → effects pipeline once per display frame.

use crate::config::GameConfig;
use crate::platform::{InputAdapter, LoopHandle};
use crate::sim::{Effects, GameEvent, GamePhase, GameState, tick};

/// Values shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
}

/// A running game instance
pub struct Game {
    pub state: GameState,
    pub effects: Effects,
    pub input: InputAdapter,
    pub loop_handle: LoopHandle,
    last_hud: Option<HudSnapshot>,
}

impl Game {
    pub fn new(config: GameConfig, width: f32, seed: u64) -> Self {
        let effects = Effects::new(config.effects.clone(), seed.wrapping_add(1));
        Self {
            state: GameState::new(config, width, seed),
            effects,
            input: InputAdapter::new(),
            loop_handle: LoopHandle::new(),
            last_hud: None,
        }
    }

    /// Run one frame and return what happened
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let input = self.input.take();

        if self.state.phase == GamePhase::Running && !input.pause && !input.restart {
            self.effects.update();
        }

        let events = tick(&mut self.state, &input);
        self.effects.apply(&events);

        for event in &events {
            if let GameEvent::PauseToggled(paused) = event {
                log::debug!("Paused: {}", paused);
            }
        }
        events
    }

    /// Whether the loop should schedule another frame
    pub fn wants_next_frame(&self) -> bool {
        self.state.phase.keeps_loop_alive()
    }

    /// Pointer or touch x relative to the canvas
    pub fn pointer_moved(&mut self, x: f32) {
        self.input.pointer_moved(x, self.state.paddle.width);
    }

    /// Focus lost: pause if currently playing
    pub fn auto_pause(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.input.request_pause();
            log::info!("Auto-paused");
        }
    }

    pub fn resize(&mut self, width: f32) {
        self.state.resize(width);
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.state.score,
            lives: self.state.lives,
            level: self.state.level,
        }
    }

    /// The HUD values, only if they changed since the last call
    pub fn hud_update(&mut self) -> Option<HudSnapshot> {
        let hud = self.hud();
        if self.last_hud == Some(hud) {
            None
        } else {
            self.last_hud = Some(hud);
            Some(hud)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn started() -> Game {
        let mut game = Game::new(GameConfig::default(), 750.0, 42);
        game.input.request_restart();
        game.frame();
        game
    }

    #[test]
    fn test_restart_through_input() {
        let game = started();
        assert_eq!(game.state.phase, GamePhase::Running);
        assert!(game.wants_next_frame());
    }

    #[test]
    fn test_hud_pushed_only_on_change() {
        let mut game = started();
        assert_eq!(
            game.hud_update(),
            Some(HudSnapshot {
                score: 0,
                lives: 3,
                level: 1
            })
        );
        assert_eq!(game.hud_update(), None);
        game.state.score = 30;
        assert_eq!(game.hud_update().map(|h| h.score), Some(30));
        assert_eq!(game.hud_update(), None);
    }

    #[test]
    fn test_brick_hit_spawns_effects() {
        let mut game = started();
        let brick = game.state.bricks.get(0, 0).cloned().unwrap();
        game.state.ball.pos = brick.center() + Vec2::new(0.0, 5.0);
        game.state.ball.vel = Vec2::new(0.0, -5.0);
        game.frame();
        assert_eq!(game.effects.particles.len(), 20);
        assert_eq!(game.effects.popups.len(), 1);
        assert_eq!(game.effects.particles[0].pos, brick.center());
    }

    #[test]
    fn test_effects_frozen_while_paused() {
        let mut game = started();
        game.effects.burst(Vec2::ZERO, crate::config::Rgba::WHITE, 3);
        game.input.key_down("Space", false);
        game.frame();
        assert_eq!(game.state.phase, GamePhase::Paused);
        assert_eq!(game.effects.particles[0].life, 1.0);
        game.frame();
        assert_eq!(game.effects.particles[0].life, 1.0);
        assert!(game.wants_next_frame());
    }

    #[test]
    fn test_auto_pause_only_while_running() {
        let mut game = Game::new(GameConfig::default(), 750.0, 1);
        game.auto_pause();
        game.frame();
        assert_eq!(game.state.phase, GamePhase::Idle);

        let mut game = started();
        game.auto_pause();
        game.frame();
        assert_eq!(game.state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_loop_stops_on_game_over() {
        let mut game = started();
        game.state.lives = 1;
        game.state.paddle.x = 0.0;
        game.state.paddle.target_x = 0.0;
        game.state.ball.pos = Vec2::new(600.0, 590.0);
        game.state.ball.vel = Vec2::new(0.0, 5.0);
        game.frame();
        assert_eq!(game.state.phase, GamePhase::GameOver);
        assert!(!game.wants_next_frame());
    }

    #[test]
    fn test_restart_clears_effects() {
        let mut game = started();
        game.effects.burst(Vec2::ZERO, crate::config::Rgba::WHITE, 3);
        game.input.request_restart();
        game.frame();
        assert!(game.effects.particles.is_empty());
    }
}
