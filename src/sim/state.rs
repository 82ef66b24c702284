//! Game state and core simulation types
//!
//! Everything the loop mutates lives in [`GameState`]. Rendering reads it,
//! never writes it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::BrickGrid;
use crate::config::{BallConfig, GameConfig, PaddleConfig, Rgba};

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing started yet
    Idle,
    /// Active gameplay
    Running,
    /// Frozen, overlay shown
    Paused,
    /// All lives lost
    GameOver,
    /// All bricks destroyed
    Victory,
}

impl GamePhase {
    /// Terminal phases only leave via restart
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }

    /// Whether the frame loop should schedule another frame
    pub fn keeps_loop_alive(self) -> bool {
        matches!(self, GamePhase::Running | GamePhase::Paused)
    }
}

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// State transitions reported by a tick, consumed by effects and HUD
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Fresh round started
    Restarted,
    /// Pause toggled (true = now paused)
    PauseToggled(bool),
    WallBounce { wall: Wall, pos: Vec2 },
    PaddleBounce { pos: Vec2, hit_pos: f32 },
    BrickDestroyed {
        row: usize,
        col: usize,
        points: u32,
        center: Vec2,
        color: Rgba,
    },
    /// Ball crossed the bottom edge
    LifeLost { remaining: u8 },
    GameOver { score: u64 },
    Victory { score: u64 },
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Keyboard target step per frame
    pub speed: f32,
    /// Where input wants the left edge to be
    pub target_x: f32,
    smoothing: f32,
}

impl Paddle {
    pub fn new(config: &PaddleConfig, canvas_width: f32, canvas_height: f32) -> Self {
        let x = canvas_width / 2.0 - config.width / 2.0;
        Self {
            x,
            y: canvas_height - config.bottom_offset,
            width: config.width,
            height: config.height,
            speed: config.speed,
            target_x: x,
            smoothing: config.smoothing,
        }
    }

    /// Largest legal x for the given canvas width
    pub fn max_x(&self, canvas_width: f32) -> f32 {
        (canvas_width - self.width).max(0.0)
    }

    /// Exponential approach toward target_x, then clamp
    pub fn move_toward_target(&mut self, canvas_width: f32) {
        if self.target_x.is_finite() {
            self.x += (self.target_x - self.x) * self.smoothing;
        }
        self.clamp(canvas_width);
    }

    /// Keep the paddle on the surface (idempotent)
    pub fn clamp(&mut self, canvas_width: f32) {
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        self.x = self.x.clamp(0.0, self.max_x(canvas_width));
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
    trail_length: usize,
}

impl Ball {
    pub fn new(config: &BallConfig) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: config.radius,
            trail: VecDeque::with_capacity(config.trail_length + 1),
            trail_length: config.trail_length,
        }
    }

    /// Explicit Euler step, one per frame
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        self.record_trail();
    }

    /// Append the current position, evicting the oldest past capacity
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > self.trail_length {
            self.trail.pop_front();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Playfield size in pixels
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Static level counter
    pub level: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Frames simulated since the last restart
    pub time_ticks: u64,
    /// Seed of the current run
    pub seed: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle game; call [`GameState::restart`] to begin
    pub fn new(config: GameConfig, width: f32, seed: u64) -> Self {
        let height = config.canvas.height;
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = BrickGrid::new(&config.bricks, &mut rng);
        let mut state = Self {
            width,
            height,
            phase: GamePhase::Idle,
            score: 0,
            lives: config.lives,
            level: 1,
            paddle: Paddle::new(&config.paddle, width, height),
            ball: Ball::new(&config.ball),
            bricks,
            time_ticks: 0,
            seed,
            rng,
            config,
        };
        state.reset_ball();
        state
    }

    /// Full reinitialization into Running
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.config.lives;
        self.level = 1;
        self.time_ticks = 0;
        self.paddle = Paddle::new(&self.config.paddle, self.width, self.height);
        self.paddle.clamp(self.width);
        self.bricks.rebuild(&self.config.bricks, &mut self.rng);
        self.reset_ball();
        self.phase = GamePhase::Running;
    }

    /// Serve position: centred, above the paddle, random horizontal direction
    pub fn reset_ball(&mut self) {
        let speed = self.config.ball.speed;
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.pos = Vec2::new(
            self.width / 2.0,
            self.height - self.config.ball.serve_offset,
        );
        self.ball.vel = Vec2::new(speed * dir, -speed);
        self.ball.clear_trail();
    }

    /// Playfield width changed (window resize)
    pub fn resize(&mut self, width: f32) {
        if !width.is_finite() || width <= 0.0 {
            return;
        }
        self.width = width;
        self.paddle.clamp(width);
        self.paddle.target_x = self.paddle.target_x.clamp(0.0, self.paddle.max_x(width));
        let r = self.ball.radius;
        self.ball.pos.x = self.ball.pos.x.clamp(r.min(width / 2.0), (width - r).max(width / 2.0));
    }
}
