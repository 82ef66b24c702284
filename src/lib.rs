//! Neon Breakout - A brick breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (physics, collisions, game state)
//! - `game`: Per-frame driver tying input, simulation and effects together
//! - `platform`: Input staging and frame-loop ownership
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Data-driven layout and tuning

pub mod config;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, HudSnapshot};
