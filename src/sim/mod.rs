//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One fixed step per display frame
//! - Seeded RNG only
//! - Row-major brick iteration
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod grid;
pub mod state;
pub mod tick;

pub use effects::{Effects, Particle, ScorePopup};
pub use grid::{Brick, BrickGrid, BrickStatus, row_points};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Wall};
pub use tick::{TickInput, tick};
