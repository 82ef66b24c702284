//! Platform abstraction layer
//!
//! Browser-facing pieces that can still be tested natively:
//! - Input events → staged tick input
//! - Frame loop ownership and cancellation

pub mod frame;
pub mod input;

pub use frame::{LoopHandle, LoopToken};
pub use input::{InputAdapter, KeyAction};
