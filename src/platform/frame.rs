//! Frame loop ownership
//!
//! Each loop chain carries a [`LoopToken`]. Starting a new chain invalidates
//! the old token and hands back the pending animation-frame request so the
//! caller can cancel it; a callback holding a stale token must return without
//! touching game state. This keeps exactly one chain alive across restarts.

/// Identifies one frame-loop chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopToken(u64);

/// Owned handle over the current chain
#[derive(Debug, Default)]
pub struct LoopHandle {
    generation: u64,
    /// Outstanding `requestAnimationFrame` id for the current chain
    pending: Option<i32>,
    active: bool,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new chain; returns its token and a pending request to cancel
    pub fn restart(&mut self) -> (LoopToken, Option<i32>) {
        self.generation += 1;
        self.active = true;
        (LoopToken(self.generation), self.pending.take())
    }

    /// End the current chain; returns a pending request to cancel
    pub fn stop(&mut self) -> Option<i32> {
        self.generation += 1;
        self.active = false;
        self.pending.take()
    }

    pub fn is_current(&self, token: LoopToken) -> bool {
        self.active && token.0 == self.generation
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Record a scheduled request; ignored for stale tokens
    pub fn scheduled(&mut self, token: LoopToken, request_id: i32) -> bool {
        if self.is_current(token) {
            self.pending = Some(request_id);
            true
        } else {
            false
        }
    }

    /// A callback fired; returns whether it may run
    pub fn fired(&mut self, token: LoopToken) -> bool {
        if self.is_current(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
