//! Browser input → staged [`TickInput`]
//!
//! Event handlers only write here; the frame loop takes the staged input once
//! per frame. Nothing in this module touches game state.

use crate::sim::TickInput;

/// What a key press asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    Restart,
    ToggleAutopilot,
    NudgeLeft,
    NudgeRight,
}

impl KeyAction {
    /// Map a `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(KeyAction::TogglePause),
            "KeyR" => Some(KeyAction::Restart),
            "KeyI" => Some(KeyAction::ToggleAutopilot),
            "ArrowLeft" => Some(KeyAction::NudgeLeft),
            "ArrowRight" => Some(KeyAction::NudgeRight),
            _ => None,
        }
    }
}

/// Pending input for the next frame
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    target_x: Option<f32>,
    pause: bool,
    restart: bool,
    autopilot: bool,
    left_held: bool,
    right_held: bool,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer or first touch moved to `x` (relative to the play surface)
    ///
    /// The paddle is centred on the pointer. Out-of-range values are passed
    /// through for the simulation to clamp; non-finite ones are dropped.
    pub fn pointer_moved(&mut self, x: f32, paddle_width: f32) {
        let target = x - paddle_width / 2.0;
        if target.is_finite() {
            self.target_x = Some(target);
        }
    }

    /// Key went down; returns true when the key is ours (caller should
    /// prevent the browser default)
    pub fn key_down(&mut self, code: &str, repeat: bool) -> bool {
        let Some(action) = KeyAction::from_code(code) else {
            return false;
        };
        match action {
            // Auto-repeat would flicker pause
            KeyAction::TogglePause if !repeat => self.pause = !self.pause,
            KeyAction::TogglePause => {}
            KeyAction::Restart => self.restart = true,
            KeyAction::ToggleAutopilot if !repeat => {
                self.autopilot = !self.autopilot;
                log::info!("Demo mode: {}", self.autopilot);
            }
            KeyAction::ToggleAutopilot => {}
            KeyAction::NudgeLeft => self.left_held = true,
            KeyAction::NudgeRight => self.right_held = true,
        }
        true
    }

    /// Key released
    pub fn key_up(&mut self, code: &str) -> bool {
        match KeyAction::from_code(code) {
            Some(KeyAction::NudgeLeft) => self.left_held = false,
            Some(KeyAction::NudgeRight) => self.right_held = false,
            Some(_) => {}
            None => return false,
        }
        true
    }

    /// Stage a pause toggle (focus loss); idempotent while one is pending
    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    /// Request a full restart
    pub fn request_restart(&mut self) {
        self.restart = true;
    }

    /// Hand the staged input to the frame; one-shot requests are cleared,
    /// held keys and demo mode persist
    pub fn take(&mut self) -> TickInput {
        let nudge = match (self.left_held, self.right_held) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        TickInput {
            target_x: self.target_x.take(),
            nudge,
            pause: std::mem::take(&mut self.pause),
            restart: std::mem::take(&mut self.restart),
            autopilot: self.autopilot,
        }
    }
}
