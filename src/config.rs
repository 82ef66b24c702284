//! Data-driven game configuration
//!
//! Every field defaults to the classic layout, so an empty JSON object is a
//! valid config. On the web the page may embed overrides in a
//! `<script id="game-config" type="application/json">` element.

use serde::{Deserialize, Serialize};

/// Configuration parse/validation failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON could not be parsed into a config
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Colour string was not `#rrggbb`
    #[error("Invalid colour: {0}")]
    InvalidColor(String),
    /// A value is outside its legal range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Linear RGBA colour, serialized as a `#rrggbb` hex string
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    /// Same colour with a different alpha
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        let [r, g, b, _] = self.0;
        [r, g, b, alpha.clamp(0.0, 1.0)]
    }

    pub fn parse_hex(s: &str) -> Result<Self, ConfigError> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| ConfigError::InvalidColor(s.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.0;
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_hex()
    }
}

/// Canvas sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Widest the playfield may grow
    pub max_width: f32,
    /// Fixed playfield height
    pub height: f32,
    /// Horizontal space reserved around the canvas inside its container
    pub container_margin: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: 750.0,
            height: 600.0,
            container_margin: 80.0,
        }
    }
}

impl CanvasConfig {
    /// Canvas width for a container of the given client width
    pub fn fit_width(&self, container_width: f32, min_width: f32) -> f32 {
        (container_width - self.container_margin)
            .min(self.max_width)
            .max(min_width)
    }
}

/// Paddle tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom edge to the paddle's top
    pub bottom_offset: f32,
    /// Keyboard target step per frame (pixels)
    pub speed: f32,
    /// Fraction of the remaining distance to target covered each frame
    pub smoothing: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 15.0,
            bottom_offset: 40.0,
            speed: 8.0,
            smoothing: 0.15,
        }
    }
}

/// Ball tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Per-axis velocity component on serve
    pub speed: f32,
    /// Serve height above the bottom edge
    pub serve_offset: f32,
    /// Trail positions kept for rendering
    pub trail_length: usize,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            speed: 5.0,
            serve_offset: 60.0,
            trail_length: 8,
        }
    }
}

/// Brick grid layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub rows: usize,
    pub columns: usize,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_top: f32,
    pub offset_left: f32,
    /// Colour per row (wraps for extra rows)
    pub palette: Vec<Rgba>,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 9,
            width: 70.0,
            height: 25.0,
            padding: 10.0,
            offset_top: 80.0,
            offset_left: 35.0,
            palette: vec![
                Rgba::rgb(0xec, 0x48, 0x99),
                Rgba::rgb(0xf9, 0x73, 0x16),
                Rgba::rgb(0xea, 0xb3, 0x08),
                Rgba::rgb(0x22, 0xc5, 0x5e),
                Rgba::rgb(0x3b, 0x82, 0xf6),
            ],
        }
    }
}

/// Particle and popup tuning (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub wall_burst: usize,
    pub paddle_burst: usize,
    pub brick_burst: usize,
    pub wall_color: Rgba,
    pub paddle_color: Rgba,
    pub popup_color: Rgba,
    /// Life lost per frame
    pub particle_decay: f32,
    /// Downward acceleration per frame
    pub particle_gravity: f32,
    /// Max initial speed per axis
    pub particle_spread: f32,
    pub popup_decay: f32,
    /// Upward popup speed per frame
    pub popup_rise: f32,
    pub max_particles: usize,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            wall_burst: 8,
            paddle_burst: 12,
            brick_burst: 20,
            wall_color: Rgba::rgb(0x00, 0xf2, 0xfe),
            paddle_color: Rgba::rgb(0x8b, 0x5c, 0xf6),
            popup_color: Rgba::rgb(0xff, 0xeb, 0x3b),
            particle_decay: 0.02,
            particle_gravity: 0.2,
            particle_spread: 3.0,
            popup_decay: 0.02,
            popup_rise: 2.0,
            max_particles: 512,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub lives: u8,
    /// Delay before the game-over/victory overlay is shown
    pub overlay_delay_ms: u32,
    pub canvas: CanvasConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub effects: EffectsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            overlay_delay_ms: 100,
            canvas: CanvasConfig::default(),
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bricks: BrickConfig::default(),
            effects: EffectsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        if self.lives == 0 {
            return Err(ConfigError::Invalid {
                field: "lives",
                reason: "must be at least 1",
            });
        }
        positive("canvas.max_width", self.canvas.max_width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("paddle.width", self.paddle.width)?;
        positive("paddle.height", self.paddle.height)?;
        positive("paddle.speed", self.paddle.speed)?;
        positive("ball.radius", self.ball.radius)?;
        positive("ball.speed", self.ball.speed)?;
        positive("bricks.width", self.bricks.width)?;
        positive("bricks.height", self.bricks.height)?;

        if !(self.paddle.smoothing > 0.0 && self.paddle.smoothing <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "paddle.smoothing",
                reason: "must be in (0, 1]",
            });
        }
        if self.paddle.width > self.canvas.max_width {
            return Err(ConfigError::Invalid {
                field: "paddle.width",
                reason: "wider than the canvas",
            });
        }
        if self.bricks.rows == 0 || self.bricks.columns == 0 {
            return Err(ConfigError::Invalid {
                field: "bricks",
                reason: "grid needs at least one row and column",
            });
        }
        if self.bricks.palette.is_empty() {
            return Err(ConfigError::Invalid {
                field: "bricks.palette",
                reason: "needs at least one colour",
            });
        }
        if i32::try_from(self.overlay_delay_ms).is_err() {
            return Err(ConfigError::Invalid {
                field: "overlay_delay_ms",
                reason: "too large for a browser timeout",
            });
        }
        if self.ball.trail_length == 0 {
            return Err(ConfigError::Invalid {
                field: "ball.trail_length",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
