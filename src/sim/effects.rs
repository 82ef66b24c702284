//! Particles and score popups
//!
//! Purely visual. Spawned from [`GameEvent`]s, never read by gameplay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::GameEvent;
use crate::config::{EffectsConfig, Rgba};

/// A spark from a collision
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgba,
    /// 1 on spawn, removed at 0
    pub life: f32,
    pub size: f32,
}

/// Floating "+points" marker
#[derive(Debug, Clone)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub points: u32,
    pub life: f32,
}

/// Owns every live particle and popup
#[derive(Debug, Clone)]
pub struct Effects {
    config: EffectsConfig,
    pub particles: Vec<Particle>,
    pub popups: Vec<ScorePopup>,
    rng: Pcg32,
}

impl Effects {
    pub fn new(config: EffectsConfig, seed: u64) -> Self {
        Self {
            config,
            particles: Vec::new(),
            popups: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.popups.clear();
    }

    /// Spawn visuals for the events of one tick
    pub fn apply(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Restarted => self.clear(),
                GameEvent::WallBounce { pos, .. } => {
                    self.burst(pos, self.config.wall_color, self.config.wall_burst);
                }
                GameEvent::PaddleBounce { pos, .. } => {
                    self.burst(pos, self.config.paddle_color, self.config.paddle_burst);
                }
                GameEvent::BrickDestroyed {
                    center,
                    color,
                    points,
                    ..
                } => {
                    self.burst(center, color, self.config.brick_burst);
                    self.popups.push(ScorePopup {
                        pos: center,
                        points,
                        life: 1.0,
                    });
                }
                _ => {}
            }
        }
    }

    /// Spawn `count` particles at `pos`, dropping any past the cap
    pub fn burst(&mut self, pos: Vec2, color: Rgba, count: usize) {
        let room = self.config.max_particles.saturating_sub(self.particles.len());
        let spread = self.config.particle_spread;
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                self.rng.random_range(-spread..=spread),
                self.rng.random_range(-spread..=spread),
            );
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life: 1.0,
                size: self.rng.random_range(2.0..6.0),
            });
        }
    }

    /// Age everything by one frame and drop the dead
    pub fn update(&mut self) {
        let gravity = self.config.particle_gravity;
        let decay = self.config.particle_decay;
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += gravity;
            p.life -= decay;
        }
        self.particles.retain(|p| p.life > 0.0);

        let rise = self.config.popup_rise;
        let decay = self.config.popup_decay;
        for popup in &mut self.popups {
            popup.pos.y -= rise;
            popup.life -= decay;
        }
        self.popups.retain(|p| p.life > 0.0);
    }
}
