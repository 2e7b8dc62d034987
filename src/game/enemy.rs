//! Enemy Patrol
//!
//! A patroller walks back and forth across the platform run it spawned on.
//! Patrol bounds are fixed at spawn time from the platform extent and never
//! re-derived from the tiles; the body is wider than a tile, so its leading
//! edge, not its center, triggers the turn.

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::game::level::EnemySpawn;
use crate::TILE_SIZE;

/// A platform patroller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Enemy {
    /// Damage hitbox
    pub rect: Rect,
    /// +1 walking right, -1 walking left
    pub direction: f32,
    /// Left patrol bound (the platform's left edge)
    pub patrol_start: f32,
    /// Patrol span width in pixels
    pub patrol_width: f32,
    /// Current animation frame
    pub frame_index: u32,
    /// Seconds accumulated toward the next frame
    pub animation_timer: f32,
}

impl Enemy {
    /// Body side length
    pub const SIZE: f32 = TILE_SIZE * 1.5;
    /// Walk speed, pixels per frame
    pub const SPEED: f32 = 2.0;
    /// Seconds per animation frame
    pub const FRAME_INTERVAL: f32 = 0.15;
    /// Frames in the walk cycle
    pub const FRAME_COUNT: u32 = 3;

    /// Instantiate a patroller from its parsed spawn, at the left bound
    /// walking right.
    pub fn from_spawn(spawn: &EnemySpawn) -> Self {
        Self {
            rect: Rect::new(spawn.x, spawn.y, Self::SIZE, Self::SIZE),
            direction: 1.0,
            patrol_start: spawn.x,
            patrol_width: spawn.platform_width,
            frame_index: 0,
            animation_timer: 0.0,
        }
    }

    /// Walk one frame, reversing at either patrol bound.
    pub fn step(&mut self) {
        self.rect.x += Self::SPEED * self.direction;
        if self.rect.left() <= self.patrol_start
            || self.rect.right() >= self.patrol_start + self.patrol_width
        {
            self.direction = -self.direction;
        }
    }

    /// Advance the walk-cycle animation.
    pub fn update_animation(&mut self, dt: f32) {
        self.animation_timer += dt;
        if self.animation_timer >= Self::FRAME_INTERVAL {
            self.animation_timer = 0.0;
            self.frame_index = (self.frame_index + 1) % Self::FRAME_COUNT;
        }
    }
}
