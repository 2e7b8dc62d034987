//! Player State
//!
//! Physics, lives, invulnerability, and the animation state machine for the
//! player character. One [`Player::step`] per frame while the session is in
//! play; the session handles everything outside the player's own body
//! (enemy contact, pickups, respawns, mode changes).

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::collision::{self, Resolution};
use crate::game::input::InputIntent;
use crate::TILE_SIZE;

/// Animation states, in the renderer's sprite-set vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    /// Standing still on the ground
    Idle,
    /// Running on the ground
    Walk,
    /// Airborne, moving up
    Jump,
    /// Airborne, moving down
    Fall,
    /// Recently damaged
    Hurt,
    /// Campaign complete (forced by the session)
    Win,
    /// Out of lives (forced by the session)
    Lose,
}

impl AnimState {
    /// Frames in this state's sprite set.
    pub fn frame_count(&self) -> u32 {
        match self {
            Self::Idle => 4,
            Self::Walk => 10,
            Self::Fall => 4,
            Self::Hurt => 3,
            Self::Jump | Self::Win | Self::Lose => 1,
        }
    }
}

/// What a call to [`Player::take_damage`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Invulnerability window absorbed the hit
    Ignored,
    /// A life was lost, some remain
    Damaged,
    /// The last life was lost
    Fatal,
}

/// The player character.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Hitbox, slightly narrower than a tile
    pub rect: Rect,
    /// Per-frame pixel velocity
    pub velocity: Vec2,
    /// Result of the last ground probe
    pub on_ground: bool,
    /// Lives remaining
    pub lives: u32,
    /// Parts collected in the current level
    pub collected_parts: u32,
    /// Where respawn puts the hitbox
    pub spawn_point: Vec2,
    /// Damage is ignored while true
    pub invulnerable: bool,
    /// Seconds of invulnerability left
    pub invulnerable_timer: f32,
    /// Seconds of hurt animation left
    pub hurt_timer: f32,
    /// Current animation state
    pub anim: AnimState,
    /// Frame index within the current state's sprite set
    pub frame_index: u32,
    /// Seconds accumulated toward the next frame advance
    pub anim_timer: f32,
    /// Sprite faces right
    pub facing_right: bool,
}

impl Player {
    /// Hitbox width
    pub const WIDTH: f32 = TILE_SIZE * 0.8;
    /// Hitbox height
    pub const HEIGHT: f32 = TILE_SIZE;
    /// Run speed, pixels per frame
    pub const SPEED: f32 = 7.0;
    /// Jump impulse, pixels per frame
    pub const JUMP_STRENGTH: f32 = 22.0;
    /// Gravity, pixels per frame per frame
    pub const GRAVITY: f32 = 1.0;
    /// Terminal fall speed, pixels per frame
    pub const MAX_FALL_SPEED: f32 = 18.0;
    /// Lives at the start of a session
    pub const STARTING_LIVES: u32 = 3;
    /// Invulnerability window after damage, seconds
    pub const INVULNERABLE_DURATION: f32 = 2.0;
    /// Hurt animation duration, seconds
    pub const HURT_DURATION: f32 = 0.3;
    /// Seconds per animation frame
    pub const FRAME_INTERVAL: f32 = 0.1;

    /// Create a player at a spawn point with full lives.
    pub fn new(spawn_point: Vec2) -> Self {
        Self {
            rect: Rect::new(spawn_point.x, spawn_point.y, Self::WIDTH, Self::HEIGHT),
            velocity: Vec2::ZERO,
            on_ground: false,
            lives: Self::STARTING_LIVES,
            collected_parts: 0,
            spawn_point,
            invulnerable: false,
            invulnerable_timer: 0.0,
            hurt_timer: 0.0,
            anim: AnimState::Idle,
            frame_index: 0,
            anim_timer: 0.0,
            facing_right: true,
        }
    }

    /// Apply one frame of intent and physics against the level tiles.
    ///
    /// Returns true if a jump started this frame (audio cue).
    pub fn step(&mut self, intent: &InputIntent, tiles: &[Rect]) -> bool {
        let factor = intent.horizontal();
        self.velocity.x = Self::SPEED * factor;
        // Facing only changes on actual movement
        if factor > 0.0 {
            self.facing_right = true;
        } else if factor < 0.0 {
            self.facing_right = false;
        }

        let mut jumped = false;
        if intent.jump_pressed && self.on_ground {
            self.velocity.y = -Self::JUMP_STRENGTH;
            self.on_ground = false;
            jumped = true;
        }

        self.velocity.y += Self::GRAVITY;
        if self.velocity.y > Self::MAX_FALL_SPEED {
            self.velocity.y = Self::MAX_FALL_SPEED;
        }

        let Resolution {
            rect, velocity, ..
        } = collision::resolve(self.rect, self.velocity, tiles);
        self.rect = rect;
        self.velocity = velocity;

        // The probe, not the sweep, decides groundedness
        self.on_ground = collision::probe_grounded(&self.rect, tiles);

        jumped
    }

    /// Re-evaluate the animation state from current physics, then advance
    /// the frame clock.
    pub fn update_animation(&mut self, dt: f32) {
        let new_state = if self.hurt_timer > 0.0 {
            AnimState::Hurt
        } else if !self.on_ground {
            if self.velocity.y < 0.0 {
                AnimState::Jump
            } else {
                AnimState::Fall
            }
        } else if self.velocity.x != 0.0 {
            AnimState::Walk
        } else {
            AnimState::Idle
        };

        if new_state != self.anim {
            self.anim = new_state;
            self.frame_index = 0;
            self.anim_timer = 0.0;
        }

        self.advance_frames(dt);
    }

    /// Force a terminal animation state (`Win`/`Lose`). The per-frame state
    /// chain never produces these; the session sets them when the campaign
    /// ends.
    pub fn force_anim(&mut self, state: AnimState) {
        if state != self.anim {
            self.anim = state;
            self.frame_index = 0;
            self.anim_timer = 0.0;
        }
    }

    fn advance_frames(&mut self, dt: f32) {
        let count = self.anim.frame_count();
        if count <= 1 {
            self.frame_index = 0;
            return;
        }

        self.anim_timer += dt;
        if self.anim_timer >= Self::FRAME_INTERVAL {
            self.anim_timer = 0.0;
            self.frame_index = (self.frame_index + 1) % count;
        }
    }

    /// Tick down the invulnerability and hurt timers.
    pub fn update_timers(&mut self, dt: f32) {
        if self.invulnerable {
            self.invulnerable_timer -= dt;
            if self.invulnerable_timer <= 0.0 {
                self.invulnerable = false;
                self.invulnerable_timer = 0.0;
            }
        }

        if self.hurt_timer > 0.0 {
            self.hurt_timer = (self.hurt_timer - dt).max(0.0);
        }
    }

    /// Apply one hit. Damage inside the invulnerability window is ignored
    /// entirely; otherwise a life is lost and the window re-arms.
    pub fn take_damage(&mut self) -> DamageOutcome {
        if self.invulnerable {
            return DamageOutcome::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        self.invulnerable = true;
        self.invulnerable_timer = Self::INVULNERABLE_DURATION;
        self.hurt_timer = Self::HURT_DURATION;

        if self.lives == 0 {
            DamageOutcome::Fatal
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Put the player back at the spawn point with zero velocity and a
    /// fresh invulnerability window. Lives and parts are untouched.
    pub fn respawn(&mut self) {
        self.rect.x = self.spawn_point.x;
        self.rect.y = self.spawn_point.y;
        self.velocity = Vec2::ZERO;
        self.invulnerable = true;
        self.invulnerable_timer = Self::INVULNERABLE_DURATION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn floor() -> Vec<Rect> {
        (0..20)
            .map(|col| {
                Rect::new(
                    col as f32 * TILE_SIZE,
                    5.0 * TILE_SIZE,
                    TILE_SIZE,
                    TILE_SIZE,
                )
            })
            .collect()
    }

    fn grounded_player(tiles: &[Rect]) -> Player {
        let mut player = Player::new(Vec2::new(100.0, 5.0 * TILE_SIZE - Player::HEIGHT));
        // Settle onto the floor
        player.step(&InputIntent::idle(), tiles);
        assert!(player.on_ground);
        player
    }

    #[test]
    fn test_jump_only_from_ground() {
        let tiles = floor();
        let mut player = grounded_player(&tiles);

        let jump = InputIntent {
            jump_pressed: true,
            ..InputIntent::idle()
        };

        assert!(player.step(&jump, &tiles));
        assert!(!player.on_ground);
        assert!(player.velocity.y < 0.0);

        // Already airborne: a second press does nothing
        assert!(!player.step(&jump, &tiles));
    }

    #[test]
    fn test_gravity_clamps_at_terminal_velocity() {
        let mut player = Player::new(Vec2::new(0.0, 0.0));
        for _ in 0..40 {
            player.step(&InputIntent::idle(), &[]);
        }
        assert_eq!(player.velocity.y, Player::MAX_FALL_SPEED);
    }

    #[test]
    fn test_facing_persists_when_idle() {
        let tiles = floor();
        let mut player = grounded_player(&tiles);
        assert!(player.facing_right);

        let left = InputIntent {
            move_left: true,
            ..InputIntent::idle()
        };
        player.step(&left, &tiles);
        assert!(!player.facing_right);

        // No horizontal input: facing unchanged
        player.step(&InputIntent::idle(), &tiles);
        assert!(!player.facing_right);
    }

    #[test]
    fn test_analog_speed_scales() {
        let tiles = floor();
        let mut player = grounded_player(&tiles);

        let half = InputIntent {
            move_axis: Some(0.5),
            ..InputIntent::idle()
        };
        player.step(&half, &tiles);
        assert_eq!(player.velocity.x, Player::SPEED * 0.5);
    }

    #[test]
    fn test_animation_priority_chain() {
        let tiles = floor();
        let mut player = grounded_player(&tiles);

        player.update_animation(DT);
        assert_eq!(player.anim, AnimState::Idle);

        let right = InputIntent {
            move_right: true,
            ..InputIntent::idle()
        };
        player.step(&right, &tiles);
        player.update_animation(DT);
        assert_eq!(player.anim, AnimState::Walk);

        let jump = InputIntent {
            jump_pressed: true,
            ..InputIntent::idle()
        };
        player.step(&jump, &tiles);
        player.update_animation(DT);
        assert_eq!(player.anim, AnimState::Jump);

        // Keep falling until vy flips positive
        while player.velocity.y < 0.0 {
            player.step(&InputIntent::idle(), &tiles);
        }
        if !player.on_ground {
            player.update_animation(DT);
            assert_eq!(player.anim, AnimState::Fall);
        }

        // Hurt beats everything
        player.take_damage();
        player.update_animation(DT);
        assert_eq!(player.anim, AnimState::Hurt);
    }

    #[test]
    fn test_state_change_resets_frame() {
        let tiles = floor();
        let mut player = grounded_player(&tiles);

        // Walk a while to advance frames
        let right = InputIntent {
            move_right: true,
            ..InputIntent::idle()
        };
        for _ in 0..12 {
            player.step(&right, &tiles);
            player.update_animation(DT);
        }
        assert_eq!(player.anim, AnimState::Walk);
        assert!(player.frame_index > 0);

        // Stop: back to Idle at frame 0
        player.step(&InputIntent::idle(), &tiles);
        player.update_animation(DT);
        assert_eq!(player.anim, AnimState::Idle);
        assert_eq!(player.frame_index, 0);
    }

    #[test]
    fn test_single_frame_states_never_advance() {
        let mut player = Player::new(Vec2::ZERO);
        player.force_anim(AnimState::Win);
        for _ in 0..100 {
            player.update_animation(1.0);
            // Win is forced, but the chain would override it; re-force as
            // the session does while an end screen is showing
            player.force_anim(AnimState::Win);
            assert_eq!(player.frame_index, 0);
        }
    }

    #[test]
    fn test_walk_cycle_wraps() {
        let tiles = floor();
        let mut player = grounded_player(&tiles);
        let right = InputIntent {
            move_right: true,
            ..InputIntent::idle()
        };

        let mut seen_frames = Vec::new();
        // 0.1s per frame, 10 frames: 1.2s of walking wraps the cycle
        for _ in 0..72 {
            player.step(&right, &tiles);
            player.update_animation(DT);
            seen_frames.push(player.frame_index);
        }
        assert_eq!(player.anim, AnimState::Walk);
        let last_frame_at = seen_frames.iter().position(|&f| f == 9).unwrap();
        // Wrapped back around after the last frame
        assert!(seen_frames[last_frame_at..].contains(&0));
    }

    #[test]
    fn test_damage_and_invulnerability() {
        let mut player = Player::new(Vec2::ZERO);
        assert_eq!(player.lives, 3);

        assert_eq!(player.take_damage(), DamageOutcome::Damaged);
        assert_eq!(player.lives, 2);
        assert!(player.invulnerable);

        // Window absorbs further hits without side effects
        assert_eq!(player.take_damage(), DamageOutcome::Ignored);
        assert_eq!(player.lives, 2);

        // Expire the window
        player.update_timers(Player::INVULNERABLE_DURATION + 0.01);
        assert!(!player.invulnerable);

        assert_eq!(player.take_damage(), DamageOutcome::Damaged);
        player.update_timers(Player::INVULNERABLE_DURATION + 0.01);
        assert_eq!(player.take_damage(), DamageOutcome::Fatal);
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_lives_saturate_at_zero() {
        let mut player = Player::new(Vec2::ZERO);
        for _ in 0..5 {
            player.take_damage();
            player.update_timers(Player::INVULNERABLE_DURATION + 0.01);
        }
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_respawn_preserves_lives_and_parts() {
        let spawn = Vec2::new(50.0, 100.0);
        let mut player = Player::new(spawn);
        player.take_damage();
        player.collected_parts = 2;
        player.rect.x = 900.0;
        player.velocity = Vec2::new(7.0, 18.0);
        player.invulnerable = false;

        player.respawn();

        assert_eq!(player.rect.top_left(), spawn);
        assert_eq!(player.velocity, Vec2::ZERO);
        assert!(player.invulnerable);
        assert_eq!(player.lives, 2);
        assert_eq!(player.collected_parts, 2);
    }

    #[test]
    fn test_hurt_timer_expires() {
        let mut player = Player::new(Vec2::ZERO);
        player.take_damage();
        assert_eq!(player.hurt_timer, Player::HURT_DURATION);

        player.update_timers(0.1);
        assert!(player.hurt_timer > 0.0);
        player.update_timers(0.3);
        assert_eq!(player.hurt_timer, 0.0);
    }
}
