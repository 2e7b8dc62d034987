//! Game Session
//!
//! The top-level state machine tying the simulation together. One
//! [`GameSession::frame`] call per display frame drives everything:
//!
//! ```text
//! Intro ──interact──> Playing ──goal on final level──> FinalChallenge
//!   ^                    │                                │        │
//!   │                    │ lives = 0                 success    failure/
//!   │                    v                                │      timeout
//!   │<── 2s ──── GameOver <───────────────────────────────┼────────┘
//!   │<── 2s ──── GameComplete <───────────────────────────┘
//! ```
//!
//! The message screens and the challenge window are timed sub-states, not
//! blocking waits: every mode advances through the same `frame` call.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::rect::Rect;
use crate::core::rng::DeterministicRng;
use crate::game::camera::Camera;
use crate::game::enemy::Enemy;
use crate::game::events::GameEvent;
use crate::game::input::InputIntent;
use crate::game::level::{Collectible, Level, LevelError, SpawnPolicy, PARTS_REQUIRED};
use crate::game::levels;
use crate::game::player::{AnimState, DamageOutcome, Player};
use crate::VIEWPORT_HEIGHT;

/// Which screen the session is on.
///
/// Timed variants carry the seconds left on that screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    /// Title screen, waiting for the start press
    Intro,
    /// Normal play
    Playing,
    /// The end-of-campaign reaction window is open
    FinalChallenge {
        /// Seconds left to respond
        remaining: f32,
    },
    /// "Game Over" message screen
    GameOver {
        /// Seconds until the reset to the intro
        remaining: f32,
    },
    /// "You escaped" message screen
    GameComplete {
        /// Seconds until the reset to the intro
        remaining: f32,
    },
}

/// Session construction parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Level maps in play order, one Vec<String> of rows per level
    pub campaign: Vec<Vec<String>>,
    /// Enemy placement policy
    pub spawn_policy: SpawnPolicy,
    /// Seed for cosmetic randomness (collectible variants)
    pub rng_seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            campaign: levels::CAMPAIGN
                .iter()
                .map(|map| map.iter().map(|row| row.to_string()).collect())
                .collect(),
            spawn_policy: SpawnPolicy::default(),
            rng_seed: 0,
        }
    }
}

/// What one simulated frame produced.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    /// Trigger events, in the order they happened
    pub events: Vec<GameEvent>,
    /// The host should shut the session down
    pub quit: bool,
}

/// Renderer-facing state, serializable for dumps and golden tests.
///
/// Carries only what moves between frames. Static geometry (tiles, traps)
/// never changes after a level loads; renderers read it once from
/// [`GameSession::level`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Current mode
    pub mode: Mode,
    /// Zero-based level index
    pub level_index: usize,
    /// Frames simulated so far
    pub frame: u64,
    /// Camera scroll offset
    pub camera_scroll: f32,
    /// Full player state
    pub player: Player,
    /// All live patrollers
    pub enemies: Vec<Enemy>,
    /// Parts still in the world
    pub collectibles: Vec<Collectible>,
    /// Goal zone, if the level has one
    pub goal: Option<Rect>,
}

/// A running game session.
#[derive(Clone, Debug)]
pub struct GameSession {
    /// Construction parameters, kept for level loads and resets
    pub config: SessionConfig,
    /// Current mode
    pub mode: Mode,
    /// Zero-based index into the campaign
    pub level_index: usize,
    /// Geometry of the current level
    pub level: Level,
    /// The player character
    pub player: Player,
    /// Live patrollers
    pub enemies: Vec<Enemy>,
    /// Horizontal scroll
    pub camera: Camera,
    /// Frames simulated so far
    pub frame: u64,
    rng: DeterministicRng,
    footstep_timer: f32,
}

impl GameSession {
    /// Seconds the game-over and game-complete screens stay up.
    pub const INTERMISSION: f32 = 2.0;
    /// Seconds the final challenge window stays open.
    pub const CHALLENGE_WINDOW: f32 = 3.0;
    /// Seconds between footstep cues while running.
    pub const FOOTSTEP_INTERVAL: f32 = 0.3;

    /// Build a session on the first level of the campaign.
    pub fn new(config: SessionConfig) -> Result<Self, LevelError> {
        let mut rng = DeterministicRng::new(config.rng_seed);
        let (level, player, enemies) = Self::load_level(&config, 0, &mut rng)?;

        info!(
            levels = config.campaign.len(),
            seed = config.rng_seed,
            "session created"
        );

        Ok(Self {
            config,
            mode: Mode::Intro,
            level_index: 0,
            level,
            player,
            enemies,
            camera: Camera::new(),
            frame: 0,
            rng,
            footstep_timer: 0.0,
        })
    }

    fn load_level(
        config: &SessionConfig,
        index: usize,
        rng: &mut DeterministicRng,
    ) -> Result<(Level, Player, Vec<Enemy>), LevelError> {
        let rows: Vec<&str> = config.campaign[index].iter().map(String::as_str).collect();
        let level = Level::parse(&rows, &config.spawn_policy, rng)?;

        for warning in level.validate() {
            warn!(level = index, ?warning, "level validation warning");
        }

        let player = Player::new(level.spawn_point);
        let enemies = level.enemy_spawns.iter().map(Enemy::from_spawn).collect();
        Ok((level, player, enemies))
    }

    /// Advance the session by one frame.
    ///
    /// `dt` is the elapsed frame time in seconds; it scales timers only.
    pub fn frame(&mut self, intent: &InputIntent, dt: f32) -> FrameOutput {
        let mut out = FrameOutput::default();
        self.frame += 1;

        // Quit beats every mode
        if intent.quit_requested {
            info!(frame = self.frame, "quit requested");
            out.quit = true;
            return out;
        }

        match self.mode {
            Mode::Intro => {
                if intent.interact_pressed {
                    self.mode = Mode::Playing;
                    out.events.push(GameEvent::LevelStarted {
                        level: self.level_index,
                    });
                    info!(level = self.level_index, "game started");
                }
            }

            Mode::Playing => self.playing_frame(intent, dt, &mut out),

            Mode::FinalChallenge { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    // Window expired: counts as failure
                    out.events.push(GameEvent::ChallengeFailed);
                    self.enter_game_over(&mut out);
                } else {
                    self.mode = Mode::FinalChallenge { remaining };
                }
            }

            Mode::GameOver { remaining } | Mode::GameComplete { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.reset_to_intro(&mut out);
                } else {
                    self.mode = match self.mode {
                        Mode::GameOver { .. } => Mode::GameOver { remaining },
                        _ => Mode::GameComplete { remaining },
                    };
                }
            }
        }

        out
    }

    /// Deliver the outcome of the external final challenge.
    ///
    /// Only meaningful while the challenge window is open; any other mode
    /// ignores the call.
    pub fn resolve_challenge(&mut self, success: bool) -> FrameOutput {
        let mut out = FrameOutput::default();
        if !matches!(self.mode, Mode::FinalChallenge { .. }) {
            debug!(mode = ?self.mode, "challenge result ignored outside the window");
            return out;
        }

        if success {
            out.events.push(GameEvent::ChallengeWon);
            self.enter_game_complete(&mut out);
        } else {
            out.events.push(GameEvent::ChallengeFailed);
            self.enter_game_over(&mut out);
        }
        out
    }

    /// Serializable view of the current state for the renderer.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            mode: self.mode,
            level_index: self.level_index,
            frame: self.frame,
            camera_scroll: self.camera.scroll,
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            collectibles: self.level.collectibles.clone(),
            goal: self.level.goal,
        }
    }

    fn playing_frame(&mut self, intent: &InputIntent, dt: f32, out: &mut FrameOutput) {
        // 1. Goal interaction
        if intent.interact_pressed && self.try_goal_interact(out) {
            return;
        }

        // 2. Player intent and physics
        if self.player.step(intent, &self.level.tiles) {
            out.events.push(GameEvent::Jumped);
        }

        // 3. Player timers and animation
        self.player.update_timers(dt);
        self.player.update_animation(dt);

        // 4. Enemies
        for enemy in &mut self.enemies {
            enemy.step();
            enemy.update_animation(dt);
        }

        // 5. Collectibles: float, then mark-and-remove pickups
        for part in &mut self.level.collectibles {
            part.update();
        }
        let player_rect = self.player.rect;
        let mut collected_at = Vec::new();
        self.level.collectibles.retain(|part| {
            if player_rect.overlaps(&part.rect) {
                collected_at.push(part.rect.top_left());
                false
            } else {
                true
            }
        });
        for position in collected_at {
            self.player.collected_parts += 1;
            out.events.push(GameEvent::PartCollected {
                position,
                total: self.player.collected_parts,
            });
        }

        // 6. Trap and enemy contact
        let mut fatal = false;
        for i in 0..self.level.traps.len() {
            if self.player.rect.overlaps(&self.level.traps[i]) && self.damage_player(out) {
                fatal = true;
                break;
            }
        }
        if !fatal {
            for i in 0..self.enemies.len() {
                if self.player.rect.overlaps(&self.enemies[i].rect) && self.damage_player(out) {
                    fatal = true;
                    break;
                }
            }
        }
        if fatal {
            self.enter_game_over(out);
            return;
        }

        // 7. Falling out of the world
        if self.player.rect.top() > VIEWPORT_HEIGHT {
            match self.player.take_damage() {
                DamageOutcome::Fatal => {
                    out.events.push(GameEvent::Damaged { lives_left: 0 });
                    self.enter_game_over(out);
                    return;
                }
                outcome => {
                    if outcome == DamageOutcome::Damaged {
                        out.events.push(GameEvent::Damaged {
                            lives_left: self.player.lives,
                        });
                    }
                    self.player.respawn();
                    out.events.push(GameEvent::PlayerRespawned);
                }
            }
        }

        // 8. Footstep cadence
        if self.player.on_ground && self.player.velocity.x != 0.0 {
            self.footstep_timer += dt;
            if self.footstep_timer >= Self::FOOTSTEP_INTERVAL {
                self.footstep_timer = 0.0;
                out.events.push(GameEvent::Footstep);
            }
        } else {
            self.footstep_timer = 0.0;
        }

        // 9. Camera
        self.camera
            .update(self.player.rect.center_x(), self.level.width_px);
    }

    /// Handle an interact press during play. Returns true if the press
    /// consumed the frame (level advance or challenge start).
    fn try_goal_interact(&mut self, out: &mut FrameOutput) -> bool {
        let at_goal = self
            .level
            .goal
            .is_some_and(|goal| self.player.rect.overlaps(&goal));
        if !at_goal || self.player.collected_parts < PARTS_REQUIRED {
            // Not at the goal, or parts missing: silent no-op
            return false;
        }

        if self.level_index + 1 < self.config.campaign.len() {
            self.level_index += 1;
            match Self::load_level(&self.config, self.level_index, &mut self.rng) {
                Ok((level, player, enemies)) => {
                    self.level = level;
                    self.player = player;
                    self.enemies = enemies;
                    self.camera.reset();
                    self.footstep_timer = 0.0;
                    out.events.push(GameEvent::LevelAdvanced {
                        to_level: self.level_index,
                    });
                    info!(level = self.level_index, "advanced to next level");
                }
                Err(e) => {
                    // Campaign data was validated at construction; a later
                    // failure means the config was mutated underneath us
                    warn!(level = self.level_index, error = %e, "level load failed");
                }
            }
        } else {
            self.mode = Mode::FinalChallenge {
                remaining: Self::CHALLENGE_WINDOW,
            };
            out.events.push(GameEvent::ChallengeStarted {
                window: Self::CHALLENGE_WINDOW,
            });
            info!("final challenge started");
        }
        true
    }

    /// Shared damage path for traps and enemies. Returns true on a fatal
    /// hit; the caller transitions the mode.
    fn damage_player(&mut self, out: &mut FrameOutput) -> bool {
        match self.player.take_damage() {
            DamageOutcome::Ignored => false,
            DamageOutcome::Damaged => {
                out.events.push(GameEvent::Damaged {
                    lives_left: self.player.lives,
                });
                false
            }
            DamageOutcome::Fatal => {
                out.events.push(GameEvent::Damaged { lives_left: 0 });
                true
            }
        }
    }

    fn enter_game_over(&mut self, out: &mut FrameOutput) {
        self.player.force_anim(AnimState::Lose);
        self.mode = Mode::GameOver {
            remaining: Self::INTERMISSION,
        };
        out.events.push(GameEvent::GameOver);
        info!(level = self.level_index, "game over");
    }

    fn enter_game_complete(&mut self, out: &mut FrameOutput) {
        self.player.force_anim(AnimState::Win);
        self.mode = Mode::GameComplete {
            remaining: Self::INTERMISSION,
        };
        out.events.push(GameEvent::GameComplete);
        info!("campaign complete");
    }

    /// Fresh level 0 and a fresh player, back on the title screen.
    fn reset_to_intro(&mut self, _out: &mut FrameOutput) {
        self.level_index = 0;
        match Self::load_level(&self.config, 0, &mut self.rng) {
            Ok((level, player, enemies)) => {
                self.level = level;
                self.player = player;
                self.enemies = enemies;
            }
            Err(e) => {
                warn!(error = %e, "reset level load failed");
            }
        }
        self.camera.reset();
        self.footstep_timer = 0.0;
        self.mode = Mode::Intro;
        info!("session reset to intro");
    }
}
