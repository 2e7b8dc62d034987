//! Game Events
//!
//! Per-frame trigger events emitted by the session. The core never plays
//! audio or draws text; it reports what happened this frame and the host
//! maps events to sound effects, music changes, and overlays.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Something that happened during one simulated frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground via a jump (audio cue)
    Jumped,

    /// Player took damage from an enemy, a trap, or falling out
    Damaged {
        /// Lives remaining after the hit
        lives_left: u32,
    },

    /// A collectible part was picked up
    PartCollected {
        /// Where it was, for pickup effects
        position: Vec2,
        /// Player total after the pickup
        total: u32,
    },

    /// Footstep cadence tick while running on the ground
    Footstep,

    /// Player respawned at the level spawn point after a non-fatal fall
    PlayerRespawned,

    /// A level began (session start, restart, or advance)
    LevelStarted {
        /// Zero-based level index
        level: usize,
    },

    /// Interact at the goal with enough parts moved the session forward
    LevelAdvanced {
        /// The level now playing
        to_level: usize,
    },

    /// The final-level challenge window opened
    ChallengeStarted {
        /// Seconds the player has to respond
        window: f32,
    },

    /// External challenge input arrived in time and was correct
    ChallengeWon,

    /// Challenge input was wrong, or the window expired
    ChallengeFailed,

    /// Lives reached zero
    GameOver,

    /// The campaign was completed
    GameComplete,
}

impl GameEvent {
    /// True for events the host would map to a sound effect.
    pub fn is_audio_cue(&self) -> bool {
        matches!(
            self,
            Self::Jumped | Self::Damaged { .. } | Self::PartCollected { .. } | Self::Footstep
        )
    }
}
