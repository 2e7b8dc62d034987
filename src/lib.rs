//! # The Mysterious Path — Simulation Core
//!
//! Headless simulation engine for a 2D tile platformer: ASCII-defined levels,
//! axis-separated tile collision, patrolling enemies, collectible parts, and
//! the top-level game state machine. Rendering, audio playback, and input
//! device polling live outside this crate — each frame it consumes an
//! [`InputIntent`] and produces entity positions, animation states, and
//! trigger events for the collaborators to draw and play.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MYSTERIOUS PATH CORE                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Domain-free primitives                    │
//! │  ├── vec2.rs     - 2D f32 vector                             │
//! │  ├── rect.rs     - Axis-aligned rectangle                    │
//! │  └── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │                                                              │
//! │  game/           - Simulation (deterministic per frame)      │
//! │  ├── input.rs    - Input intents and replay recordings       │
//! │  ├── level.rs    - ASCII map parsing into a Level            │
//! │  ├── levels.rs   - Built-in three-level campaign             │
//! │  ├── collision.rs- Axis-separated sweep + ground probe       │
//! │  ├── player.rs   - Player physics and animation states       │
//! │  ├── enemy.rs    - Platform patrol                           │
//! │  ├── camera.rs   - Smoothed horizontal scroll                │
//! │  ├── events.rs   - Outbound trigger events (audio, session)  │
//! │  └── session.rs  - Top-level game state machine              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame contract
//!
//! The loop is single-threaded and cooperative: one call to
//! [`GameSession::frame`] per display frame, with `dt` in seconds. Timers
//! (animation, invulnerability, the message screens, the final challenge
//! window) scale by `dt`; motion uses fixed per-frame pixel deltas at the
//! nominal 60 Hz cadence, so very fast bodies can tunnel through one-tile
//! walls. That limitation is inherited from the game this engine
//! reimplements and is carried deliberately.
//!
//! Given the same level text, seed, and intent stream, a session replays to
//! an identical state on the same platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rect::Rect;
pub use crate::core::rng::DeterministicRng;
pub use crate::core::vec2::Vec2;
pub use crate::game::input::{InputIntent, IntentRecording};
pub use crate::game::level::{Level, LevelError, SpawnPolicy};
pub use crate::game::session::{FrameOutput, GameSession, Mode, SessionConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal simulation rate (Hz)
pub const FRAME_RATE: u32 = 60;

/// Side length of one solid tile, in pixels
pub const TILE_SIZE: f32 = 64.0;

/// Viewport width in pixels (camera scroll is clamped against this)
pub const VIEWPORT_WIDTH: f32 = 1280.0;

/// Viewport height in pixels (the bottom map row sits on this edge)
pub const VIEWPORT_HEIGHT: f32 = 720.0;
