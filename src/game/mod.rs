//! Simulation modules.
//!
//! Everything that advances once per frame: level data, the collision
//! resolver, the player and enemy state machines, the camera, and the
//! top-level session that ties them together.

pub mod camera;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod input;
pub mod level;
pub mod levels;
pub mod player;
pub mod session;
