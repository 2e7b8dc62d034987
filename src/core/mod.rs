//! Core primitives.
//!
//! Small, domain-free building blocks for the simulation: 2D vectors,
//! axis-aligned rectangles, and a seeded PRNG. Nothing in here knows about
//! tiles, players, or levels.

pub mod rect;
pub mod rng;
pub mod vec2;
