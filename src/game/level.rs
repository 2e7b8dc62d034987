//! Level Parsing
//!
//! Turns an ASCII tile grid into level geometry. One character per tile
//! column, one string per row, the bottom row resting on the bottom edge of
//! the viewport (tall maps extend above y = 0).
//!
//! Legend:
//!   `X` solid tile        `t` trap (instant damage)
//!   `s` collectible part  `G` goal (last one wins)
//!   `P` player spawn      `N` suppresses enemy spawn on the platform below
//!
//! Any other character is empty space. Enemies are not marked directly:
//! every horizontal run of 4+ solid tiles gets one patroller on top unless
//! an `N` sits anywhere in the row above the run, or the spawn policy's
//! minimum gap suppresses it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::rect::Rect;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::{TILE_SIZE, VIEWPORT_HEIGHT};

/// Parts the player must hold before the goal responds.
pub const PARTS_REQUIRED: u32 = 3;

/// Minimum platform run length, in tiles, that spawns a patroller.
pub const MIN_PATROL_TILES: usize = 4;

/// Number of collectible sprite variants the renderer has.
pub const PART_VARIANTS: u32 = 4;

/// Errors that make a map unusable.
#[derive(Debug, Error)]
pub enum LevelError {
    /// No `P` anywhere in the grid
    #[error("map has no player spawn ('P')")]
    MissingPlayerSpawn,

    /// More than one `P`
    #[error("map has more than one player spawn ('P'), second at row {row}, col {col}")]
    DuplicatePlayerSpawn {
        /// Row of the second spawn
        row: usize,
        /// Column of the second spawn
        col: usize,
    },

    /// Rows are not all the same length
    #[error("map row {row} is {len} chars, expected {expected}")]
    RaggedRow {
        /// Offending row index
        row: usize,
        /// Its length
        len: usize,
        /// Length of row 0
        expected: usize,
    },

    /// No rows at all
    #[error("map is empty")]
    EmptyMap,
}

/// Non-fatal problems found by [`Level::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelWarning {
    /// No `G` in the grid: the level cannot be completed
    MissingGoal,
    /// Fewer parts than the goal requires: the level cannot be completed
    TooFewParts {
        /// Parts present in the map
        found: u32,
        /// Parts the goal requires
        required: u32,
    },
}

/// Controls automatic enemy placement during parsing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Suppress a spawn whose x lies within this many tiles of the
    /// previously spawned enemy's x. `None` disables the rule.
    pub min_enemy_gap_tiles: Option<u32>,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            min_enemy_gap_tiles: Some(8),
        }
    }
}

/// A floating collectible part.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Collectible {
    /// Pickup hitbox (one tile)
    pub rect: Rect,
    /// Sprite variant index in [0, PART_VARIANTS)
    pub variant: u32,
    /// Current vertical float offset, for drawing only
    pub float_offset: f32,
    /// +1 drifting down, -1 drifting up
    pub float_direction: f32,
}

impl Collectible {
    /// Pixels per frame of float drift.
    pub const FLOAT_SPEED: f32 = 0.5;
    /// Maximum float offset magnitude in pixels.
    pub const FLOAT_RANGE: f32 = 5.0;

    fn new(x: f32, y: f32, variant: u32) -> Self {
        Self {
            rect: Rect::new(x, y, TILE_SIZE, TILE_SIZE),
            variant,
            float_offset: 0.0,
            float_direction: 1.0,
        }
    }

    /// Advance the float animation one frame. Does not move the hitbox.
    pub fn update(&mut self) {
        self.float_offset += self.float_direction * Self::FLOAT_SPEED;
        if self.float_offset.abs() >= Self::FLOAT_RANGE {
            self.float_direction = -self.float_direction;
        }
    }
}

/// Where a patroller starts and how far it may roam.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Left edge of the patrol span (pixels)
    pub x: f32,
    /// Top of the enemy body, one tile above the platform surface
    pub y: f32,
    /// Patrol span width in pixels (the platform run's width)
    pub platform_width: f32,
}

/// Parsed level geometry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    /// Solid tiles
    pub tiles: Vec<Rect>,
    /// Instant-damage traps
    pub traps: Vec<Rect>,
    /// Collectible parts still in the world
    pub collectibles: Vec<Collectible>,
    /// Goal zone, if the map has one
    pub goal: Option<Rect>,
    /// Automatic enemy placements
    pub enemy_spawns: Vec<EnemySpawn>,
    /// Player start position (top-left of the hitbox)
    pub spawn_point: Vec2,
    /// Level width in pixels (columns x tile size)
    pub width_px: f32,
    /// Level height in pixels (rows x tile size)
    pub height_px: f32,
}

impl Level {
    /// Parse an ASCII grid into a level.
    ///
    /// `rng` picks collectible sprite variants; it has no effect on
    /// gameplay geometry.
    pub fn parse(
        rows: &[&str],
        policy: &SpawnPolicy,
        rng: &mut DeterministicRng,
    ) -> Result<Self, LevelError> {
        if rows.is_empty() {
            return Err(LevelError::EmptyMap);
        }

        let cols = rows[0].chars().count();
        for (row_index, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != cols {
                return Err(LevelError::RaggedRow {
                    row: row_index,
                    len,
                    expected: cols,
                });
            }
        }

        let grid: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        let num_rows = grid.len();

        let mut tiles = Vec::new();
        let mut traps = Vec::new();
        let mut collectibles = Vec::new();
        let mut goal = None;
        let mut enemy_spawns: Vec<EnemySpawn> = Vec::new();
        let mut spawn_point = None;

        for (row_index, row) in grid.iter().enumerate() {
            // Bottom row sits on the viewport's bottom edge
            let y = VIEWPORT_HEIGHT - (num_rows - row_index) as f32 * TILE_SIZE;
            let mut run_start: Option<usize> = None;

            for (col_index, &ch) in row.iter().enumerate() {
                let x = col_index as f32 * TILE_SIZE;

                if ch == 'X' {
                    tiles.push(Rect::new(x, y, TILE_SIZE, TILE_SIZE));
                    if run_start.is_none() {
                        run_start = Some(col_index);
                    }
                    continue;
                }

                // A non-tile character terminates the current platform run
                if let Some(start) = run_start.take() {
                    Self::close_run(
                        &grid,
                        row_index,
                        start,
                        col_index,
                        y,
                        policy,
                        &mut enemy_spawns,
                    );
                }

                match ch {
                    't' => traps.push(Rect::new(x, y, TILE_SIZE, TILE_SIZE)),
                    's' => {
                        let variant = rng.next_int(PART_VARIANTS);
                        collectibles.push(Collectible::new(x, y, variant));
                    }
                    'G' => goal = Some(Rect::new(x, y, TILE_SIZE, TILE_SIZE)),
                    'P' => {
                        if spawn_point.is_some() {
                            return Err(LevelError::DuplicatePlayerSpawn {
                                row: row_index,
                                col: col_index,
                            });
                        }
                        spawn_point = Some(Vec2::new(x, y));
                    }
                    // 'N' is read by close_run; anything else is empty space
                    _ => {}
                }
            }

            // End of row terminates a run too
            if let Some(start) = run_start {
                Self::close_run(&grid, row_index, start, cols, y, policy, &mut enemy_spawns);
            }
        }

        let spawn_point = spawn_point.ok_or(LevelError::MissingPlayerSpawn)?;

        let level = Self {
            tiles,
            traps,
            collectibles,
            goal,
            enemy_spawns,
            spawn_point,
            width_px: cols as f32 * TILE_SIZE,
            height_px: num_rows as f32 * TILE_SIZE,
        };

        debug!(
            tiles = level.tiles.len(),
            traps = level.traps.len(),
            parts = level.collectibles.len(),
            enemies = level.enemy_spawns.len(),
            has_goal = level.goal.is_some(),
            "level parsed"
        );

        Ok(level)
    }

    /// Evaluate a finished platform run for an enemy spawn.
    fn close_run(
        grid: &[Vec<char>],
        row_index: usize,
        run_start: usize,
        run_end: usize,
        row_y: f32,
        policy: &SpawnPolicy,
        spawns: &mut Vec<EnemySpawn>,
    ) {
        let run_tiles = run_end - run_start;
        if run_tiles < MIN_PATROL_TILES {
            return;
        }

        // An 'N' anywhere above the run suppresses the spawn
        if row_index > 0 {
            let above = &grid[row_index - 1];
            if above[run_start..run_end].contains(&'N') {
                return;
            }
        }

        let x = run_start as f32 * TILE_SIZE;

        if let Some(gap_tiles) = policy.min_enemy_gap_tiles {
            let min_gap = gap_tiles as f32 * TILE_SIZE;
            if let Some(last) = spawns.last() {
                if (x - last.x).abs() < min_gap {
                    return;
                }
            }
        }

        spawns.push(EnemySpawn {
            x,
            y: row_y - TILE_SIZE,
            platform_width: run_tiles as f32 * TILE_SIZE,
        });
    }

    /// Check for problems that do not prevent parsing but make the level
    /// unwinnable. Logged and returned; the caller decides what to do.
    pub fn validate(&self) -> Vec<LevelWarning> {
        let mut warnings = Vec::new();

        if self.goal.is_none() {
            warn!("level has no goal, it cannot be completed");
            warnings.push(LevelWarning::MissingGoal);
        }

        let found = self.collectibles.len() as u32;
        if found < PARTS_REQUIRED {
            warn!(
                found,
                required = PARTS_REQUIRED,
                "level has fewer parts than the goal requires"
            );
            warnings.push(LevelWarning::TooFewParts {
                found,
                required: PARTS_REQUIRED,
            });
        }

        warnings
    }
}
