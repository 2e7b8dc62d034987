//! Tile Collision
//!
//! Axis-separated sweep against solid tiles plus an independent ground
//! probe. The sweep is the only thing that moves a body through the world;
//! callers pass the intended per-frame displacement and get back the pushed
//! out rectangle and adjusted velocity.
//!
//! Order matters: the horizontal axis resolves fully before the vertical
//! axis runs, so a body entering a corner slides along the wall instead of
//! snagging on it. Horizontal push-out never zeroes vx (the body keeps
//! pressing into the wall on later frames); vertical push-out always zeroes
//! vy.

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// Result of one collision sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// The body after push-out
    pub rect: Rect,
    /// Velocity after push-out (vy zeroed on any vertical contact)
    pub velocity: Vec2,
    /// A downward push-out happened this sweep
    pub landed: bool,
}

/// Sweep `rect` by `velocity` through `tiles`, one axis at a time.
pub fn resolve(rect: Rect, velocity: Vec2, tiles: &[Rect]) -> Resolution {
    let mut rect = rect;
    let mut velocity = velocity;
    let mut landed = false;

    // Horizontal pass
    rect.x += velocity.x;
    for tile in tiles {
        if rect.overlaps(tile) {
            if velocity.x > 0.0 {
                rect.set_right(tile.left());
            } else if velocity.x < 0.0 {
                rect.set_left(tile.right());
            }
        }
    }

    // Vertical pass
    rect.y += velocity.y;
    for tile in tiles {
        if rect.overlaps(tile) {
            if velocity.y > 0.0 {
                rect.set_bottom(tile.top());
                velocity.y = 0.0;
                landed = true;
            } else if velocity.y < 0.0 {
                rect.set_top(tile.bottom());
                velocity.y = 0.0;
            }
        }
    }

    Resolution {
        rect,
        velocity,
        landed,
    }
}

/// Authoritative grounded test: does the body, shifted one pixel down,
/// overlap any tile? Run after the sweep each frame; a body flush on a
/// surface fails the overlap test at offset zero but passes it here.
pub fn probe_grounded(rect: &Rect, tiles: &[Rect]) -> bool {
    let probe = rect.translated(0.0, 1.0);
    tiles.iter().any(|tile| probe.overlaps(tile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TILE_SIZE;
    use proptest::prelude::*;

    fn tile(col: f32, row: f32) -> Rect {
        Rect::new(col * TILE_SIZE, row * TILE_SIZE, TILE_SIZE, TILE_SIZE)
    }

    // 0.75 of a tile is exact in f32, so flush-contact assertions hold
    fn body(x: f32, y: f32) -> Rect {
        Rect::new(x, y, TILE_SIZE * 0.75, TILE_SIZE)
    }

    #[test]
    fn test_landing_zeroes_vy_and_sets_landed() {
        let floor = [tile(0.0, 5.0)];
        // Body a few pixels above the floor, falling fast
        let falling = body(10.0, 5.0 * TILE_SIZE - TILE_SIZE - 4.0);

        let res = resolve(falling, Vec2::new(0.0, 18.0), &floor);

        assert!(res.landed);
        assert_eq!(res.velocity.y, 0.0);
        // Flush on the surface
        assert_eq!(res.rect.bottom(), floor[0].top());
        assert!(!res.rect.overlaps(&floor[0]));
    }

    #[test]
    fn test_head_bump_zeroes_vy_without_landed() {
        let ceiling = [tile(0.0, 2.0)];
        let jumper = body(10.0, 3.0 * TILE_SIZE + 4.0);

        let res = resolve(jumper, Vec2::new(0.0, -22.0), &ceiling);

        assert!(!res.landed);
        assert_eq!(res.velocity.y, 0.0);
        assert_eq!(res.rect.top(), ceiling[0].bottom());
    }

    #[test]
    fn test_wall_pushout_keeps_vx() {
        let wall = [tile(3.0, 0.0)];
        let runner = body(3.0 * TILE_SIZE - 52.0, 0.0);

        let res = resolve(runner, Vec2::new(7.0, 0.0), &wall);

        // Pushed flush against the wall, vx untouched
        assert_eq!(res.rect.right(), wall[0].left());
        assert_eq!(res.velocity.x, 7.0);
        assert!(!res.landed);
    }

    #[test]
    fn test_corner_slides_along_wall() {
        // Wall to the right, floor below: moving diagonally down-right
        // resolves x first (stops at the wall) then y (lands on the floor)
        let tiles = [tile(3.0, 3.0), tile(2.0, 4.0), tile(3.0, 4.0)];
        let diver = body(3.0 * TILE_SIZE - 52.0, 4.0 * TILE_SIZE - TILE_SIZE - 6.0);

        let res = resolve(diver, Vec2::new(7.0, 10.0), &tiles);

        assert_eq!(res.rect.right(), tile(3.0, 3.0).left());
        assert_eq!(res.rect.bottom(), tile(2.0, 4.0).top());
        assert!(res.landed);
    }

    #[test]
    fn test_probe_grounded_flush_surface() {
        let floor = [tile(0.0, 5.0)];
        let mut standing = body(10.0, 0.0);
        standing.set_bottom(floor[0].top());

        // Flush body does not overlap, but the probe sees the floor
        assert!(!standing.overlaps(&floor[0]));
        assert!(probe_grounded(&standing, &floor));

        // Two pixels up: out of probe reach
        let hovering = standing.translated(0.0, -2.0);
        assert!(!probe_grounded(&hovering, &floor));
    }

    #[test]
    fn test_no_tiles_free_fall() {
        let res = resolve(body(0.0, 0.0), Vec2::new(3.0, 9.0), &[]);
        assert_eq!(res.rect.x, 3.0);
        assert_eq!(res.rect.y, 9.0);
        assert_eq!(res.velocity, Vec2::new(3.0, 9.0));
        assert!(!res.landed);
    }

    proptest! {
        /// A body not overlapping any tile stays put under zero velocity.
        #[test]
        fn prop_zero_velocity_is_identity(
            x in -500.0f32..2000.0,
            y in -500.0f32..1000.0,
            col in 0i32..20,
            row in 0i32..10,
        ) {
            let tiles = [tile(col as f32, row as f32)];
            let b = body(x, y);
            prop_assume!(!b.overlaps(&tiles[0]));

            let res = resolve(b, Vec2::ZERO, &tiles);
            prop_assert_eq!(res.rect, b);
            prop_assert_eq!(res.velocity, Vec2::ZERO);
            prop_assert!(!res.landed);
        }

        /// The probe agrees with its definition for any body and tile.
        #[test]
        fn prop_probe_matches_definition(
            x in -500.0f32..2000.0,
            y in -500.0f32..1000.0,
            col in 0i32..20,
            row in 0i32..10,
        ) {
            let tiles = [tile(col as f32, row as f32)];
            let b = body(x, y);
            let expected = b.translated(0.0, 1.0).overlaps(&tiles[0]);
            prop_assert_eq!(probe_grounded(&b, &tiles), expected);
        }

        /// After a downward sweep onto a floor the body never ends up
        /// inside the tile.
        #[test]
        fn prop_downward_sweep_never_embeds(
            x in 0.0f32..60.0,
            gap in 0.0f32..17.0,
            vy in 1.0f32..18.0,
        ) {
            let floor = [tile(0.0, 5.0)];
            let b = body(x, floor[0].top() - TILE_SIZE - gap);

            let res = resolve(b, Vec2::new(0.0, vy), &floor);
            prop_assert!(!res.rect.overlaps(&floor[0]));
        }
    }
}
