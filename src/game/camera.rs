//! Camera Scroll
//!
//! Horizontal-only scroll that eases toward centering the player, then
//! clamps to the level bounds. Smoothing runs before the clamp, so the
//! camera glides up to an edge and pins there without overshoot.

use serde::{Deserialize, Serialize};

use crate::VIEWPORT_WIDTH;

/// Smoothed horizontal camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current scroll offset in pixels, world x of the viewport's left edge
    pub scroll: f32,
}

impl Camera {
    /// Fraction of the remaining distance covered per frame.
    pub const SMOOTHING: f32 = 0.1;

    /// Camera at the level origin.
    pub fn new() -> Self {
        Self { scroll: 0.0 }
    }

    /// Ease toward centering `target_x` (the player's center), then clamp
    /// to `[0, level_width - viewport]`. Levels narrower than the viewport
    /// pin the camera at zero.
    pub fn update(&mut self, target_x: f32, level_width: f32) {
        let desired = target_x - VIEWPORT_WIDTH / 2.0;
        self.scroll += (desired - self.scroll) * Self::SMOOTHING;

        let max_scroll = (level_width - VIEWPORT_WIDTH).max(0.0);
        self.scroll = self.scroll.clamp(0.0, max_scroll);
    }

    /// Snap to the level origin (level change, session reset).
    pub fn reset(&mut self) {
        self.scroll = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LEVEL_WIDTH: f32 = 8576.0; // 134 tiles

    #[test]
    fn test_eases_toward_target() {
        let mut cam = Camera::new();
        let target = 2000.0;
        let desired = target - VIEWPORT_WIDTH / 2.0;

        cam.update(target, LEVEL_WIDTH);
        let first = cam.scroll;
        assert!(first > 0.0 && first < desired);

        // Monotone approach, converging on the desired offset
        let mut prev = first;
        for _ in 0..200 {
            cam.update(target, LEVEL_WIDTH);
            assert!(cam.scroll >= prev);
            prev = cam.scroll;
        }
        assert!((cam.scroll - desired).abs() < 1.0);
    }

    #[test]
    fn test_clamps_at_left_edge() {
        let mut cam = Camera::new();
        // Player near the level start: desired scroll is negative
        cam.update(100.0, LEVEL_WIDTH);
        assert_eq!(cam.scroll, 0.0);
    }

    #[test]
    fn test_clamps_at_right_edge() {
        let mut cam = Camera::new();
        let max_scroll = LEVEL_WIDTH - VIEWPORT_WIDTH;
        for _ in 0..500 {
            cam.update(LEVEL_WIDTH, LEVEL_WIDTH);
        }
        assert_eq!(cam.scroll, max_scroll);
    }

    #[test]
    fn test_narrow_level_pins_at_zero() {
        let mut cam = Camera::new();
        for _ in 0..50 {
            cam.update(500.0, 640.0);
            assert_eq!(cam.scroll, 0.0);
        }
    }

    proptest! {
        /// The scroll is always inside the valid range, for any target and
        /// any level width.
        #[test]
        fn prop_scroll_always_in_range(
            targets in prop::collection::vec(-10_000.0f32..20_000.0, 1..60),
            level_width in 0.0f32..20_000.0,
        ) {
            let mut cam = Camera::new();
            let max_scroll = (level_width - VIEWPORT_WIDTH).max(0.0);
            for target in targets {
                cam.update(target, level_width);
                prop_assert!(cam.scroll >= 0.0);
                prop_assert!(cam.scroll <= max_scroll);
            }
        }
    }
}
