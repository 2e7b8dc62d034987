//! Input Intents and Recordings
//!
//! The simulation never touches input devices. The host translates whatever
//! it polls (keyboard, analog stick) into one [`InputIntent`] per frame, and
//! the session consumes that. An analog axis, when present, overrides the
//! digital direction flags after deadzone filtering.
//!
//! [`IntentRecording`] is a delta-compressed intent log: only frames where
//! the intent CHANGED are stored, which keeps long session replays small.

use serde::{Deserialize, Serialize};

/// Analog axis magnitudes below this are treated as released.
pub const AXIS_DEADZONE: f32 = 0.2;

/// Device-independent input for a single frame.
///
/// Edge-triggered fields (`jump_pressed`, `interact_pressed`) are true only
/// on the frame the host saw the press, not while held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    /// Digital left (arrow key / d-pad)
    pub move_left: bool,
    /// Digital right
    pub move_right: bool,
    /// Analog horizontal axis in [-1, 1], if the host has one
    pub move_axis: Option<f32>,
    /// Jump was pressed this frame
    pub jump_pressed: bool,
    /// Interact was pressed this frame (goal use, intro start)
    pub interact_pressed: bool,
    /// Host asked the session to quit
    pub quit_requested: bool,
}

impl InputIntent {
    /// An idle frame: nothing pressed.
    pub const fn idle() -> Self {
        Self {
            move_left: false,
            move_right: false,
            move_axis: None,
            jump_pressed: false,
            interact_pressed: false,
            quit_requested: false,
        }
    }

    /// Resolve the horizontal movement factor in [-1, 1].
    ///
    /// Digital flags give -1/0/+1 (both held cancels to the later-checked
    /// right, matching the original key scan order). A live analog axis past
    /// the deadzone overrides the digital result with its raw magnitude.
    pub fn horizontal(&self) -> f32 {
        let mut factor = 0.0;
        if self.move_left {
            factor = -1.0;
        }
        if self.move_right {
            factor = 1.0;
        }
        if let Some(axis) = self.move_axis {
            if axis.abs() > AXIS_DEADZONE {
                factor = axis.clamp(-1.0, 1.0);
            }
        }
        factor
    }

    /// True when no field is active.
    pub fn is_idle(&self) -> bool {
        *self == Self::idle()
    }
}

/// Intent with its frame number, stored only when the intent changed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IntentDelta {
    /// Frame when this intent state began
    pub frame: u64,
    /// The new intent state
    pub intent: InputIntent,
}

/// Complete intent recording for one session.
///
/// Used for replay playback in tests and the demo driver: feeding the same
/// recording and seed into a fresh session reproduces the run exactly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IntentRecording {
    /// RNG seed the recorded session was created with
    pub rng_seed: u64,

    /// Last recorded frame
    pub end_frame: u64,

    /// Delta-compressed intent data.
    /// Only stores frames where the intent CHANGED.
    deltas: Vec<IntentDelta>,

    /// Last recorded intent (for delta comparison)
    #[serde(skip)]
    last_intent: InputIntent,
}

impl IntentRecording {
    /// Create an empty recording tagged with the session seed.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            end_frame: 0,
            deltas: Vec::with_capacity(256),
            last_intent: InputIntent::idle(),
        }
    }

    /// Record the intent for a frame.
    ///
    /// Only stores if the intent changed from the previous frame.
    pub fn record(&mut self, frame: u64, intent: InputIntent) {
        self.end_frame = frame;
        if intent != self.last_intent {
            self.deltas.push(IntentDelta { frame, intent });
            self.last_intent = intent;
        }
    }

    /// Get the intent in effect at a specific frame.
    ///
    /// Uses binary search over the deltas.
    pub fn intent_at(&self, frame: u64) -> InputIntent {
        let idx = self.deltas.partition_point(|d| d.frame <= frame);
        if idx == 0 {
            InputIntent::idle()
        } else {
            self.deltas[idx - 1].intent
        }
    }

    /// All stored deltas.
    pub fn deltas(&self) -> &[IntentDelta] {
        &self.deltas
    }

    /// Number of stored deltas.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Iterate every frame from 0 to `end_frame`, expanding the deltas.
    pub fn replay_iter(&self) -> ReplayIter<'_> {
        ReplayIter {
            recording: self,
            current_frame: 0,
            delta_idx: 0,
            current_intent: InputIntent::idle(),
        }
    }
}

/// Iterator replaying a recording frame-by-frame.
pub struct ReplayIter<'a> {
    recording: &'a IntentRecording,
    current_frame: u64,
    delta_idx: usize,
    current_intent: InputIntent,
}

impl Iterator for ReplayIter<'_> {
    type Item = (u64, InputIntent);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_frame > self.recording.end_frame {
            return None;
        }

        while self.delta_idx < self.recording.deltas.len() {
            let delta = &self.recording.deltas[self.delta_idx];
            if delta.frame <= self.current_frame {
                self.current_intent = delta.intent;
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let result = (self.current_frame, self.current_intent);
        self.current_frame += 1;
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_digital() {
        let mut intent = InputIntent::idle();
        assert_eq!(intent.horizontal(), 0.0);

        intent.move_left = true;
        assert_eq!(intent.horizontal(), -1.0);

        // Both held: right wins (key scan order)
        intent.move_right = true;
        assert_eq!(intent.horizontal(), 1.0);
    }

    #[test]
    fn test_horizontal_axis_deadzone() {
        let mut intent = InputIntent::idle();

        // Inside the deadzone the axis is ignored
        intent.move_axis = Some(0.1);
        assert_eq!(intent.horizontal(), 0.0);
        intent.move_axis = Some(-0.19);
        assert_eq!(intent.horizontal(), 0.0);

        // Past it the raw magnitude comes through
        intent.move_axis = Some(0.6);
        assert_eq!(intent.horizontal(), 0.6);
    }

    #[test]
    fn test_horizontal_axis_overrides_digital() {
        let intent = InputIntent {
            move_right: true,
            move_axis: Some(-0.8),
            ..InputIntent::idle()
        };
        assert_eq!(intent.horizontal(), -0.8);
    }

    #[test]
    fn test_recording_delta_compression() {
        let mut rec = IntentRecording::new(7);

        let running = InputIntent {
            move_right: true,
            ..InputIntent::idle()
        };
        rec.record(0, running);
        rec.record(1, running);
        rec.record(2, running);

        // Same intent three frames: one delta
        assert_eq!(rec.delta_count(), 1);

        rec.record(3, InputIntent::idle());
        assert_eq!(rec.delta_count(), 2);
        assert_eq!(rec.end_frame, 3);
    }

    #[test]
    fn test_recording_intent_at() {
        let mut rec = IntentRecording::new(0);
        let left = InputIntent {
            move_left: true,
            ..InputIntent::idle()
        };
        let jump = InputIntent {
            jump_pressed: true,
            ..InputIntent::idle()
        };

        rec.record(10, left);
        rec.record(20, jump);

        assert!(rec.intent_at(5).is_idle());
        assert_eq!(rec.intent_at(10), left);
        assert_eq!(rec.intent_at(15), left);
        assert_eq!(rec.intent_at(20), jump);
        assert_eq!(rec.intent_at(999), jump);
    }

    #[test]
    fn test_replay_iterator() {
        let mut rec = IntentRecording::new(0);
        let right = InputIntent {
            move_right: true,
            ..InputIntent::idle()
        };
        rec.record(0, right);
        rec.record(3, InputIntent::idle());
        rec.record(5, right);

        let frames: Vec<_> = rec.replay_iter().collect();
        assert_eq!(frames.len(), 6); // frames 0-5
        assert_eq!(frames[0].1, right);
        assert_eq!(frames[2].1, right);
        assert_eq!(frames[3].1, InputIntent::idle());
        assert_eq!(frames[5].1, right);
    }

    #[test]
    fn test_recording_json_round_trip() {
        let mut rec = IntentRecording::new(99);
        rec.record(
            4,
            InputIntent {
                jump_pressed: true,
                ..InputIntent::idle()
            },
        );

        let json = serde_json::to_string(&rec).unwrap();
        let back: IntentRecording = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rng_seed, 99);
        assert_eq!(back.delta_count(), 1);
        assert!(back.intent_at(4).jump_pressed);
    }
}
