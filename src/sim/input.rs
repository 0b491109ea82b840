//! Input Aggregation
//!
//! Converts raw key press/release events into held-intent flags, and
//! hands the frame loop an immutable snapshot once per tick.

use serde::{Deserialize, Serialize};

/// The four movement intents the control surface can express.
///
/// This is the entire external command vocabulary of the core; anything
/// else (menus, wallets, HUD toggles) lives with the collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Rotate heading counter-clockwise (increases heading)
    TurnLeft,
    /// Rotate heading clockwise (decreases heading)
    TurnRight,
    /// Walk along the heading vector
    Forward,
    /// Walk against the heading vector at reduced speed
    Backward,
}

/// Held-intent state driven by discrete press/release events.
///
/// A flag is set on press and cleared only by the matching release -
/// no debouncing, no timers. Opposite intents may be held at the same
/// time; the movement integrator combines their effects additively
/// instead of cancelling them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    turn_left: bool,
    turn_right: bool,
    forward: bool,
    backward: bool,
}

impl InputState {
    /// Create with nothing held.
    pub const fn new() -> Self {
        Self {
            turn_left: false,
            turn_right: false,
            forward: false,
            backward: false,
        }
    }

    /// Record a key press.
    pub fn press(&mut self, intent: Intent) {
        self.set(intent, true);
    }

    /// Record a key release.
    pub fn release(&mut self, intent: Intent) {
        self.set(intent, false);
    }

    fn set(&mut self, intent: Intent, held: bool) {
        match intent {
            Intent::TurnLeft => self.turn_left = held,
            Intent::TurnRight => self.turn_right = held,
            Intent::Forward => self.forward = held,
            Intent::Backward => self.backward = held,
        }
    }

    /// Immutable copy of the current intents, consumed by one tick.
    #[inline]
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            forward: self.forward,
            backward: self.backward,
        }
    }
}

/// Intent flags as seen by a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Turn-left held
    pub turn_left: bool,
    /// Turn-right held
    pub turn_right: bool,
    /// Forward held
    pub forward: bool,
    /// Backward held
    pub backward: bool,
}

impl InputSnapshot {
    /// An idle snapshot (nothing held).
    pub const IDLE: Self = Self {
        turn_left: false,
        turn_right: false,
        forward: false,
        backward: false,
    };

    /// Net turn direction: +1 left, -1 right, 0 neither or both.
    #[inline]
    pub fn turn_sign(&self) -> f32 {
        (self.turn_left as i8 - self.turn_right as i8) as f32
    }

    /// Whether any directional intent is active this frame.
    ///
    /// Drives the walk/idle split of the vertical bob.
    #[inline]
    pub fn any_movement(&self) -> bool {
        self.turn_left || self.turn_right || self.forward || self.backward
    }
}

// =============================================================================
// TESTS
// =============================================================================
