//! Movement Integration
//!
//! Turns an intent snapshot plus elapsed frame time into a candidate
//! pose. Nothing here is committed: the access gate and collision
//! resolver may still reject the position wholesale.

use crate::core::vec3::Vec3;
use crate::sim::input::InputSnapshot;
use crate::sim::state::CharacterState;
use crate::sim::tick::SimConfig;
use crate::MAX_FRAME_DT;

/// A proposed pose for the current frame, not yet committed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidatePose {
    /// Proposed position (horizontal components already world-clamped)
    pub position: Vec3,
    /// Proposed heading in radians
    pub heading: f32,
    /// Walk-bob phase that goes with this pose
    pub walk_phase: f32,
}

/// Normalize a raw frame time for integration.
///
/// Zero, negative, NaN, and implausibly large values all come out of
/// real frame loops (first frame, paused tab resuming, clock skew).
/// They are clamped to `[0, MAX_FRAME_DT]` so a hitch becomes one
/// bounded step instead of a teleport through geometry.
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Integrate one frame of movement into a candidate pose.
///
/// `dt` must already be clamped via [`clamp_frame_dt`]. `session_time`
/// drives the idle hover and is the caller's accumulated clamped time.
///
/// Heading: left turn increases, right turn decreases, at a fixed
/// angular rate. Forward displacement runs along (sin h, 0, cos h) at
/// base speed; backward along the negated vector at the backward
/// factor. When both intents are held the two displacements apply in
/// the same frame, netting a slow forward drift.
pub fn integrate(
    character: &CharacterState,
    input: InputSnapshot,
    dt: f32,
    session_time: f32,
    config: &SimConfig,
) -> CandidatePose {
    let heading = character.heading + config.turn_rate * dt * input.turn_sign();

    let forward_dir = Vec3::new(heading.sin(), 0.0, heading.cos());
    let mut position = character.position;

    if input.forward {
        position = position + forward_dir * (config.move_speed * dt);
    }
    if input.backward {
        position = position - forward_dir * (config.move_speed * config.backward_factor * dt);
    }

    // Vertical pose comes from the bob function, not from integration.
    let walk_phase;
    if input.any_movement() {
        walk_phase = character.walk_phase + config.bob_rate * dt;
        position.y = config.base_height + walk_phase.sin().abs() * config.bob_amplitude;
    } else {
        walk_phase = 0.0;
        position.y = config.base_height + (session_time * config.idle_rate).sin() * config.idle_amplitude;
    }

    // World bound holds regardless of collision/zone outcome.
    CandidatePose {
        position: position.clamp_horizontal(config.world_half_extent),
        heading,
        walk_phase,
    }
}

// =============================================================================
// TESTS
// =============================================================================
