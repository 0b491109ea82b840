//! Camera Following
//!
//! A trailing third-person camera: target pose sits behind and above
//! the character along the negative heading direction, and both the
//! camera position and its look-at point are exponentially smoothed
//! toward their targets with independent per-frame factors. The
//! position factor is tighter than the look-at factor, which keeps the
//! frame steady while the view stays responsive. The camera does no
//! collision avoidance; clipping into geometry is accepted.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;

/// Fixed camera constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Distance behind the character along the negative heading
    pub follow_distance: f32,
    /// Height above the character for the camera itself
    pub follow_height: f32,
    /// Upward offset of the look-at point from the character
    pub look_height: f32,
    /// Per-frame interpolation factor for the camera position (0..1)
    pub position_smoothing: f32,
    /// Per-frame interpolation factor for the look-at point (0..1)
    pub look_smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_distance: 5.0,
            follow_height: 2.5,
            look_height: 1.0,
            position_smoothing: 0.08,
            look_smoothing: 0.15,
        }
    }
}

/// Smoothed camera pose, recomputed every frame from the character.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Smoothed camera position
    pub position: Vec3,
    /// Smoothed look-at point
    pub look_at: Vec3,
}

impl CameraState {
    /// Create already snapped to the target pose for the given
    /// character, so the first frames don't sweep in from the origin.
    pub fn snapped_to(character_position: Vec3, heading: f32, config: &CameraConfig) -> Self {
        Self {
            position: target_position(character_position, heading, config),
            look_at: target_look(character_position, config),
        }
    }

    /// Advance one frame of smoothing toward the character's pose.
    pub fn follow(&mut self, character_position: Vec3, heading: f32, config: &CameraConfig) {
        let pos_target = target_position(character_position, heading, config);
        let look_target = target_look(character_position, config);

        self.position = self.position.lerp(pos_target, config.position_smoothing);
        self.look_at = self.look_at.lerp(look_target, config.look_smoothing);
    }
}

fn target_position(character_position: Vec3, heading: f32, config: &CameraConfig) -> Vec3 {
    let forward = Vec3::new(heading.sin(), 0.0, heading.cos());
    character_position - forward * config.follow_distance + Vec3::UP * config.follow_height
}

fn target_look(character_position: Vec3, config: &CameraConfig) -> Vec3 {
    character_position + Vec3::UP * config.look_height
}

// =============================================================================
// TESTS
// =============================================================================
