//! Frame Events
//!
//! Typed events returned from each tick instead of inline callbacks,
//! so the core stays testable without a rendering harness. The
//! persistence collaborator serializes `CollectiblePicked` events;
//! the UI collaborator drives notifications from the zone events.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::sim::collectible::CollectibleId;
use crate::sim::zones::ZoneId;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FrameEventData {
    /// A collectible transitioned to collected this frame.
    CollectiblePicked {
        /// Which collectible
        id: CollectibleId,
        /// Where it sat in the world
        position: Vec3,
    },

    /// Movement became blocked by a tier-gated zone.
    ZoneBlocked {
        /// The blocking zone
        zone: ZoneId,
        /// Tier the zone demands
        required_tier: u8,
        /// Tier the session currently holds
        current_tier: u8,
    },

    /// A previously raised zone block ended.
    ZoneUnblocked {
        /// The zone that had been blocking
        zone: ZoneId,
    },

    /// The simulation observed a higher tier level this frame.
    TierRaised {
        /// Level before
        old: u8,
        /// Level now
        new: u8,
    },
}

/// An event with the frame it occurred on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Frame counter value when the event fired
    pub frame: u64,
    /// Event payload
    pub data: FrameEventData,
}

impl FrameEvent {
    /// Create a collectible pickup event.
    pub fn collectible_picked(frame: u64, id: CollectibleId, position: Vec3) -> Self {
        Self {
            frame,
            data: FrameEventData::CollectiblePicked { id, position },
        }
    }

    /// Create a zone-blocked event.
    pub fn zone_blocked(frame: u64, zone: ZoneId, required_tier: u8, current_tier: u8) -> Self {
        Self {
            frame,
            data: FrameEventData::ZoneBlocked {
                zone,
                required_tier,
                current_tier,
            },
        }
    }

    /// Create a zone-unblocked event.
    pub fn zone_unblocked(frame: u64, zone: ZoneId) -> Self {
        Self {
            frame,
            data: FrameEventData::ZoneUnblocked { zone },
        }
    }

    /// Create a tier-raised event.
    pub fn tier_raised(frame: u64, old: u8, new: u8) -> Self {
        Self {
            frame,
            data: FrameEventData::TierRaised { old, new },
        }
    }
}
