//! World Simulation State
//!
//! The single context object owning all per-session mutable state.
//! Nothing here is process-global: the tick mutates exactly one
//! `WorldState`, and the only value shared with another thread is the
//! tier cell it reads once per frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::sim::camera::CameraState;
use crate::sim::collectible::{Collectible, CollectibleId};
use crate::sim::events::FrameEvent;
use crate::sim::layout::WorldLayout;
use crate::sim::tick::SimConfig;
use crate::sim::zones::{BlockedZoneSignal, ZoneId, ZoneRegistry};
use crate::tier::TierCell;

/// Pose of the player character.
///
/// Owned exclusively by the simulation loop and mutated once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    /// World position (X/Z horizontal, Y vertical)
    pub position: Vec3,
    /// Heading in radians; 0 faces +Z, increasing turns left
    pub heading: f32,
    /// Phase of the walk bob, reset to zero while idle
    pub walk_phase: f32,
}

/// Complete per-session simulation state.
#[derive(Debug)]
pub struct WorldState {
    /// Frames simulated so far
    pub frame: u64,
    /// Accumulated clamped frame time, in seconds
    pub session_time: f32,
    /// The player character pose
    pub character: CharacterState,
    /// The trailing camera pose
    pub camera: CameraState,
    /// Tier-gated regions, immutable after load
    pub zones: ZoneRegistry,
    /// All collectibles, keyed by id for stable iteration order
    pub collectibles: BTreeMap<CollectibleId, Collectible>,

    /// Shared tier level, written by the tier controller thread
    pub(crate) tier: TierCell,
    /// Tier level observed by the most recent frame
    pub(crate) last_tier: u8,
    /// Edge-triggered blocked-zone state
    pub(crate) blocked: BlockedZoneSignal,
    /// Events generated this frame (drained into FrameOutput)
    pub(crate) pending_events: Vec<FrameEvent>,
}

impl WorldState {
    /// Build a session from a layout.
    ///
    /// `already_collected` is the persistence collaborator's record of
    /// prior sessions; those collectibles start in the collected state
    /// and never emit pickup events again.
    pub fn new(
        layout: &WorldLayout,
        tier: TierCell,
        already_collected: &[CollectibleId],
        config: &SimConfig,
    ) -> Self {
        let mut collectibles: BTreeMap<CollectibleId, Collectible> = layout
            .collectibles
            .iter()
            .map(|item| (item.id, *item))
            .collect();
        for id in already_collected {
            if let Some(item) = collectibles.get_mut(id) {
                item.collected = true;
            }
        }

        let character = CharacterState {
            position: Vec3::new(
                layout.spawn_position.x,
                config.base_height,
                layout.spawn_position.z,
            ),
            heading: layout.spawn_heading,
            walk_phase: 0.0,
        };

        let last_tier = tier.level();
        Self {
            frame: 0,
            session_time: 0.0,
            camera: CameraState::snapped_to(character.position, character.heading, &config.camera),
            character,
            zones: ZoneRegistry::new(layout.zones.clone()),
            collectibles,
            tier,
            last_tier,
            blocked: BlockedZoneSignal::new(),
            pending_events: Vec::new(),
        }
    }

    /// Zone currently blocking movement, if any.
    #[inline]
    pub fn blocked_zone(&self) -> Option<ZoneId> {
        self.blocked.current()
    }

    /// Tier level as of the most recent frame's atomic snapshot.
    #[inline]
    pub fn current_tier(&self) -> u8 {
        self.last_tier
    }

    /// Number of collectibles picked up so far (any session).
    pub fn collected_count(&self) -> usize {
        self.collectibles.values().filter(|c| c.collected).count()
    }

    /// Push a frame event.
    pub(crate) fn push_event(&mut self, event: FrameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub(crate) fn take_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
