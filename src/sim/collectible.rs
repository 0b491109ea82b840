//! Collectible Tracking
//!
//! Proximity pickups over the committed character position. Collection
//! is one-way within a session: the flag flips false to true exactly
//! once, and re-walking over a collected spot is a no-op. The initial
//! collected set comes from the persistence collaborator at startup;
//! pickup events flow back out for it to store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::sim::events::FrameEvent;

/// Identifier of a collectible, unique within a layout.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CollectibleId(pub u32);

/// A one-time pickup at a fixed position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Collectible identifier
    pub id: CollectibleId,
    /// Fixed world position
    pub position: Vec3,
    /// Whether this session (or a previous one) already collected it
    #[serde(default)]
    pub collected: bool,
}

impl Collectible {
    /// Create an uncollected collectible.
    pub fn new(id: CollectibleId, position: Vec3) -> Self {
        Self {
            id,
            position,
            collected: false,
        }
    }
}

/// Collect everything within pickup range of the committed position.
///
/// Must run after the frame's position is final (post gate and
/// collision). Horizontal distance only; collectibles sit at walkable
/// height. BTreeMap iteration keeps event order stable across runs.
/// Each pickup pushes one event; already-collected items are skipped
/// entirely, so calling this again in range produces nothing new.
pub fn collect_in_range(
    collectibles: &mut BTreeMap<CollectibleId, Collectible>,
    character_position: Vec3,
    pickup_radius: f32,
    frame: u64,
    events: &mut Vec<FrameEvent>,
) {
    let radius_sq = pickup_radius * pickup_radius;

    for item in collectibles.values_mut() {
        if item.collected {
            continue;
        }
        if character_position.horizontal_distance_squared(item.position) <= radius_sq {
            item.collected = true;
            events.push(FrameEvent::collectible_picked(frame, item.id, item.position));
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::FrameEventData;

    fn world_with(items: &[(u32, Vec3)]) -> BTreeMap<CollectibleId, Collectible> {
        items
            .iter()
            .map(|&(id, pos)| (CollectibleId(id), Collectible::new(CollectibleId(id), pos)))
            .collect()
    }

    #[test]
    fn test_pickup_within_radius() {
        let mut items = world_with(&[(1, Vec3::new(1.0, 0.0, 0.0)), (2, Vec3::new(50.0, 0.0, 0.0))]);
        let mut events = Vec::new();

        collect_in_range(&mut items, Vec3::ZERO, 1.5, 10, &mut events);

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].data,
            FrameEventData::CollectiblePicked { id: CollectibleId(1), .. }
        ));
        assert!(items[&CollectibleId(1)].collected);
        assert!(!items[&CollectibleId(2)].collected);
    }

    #[test]
    fn test_collection_is_idempotent() {
        let mut items = world_with(&[(1, Vec3::ZERO)]);
        let mut events = Vec::new();

        // Character parked on the collectible for several frames
        collect_in_range(&mut items, Vec3::ZERO, 1.5, 1, &mut events);
        collect_in_range(&mut items, Vec3::ZERO, 1.5, 2, &mut events);
        collect_in_range(&mut items, Vec3::ZERO, 1.5, 3, &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame, 1);
    }

    #[test]
    fn test_vertical_offset_does_not_matter() {
        let mut items = world_with(&[(1, Vec3::new(0.5, 8.0, 0.5))]);
        let mut events = Vec::new();

        collect_in_range(&mut items, Vec3::new(0.0, 0.0, 0.0), 1.5, 1, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_multiple_pickups_one_frame_in_id_order() {
        let mut items = world_with(&[
            (9, Vec3::new(0.2, 0.0, 0.0)),
            (3, Vec3::new(-0.2, 0.0, 0.0)),
        ]);
        let mut events = Vec::new();

        collect_in_range(&mut items, Vec3::ZERO, 1.5, 1, &mut events);

        assert_eq!(events.len(), 2);
        // BTreeMap order: id 3 before id 9
        assert!(matches!(
            events[0].data,
            FrameEventData::CollectiblePicked { id: CollectibleId(3), .. }
        ));
    }
}
