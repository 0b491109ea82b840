//! Zone Registry and Access Gate
//!
//! Static tier-gated regions of the horizontal plane. The registry is
//! immutable after load; gate decisions are pure functions of the
//! candidate position, the current tier, and the registry.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;

/// Identifier of a zone, unique within a layout.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ZoneId(pub u16);

/// Axis-aligned bounds of a zone in the horizontal plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneBounds {
    /// Minimum X
    pub min_x: f32,
    /// Maximum X
    pub max_x: f32,
    /// Minimum Z
    pub min_z: f32,
    /// Maximum Z
    pub max_z: f32,
}

impl ZoneBounds {
    /// Point containment test (inclusive edges).
    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

/// A tier-gated region. Required tier is fixed at load time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier
    pub id: ZoneId,
    /// Minimum tier level needed to enter
    pub required_tier: u8,
    /// Horizontal bounds
    pub bounds: ZoneBounds,
}

/// Ordered set of zones. Zones may overlap; lookups return the first
/// zone in registry order that contains the point.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Build a registry from an ordered zone list.
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// All zones in registry order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// First zone containing the horizontal point, or none.
    pub fn zone_at(&self, position: Vec3) -> Option<&Zone> {
        self.zones
            .iter()
            .find(|zone| zone.bounds.contains(position.x, position.z))
    }

    /// The zone that blocks a candidate position at the given tier.
    ///
    /// A position outside every zone is unrestricted. A contained
    /// position blocks only when the containing zone's requirement
    /// exceeds the current tier; rejection is all-or-nothing, the
    /// caller must not move the character partially toward the edge.
    pub fn blocking_zone(&self, candidate: Vec3, current_tier: u8) -> Option<&Zone> {
        self.zone_at(candidate)
            .filter(|zone| zone.required_tier > current_tier)
    }
}

/// Current blocked-zone state, edge-triggered.
///
/// `ZoneBlocked` must fire exactly once per transition into a blocked
/// state and `ZoneUnblocked` once when it ends; re-raising every frame
/// while stuck against a locked zone would spam the notification
/// collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockedZoneSignal {
    current: Option<ZoneId>,
}

/// What changed about the blocked-zone state this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalChange {
    /// No transition
    Unchanged,
    /// Entered a blocked state (or the blocking zone changed)
    Raised(ZoneId),
    /// Left the blocked state
    Cleared(ZoneId),
}

impl BlockedZoneSignal {
    /// Create in the unblocked state.
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Zone currently blocking movement, if any.
    #[inline]
    pub fn current(&self) -> Option<ZoneId> {
        self.current
    }

    /// Feed this frame's blocking zone and get the transition, if any.
    pub fn update(&mut self, blocking: Option<ZoneId>) -> SignalChange {
        match (self.current, blocking) {
            (None, Some(id)) => {
                self.current = Some(id);
                SignalChange::Raised(id)
            }
            (Some(old), Some(id)) if old != id => {
                self.current = Some(id);
                SignalChange::Raised(id)
            }
            (Some(old), None) => {
                self.current = None;
                SignalChange::Cleared(old)
            }
            _ => SignalChange::Unchanged,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(id: u16, tier: u8, min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Zone {
        Zone {
            id: ZoneId(id),
            required_tier: tier,
            bounds: ZoneBounds { min_x, max_x, min_z, max_z },
        }
    }

    #[test]
    fn test_zone_lookup_first_match_wins() {
        let registry = ZoneRegistry::new(vec![
            zone(1, 1, 0.0, 10.0, 0.0, 10.0),
            zone(2, 3, 5.0, 15.0, 5.0, 15.0),
        ]);

        // Overlap region: first zone in order wins
        let hit = registry.zone_at(Vec3::new(7.0, 0.0, 7.0)).unwrap();
        assert_eq!(hit.id, ZoneId(1));

        // Only the second zone covers this point
        let hit = registry.zone_at(Vec3::new(12.0, 0.0, 12.0)).unwrap();
        assert_eq!(hit.id, ZoneId(2));

        assert!(registry.zone_at(Vec3::new(-5.0, 0.0, -5.0)).is_none());
    }

    #[test]
    fn test_gate_blocks_below_required_tier() {
        // Zone {25..50, -20..15} requiring tier 2, current tier 1
        let registry = ZoneRegistry::new(vec![zone(7, 2, 25.0, 50.0, -20.0, 15.0)]);

        let candidate = Vec3::new(30.0, 0.0, 0.0);
        let blocking = registry.blocking_zone(candidate, 1).unwrap();
        assert_eq!(blocking.id, ZoneId(7));

        // Tier 2 passes
        assert!(registry.blocking_zone(candidate, 2).is_none());

        // Position outside every zone is unrestricted at any tier
        assert!(registry.blocking_zone(Vec3::new(0.0, 0.0, 0.0), 0).is_none());
    }

    #[test]
    fn test_gate_is_pure() {
        let registry = ZoneRegistry::new(vec![zone(1, 4, -10.0, 10.0, -10.0, 10.0)]);
        let candidate = Vec3::new(1.0, 0.0, 1.0);

        for _ in 0..3 {
            assert_eq!(
                registry.blocking_zone(candidate, 1).map(|z| z.id),
                Some(ZoneId(1))
            );
        }
    }

    #[test]
    fn test_signal_raises_once_per_transition() {
        let mut signal = BlockedZoneSignal::new();

        assert_eq!(signal.update(Some(ZoneId(3))), SignalChange::Raised(ZoneId(3)));
        // Still blocked by the same zone: no re-raise
        assert_eq!(signal.update(Some(ZoneId(3))), SignalChange::Unchanged);
        assert_eq!(signal.current(), Some(ZoneId(3)));

        assert_eq!(signal.update(None), SignalChange::Cleared(ZoneId(3)));
        assert_eq!(signal.update(None), SignalChange::Unchanged);
        assert_eq!(signal.current(), None);
    }

    #[test]
    fn test_signal_reraises_on_zone_change() {
        let mut signal = BlockedZoneSignal::new();
        signal.update(Some(ZoneId(1)));
        assert_eq!(signal.update(Some(ZoneId(2))), SignalChange::Raised(ZoneId(2)));
    }
}
