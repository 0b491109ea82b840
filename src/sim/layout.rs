//! World Layout
//!
//! The static content of a world: spawn pose, tier-gated zones,
//! collectibles, and wall geometry. Loadable from JSON so the world
//! can ship as data; [`default_layout`] provides the built-in world
//! used by the demo and tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::vec3::Vec3;
use crate::sim::collectible::{Collectible, CollectibleId};
use crate::sim::collision::{Aabb, StaticGeometry};
use crate::sim::zones::{Zone, ZoneBounds, ZoneId};

/// Errors from loading a world layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The JSON itself did not parse.
    #[error("layout is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two zones share an id.
    #[error("duplicate zone id {0}")]
    DuplicateZone(u16),

    /// Two collectibles share an id.
    #[error("duplicate collectible id {0}")]
    DuplicateCollectible(u32),

    /// A zone's bounds are inverted.
    #[error("zone {0} has inverted bounds")]
    InvertedBounds(u16),
}

/// Static world content, immutable once loaded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldLayout {
    /// Where the character starts (Y is ignored; base height rules)
    pub spawn_position: Vec3,
    /// Initial heading in radians
    #[serde(default)]
    pub spawn_heading: f32,
    /// Tier-gated zones in gate-priority order
    pub zones: Vec<Zone>,
    /// Collectible placements
    pub collectibles: Vec<Collectible>,
    /// Wall boxes for the built-in collision geometry
    #[serde(default)]
    pub walls: Vec<Aabb>,
}

impl WorldLayout {
    /// Parse and validate a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: WorldLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let mut zone_ids = std::collections::BTreeSet::new();
        for zone in &self.zones {
            if !zone_ids.insert(zone.id) {
                return Err(LayoutError::DuplicateZone(zone.id.0));
            }
            let b = &zone.bounds;
            if b.min_x > b.max_x || b.min_z > b.max_z {
                return Err(LayoutError::InvertedBounds(zone.id.0));
            }
        }

        let mut item_ids = std::collections::BTreeSet::new();
        for item in &self.collectibles {
            if !item_ids.insert(item.id) {
                return Err(LayoutError::DuplicateCollectible(item.id.0));
            }
        }
        Ok(())
    }

    /// Build the collision surface from the layout's wall boxes.
    pub fn geometry(&self) -> StaticGeometry {
        StaticGeometry::new(self.walls.clone())
    }
}

/// The built-in world: an open starting meadow, a tier-1 terrace, a
/// tier-2 vault, a scatter of collectibles, and a few walls.
pub fn default_layout() -> WorldLayout {
    let zones = vec![
        Zone {
            id: ZoneId(1),
            required_tier: 1,
            bounds: ZoneBounds { min_x: -60.0, max_x: -25.0, min_z: -15.0, max_z: 30.0 },
        },
        Zone {
            id: ZoneId(2),
            required_tier: 2,
            bounds: ZoneBounds { min_x: 25.0, max_x: 50.0, min_z: -20.0, max_z: 15.0 },
        },
        Zone {
            id: ZoneId(3),
            required_tier: 3,
            bounds: ZoneBounds { min_x: -30.0, max_x: 30.0, min_z: 55.0, max_z: 95.0 },
        },
    ];

    let collectibles = vec![
        Collectible::new(CollectibleId(1), Vec3::new(4.0, 0.0, 8.0)),
        Collectible::new(CollectibleId(2), Vec3::new(-10.0, 0.0, -6.0)),
        Collectible::new(CollectibleId(3), Vec3::new(-40.0, 0.0, 10.0)),
        Collectible::new(CollectibleId(4), Vec3::new(35.0, 0.0, 0.0)),
        Collectible::new(CollectibleId(5), Vec3::new(0.0, 0.0, 75.0)),
    ];

    let walls = vec![
        // Ruin wall near spawn
        Aabb::new(Vec3::new(8.0, 0.0, -14.0), Vec3::new(9.0, 3.0, -2.0)),
        // Terrace retaining wall with a gap at z in (6, 12)
        Aabb::new(Vec3::new(-24.0, 0.0, -15.0), Vec3::new(-23.0, 3.0, 6.0)),
        Aabb::new(Vec3::new(-24.0, 0.0, 12.0), Vec3::new(-23.0, 3.0, 30.0)),
    ];

    WorldLayout {
        spawn_position: Vec3::new(0.0, 0.0, 0.0),
        spawn_heading: 0.0,
        zones,
        collectibles,
        walls,
    }
}

// =============================================================================
// TESTS
// =============================================================================
