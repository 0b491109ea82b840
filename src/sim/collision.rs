//! Collision Probing
//!
//! Cheap directional wall blocking against opaque static geometry.
//! Four short cardinal probes stand in for a swept-volume test: a probe
//! only vetoes when it hits within range AND points roughly where the
//! character is actually traveling this frame. Veto means the position
//! simply does not update - no sliding, no partial movement. Glancing
//! contact parallel to a wall passes through.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::sim::tick::SimConfig;

/// Queryable static collision geometry.
///
/// Probes are read-only and side-effect-free; the resolver may call
/// them any number of times per frame. The surface arrives from the
/// world-loading collaborator once meshes are ready - until then the
/// simulation runs with no surface and collision checks trivially pass.
pub trait CollisionSurface {
    /// Distance to the nearest intersection along `dir` within
    /// `max_range`, or `None` if the ray is clear.
    fn probe(&self, origin: Vec3, dir: Vec3, max_range: f32) -> Option<f32>;
}

/// The four cardinal horizontal probe directions.
pub const PROBE_DIRECTIONS: [Vec3; 4] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

/// Decide whether this frame's movement is blocked by geometry.
///
/// `travel` is the proposed displacement (candidate minus previous
/// position); only its horizontal direction matters. Probes originate
/// slightly above the candidate's feet. With no surface or no actual
/// travel there is nothing to block.
pub fn movement_blocked(
    surface: Option<&dyn CollisionSurface>,
    candidate: Vec3,
    travel: Vec3,
    config: &SimConfig,
) -> bool {
    let Some(surface) = surface else {
        return false;
    };

    let travel_dir = travel.horizontal().normalize();
    if travel_dir == Vec3::ZERO {
        return false;
    }

    let origin = candidate + Vec3::UP * config.probe_height;
    PROBE_DIRECTIONS.iter().any(|&dir| {
        travel_dir.dot(dir) > config.probe_dot_threshold
            && surface.probe(origin, dir, config.probe_range).is_some()
    })
}

// =============================================================================
// STATIC AABB GEOMETRY
// =============================================================================

/// An axis-aligned box obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Build from two opposite corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Slab test: entry distance of the ray into this box, if it hits
    /// within `max_range`. An origin inside the box hits at 0.
    fn ray_entry(&self, origin: Vec3, dir: Vec3, max_range: f32) -> Option<f32> {
        let mut t_min: f32 = 0.0;
        let mut t_max = max_range;

        for axis in 0..3 {
            let (o, d, lo, hi) = match axis {
                0 => (origin.x, dir.x, self.min.x, self.max.x),
                1 => (origin.y, dir.y, self.min.y, self.max.y),
                _ => (origin.z, dir.z, self.min.z, self.max.z),
            };

            if d.abs() < f32::EPSILON {
                // Ray parallel to this slab: must already be inside it.
                if o < lo || o > hi {
                    return None;
                }
            } else {
                let inv = 1.0 / d;
                let (t0, t1) = if inv >= 0.0 {
                    ((lo - o) * inv, (hi - o) * inv)
                } else {
                    ((hi - o) * inv, (lo - o) * inv)
                };
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return None;
                }
            }
        }

        Some(t_min)
    }
}

/// Collision surface backed by a list of axis-aligned boxes.
///
/// Stands in for the loaded scene mesh in tests and the demo; a real
/// client would adapt its mesh acceleration structure to
/// [`CollisionSurface`] instead.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StaticGeometry {
    boxes: Vec<Aabb>,
}

impl StaticGeometry {
    /// Build from a box list.
    pub fn new(boxes: Vec<Aabb>) -> Self {
        Self { boxes }
    }

    /// The obstacle boxes.
    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }
}

impl CollisionSurface for StaticGeometry {
    fn probe(&self, origin: Vec3, dir: Vec3, max_range: f32) -> Option<f32> {
        self.boxes
            .iter()
            .filter_map(|b| b.ray_entry(origin, dir, max_range))
            .min_by(|a, b| a.total_cmp(b))
    }
}

// =============================================================================
// TESTS
// =============================================================================
