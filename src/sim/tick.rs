//! Frame Orchestration
//!
//! One call to [`tick`] per rendered frame, running every component in
//! a fixed order: input snapshot → movement integration → access gate
//! → collision resolution → commit → collectible tracking → camera
//! smoothing. The tick is synchronous, never suspends, and never
//! fails; the shared tier level is read exactly once at the top.

use crate::core::vec3::Vec3;
use crate::sim::camera::CameraConfig;
use crate::sim::collectible::collect_in_range;
use crate::sim::collision::{movement_blocked, CollisionSurface};
use crate::sim::events::FrameEvent;
use crate::sim::input::InputSnapshot;
use crate::sim::movement::{clamp_frame_dt, integrate};
use crate::sim::state::WorldState;
use crate::sim::zones::{SignalChange, ZoneId};
use crate::WORLD_HALF_EXTENT;

/// Fixed simulation constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Base linear speed, units per second
    pub move_speed: f32,
    /// Backward speed as a fraction of base speed
    pub backward_factor: f32,
    /// Angular speed, radians per second
    pub turn_rate: f32,
    /// Resting height of the character's vertical pose
    pub base_height: f32,
    /// Amplitude of the walk bob
    pub bob_amplitude: f32,
    /// Walk-bob phase advance, radians per second
    pub bob_rate: f32,
    /// Amplitude of the idle hover
    pub idle_amplitude: f32,
    /// Idle hover frequency, radians per second of session time
    pub idle_rate: f32,
    /// Half extent of the square play area
    pub world_half_extent: f32,
    /// Collectible pickup radius (horizontal)
    pub pickup_radius: f32,
    /// Collision probe reach
    pub probe_range: f32,
    /// Probe origin height above the candidate's feet
    pub probe_height: f32,
    /// Minimum travel/probe alignment for a probe to veto
    pub probe_dot_threshold: f32,
    /// Camera constants
    pub camera: CameraConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            backward_factor: 0.6,
            turn_rate: 2.0,
            base_height: 0.0,
            bob_amplitude: 0.25,
            bob_rate: 10.0,
            idle_amplitude: 0.05,
            idle_rate: 2.0,
            world_half_extent: WORLD_HALF_EXTENT,
            pickup_radius: 1.5,
            probe_range: 0.6,
            probe_height: 0.5,
            probe_dot_threshold: 0.5,
            camera: CameraConfig::default(),
        }
    }
}

/// Everything the rendering collaborator needs from one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    /// Committed character position
    pub position: Vec3,
    /// Committed heading in radians
    pub heading: f32,
    /// Smoothed camera position
    pub camera_position: Vec3,
    /// Smoothed camera look-at point
    pub camera_look_at: Vec3,
    /// Events generated this frame, in generation order
    pub events: Vec<FrameEvent>,
    /// Zone currently blocking movement, if any
    pub blocked_zone: Option<ZoneId>,
}

/// Run one simulation frame.
///
/// `raw_dt` is the elapsed frame time in seconds, straight from the
/// frame loop; it is clamped here. `surface` may be `None` during an
/// asynchronous load window, in which case collision trivially passes.
pub fn tick(
    state: &mut WorldState,
    input: InputSnapshot,
    raw_dt: f32,
    surface: Option<&dyn CollisionSurface>,
    config: &SimConfig,
) -> FrameOutput {
    let dt = clamp_frame_dt(raw_dt);
    state.frame += 1;
    state.session_time += dt;

    // One atomic snapshot of the tier per frame; the feed may rewrite
    // the cell at any moment between frames.
    let observed = state.tier.level();
    if observed > state.last_tier {
        let event = FrameEvent::tier_raised(state.frame, state.last_tier, observed);
        state.push_event(event);
        state.last_tier = observed;
    }
    let tier = state.last_tier;

    // Propose a candidate pose. Heading always commits, even when the
    // position is rejected below.
    let candidate = integrate(&state.character, input, dt, state.session_time, config);
    let previous_position = state.character.position;
    state.character.heading = candidate.heading;

    let blocking = state
        .zones
        .blocking_zone(candidate.position, tier)
        .map(|zone| (zone.id, zone.required_tier));

    match blocking {
        Some((zone_id, required_tier)) => {
            // Full rejection: not even partial motion toward the edge.
            if let SignalChange::Raised(id) = state.blocked.update(Some(zone_id)) {
                let event = FrameEvent::zone_blocked(state.frame, id, required_tier, tier);
                state.push_event(event);
            }
        }
        None => {
            if let SignalChange::Cleared(id) = state.blocked.update(None) {
                let event = FrameEvent::zone_unblocked(state.frame, id);
                state.push_event(event);
            }

            let travel = candidate.position - previous_position;
            if !movement_blocked(surface, candidate.position, travel, config) {
                state.character.position = candidate.position;
                // Bob phase pauses when the position doesn't commit.
                state.character.walk_phase = candidate.walk_phase;
            }
        }
    }

    // Pickups run against the committed position only.
    collect_in_range(
        &mut state.collectibles,
        state.character.position,
        config.pickup_radius,
        state.frame,
        &mut state.pending_events,
    );

    state
        .camera
        .follow(state.character.position, state.character.heading, &config.camera);

    FrameOutput {
        position: state.character.position,
        heading: state.character.heading,
        camera_position: state.camera.position,
        camera_look_at: state.camera.look_at,
        events: state.take_events(),
        blocked_zone: state.blocked.current(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collectible::{Collectible, CollectibleId};
    use crate::sim::collision::{Aabb, StaticGeometry};
    use crate::sim::events::FrameEventData;
    use crate::sim::layout::WorldLayout;
    use crate::sim::zones::{Zone, ZoneBounds};
    use crate::tier::TierCell;

    const DT: f32 = 1.0 / 60.0;

    fn flat_config() -> SimConfig {
        SimConfig {
            bob_amplitude: 0.0,
            idle_amplitude: 0.0,
            ..SimConfig::default()
        }
    }

    fn empty_layout(spawn: Vec3, heading: f32) -> WorldLayout {
        WorldLayout {
            spawn_position: spawn,
            spawn_heading: heading,
            zones: Vec::new(),
            collectibles: Vec::new(),
            walls: Vec::new(),
        }
    }

    fn gated_zone() -> Zone {
        Zone {
            id: ZoneId(7),
            required_tier: 2,
            bounds: ZoneBounds { min_x: 25.0, max_x: 50.0, min_z: -20.0, max_z: 15.0 },
        }
    }

    const FORWARD: InputSnapshot = InputSnapshot {
        forward: true,
        turn_left: false,
        turn_right: false,
        backward: false,
    };

    #[test]
    fn test_free_movement_commits_candidate() {
        let config = flat_config();
        let layout = empty_layout(Vec3::ZERO, 0.0);
        let mut state = WorldState::new(&layout, TierCell::new(0), &[], &config);

        for _ in 0..60 {
            tick(&mut state, FORWARD, DT, None, &config);
        }

        // One second of forward travel along +Z at base speed
        assert!((state.character.position.z - config.move_speed).abs() < 1e-3);
        assert!(state.character.position.x.abs() < 1e-4);
    }

    #[test]
    fn test_gate_rejects_whole_move_and_signals_once() {
        let config = flat_config();
        // Facing +X, one step away from the tier-2 zone edge
        let mut layout = empty_layout(Vec3::new(24.95, 0.0, 0.0), std::f32::consts::FRAC_PI_2);
        layout.zones.push(gated_zone());
        let mut state = WorldState::new(&layout, TierCell::new(1), &[], &config);

        let mut blocked_events = 0;
        for _ in 0..30 {
            let out = tick(&mut state, FORWARD, DT, None, &config);
            assert_eq!(out.blocked_zone, Some(ZoneId(7)));
            for event in out.events {
                if let FrameEventData::ZoneBlocked { zone, required_tier, current_tier } = event.data {
                    blocked_events += 1;
                    assert_eq!(zone, ZoneId(7));
                    assert_eq!(required_tier, 2);
                    assert_eq!(current_tier, 1);
                }
            }
        }

        // Position never advanced, signal fired exactly once
        assert_eq!(state.character.position.x, 24.95);
        assert_eq!(blocked_events, 1);
    }

    #[test]
    fn test_tier_raise_unblocks_without_restart() {
        let config = flat_config();
        let mut layout = empty_layout(Vec3::new(24.95, 0.0, 0.0), std::f32::consts::FRAC_PI_2);
        layout.zones.push(gated_zone());

        let cell = TierCell::new(1);
        let mut state = WorldState::new(&layout, cell.clone(), &[], &config);

        // Walk into the gate
        for _ in 0..10 {
            tick(&mut state, FORWARD, DT, None, &config);
        }
        assert_eq!(state.blocked_zone(), Some(ZoneId(7)));

        // Market cap crosses the next threshold mid-session
        cell.raise(2);

        let out = tick(&mut state, FORWARD, DT, None, &config);
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e.data, FrameEventData::TierRaised { old: 1, new: 2 })));
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e.data, FrameEventData::ZoneUnblocked { zone: ZoneId(7) })));
        assert_eq!(out.blocked_zone, None);
        assert!(state.character.position.x > 24.95);
    }

    #[test]
    fn test_collision_veto_keeps_position_but_heading_turns() {
        let config = flat_config();
        let layout = empty_layout(Vec3::ZERO, 0.0);
        let mut state = WorldState::new(&layout, TierCell::new(0), &[], &config);

        // Wall immediately ahead on +Z
        let geometry = StaticGeometry::new(vec![Aabb::new(
            Vec3::new(-5.0, 0.0, 0.3),
            Vec3::new(5.0, 3.0, 1.0),
        )]);

        let input = InputSnapshot { turn_left: true, ..FORWARD };
        let heading_before = state.character.heading;

        let out = tick(&mut state, input, DT, Some(&geometry), &config);
        assert_eq!(out.position, Vec3::new(0.0, 0.0, 0.0));
        assert!(out.heading > heading_before);
        // Collision is not a zone block
        assert_eq!(out.blocked_zone, None);
    }

    #[test]
    fn test_pickup_happens_on_committed_position() {
        let config = flat_config();
        let mut layout = empty_layout(Vec3::ZERO, 0.0);
        layout
            .collectibles
            .push(Collectible::new(CollectibleId(1), Vec3::new(0.0, 0.0, 1.0)));
        let mut state = WorldState::new(&layout, TierCell::new(0), &[], &config);

        let mut picked = Vec::new();
        for _ in 0..60 {
            let out = tick(&mut state, FORWARD, DT, None, &config);
            picked.extend(out.events.into_iter().filter(|e| {
                matches!(e.data, FrameEventData::CollectiblePicked { .. })
            }));
        }

        assert_eq!(picked.len(), 1);
        assert_eq!(state.collected_count(), 1);
    }

    #[test]
    fn test_pathological_dt_moves_at_most_one_clamped_step() {
        let config = flat_config();
        let layout = empty_layout(Vec3::ZERO, 0.0);
        let mut state = WorldState::new(&layout, TierCell::new(0), &[], &config);

        // A paused-tab resume hands the loop an enormous dt
        tick(&mut state, FORWARD, 3600.0, None, &config);
        let max_step = config.move_speed * crate::MAX_FRAME_DT;
        assert!(state.character.position.z <= max_step + 1e-5);

        // Zero and negative dt leave the position alone
        let before = state.character.position;
        tick(&mut state, FORWARD, 0.0, None, &config);
        tick(&mut state, FORWARD, -1.0, None, &config);
        assert_eq!(state.character.position, before);
    }

    #[test]
    fn test_world_bound_holds_without_geometry() {
        let config = flat_config();
        let spawn = Vec3::new(0.0, 0.0, config.world_half_extent - 0.1);
        let layout = empty_layout(spawn, 0.0);
        let mut state = WorldState::new(&layout, TierCell::new(0), &[], &config);

        for _ in 0..120 {
            tick(&mut state, FORWARD, DT, None, &config);
        }
        assert!(state.character.position.z <= config.world_half_extent);
    }

    #[test]
    fn test_camera_trails_the_character() {
        let config = flat_config();
        let layout = empty_layout(Vec3::ZERO, 0.0);
        let mut state = WorldState::new(&layout, TierCell::new(0), &[], &config);

        let mut last = tick(&mut state, FORWARD, DT, None, &config);
        for _ in 0..120 {
            last = tick(&mut state, FORWARD, DT, None, &config);
        }

        // Camera stays behind the character on the -Z side while the
        // look-at tracks near the character itself.
        assert!(last.camera_position.z < last.position.z);
        assert!((last.camera_look_at.z - last.position.z).abs() < 1.0);
    }

    #[test]
    fn test_idle_frames_emit_no_events() {
        let config = flat_config();
        let layout = empty_layout(Vec3::ZERO, 0.0);
        let mut state = WorldState::new(&layout, TierCell::new(0), &[], &config);

        for _ in 0..30 {
            let out = tick(&mut state, InputSnapshot::IDLE, DT, None, &config);
            assert!(out.events.is_empty());
            assert_eq!(out.position, Vec3::ZERO);
        }
    }
}
