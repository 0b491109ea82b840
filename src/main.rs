//! Tiergate Simulation Driver
//!
//! Runs a scripted demo session against the built-in world layout (or
//! a layout JSON given as the first argument), with a background feed
//! ramping the market cap so the tier gates open mid-walk.

use std::sync::Mutex;
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tiergate::{
    sim::layout::{default_layout, WorldLayout},
    sim::state::WorldState,
    sim::tick::{tick, SimConfig},
    tier::{run_tier_feed, FeedError, MarketCapSource, TierCell, TierSchedule},
    FrameEventData, InputSnapshot, NOMINAL_FRAME_RATE, VERSION,
};

/// A market-cap source that multiplies its value on every poll, so the
/// demo climbs through every tier threshold in a few seconds.
struct RampSource {
    value: Mutex<f64>,
}

impl MarketCapSource for RampSource {
    async fn fetch(&self) -> Result<f64, FeedError> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| FeedError::Unavailable("ramp source poisoned".into()))?;
        *value *= 1.8;
        Ok(*value)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Tiergate Simulation v{}", VERSION);
    info!("Frame Rate: {} Hz (accelerated for the demo)", NOMINAL_FRAME_RATE);

    let layout = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading layout from {}", path);
            WorldLayout::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => default_layout(),
    };

    demo_session(layout).await;
    Ok(())
}

/// Walk a scripted route: turn toward the tier-2 vault, push against
/// its gate until the feed raises the tier, then idle.
async fn demo_session(layout: WorldLayout) {
    info!("=== Starting Demo Session ===");
    info!(
        "Layout: {} zones, {} collectibles, {} walls",
        layout.zones.len(),
        layout.collectibles.len(),
        layout.walls.len()
    );

    let config = SimConfig::default();
    let geometry = layout.geometry();
    let cell = TierCell::new(0);
    let schedule = TierSchedule::new(vec![1_000_000.0, 5_000_000.0, 20_000_000.0]);

    let source = RampSource { value: Mutex::new(200_000.0) };
    let feed = tokio::spawn(run_tier_feed(
        source,
        schedule,
        cell.clone(),
        Duration::from_millis(250),
    ));

    let mut state = WorldState::new(&layout, cell, &[], &config);

    // (label, held inputs, frame count)
    let script: [(&str, InputSnapshot, u32); 3] = [
        (
            "turn toward the vault",
            InputSnapshot { turn_left: true, ..InputSnapshot::IDLE },
            47,
        ),
        (
            "walk east through the gate",
            InputSnapshot { forward: true, ..InputSnapshot::IDLE },
            900,
        ),
        ("idle", InputSnapshot::IDLE, 120),
    ];

    let dt = 1.0 / NOMINAL_FRAME_RATE as f32;
    let mut frame_pacer = tokio::time::interval(Duration::from_millis(4));
    let mut total_events = 0usize;

    for (label, input, frames) in script {
        info!("--- Phase: {} ---", label);
        for _ in 0..frames {
            frame_pacer.tick().await;
            let out = tick(&mut state, input, dt, Some(&geometry), &config);
            total_events += out.events.len();

            for event in out.events {
                match event.data {
                    FrameEventData::CollectiblePicked { id, position } => {
                        info!("Picked collectible {:?} at {}", id, position);
                    }
                    FrameEventData::ZoneBlocked { zone, required_tier, current_tier } => {
                        info!(
                            "Blocked by zone {:?} (needs tier {}, holding tier {})",
                            zone, required_tier, current_tier
                        );
                    }
                    FrameEventData::ZoneUnblocked { zone } => {
                        info!("Zone {:?} no longer blocks", zone);
                    }
                    FrameEventData::TierRaised { old, new } => {
                        info!("Tier raised: {} -> {}", old, new);
                    }
                }
            }
        }
        info!(
            "Frame {}: position {}, heading {:.2} rad, tier {}",
            state.frame,
            state.character.position,
            state.character.heading,
            state.current_tier()
        );
    }

    feed.abort();

    info!("=== Session Summary ===");
    info!("Frames simulated: {}", state.frame);
    info!("Collectibles picked: {}", state.collected_count());
    info!("Final tier: {}", state.current_tier());
    info!("Total events: {}", total_events);
}
