//! # Tiergate Simulation Core
//!
//! Real-time simulation for an explorable 3D scene whose accessible area
//! grows as a token market capitalization crosses thresholds.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TIERGATE SIM                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Math primitives                           │
//! │  └── vec3.rs     - f32 3D vector                             │
//! │                                                              │
//! │  sim/            - Per-frame simulation (synchronous)        │
//! │  ├── input.rs    - Held-intent aggregation                   │
//! │  ├── movement.rs - Candidate pose integration                │
//! │  ├── zones.rs    - Tier-gated zone registry + access gate    │
//! │  ├── collision.rs- Probe-based wall blocking                 │
//! │  ├── collectible.rs - Proximity pickups                      │
//! │  ├── camera.rs   - Trailing camera smoothing                 │
//! │  ├── events.rs   - Typed frame events                        │
//! │  ├── state.rs    - World simulation context                  │
//! │  ├── layout.rs   - Loadable world layout                     │
//! │  └── tick.rs     - Frame orchestration                       │
//! │                                                              │
//! │  tier/           - External tier boundary (async)            │
//! │  └── mod.rs      - Shared tier cell + polling controller     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame contract
//!
//! One call to [`sim::tick`] per rendered frame, in a fixed order:
//! input snapshot → movement integration → access gate → collision
//! resolution → commit → collectible tracking → camera smoothing.
//! The tick never blocks and never fails; pathological inputs (missing
//! collision surface, absurd frame times, out-of-range positions) are
//! normalized rather than surfaced as errors.
//!
//! The only concurrent activity is the tier feed in [`tier`], which
//! overwrites a single shared atomic level between frames.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod sim;
pub mod tier;

// Re-export commonly used types
pub use crate::core::vec3::Vec3;
pub use sim::events::{FrameEvent, FrameEventData};
pub use sim::input::{InputSnapshot, InputState};
pub use sim::state::{CharacterState, WorldState};
pub use sim::tick::{tick, FrameOutput, SimConfig};
pub use tier::{TierCell, TierSchedule};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal frame rate of the demo driver (Hz). The simulation itself is
/// variable-timestep; this only sizes the demo's dt.
pub const NOMINAL_FRAME_RATE: u32 = 60;

/// Half extent of the square play area. Committed positions never leave
/// ±this on either horizontal axis, geometry or not.
pub const WORLD_HALF_EXTENT: f32 = 100.0;

/// Upper bound applied to frame time before integration, in seconds.
/// Anything longer (a paused tab resuming, debugger stalls) is treated
/// as one step of this length to prevent tunneling.
pub const MAX_FRAME_DT: f32 = 0.1;
