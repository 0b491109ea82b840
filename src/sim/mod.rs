//! Per-Frame Simulation
//!
//! All synchronous frame-loop code. Executed in a fixed order by
//! [`tick::tick`] once per rendered frame.
//!
//! ## Module Structure
//!
//! - `input`: held-intent aggregation and per-tick snapshots
//! - `movement`: candidate pose integration
//! - `zones`: tier-gated zone registry and access gate
//! - `collision`: probe-based wall blocking
//! - `collectible`: proximity pickups
//! - `camera`: trailing camera smoothing
//! - `events`: typed frame events for external collaborators
//! - `state`: the world simulation context
//! - `layout`: loadable world layout (zones, collectibles, walls)
//! - `tick`: frame orchestration

pub mod camera;
pub mod collectible;
pub mod collision;
pub mod events;
pub mod input;
pub mod layout;
pub mod movement;
pub mod state;
pub mod tick;
pub mod zones;

// Re-export key types
pub use collision::{CollisionSurface, StaticGeometry};
pub use events::{FrameEvent, FrameEventData};
pub use input::{InputSnapshot, InputState};
pub use layout::WorldLayout;
pub use state::{CharacterState, WorldState};
pub use tick::{tick, FrameOutput, SimConfig};
pub use zones::{Zone, ZoneId, ZoneRegistry};
