//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod lane;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collides, first_collision};
pub use difficulty::Difficulty;
pub use lane::{lane_center, nearest_lane_center};
pub use obstacle::ObstacleView;
pub use state::{
    GamePhase, GameState, HeldInput, Obstacle, Player, RoadStripe, RunState, SaveStatus, Track,
};
pub use tick::{GameEvent, TickInput, tick};
