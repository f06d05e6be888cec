//! Traffic Racer - A lane-based arcade traffic dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacles, player, collisions, difficulty)
//! - `session`: One player's run bound to the record store
//! - `app`: Menu <-> Race application state machine
//! - `renderer`: Draw-list scene building and vertex tessellation
//! - `platform`: Input keys and frame clock
//! - `persistence`: Accounts, run records and leaderboard storage
//! - `config`: Data-driven game balance

pub mod app;
pub mod config;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod ui;

pub use app::{App, Screen};
pub use config::SimConfig;
pub use error::{ConfigError, StoreError};
pub use session::Session;

/// Game configuration constants (defaults for `SimConfig`)
pub mod consts {
    /// Window dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Road bounds
    pub const ROAD_LEFT: f32 = 180.0;
    pub const ROAD_RIGHT: f32 = 620.0;
    pub const LANE_COUNT: u8 = 4;

    /// Player car
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_Y: f32 = 120.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    /// Lane assist pulls the player onto a lane center closer than this
    pub const LANE_SNAP_DISTANCE: f32 = 5.0;

    /// Traffic cars
    pub const ENEMY_SPEED_MIN: f32 = 3.0;
    pub const ENEMY_SPEED_MAX: f32 = 4.5;
    pub const ENEMY_WIDTH: f32 = 36.0;
    pub const ENEMY_HEIGHT: f32 = 65.0;
    pub const ENEMIES_PER_LANE: u8 = 2;
    /// Size of the traffic paint palette
    pub const ENEMY_COLOR_COUNT: u8 = 8;
    /// Cars below this y are recycled to the top
    pub const ENEMY_RESET_Y: f32 = -150.0;
    /// Extra gap (beyond car height) at which a car reacts to the one ahead
    pub const ENEMY_FOLLOW_GAP: f32 = 50.0;
    /// A following car slows to this fraction of the leader's speed
    pub const ENEMY_FOLLOW_FACTOR: f32 = 0.9;
    /// Per-frame chance of a sideways nudge while following
    pub const ENEMY_NUDGE_CHANCE: f64 = 0.02;
    pub const ENEMY_NUDGE_MAX: f32 = 10.0;

    /// Speeds are tuned as pixels per frame at 60 Hz
    pub const NOMINAL_FPS: f32 = 60.0;

    /// Road markings
    pub const ROAD_SPEED_BASE: f32 = PLAYER_SPEED;
    pub const ROAD_STRIPE_COUNT: usize = 20;

    /// Difficulty curve
    pub const SPEED_INCREASE_INTERVAL: f32 = 15.0;
    pub const SPEED_INCREASE_AMOUNT: f32 = 0.05;

    /// Minimum time the game over banner stays up
    pub const GAME_OVER_DURATION: f32 = 2.0;

    /// Leaderboard rows shown in the menu
    pub const LEADERBOARD_SIZE: usize = 5;
}
