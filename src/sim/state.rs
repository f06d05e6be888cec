//! Game state and core simulation types
//!
//! Everything a run owns lives in `GameState`: the track, the player, the
//! traffic pool, the road markings and the run bookkeeping. It is rebuilt in
//! place by `reset` on every new run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::config::SimConfig;
use crate::error::ConfigError;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen until unpaused
    Paused,
    /// Player crashed
    GameOver,
}

/// Outcome of the end-of-run score save, for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveStatus {
    Pending,
    Saved,
    Failed,
}

/// Immutable road geometry for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub left: f32,
    pub right: f32,
    pub lane_count: u8,
}

impl Track {
    pub fn new(left: f32, right: f32, lane_count: u8) -> Result<Self, ConfigError> {
        if !(right > left) {
            return Err(ConfigError::TrackBounds { left, right });
        }
        if lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        Ok(Self {
            left,
            right,
            lane_count,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.width() / self.lane_count as f32
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

/// A traffic car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Lane assigned at spawn; never changes
    pub lane: u8,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Speed in pixels per 60 Hz frame before the difficulty multiplier
    pub base_speed: f32,
    /// Index into the traffic paint palette
    pub color: u8,
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position (y is fixed for the whole run)
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal movement per frame
    pub speed: f32,
}

/// Steering keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldInput {
    pub left: bool,
    pub right: bool,
}

/// A dashed road marking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadStripe {
    pub y: f32,
}

/// Per-run bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    /// Set once the end-of-run save has been requested; never cleared until reset
    pub score_persisted: bool,
    pub save_status: SaveStatus,
    /// Seconds spent on the game over screen
    pub game_over_elapsed: f32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0,
            difficulty: Difficulty::default(),
            phase: GamePhase::Running,
            score_persisted: false,
            save_status: SaveStatus::Pending,
            game_over_elapsed: 0.0,
        }
    }
}

impl RunState {
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Claim a finished run's score for saving. Yields it at most once per run.
    pub fn take_unsaved_score(&mut self) -> Option<u64> {
        if self.is_over() && !self.score_persisted {
            self.score_persisted = true;
            Some(self.score)
        } else {
            None
        }
    }

    /// Record what the record store reported for the end-of-run save
    pub fn record_save_result(&mut self, saved: bool) {
        self.save_status = if saved {
            SaveStatus::Saved
        } else {
            SaveStatus::Failed
        };
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub track: Track,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub player: Player,
    /// Traffic pool, indexed by slot. Its length never changes during a run.
    pub obstacles: Vec<Obstacle>,
    pub stripes: Vec<RoadStripe>,
    pub run: RunState,
    pub held: HeldInput,
    /// Frames simulated while running
    pub time_ticks: u64,
}

impl GameState {
    /// Create a ready-to-run state. Fails fast on an invalid config.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let track = config.track()?;
        let mut state = Self {
            player: Player::new(&config, &track),
            obstacles: Vec::with_capacity(config.enemy_count()),
            stripes: Vec::with_capacity(config.road_stripe_count),
            run: RunState::default(),
            held: HeldInput::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            track,
            config,
        };
        state.reset();
        Ok(state)
    }

    /// Start a fresh run: traffic re-spawned, player centered, bookkeeping cleared.
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.config, &self.track);
        self.run = RunState::default();
        self.held = HeldInput::default();
        self.time_ticks = 0;

        self.obstacles.clear();
        for lane in 0..self.track.lane_count {
            for i in 0..self.config.enemies_per_lane {
                let mut obstacle = Obstacle::spawn(lane, &self.track, &self.config, &mut self.rng);
                // Stagger the pair so lanes don't start bumper to bumper
                obstacle.pos.y = self.config.screen_height
                    + 200.0 * i as f32
                    + self.rng.random_range(0.0..200.0_f32);
                self.obstacles.push(obstacle);
            }
        }

        let spacing = (self.config.screen_height / self.config.road_stripe_count as f32).floor();
        self.stripes = (0..self.config.road_stripe_count)
            .map(|i| RoadStripe {
                y: i as f32 * spacing,
            })
            .collect();
    }

    /// Scroll the road markings; a stripe leaving the bottom rejoins above the highest one
    pub fn scroll_stripes(&mut self) {
        let step = self.config.road_speed * self.run.difficulty.speed_multiplier;
        for i in 0..self.stripes.len() {
            self.stripes[i].y -= step;
            if self.stripes[i].y < -40.0 {
                let max_y = self
                    .stripes
                    .iter()
                    .map(|s| s.y)
                    .fold(f32::NEG_INFINITY, f32::max);
                self.stripes[i].y = max_y + 40.0;
            }
        }
    }

    /// Whether the game over screen has been up for its minimum duration
    pub fn game_over_settled(&self) -> bool {
        self.run.is_over() && self.run.game_over_elapsed >= self.config.game_over_duration
    }
}
