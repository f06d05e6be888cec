//! Game balance configuration
//!
//! Every tunable the simulation reads lives here. A config is validated once
//! at setup and then passed by reference into the simulation; it is never
//! mutated during a run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Track;

/// Immutable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Screen / track ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub track_left: f32,
    pub track_right: f32,
    pub lane_count: u8,

    // === Player ===
    /// Horizontal movement per frame while a direction is held
    pub player_speed: f32,
    pub player_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub lane_snap_distance: f32,

    // === Traffic ===
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemies_per_lane: u8,
    pub enemy_reset_y: f32,
    pub follow_gap: f32,
    pub follow_factor: f32,
    pub nudge_chance: f64,
    pub nudge_max: f32,

    // === Road markings ===
    pub road_speed: f32,
    pub road_stripe_count: usize,

    // === Difficulty ===
    pub speed_increase_interval: f32,
    pub speed_increase_amount: f32,
    pub game_over_duration: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            track_left: ROAD_LEFT,
            track_right: ROAD_RIGHT,
            lane_count: LANE_COUNT,

            player_speed: PLAYER_SPEED,
            player_y: PLAYER_Y,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            lane_snap_distance: LANE_SNAP_DISTANCE,

            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemies_per_lane: ENEMIES_PER_LANE,
            enemy_reset_y: ENEMY_RESET_Y,
            follow_gap: ENEMY_FOLLOW_GAP,
            follow_factor: ENEMY_FOLLOW_FACTOR,
            nudge_chance: ENEMY_NUDGE_CHANCE,
            nudge_max: ENEMY_NUDGE_MAX,

            road_speed: ROAD_SPEED_BASE,
            road_stripe_count: ROAD_STRIPE_COUNT,

            speed_increase_interval: SPEED_INCREASE_INTERVAL,
            speed_increase_amount: SPEED_INCREASE_AMOUNT,
            game_over_duration: GAME_OVER_DURATION,
        }
    }
}

impl SimConfig {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        self.track()?;
        if self.enemy_speed_min < 0.0 || self.enemy_speed_min > self.enemy_speed_max {
            return Err(ConfigError::EnemySpeedRange {
                min: self.enemy_speed_min,
                max: self.enemy_speed_max,
            });
        }
        if !(0.0..=1.0).contains(&self.nudge_chance) {
            return Err(ConfigError::Probability {
                field: "nudge_chance",
                value: self.nudge_chance,
            });
        }
        let positive = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("speed_increase_interval", self.speed_increase_interval),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let non_negative = [
            ("player_speed", self.player_speed),
            ("lane_snap_distance", self.lane_snap_distance),
            ("follow_gap", self.follow_gap),
            ("follow_factor", self.follow_factor),
            ("nudge_max", self.nudge_max),
            ("road_speed", self.road_speed),
            ("speed_increase_amount", self.speed_increase_amount),
            ("game_over_duration", self.game_over_duration),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        // At most one speed increase per nominal frame
        let min_interval = 1.0 / NOMINAL_FPS;
        if self.speed_increase_interval < min_interval {
            return Err(ConfigError::TooSmall {
                field: "speed_increase_interval",
                value: self.speed_increase_interval,
                min: min_interval,
            });
        }
        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 21] {
        [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("track_left", self.track_left),
            ("track_right", self.track_right),
            ("player_speed", self.player_speed),
            ("player_y", self.player_y),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("lane_snap_distance", self.lane_snap_distance),
            ("enemy_speed_min", self.enemy_speed_min),
            ("enemy_speed_max", self.enemy_speed_max),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_reset_y", self.enemy_reset_y),
            ("follow_gap", self.follow_gap),
            ("follow_factor", self.follow_factor),
            ("nudge_max", self.nudge_max),
            ("road_speed", self.road_speed),
            ("speed_increase_interval", self.speed_increase_interval),
            ("speed_increase_amount", self.speed_increase_amount),
            ("game_over_duration", self.game_over_duration),
        ]
    }

    /// Track geometry described by this config
    pub fn track(&self) -> Result<Track, ConfigError> {
        Track::new(self.track_left, self.track_right, self.lane_count)
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Total number of traffic cars in the pool
    pub fn enemy_count(&self) -> usize {
        self.lane_count as usize * self.enemies_per_lane as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, TickInput, tick};

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enemy_count(), 8);
    }

    #[test]
    fn test_inverted_track_rejected() {
        let config = SimConfig {
            track_left: 500.0,
            track_right: 500.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TrackBounds {
                left: 500.0,
                right: 500.0
            })
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "player_speed": 7.5 }"#).unwrap();
        assert_eq!(config.player_speed, 7.5);
        assert_eq!(config.track_left, ROAD_LEFT);
        assert_eq!(config.lane_count, LANE_COUNT);
    }

    #[test]
    fn test_negative_speed_increase_rejected() {
        assert_eq!(
            SimConfig::from_json(r#"{ "speed_increase_amount": -0.05 }"#),
            Err(ConfigError::Negative {
                field: "speed_increase_amount",
                value: -0.05
            })
        );
    }

    #[test]
    fn test_negative_nudge_rejected() {
        assert!(matches!(
            SimConfig::from_json(r#"{ "nudge_max": -10.0, "nudge_chance": 1.0 }"#),
            Err(ConfigError::Negative {
                field: "nudge_max",
                ..
            })
        ));
        // Zero is a valid "never nudge" setting
        let json = r#"{ "nudge_max": 0.0, "nudge_chance": 1.0 }"#;
        let mut state = GameState::new(SimConfig::from_json(json).unwrap(), 1).unwrap();
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }
    }

    #[test]
    fn test_tiny_interval_rejected() {
        assert!(matches!(
            SimConfig::from_json(r#"{ "speed_increase_interval": 1e-30 }"#),
            Err(ConfigError::TooSmall {
                field: "speed_increase_interval",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = SimConfig {
            follow_factor: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "follow_factor"
            })
        );
        let config = SimConfig {
            track_right: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "enemy_speed_min": 5.0, "enemy_speed_max": 1.0 }"#),
            Err(ConfigError::EnemySpeedRange { .. })
        ));
    }
}
