//! Traffic cars: spawning, motion, following behavior and recycling
//!
//! Each car drives down its lane at its own pace. A car that closes in on
//! another in the same lane matches it (slightly slower, and it never speeds
//! back up) and occasionally jiggles sideways. Cars that leave the bottom of
//! the screen are recycled to the top instead of being reallocated.

use glam::Vec2;
use rand::Rng;

use super::lane::lane_center;
use super::state::{Obstacle, Track};
use crate::config::SimConfig;
use crate::consts::{ENEMY_COLOR_COUNT, NOMINAL_FPS};

/// Read-only view of one pool slot, taken before the frame's traffic pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub slot: usize,
    pub lane: u8,
    pub y: f32,
    pub base_speed: f32,
}

/// Snapshot the pool so every car reacts to the same start-of-frame picture
pub fn snapshot(obstacles: &[Obstacle]) -> Vec<ObstacleView> {
    obstacles
        .iter()
        .enumerate()
        .map(|(slot, o)| ObstacleView {
            slot,
            lane: o.lane,
            y: o.pos.y,
            base_speed: o.base_speed,
        })
        .collect()
}

impl Obstacle {
    /// New car above the top of the screen in `lane`
    pub fn spawn<R: Rng + ?Sized>(
        lane: u8,
        track: &Track,
        config: &SimConfig,
        rng: &mut R,
    ) -> Self {
        let lane = lane.min(track.lane_count - 1);
        let mut obstacle = Self {
            lane,
            pos: Vec2::ZERO,
            size: Vec2::new(config.enemy_width, config.enemy_height),
            base_speed: config.enemy_speed_min,
            color: rng.random_range(0..ENEMY_COLOR_COUNT),
        };
        obstacle.recycle(track, config, rng);
        obstacle
    }

    /// Put the car back above the screen with a fresh pace. Lane and paint are kept.
    pub fn recycle<R: Rng + ?Sized>(&mut self, track: &Track, config: &SimConfig, rng: &mut R) {
        self.pos.x = lane_center(self.lane, track);
        self.pos.y = config.screen_height + rng.random_range(100.0..=500.0_f32);
        self.base_speed = rng.random_range(config.enemy_speed_min..=config.enemy_speed_max);
    }

    /// Advance one frame: drive, react to same-lane neighbors, recycle when gone.
    #[allow(clippy::too_many_arguments)]
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        slot: usize,
        dt: f32,
        neighbors: &[ObstacleView],
        speed_multiplier: f32,
        track: &Track,
        config: &SimConfig,
        rng: &mut R,
    ) {
        self.pos.y -= self.base_speed * speed_multiplier * dt * NOMINAL_FPS;

        let reaction_range = self.size.y + config.follow_gap;
        for other in neighbors {
            if other.slot == slot || other.lane != self.lane {
                continue;
            }
            if (self.pos.y - other.y).abs() < reaction_range {
                self.base_speed = self.base_speed.min(other.base_speed * config.follow_factor);
                if rng.random_bool(config.nudge_chance) {
                    let shift = rng.random_range(-config.nudge_max..=config.nudge_max);
                    self.try_shift(shift, track);
                }
            }
        }

        if self.pos.y < config.enemy_reset_y {
            self.recycle(track, config, rng);
        }
    }

    /// Move sideways only if the whole car stays inside the road
    fn try_shift(&mut self, shift: f32, track: &Track) {
        let new_x = self.pos.x + shift;
        let half = self.size.x / 2.0;
        if new_x - half > track.left && new_x + half < track.right {
            self.pos.x = new_x;
        }
    }
}

/// Run the traffic pass for every slot against a single start-of-frame snapshot
pub fn update_all<R: Rng + ?Sized>(
    obstacles: &mut [Obstacle],
    dt: f32,
    speed_multiplier: f32,
    track: &Track,
    config: &SimConfig,
    rng: &mut R,
) {
    let view = snapshot(obstacles);
    for (slot, obstacle) in obstacles.iter_mut().enumerate() {
        obstacle.update(slot, dt, &view, speed_multiplier, track, config, rng);
    }
}
