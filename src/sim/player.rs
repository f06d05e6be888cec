//! Player car steering with lane assist

use glam::Vec2;

use super::lane::nearest_lane_center;
use super::state::{HeldInput, Player, Track};
use crate::config::SimConfig;

impl Player {
    /// Player parked at the middle of the road
    pub fn new(config: &SimConfig, track: &Track) -> Self {
        Self {
            pos: Vec2::new(track.center_x(), config.player_y),
            size: Vec2::new(config.player_width, config.player_height),
            speed: config.player_speed,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Leftmost and rightmost x the car's center may reach
    pub fn x_limits(&self, track: &Track) -> (f32, f32) {
        (track.left + self.half_width(), track.right - self.half_width())
    }

    /// Apply one frame of steering, then snap onto a nearby lane center
    pub fn steer(&mut self, held: HeldInput, track: &Track, snap_distance: f32) {
        let (min_x, max_x) = self.x_limits(track);

        if held.left && self.pos.x > min_x {
            self.pos.x = (self.pos.x - self.speed).max(min_x);
            self.snap_to_lane(track, snap_distance);
        }

        if held.right && self.pos.x < max_x {
            self.pos.x = (self.pos.x + self.speed).min(max_x);
            self.snap_to_lane(track, snap_distance);
        }
    }

    fn snap_to_lane(&mut self, track: &Track, snap_distance: f32) {
        let center = nearest_lane_center(self.pos.x, track);
        if (self.pos.x - center).abs() < snap_distance {
            self.pos.x = center;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEFT: HeldInput = HeldInput {
        left: true,
        right: false,
    };
    const RIGHT: HeldInput = HeldInput {
        left: false,
        right: true,
    };

    fn setup() -> (Player, Track) {
        let config = SimConfig::default();
        let track = config.track().unwrap();
        (Player::new(&config, &track), track)
    }

    #[test]
    fn test_starts_centered() {
        let (player, _) = setup();
        assert_eq!(player.pos, Vec2::new(400.0, 120.0));
    }

    #[test]
    fn test_moves_by_speed() {
        let (mut player, track) = setup();
        player.steer(LEFT, &track, 5.0);
        assert_eq!(player.pos.x, 395.0);
        player.steer(HeldInput::default(), &track, 5.0);
        assert_eq!(player.pos.x, 395.0);
    }

    #[test]
    fn test_snaps_near_lane_center() {
        let (mut player, track) = setup();
        player.pos.x = 352.0;
        // 347 is within 5 of 345
        player.steer(LEFT, &track, 5.0);
        assert_eq!(player.pos.x, 345.0);

        player.pos.x = 357.0;
        // 352 is 7 away, no snap
        player.steer(LEFT, &track, 5.0);
        assert_eq!(player.pos.x, 352.0);
    }

    #[test]
    fn test_clamped_to_road() {
        let (mut player, track) = setup();
        for _ in 0..200 {
            player.steer(LEFT, &track, 5.0);
            assert!(player.pos.x >= 200.0);
        }
        assert_eq!(player.pos.x, 200.0);

        for _ in 0..200 {
            player.steer(RIGHT, &track, 5.0);
            assert!(player.pos.x <= 600.0);
        }
        assert_eq!(player.pos.x, 600.0);
    }

    #[test]
    fn test_both_held_cancel() {
        let (mut player, track) = setup();
        player.pos.x = 300.0;
        player.steer(
            HeldInput {
                left: true,
                right: true,
            },
            &track,
            5.0,
        );
        assert_eq!(player.pos.x, 300.0);
    }
}
