//! Idle/demo mode driver
//!
//! Picks the lane with the most open road ahead of the player and steers
//! toward its center through the same held-key flags a human would use.

use super::lane::{lane_center, nearest_lane};
use super::state::{GameState, HeldInput};

/// Clearance beyond which the current lane is considered safe enough to keep
const COMFORT_CLEARANCE: f32 = 350.0;

/// Distance from the player to the closest car ahead in `lane`
fn clearance(state: &GameState, lane: u8) -> f32 {
    let player = &state.player;
    // Cars already level with the player still count as ahead
    let horizon = player.pos.y - player.size.y;
    state
        .obstacles
        .iter()
        .filter(|o| o.lane == lane && o.pos.y >= horizon)
        .map(|o| o.pos.y - player.pos.y)
        .fold(f32::INFINITY, f32::min)
}

/// Lane the autopilot wants to be in
pub fn target_lane(state: &GameState) -> u8 {
    let current = nearest_lane(state.player.pos.x, &state.track);
    if clearance(state, current) >= COMFORT_CLEARANCE {
        return current;
    }

    let mut best = current;
    let mut best_clearance = clearance(state, current);
    for lane in 0..state.track.lane_count {
        let c = clearance(state, lane);
        // Prefer nearer lanes on ties so the car doesn't cross the whole road
        let closer = lane.abs_diff(current) < best.abs_diff(current);
        if c > best_clearance || (c == best_clearance && closer) {
            best = lane;
            best_clearance = c;
        }
    }
    best
}

/// Held keys that move the player toward the target lane
pub fn steer(state: &GameState) -> HeldInput {
    let target = lane_center(target_lane(state), &state.track);
    let dx = target - state.player.pos.x;
    if dx.abs() < state.config.lane_snap_distance {
        return HeldInput::default();
    }
    HeldInput {
        left: dx < 0.0,
        right: dx > 0.0,
    }
}
