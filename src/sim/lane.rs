//! Lane geometry shared by traffic placement and the player's lane assist

use super::state::Track;

/// Centerline x of a lane. Out of range indices clamp to the outermost lane.
#[inline]
pub fn lane_center(lane: u8, track: &Track) -> f32 {
    let lane = lane.min(track.lane_count.saturating_sub(1));
    track.left + (lane as f32 + 0.5) * track.lane_width()
}

/// All lane centers, left to right
pub fn lane_centers(track: &Track) -> impl Iterator<Item = f32> + '_ {
    (0..track.lane_count).map(move |lane| lane_center(lane, track))
}

/// Lane whose center is closest to `x`
pub fn nearest_lane(x: f32, track: &Track) -> u8 {
    let lane = ((x - track.left) / track.lane_width()).floor();
    lane.clamp(0.0, (track.lane_count - 1) as f32) as u8
}

/// Center of the lane closest to `x`
#[inline]
pub fn nearest_lane_center(x: f32, track: &Track) -> f32 {
    lane_center(nearest_lane(x, track), track)
}
