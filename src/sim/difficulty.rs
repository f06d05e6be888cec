//! Difficulty curve: run clock, speed multiplier and score rate

use serde::{Deserialize, Serialize};

/// Difficulty progression for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Seconds of running time
    pub elapsed: f32,
    /// Global speed scale, starts at 1.0 and only ever grows
    pub speed_multiplier: f32,
    /// Number of speed increases so far
    pub bumps: u32,
    /// Run time at which the last increase was due
    pub last_bump: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            speed_multiplier: 1.0,
            bumps: 0,
            last_bump: 0.0,
        }
    }
}

impl Difficulty {
    /// Advance the run clock, returning how many speed increases fired.
    ///
    /// Each crossed `interval` boundary adds `amount` to the multiplier. A single
    /// long step may cross several boundaries.
    pub fn advance(&mut self, dt: f32, interval: f32, amount: f32) -> u32 {
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed - self.last_bump >= interval {
            let next = self.last_bump + interval;
            // Past f32 precision the clock can no longer move in `interval` steps
            if next <= self.last_bump {
                break;
            }
            self.last_bump = next;
            self.bumps += 1;
            fired += 1;
        }
        if fired > 0 {
            // Derived from the count rather than accumulated, so 1.0 + 20 * 0.05 is exactly 2.0
            self.speed_multiplier = 1.0 + self.bumps as f32 * amount;
        }
        fired
    }

    /// Points awarded per frame. Truncates, so the rate is per frame rather than per second.
    #[inline]
    pub fn score_increment(&self) -> u64 {
        self.speed_multiplier.floor() as u64
    }
}
