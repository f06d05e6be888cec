//! Platform abstraction layer
//!
//! Handles the host-facing edges of the game:
//! - Keys the game reacts to, independent of any windowing library
//! - Frame clock turning wall time into per-frame `dt`

use std::time::{Duration, Instant};

/// Longest frame step handed to the simulation; longer gaps are hiccups
pub const MAX_FRAME_DT: f32 = 0.1;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// "R" - restart the run at any time
    Restart,
    /// Space - new game from the game over screen
    Space,
    /// "P" - pause toggle
    Pause,
    /// "A" - toggle autopilot
    Autopilot,
    Escape,
    Enter,
    Tab,
    Backspace,
}

impl Key {
    /// Map a host key name (as reported by most windowing libraries) to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Some(Key::Left),
            "right" | "arrowright" => Some(Key::Right),
            "r" => Some(Key::Restart),
            "space" | " " => Some(Key::Space),
            "p" => Some(Key::Pause),
            "a" => Some(Key::Autopilot),
            "escape" | "esc" => Some(Key::Escape),
            "enter" | "return" => Some(Key::Enter),
            "tab" => Some(Key::Tab),
            "backspace" => Some(Key::Backspace),
            _ => None,
        }
    }
}

/// Measures time between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Seconds since the previous frame, clamped to `max_dt`. The first frame is 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        dt.min(self.max_dt)
    }

    /// Time left until the next frame is due at `fps`
    pub fn until_next_frame(&self, now: Instant, fps: f32) -> Duration {
        let frame = Duration::from_secs_f32(1.0 / fps);
        match self.last {
            Some(last) => frame.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}
