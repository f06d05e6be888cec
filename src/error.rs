use std::fmt;

/// Invalid game configuration. Raised once at setup, never during a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    TrackBounds { left: f32, right: f32 },
    NoLanes,
    ScreenSize { width: f32, height: f32 },
    EnemySpeedRange { min: f32, max: f32 },
    NonPositive { field: &'static str, value: f32 },
    Negative { field: &'static str, value: f32 },
    NotFinite { field: &'static str },
    TooSmall { field: &'static str, value: f32, min: f32 },
    Probability { field: &'static str, value: f64 },
    Parse(String),
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrackBounds { left, right } => {
                write!(f, "track right bound {right} must exceed left bound {left}")
            }
            Self::NoLanes => write!(f, "track needs at least one lane"),
            Self::ScreenSize { width, height } => {
                write!(f, "screen size must be positive: {width}x{height}")
            }
            Self::EnemySpeedRange { min, max } => {
                write!(f, "enemy speed range inverted or negative: {min}..={max}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NotFinite { field } => write!(f, "{field} must be a finite number"),
            Self::TooSmall { field, value, min } => {
                write!(f, "{field} must be at least {min}, got {value}")
            }
            Self::Probability { field, value } => {
                write!(f, "{field} must be within 0..=1, got {value}")
            }
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Io(msg) => write!(f, "config io error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Record store failure. Never fatal to gameplay.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "record store io error: {e}"),
            Self::Parse(e) => write!(f, "record store is corrupt: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
