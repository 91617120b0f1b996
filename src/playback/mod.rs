pub mod engine;

pub use engine::{PlaybackEngine, PositionUpdate};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not started (or reset); cursor at the first point
    Idle,
    /// Actively animating the current segment
    Playing,
    /// Suspended mid-route; displayed position held
    Paused,
    /// Cursor reached the final point
    Finished,
}

/// Playback configuration
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Wall-clock time allotted to animate one segment. A rendering
    /// duration, unrelated to the real timestamp gap between the points.
    pub segment_duration: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            segment_duration: Duration::from_millis(1000),
        }
    }
}

/// Snapshot of the derived playback state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// Index of the route point the cursor sits on (or animates away from)
    pub current_index: usize,
    pub is_playing: bool,
    /// Real route time covered so far, in seconds
    pub elapsed_time: f64,
    /// Speed over the last completed segment, km/h
    pub speed: f64,
}

impl PlaybackStatus {
    pub fn initial() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            elapsed_time: 0.0,
            speed: 0.0,
        }
    }
}

/// Format elapsed route time as mm:ss for readouts
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
