use crate::map::ViewportConfig;
use crate::playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Persistent tracker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Render time allotted to animate one segment, milliseconds
    pub segment_duration_ms: u64,
    /// Frame loop tick interval, milliseconds
    pub frame_interval_ms: u64,
    /// Map zoom level
    pub zoom: u8,
    /// Re-center the viewport on every position update
    pub follow_vehicle: bool,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            segment_duration_ms: 1000,
            frame_interval_ms: 16,
            zoom: 16,
            follow_vehicle: true,
        }
    }
}

impl TrackerSettings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("route-replay").join("settings.json"))
    }

    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(contents) = fs::read_to_string(&path) {
                    if let Ok(settings) = serde_json::from_str(&contents) {
                        return settings;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = fs::write(&path, json);
            }
        }
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            segment_duration: Duration::from_millis(self.segment_duration_ms),
        }
    }

    pub fn viewport(&self) -> ViewportConfig {
        ViewportConfig {
            zoom: self.zoom,
            follow_vehicle: self.follow_vehicle,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
