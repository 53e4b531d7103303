//! Configuration loaded from JSON.
//!
//! Every field has a default, so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "animation": { "frame_interval_ms": 100, "pause_poll_ms": 50 },
//!   "chimes": { "reminder": "reminder", "greeting": "startup" }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ChimeCode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterBuddyConfig {
    pub animation: AnimationConfig,
    pub chimes: ChimeConfig,
}

impl WaterBuddyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frame_interval_ms: u64,
    pub pause_poll_ms: u64,
}

impl AnimationConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn pause_poll(&self) -> Duration {
        Duration::from_millis(self.pause_poll_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 100,
            pause_poll_ms: 50,
        }
    }
}

/// Chime codes callers attach to messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChimeConfig {
    pub reminder: String,
    pub greeting: String,
}

impl ChimeConfig {
    /// The chime to submit for a reminder, honoring the station mute flag.
    pub fn reminder_for(&self, muted: bool) -> ChimeCode {
        if muted {
            ChimeCode::none()
        } else {
            ChimeCode::new(self.reminder.as_str())
        }
    }

    pub fn greeting_for(&self, muted: bool) -> ChimeCode {
        if muted {
            ChimeCode::none()
        } else {
            ChimeCode::new(self.greeting.as_str())
        }
    }
}

impl Default for ChimeConfig {
    fn default() -> Self {
        Self {
            reminder: "reminder".to_string(),
            greeting: "startup".to_string(),
        }
    }
}
