//! Station records - the three persisted tables
//!
//! The reminder process reads these before it talks to the display
//! sequencer (mute flag, cup size); the sequencer never does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single row of the `userData` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Daily intake multiplier; 1.0 is an average day.
    pub thirst: f64,
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            user_id: "default".to_string(),
            height_cm: 170.0,
            weight_kg: 70.0,
            thirst: 1.0,
        }
    }
}

/// Single row of the `stationData` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationData {
    pub mute: bool,
    pub cup_size_ml: f64,
}

impl Default for StationData {
    fn default() -> Self {
        Self {
            mute: false,
            cup_size_ml: 250.0,
        }
    }
}

/// One row of the `waterHistory` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterData {
    pub datetime: DateTime<Utc>,
    pub amount_ml: f64,
}

impl WaterData {
    pub fn new(datetime: DateTime<Utc>, amount_ml: f64) -> Self {
        Self {
            datetime,
            amount_ml,
        }
    }
}
