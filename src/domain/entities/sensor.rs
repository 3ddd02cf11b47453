use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::parameter::Parameter;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SensorHealth {
    Operational,
    NeedsCalibration,
    Faulty,
    Offline,
}

impl std::fmt::Display for SensorHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operational => write!(f, "operational"),
            Self::NeedsCalibration => write!(f, "needs_calibration"),
            Self::Faulty => write!(f, "faulty"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Health of one sensor mounted on a tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorStatus {
    pub id: String,
    pub tank_id: String,
    pub tank_name: String,
    pub sensor_type: Parameter,
    pub status: SensorHealth,
    #[serde(default)]
    pub last_calibration: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_calibration: Option<DateTime<Utc>>,
    /// Percent
    pub battery_level: u8,
    /// Percent
    pub signal_strength: u8,
}

impl SensorStatus {
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        self.status != SensorHealth::Operational
    }

    #[must_use]
    pub fn is_calibration_overdue(&self, now: DateTime<Utc>) -> bool {
        self.next_calibration.is_some_and(|due| due < now)
    }
}
