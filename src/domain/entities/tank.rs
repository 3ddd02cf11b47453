use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Operational state of a tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TankStatus {
    Active,
    Maintenance,
    Inactive,
}

impl std::fmt::Display for TankStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Maintenance => write!(f, "maintenance"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// Manually assigned risk label. Not derived from readings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A physical water-storage unit instrumented with sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterTank {
    pub id: String,
    pub name: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity_liters: u32,
    pub installation_date: NaiveDate,
    pub status: TankStatus,
    pub risk_level: RiskLevel,
}
