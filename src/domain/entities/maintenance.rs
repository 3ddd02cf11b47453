use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::access::{require_role, Action};
use crate::domain::entities::user::User;
use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    SensorCalibration,
    SensorReplacement,
    TankCleaning,
    FilterReplacement,
    Repair,
    Inspection,
}

impl std::fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SensorCalibration => write!(f, "sensor_calibration"),
            Self::SensorReplacement => write!(f, "sensor_replacement"),
            Self::TankCleaning => write!(f, "tank_cleaning"),
            Self::FilterReplacement => write!(f, "filter_replacement"),
            Self::Repair => write!(f, "repair"),
            Self::Inspection => write!(f, "inspection"),
        }
    }
}

impl FromStr for MaintenanceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sensor_calibration" | "calibration" => Ok(Self::SensorCalibration),
            "sensor_replacement" => Ok(Self::SensorReplacement),
            "tank_cleaning" | "cleaning" => Ok(Self::TankCleaning),
            "filter_replacement" => Ok(Self::FilterReplacement),
            "repair" => Ok(Self::Repair),
            "inspection" => Ok(Self::Inspection),
            other => Err(format!("unknown maintenance type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::Scheduled | Self::InProgress, Self::Cancelled)
        )
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for MaintenanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown maintenance status '{other}'")),
        }
    }
}

/// A scheduled or completed service action on a tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub id: String,
    pub tank_id: String,
    pub tank_name: String,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub performed_by: String,
    pub performed_by_name: String,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    pub status: MaintenanceStatus,
    pub cost: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MaintenanceLog {
    /// Moves the log to `next`, stamping `completed_date` on completion.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` or `InvalidTransition`.
    pub fn transition(
        &self,
        actor: &User,
        next: MaintenanceStatus,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        require_role(actor, Action::UpdateMaintenance)?;
        if !self.status.can_transition_to(next) {
            return Err(DomainError::transition("maintenance", self.status, next));
        }
        let completed_date = if next == MaintenanceStatus::Completed {
            Some(now)
        } else {
            self.completed_date
        };
        Ok(Self {
            status: next,
            completed_date,
            ..self.clone()
        })
    }
}
