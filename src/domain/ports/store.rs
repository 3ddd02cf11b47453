use thiserror::Error;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::maintenance::MaintenanceLog;
use crate::domain::entities::reading::SensorReading;
use crate::domain::entities::report::Report;
use crate::domain::entities::sensor::SensorStatus;
use crate::domain::entities::tank::WaterTank;
use crate::domain::entities::user::User;
use crate::domain::value_objects::thresholds::{ParameterThreshold, ThresholdSet};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("entry already exists: {0}")]
    AlreadyExists(String),
}

/// Tank registry. Read-only: tanks are seeded, never edited.
pub trait TankStore: Send + Sync {
    /// All tanks in registry order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn list_tanks(&self) -> Result<Vec<WaterTank>, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no tank has this id.
    fn get_tank(&self, id: &str) -> Result<WaterTank, StoreError>;
}

pub trait ReadingStore: Send + Sync {
    /// Append readings.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write operation fails.
    fn save_readings(&self, readings: &[SensorReading]) -> Result<(), StoreError>;

    /// Readings of one tank, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn readings_for(&self, tank_id: &str) -> Result<Vec<SensorReading>, StoreError>;

    /// Most recent reading of one tank, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn latest_reading(&self, tank_id: &str) -> Result<Option<SensorReading>, StoreError>;
}

pub trait AlertStore: Send + Sync {
    /// Persist a new alert.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if an alert with the same id is stored.
    fn insert_alert(&self, alert: &Alert) -> Result<(), StoreError>;

    /// Replace a stored alert.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the alert does not exist.
    fn update_alert(&self, alert: &Alert) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the alert does not exist.
    fn get_alert(&self, id: &str) -> Result<Alert, StoreError>;

    /// All stored alerts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn get_alerts(&self) -> Result<Vec<Alert>, StoreError>;
}

pub trait ReportStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` on a duplicate id.
    fn insert_report(&self, report: &Report) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the report does not exist.
    fn update_report(&self, report: &Report) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the report does not exist.
    fn get_report(&self, id: &str) -> Result<Report, StoreError>;

    /// All reports, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn list_reports(&self) -> Result<Vec<Report>, StoreError>;
}

pub trait MaintenanceStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` on a duplicate id.
    fn insert_log(&self, log: &MaintenanceLog) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the log does not exist.
    fn update_log(&self, log: &MaintenanceLog) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the log does not exist.
    fn get_log(&self, id: &str) -> Result<MaintenanceLog, StoreError>;

    /// All logs, most recently scheduled first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn list_logs(&self) -> Result<Vec<MaintenanceLog>, StoreError>;
}

pub trait SensorStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn list_sensors(&self) -> Result<Vec<SensorStatus>, StoreError>;
}

pub trait UserStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` on a duplicate id.
    fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user does not exist.
    fn update_user(&self, user: &User) -> Result<(), StoreError>;

    /// Remove a user, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user does not exist.
    fn remove_user(&self, id: &str) -> Result<User, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user does not exist.
    fn get_user(&self, id: &str) -> Result<User, StoreError>;

    /// Case-insensitive lookup by email.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// All users in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn list_users(&self) -> Result<Vec<User>, StoreError>;
}

pub trait ThresholdStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn get_thresholds(&self) -> Result<ThresholdSet, StoreError>;

    /// Insert or replace the band for one parameter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write operation fails.
    fn save_threshold(&self, threshold: &ParameterThreshold) -> Result<(), StoreError>;
}
