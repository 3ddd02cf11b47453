use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::ServiceError;
use crate::domain::entities::alert::{Alert, AlertFilter};
use crate::domain::entities::reading::SensorReading;
use crate::domain::entities::tank::WaterTank;
use crate::domain::entities::user::User;
use crate::domain::ports::store::{AlertStore, ReadingStore, StoreError, TankStore, ThresholdStore};
use crate::domain::rules::{self, ParameterAssessment};
use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// Outcome of evaluating one tank's latest reading.
#[derive(Debug, Clone, Serialize)]
pub struct TankScan {
    pub tank: WaterTank,
    pub reading: Option<SensorReading>,
    pub assessments: Vec<ParameterAssessment>,
    pub overall: Severity,
    pub alert: Option<Alert>,
    /// Whether `alert` was stored by this scan rather than an earlier one.
    pub new_alert: bool,
}

/// Dashboard view of one tank: latest metrics with their trends.
#[derive(Debug, Clone, Serialize)]
pub struct TankOverview {
    pub tank: WaterTank,
    pub reading: Option<SensorReading>,
    pub metrics: Vec<Metric>,
    pub overall: Severity,
    pub active_alerts: usize,
}

/// One metric card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric {
    pub parameter: Parameter,
    pub value: f64,
    pub severity: Severity,
    /// Percent change against the previous window, if defined.
    pub trend: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub active: usize,
    pub active_critical: usize,
}

/// Evaluates tank readings against the current thresholds and manages the
/// resulting alerts.
pub struct MonitorService<'a> {
    tanks: &'a dyn TankStore,
    readings: &'a dyn ReadingStore,
    alerts: &'a dyn AlertStore,
    thresholds: &'a dyn ThresholdStore,
}

impl<'a> MonitorService<'a> {
    #[must_use]
    pub fn new(
        tanks: &'a dyn TankStore,
        readings: &'a dyn ReadingStore,
        alerts: &'a dyn AlertStore,
        thresholds: &'a dyn ThresholdStore,
    ) -> Self {
        Self {
            tanks,
            readings,
            alerts,
            thresholds,
        }
    }

    /// Tanks in registry order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn tanks(&self) -> Result<Vec<WaterTank>, ServiceError> {
        Ok(self.tanks.list_tanks()?)
    }

    /// Thresholds currently used for evaluation.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn thresholds(&self) -> Result<ThresholdSet, ServiceError> {
        Ok(self.thresholds.get_thresholds()?)
    }

    /// Evaluates the latest reading of one tank and stores the derived alert
    /// unless it is already stored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the tank does not exist, a threshold is
    /// missing, or the store fails.
    pub fn scan_tank(&self, tank_id: &str) -> Result<TankScan, ServiceError> {
        let tank = self.tanks.get_tank(tank_id)?;
        let thresholds = self.thresholds.get_thresholds()?;
        let Some(reading) = self.readings.latest_reading(tank_id)? else {
            debug!(tank = %tank.name, "no readings to scan");
            return Ok(TankScan {
                tank,
                reading: None,
                assessments: Vec::new(),
                overall: Severity::Normal,
                alert: None,
                new_alert: false,
            });
        };

        let assessments = rules::assess(&reading, &thresholds)?;
        let overall = rules::overall(&assessments);
        let alert = rules::derive_alert(&tank, &reading, &thresholds)?;

        let new_alert = match &alert {
            Some(alert) => match self.alerts.insert_alert(alert) {
                Ok(()) => {
                    warn!(tank = %tank.name, severity = %alert.severity, "{}", alert.message);
                    true
                }
                Err(StoreError::AlreadyExists(_)) => {
                    debug!(alert = %alert.id, "alert already recorded");
                    false
                }
                Err(e) => return Err(e.into()),
            },
            None => {
                debug!(tank = %tank.name, "all parameters within range");
                false
            }
        };

        Ok(TankScan {
            tank,
            reading: Some(reading),
            assessments,
            overall,
            alert,
            new_alert,
        })
    }

    /// Scans every tank in registry order.
    ///
    /// # Errors
    ///
    /// Stops at the first tank that fails to scan.
    pub fn scan_all(&self) -> Result<Vec<TankScan>, ServiceError> {
        let scans = self
            .tanks
            .list_tanks()?
            .iter()
            .map(|tank| self.scan_tank(&tank.id))
            .collect::<Result<Vec<_>, _>>()?;
        let raised = scans.iter().filter(|s| s.new_alert).count();
        info!(tanks = scans.len(), new_alerts = raised, "scan complete");
        Ok(scans)
    }

    /// Read-only dashboard view of a tank: latest metrics, trends, open alerts.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the tank does not exist, a threshold is
    /// missing, or the store fails.
    pub fn overview(&self, tank_id: &str) -> Result<TankOverview, ServiceError> {
        let tank = self.tanks.get_tank(tank_id)?;
        let thresholds = self.thresholds.get_thresholds()?;
        let history = self.readings.readings_for(tank_id)?;
        let reading = history.last().cloned();

        let metrics = match &reading {
            Some(latest) => rules::assess(latest, &thresholds)?
                .into_iter()
                .map(|a| Metric {
                    parameter: a.parameter,
                    value: a.value,
                    severity: a.severity,
                    trend: rules::trend(&history, a.parameter),
                })
                .collect(),
            None => Vec::new(),
        };
        let overall = metrics
            .iter()
            .map(|m| m.severity)
            .max()
            .unwrap_or(Severity::Normal);
        let active_alerts = self
            .alerts
            .get_alerts()?
            .iter()
            .filter(|a| a.tank_id == tank_id && !a.is_acknowledged())
            .count();

        Ok(TankOverview {
            tank,
            reading,
            metrics,
            overall,
            active_alerts,
        })
    }

    /// Acknowledges a stored alert on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the alert does not exist, the actor may not
    /// acknowledge, or it is already acknowledged. The stored alert is left
    /// untouched on error.
    pub fn acknowledge(
        &self,
        alert_id: &str,
        actor: &User,
        now: DateTime<Utc>,
    ) -> Result<Alert, ServiceError> {
        let alert = self.alerts.get_alert(alert_id)?;
        let acknowledged = alert.acknowledge(actor, now)?;
        self.alerts.update_alert(&acknowledged)?;
        info!(alert = %alert_id, by = %actor.full_name, "alert acknowledged");
        Ok(acknowledged)
    }

    /// Stored alerts matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn list_alerts(&self, filter: AlertFilter) -> Result<Vec<Alert>, ServiceError> {
        Ok(self
            .alerts
            .get_alerts()?
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect())
    }

    /// `(active, active critical)` alert counts.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn alert_counts(&self) -> Result<AlertCounts, ServiceError> {
        let counts = self
            .alerts
            .get_alerts()?
            .iter()
            .filter(|a| !a.is_acknowledged())
            .fold(AlertCounts::default(), |mut counts, alert| {
                counts.active += 1;
                if alert.severity == Severity::Critical {
                    counts.active_critical += 1;
                }
                counts
            });
        Ok(counts)
    }
}
