use crate::domain::entities::alert::{Alert, AlertType, TriggeredParameter};
use crate::domain::entities::reading::SensorReading;
use crate::domain::entities::tank::WaterTank;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// Derives an alert from one reading of `tank`.
///
/// Returns `Ok(None)` when every parameter is within its warning band. The
/// alert id is derived from the reading id, so deriving twice from the same
/// reading yields the same alert.
///
/// # Errors
///
/// Returns `DomainError::MissingThreshold` if a parameter has no band.
pub fn derive_alert(
    tank: &WaterTank,
    reading: &SensorReading,
    thresholds: &ThresholdSet,
) -> Result<Option<Alert>, DomainError> {
    debug_assert_eq!(tank.id, reading.tank_id);

    let mut triggered = Vec::new();
    for (parameter, value) in reading.values() {
        let band = thresholds.get(parameter)?;
        let severity = band.classify(value);
        if let Some(threshold) = band.describe_breach(value) {
            triggered.push(TriggeredParameter {
                parameter,
                value,
                threshold,
                severity,
            });
        }
    }

    let Some(severity) = triggered.iter().map(|t| t.severity).max() else {
        return Ok(None);
    };

    let (alert_type, message) = match triggered.as_slice() {
        [single] => {
            let direction = if single.threshold.ends_with("min") {
                "below"
            } else {
                "above"
            };
            (
                AlertType::Single(single.parameter),
                format!("{} {direction} {severity} threshold", single.parameter),
            )
        }
        _ => (
            AlertType::Multiple,
            format!("Multiple parameters exceed {severity} thresholds"),
        ),
    };

    Ok(Some(Alert {
        id: format!("alert-{}", reading.id),
        tank_id: tank.id.clone(),
        tank_name: tank.name.clone(),
        location_name: tank.location_name.clone(),
        alert_type,
        severity,
        message,
        parameters_triggered: triggered,
        acknowledgement: None,
        created_at: reading.timestamp,
    }))
}

/// Orders alerts critical first, newest first within a severity.
pub fn sort_by_urgency(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
