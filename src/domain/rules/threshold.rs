use serde::Serialize;

use crate::domain::entities::reading::SensorReading;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// Classifies one parameter value against the configured thresholds.
///
/// # Errors
///
/// Returns `DomainError::MissingThreshold` if `parameter` has no band.
pub fn classify(
    parameter: Parameter,
    value: f64,
    thresholds: &ThresholdSet,
) -> Result<Severity, DomainError> {
    Ok(thresholds.get(parameter)?.classify(value))
}

/// Classification of a single parameter inside a reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterAssessment {
    pub parameter: Parameter,
    pub value: f64,
    pub severity: Severity,
}

/// Classifies every parameter of a reading, in display order.
///
/// # Errors
///
/// Returns `DomainError::MissingThreshold` for the first parameter with no band.
pub fn assess(
    reading: &SensorReading,
    thresholds: &ThresholdSet,
) -> Result<Vec<ParameterAssessment>, DomainError> {
    reading
        .values()
        .map(|(parameter, value)| {
            Ok(ParameterAssessment {
                parameter,
                value,
                severity: classify(parameter, value, thresholds)?,
            })
        })
        .collect()
}

/// Worst classification across a reading, `Normal` if everything is in band.
#[must_use]
pub fn overall(assessments: &[ParameterAssessment]) -> Severity {
    assessments
        .iter()
        .map(|a| a.severity)
        .max()
        .unwrap_or(Severity::Normal)
}
