pub mod alerting;
pub mod threshold;
pub mod trend;

pub use alerting::{derive_alert, sort_by_urgency};
pub use threshold::{assess, classify, overall, ParameterAssessment};
pub use trend::trend;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::reading::SensorReading;
use crate::domain::entities::tank::WaterTank;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// Derives alerts for a batch of `(tank, latest reading)` pairs, returned
/// critical first. Pure: nothing is stored.
///
/// # Errors
///
/// Returns `DomainError::MissingThreshold` if any parameter has no band.
pub fn analyze<'a, I>(latest: I, thresholds: &ThresholdSet) -> Result<Vec<Alert>, DomainError>
where
    I: IntoIterator<Item = (&'a WaterTank, &'a SensorReading)>,
{
    let mut alerts = Vec::new();
    for (tank, reading) in latest {
        if let Some(alert) = derive_alert(tank, reading, thresholds)? {
            alerts.push(alert);
        }
    }
    sort_by_urgency(&mut alerts);
    Ok(alerts)
}
