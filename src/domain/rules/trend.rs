use crate::domain::entities::reading::SensorReading;
use crate::domain::value_objects::parameter::Parameter;

/// Number of readings in each comparison window.
pub const TREND_WINDOW: usize = 6;

/// Percentage change of `parameter` between the latest window of readings
/// and the window before it.
///
/// `readings` must be ordered oldest first. Returns `None` when there is no
/// previous window to compare against or its mean is zero.
#[must_use]
pub fn trend(readings: &[SensorReading], parameter: Parameter) -> Option<f64> {
    if readings.len() < 2 {
        return None;
    }
    let split = readings.len().saturating_sub(TREND_WINDOW);
    let recent = &readings[split..];
    let previous = &readings[split.saturating_sub(TREND_WINDOW)..split];

    let recent_mean = mean(recent, parameter)?;
    let previous_mean = mean(previous, parameter)?;
    if previous_mean == 0.0 {
        return None;
    }
    Some((recent_mean - previous_mean) / previous_mean * 100.0)
}

#[allow(clippy::cast_precision_loss)]
fn mean(window: &[SensorReading], parameter: Parameter) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    let sum: f64 = window.iter().map(|r| r.value(parameter)).sum();
    Some(sum / window.len() as f64)
}
