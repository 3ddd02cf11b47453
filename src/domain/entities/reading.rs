use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::parameter::Parameter;

/// Simultaneous values of every parameter for one tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: String,
    pub tank_id: String,
    pub ph: f64,
    pub turbidity: f64,
    pub tds: f64,
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
}

impl SensorReading {
    #[must_use]
    pub const fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Turbidity => self.turbidity,
            Parameter::Tds => self.tds,
            Parameter::Temperature => self.temperature,
        }
    }

    /// `(parameter, value)` pairs in display order.
    pub fn values(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        Parameter::ALL.into_iter().map(|p| (p, self.value(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_maps_each_parameter() {
        let reading = SensorReading {
            id: "r".into(),
            tank_id: "1".into(),
            ph: 7.2,
            turbidity: 2.0,
            tds: 350.0,
            temperature: 22.0,
            timestamp: Utc::now(),
        };
        let values: Vec<(Parameter, f64)> = reading.values().collect();
        assert_eq!(
            values,
            vec![
                (Parameter::Ph, 7.2),
                (Parameter::Turbidity, 2.0),
                (Parameter::Tds, 350.0),
                (Parameter::Temperature, 22.0),
            ]
        );
    }
}
