use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One measured water-quality dimension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Ph,
    Turbidity,
    Tds,
    Temperature,
}

impl Parameter {
    /// Every monitored parameter, in display order.
    pub const ALL: [Self; 4] = [Self::Ph, Self::Turbidity, Self::Tds, Self::Temperature];

    /// Identifier used in configuration files and on the command line.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Ph => "ph",
            Self::Turbidity => "turbidity",
            Self::Tds => "tds",
            Self::Temperature => "temperature",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ph => "pH",
            Self::Turbidity => "Turbidity",
            Self::Tds => "TDS",
            Self::Temperature => "Temperature",
        }
    }

    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Ph => "",
            Self::Turbidity => "NTU",
            Self::Tds => "ppm",
            Self::Temperature => "°C",
        }
    }

    /// Formats a value with the parameter's unit: `7.2`, `5 NTU`, `30°C`.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Self::Ph => format!("{value:.1}"),
            Self::Temperature => format!("{value}°C"),
            Self::Turbidity | Self::Tds => format!("{value} {}", self.unit()),
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter '{0}' (expected ph, turbidity, tds or temperature)")]
pub struct UnknownParameter(pub String);

impl FromStr for Parameter {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ph" => Ok(Self::Ph),
            "turbidity" => Ok(Self::Turbidity),
            "tds" => Ok(Self::Tds),
            "temperature" | "temp" => Ok(Self::Temperature),
            other => Err(UnknownParameter(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_units() {
        assert_eq!(Parameter::Ph.to_string(), "pH");
        assert_eq!(Parameter::Tds.label(), "TDS");
        assert_eq!(Parameter::Turbidity.unit(), "NTU");
        assert_eq!(Parameter::Temperature.unit(), "°C");
    }

    #[test]
    fn format_value_per_parameter() {
        assert_eq!(Parameter::Ph.format_value(9.0), "9.0");
        assert_eq!(Parameter::Turbidity.format_value(10.0), "10 NTU");
        assert_eq!(Parameter::Tds.format_value(500.0), "500 ppm");
        assert_eq!(Parameter::Temperature.format_value(30.0), "30°C");
        assert_eq!(Parameter::Turbidity.format_value(5.5), "5.5 NTU");
    }

    #[test]
    fn parses_keys_case_insensitively() {
        for parameter in Parameter::ALL {
            let parsed: Parameter = parameter.key().parse().expect("parse key");
            assert_eq!(parsed, parameter);
        }
        assert_eq!("PH".parse::<Parameter>(), Ok(Parameter::Ph));
        assert_eq!("temp".parse::<Parameter>(), Ok(Parameter::Temperature));
    }

    #[test]
    fn rejects_unknown_parameter() {
        let err = "chlorine".parse::<Parameter>().expect_err("should fail");
        assert!(err.to_string().contains("chlorine"));
    }

    #[test]
    fn serde_uses_keys() {
        let json = serde_json::to_string(&Parameter::Temperature).expect("serialize");
        assert_eq!(json, "\"temperature\"");
    }
}
