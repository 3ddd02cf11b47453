use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::severity::Severity;

/// Warning and critical bands for one parameter.
///
/// Both bands are inclusive. A well-formed band nests the warning band inside
/// the critical one: `min_critical <= min_warning <= max_warning <= max_critical`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterThreshold {
    pub parameter: Parameter,
    pub min_warning: f64,
    pub max_warning: f64,
    pub min_critical: f64,
    pub max_critical: f64,
}

impl ParameterThreshold {
    #[must_use]
    pub const fn new(
        parameter: Parameter,
        min_warning: f64,
        max_warning: f64,
        min_critical: f64,
        max_critical: f64,
    ) -> Self {
        Self {
            parameter,
            min_warning,
            max_warning,
            min_critical,
            max_critical,
        }
    }

    /// Factory band for `parameter`.
    #[must_use]
    pub const fn default_for(parameter: Parameter) -> Self {
        match parameter {
            Parameter::Ph => Self::new(parameter, 6.5, 8.5, 6.0, 9.0),
            Parameter::Turbidity => Self::new(parameter, 0.0, 5.0, 0.0, 10.0),
            Parameter::Tds => Self::new(parameter, 0.0, 500.0, 0.0, 1000.0),
            Parameter::Temperature => Self::new(parameter, 10.0, 30.0, 5.0, 35.0),
        }
    }

    /// Checks the band ordering invariant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedThreshold` if a bound is not finite or
    /// the bands are not nested.
    pub fn validate(&self) -> Result<(), DomainError> {
        let bounds = [
            self.min_critical,
            self.min_warning,
            self.max_warning,
            self.max_critical,
        ];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(self.malformed("bounds must be finite numbers"));
        }
        if self.min_critical > self.min_warning {
            return Err(self.malformed("min_critical is above min_warning"));
        }
        if self.min_warning > self.max_warning {
            return Err(self.malformed("min_warning is above max_warning"));
        }
        if self.max_warning > self.max_critical {
            return Err(self.malformed("max_warning is above max_critical"));
        }
        Ok(())
    }

    fn malformed(&self, reason: &str) -> DomainError {
        DomainError::MalformedThreshold {
            parameter: self.parameter,
            reason: reason.to_string(),
        }
    }

    /// Classifies a value against this band.
    ///
    /// The critical band is checked first; a value between a warning edge and
    /// the matching critical edge is a warning. NaN lies in no band.
    #[must_use]
    pub fn classify(&self, value: f64) -> Severity {
        if value.is_nan() || value < self.min_critical || value > self.max_critical {
            Severity::Critical
        } else if value < self.min_warning || value > self.max_warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    /// Human-readable name of the bound a value crossed, e.g. `"8.5 max"`.
    ///
    /// Returns `None` when the value is within the warning band.
    #[must_use]
    pub fn describe_breach(&self, value: f64) -> Option<String> {
        let (min, max) = match self.classify(value) {
            Severity::Normal => return None,
            Severity::Warning => (self.min_warning, self.max_warning),
            Severity::Critical => (self.min_critical, self.max_critical),
        };
        let description = if value < min {
            format!("{} min", self.parameter.format_value(min))
        } else {
            format!("{} max", self.parameter.format_value(max))
        };
        Some(description)
    }

    /// The warning band rendered for display, e.g. `"6.5 – 8.5"`.
    #[must_use]
    pub fn warning_range(&self) -> String {
        format!(
            "{} – {}",
            self.parameter.format_value(self.min_warning),
            self.parameter.format_value(self.max_warning)
        )
    }
}

/// Thresholds for every monitored parameter, keyed by parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ParameterThreshold>", into = "Vec<ParameterThreshold>")]
pub struct ThresholdSet {
    bands: HashMap<Parameter, ParameterThreshold>,
}

impl ThresholdSet {
    /// A set with no thresholds configured.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bands: HashMap::new(),
        }
    }

    /// Looks up the band for `parameter`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingThreshold` if nothing is configured for it.
    pub fn get(&self, parameter: Parameter) -> Result<&ParameterThreshold, DomainError> {
        self.bands
            .get(&parameter)
            .ok_or(DomainError::MissingThreshold(parameter))
    }

    /// Inserts or replaces a band, returning the previous one.
    pub fn set(&mut self, threshold: ParameterThreshold) -> Option<ParameterThreshold> {
        self.bands.insert(threshold.parameter, threshold)
    }

    /// Configured bands in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterThreshold> {
        Parameter::ALL.iter().filter_map(|p| self.bands.get(p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Validates every configured band.
    ///
    /// # Errors
    ///
    /// Returns the first `DomainError::MalformedThreshold` found.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.iter().try_for_each(ParameterThreshold::validate)
    }
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self::from(
            Parameter::ALL
                .into_iter()
                .map(ParameterThreshold::default_for)
                .collect::<Vec<_>>(),
        )
    }
}

impl From<Vec<ParameterThreshold>> for ThresholdSet {
    fn from(thresholds: Vec<ParameterThreshold>) -> Self {
        Self {
            bands: thresholds.into_iter().map(|t| (t.parameter, t)).collect(),
        }
    }
}

impl From<ThresholdSet> for Vec<ParameterThreshold> {
    fn from(set: ThresholdSet) -> Self {
        set.iter().copied().collect()
    }
}
