use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::access::{require_role, Action};
use crate::domain::entities::user::User;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::severity::Severity;

/// What an alert is about: one parameter, or several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AlertType {
    Single(Parameter),
    Multiple,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(parameter) => f.write_str(parameter.key()),
            Self::Multiple => f.write_str("multiple"),
        }
    }
}

impl From<AlertType> for String {
    fn from(alert_type: AlertType) -> Self {
        alert_type.to_string()
    }
}

impl TryFrom<String> for AlertType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "multiple" {
            return Ok(Self::Multiple);
        }
        value
            .parse::<Parameter>()
            .map(Self::Single)
            .map_err(|e| e.to_string())
    }
}

/// One out-of-band parameter inside an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredParameter {
    pub parameter: Parameter,
    pub value: f64,
    /// The bound that was crossed, e.g. `"8.5 max"`.
    pub threshold: String,
    pub severity: Severity,
}

/// Who acknowledged an alert, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub by: String,
    pub at: DateTime<Utc>,
}

/// A record flagging one or more out-of-band readings for a tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub tank_id: String,
    pub tank_name: String,
    pub location_name: String,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub parameters_triggered: Vec<TriggeredParameter>,
    #[serde(default)]
    pub acknowledgement: Option<Acknowledgement>,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        self.acknowledgement.is_some()
    }

    #[must_use]
    pub fn acknowledged_by(&self) -> Option<&str> {
        self.acknowledgement.as_ref().map(|a| a.by.as_str())
    }

    #[must_use]
    pub fn acknowledged_at(&self) -> Option<DateTime<Utc>> {
        self.acknowledgement.as_ref().map(|a| a.at)
    }

    /// Returns a copy of this alert acknowledged by `actor` at `now`.
    ///
    /// The transition is one-way: an acknowledged alert keeps its original
    /// acknowledgement.
    ///
    /// # Errors
    ///
    /// - `DomainError::PermissionDenied` if the actor may not acknowledge alerts.
    /// - `DomainError::InvalidTransition` if the alert is already acknowledged.
    pub fn acknowledge(&self, actor: &User, now: DateTime<Utc>) -> Result<Self, DomainError> {
        require_role(actor, Action::AcknowledgeAlert)?;
        if self.is_acknowledged() {
            return Err(DomainError::transition(
                "alert",
                "acknowledged",
                "acknowledged",
            ));
        }
        Ok(Self {
            acknowledgement: Some(Acknowledgement {
                by: actor.full_name.clone(),
                at: now,
            }),
            ..self.clone()
        })
    }
}

/// Alert list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertFilter {
    #[default]
    All,
    Active,
    Acknowledged,
}

impl AlertFilter {
    #[must_use]
    pub const fn matches(&self, alert: &Alert) -> bool {
        match self {
            Self::All => true,
            Self::Active => !alert.is_acknowledged(),
            Self::Acknowledged => alert.is_acknowledged(),
        }
    }
}

impl std::fmt::Display for AlertFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Active => write!(f, "active"),
            Self::Acknowledged => write!(f, "acknowledged"),
        }
    }
}

impl std::str::FromStr for AlertFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" | "open" => Ok(Self::Active),
            "acknowledged" | "ack" => Ok(Self::Acknowledged),
            other => Err(format!(
                "unknown alert filter '{other}' (expected all, active or acknowledged)"
            )),
        }
    }
}
