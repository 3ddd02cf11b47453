use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of user roles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    FieldOfficer,
    /// Read-only access to dashboards and alerts
    #[default]
    Observer,
}

impl Role {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::FieldOfficer => "Field Officer",
            Self::Observer => "Observer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::FieldOfficer => write!(f, "field_officer"),
            Self::Observer => write!(f, "observer"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "admin" => Ok(Self::Admin),
            "field_officer" | "officer" => Ok(Self::FieldOfficer),
            "observer" => Ok(Self::Observer),
            other => Err(format!(
                "unknown role '{other}' (expected admin, field_officer or observer)"
            )),
        }
    }
}
