use serde::{Deserialize, Serialize};

/// Classification of a reading against its configured bands.
///
/// Ordered so that `max()` over a set of classifications yields the overall
/// severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl Severity {
    #[must_use]
    pub const fn emoji(&self) -> &str {
        match self {
            Self::Normal => "✅",
            Self::Warning => "⚠️",
            Self::Critical => "🔴",
        }
    }

    #[must_use]
    pub const fn color(&self) -> &str {
        match self {
            Self::Normal => "green",
            Self::Warning => "orange",
            Self::Critical => "red",
        }
    }

    /// Whether this classification warrants an alert.
    #[must_use]
    pub const fn is_alerting(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}
