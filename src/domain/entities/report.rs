use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::access::{require_role, Action};
use crate::domain::entities::user::User;
use crate::domain::errors::DomainError;

const DISMISSED_NOTE: &str = "Report dismissed";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    DirtyWater,
    BrokenFilter,
    Infrastructure,
    Other,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirtyWater => write!(f, "dirty_water"),
            Self::BrokenFilter => write!(f, "broken_filter"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "dirty_water" => Ok(Self::DirtyWater),
            "broken_filter" => Ok(Self::BrokenFilter),
            "infrastructure" => Ok(Self::Infrastructure),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown report type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    UnderReview,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Dismissed)
    }

    /// Whether `self -> next` is a permitted step.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::UnderReview)
                | (Self::UnderReview, Self::Resolved | Self::Dismissed)
        )
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::UnderReview => write!(f, "under_review"),
            Self::Resolved => write!(f, "resolved"),
            Self::Dismissed => write!(f, "dismissed"),
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "under_review" | "review" => Ok(Self::UnderReview),
            "resolved" => Ok(Self::Resolved),
            "dismissed" => Ok(Self::Dismissed),
            other => Err(format!("unknown report status '{other}'")),
        }
    }
}

/// A field-submitted issue about a tank, independent of sensor alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub tank_id: String,
    pub tank_name: String,
    pub submitted_by: String,
    pub submitted_by_name: String,
    pub report_type: ReportType,
    pub description: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub status: ReportStatus,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// `pending -> under_review`.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` or `InvalidTransition`.
    pub fn start_review(&self, actor: &User, now: DateTime<Utc>) -> Result<Self, DomainError> {
        self.review(actor, Action::ReviewReport, ReportStatus::UnderReview, None, now)
    }

    /// `under_review -> resolved`. Notes are mandatory.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied`, `InvalidInput` for blank notes, or
    /// `InvalidTransition`.
    pub fn resolve(
        &self,
        actor: &User,
        notes: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        require_role(actor, Action::ResolveReport)?;
        let notes = notes.trim();
        if notes.is_empty() {
            return Err(DomainError::InvalidInput(
                "resolution notes are required".into(),
            ));
        }
        self.review(
            actor,
            Action::ResolveReport,
            ReportStatus::Resolved,
            Some(notes.to_string()),
            now,
        )
    }

    /// `under_review -> dismissed`.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` or `InvalidTransition`.
    pub fn dismiss(
        &self,
        actor: &User,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DISMISSED_NOTE);
        self.review(
            actor,
            Action::ResolveReport,
            ReportStatus::Dismissed,
            Some(notes.to_string()),
            now,
        )
    }

    fn review(
        &self,
        actor: &User,
        action: Action,
        next: ReportStatus,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        require_role(actor, action)?;
        if !self.status.can_transition_to(next) {
            return Err(DomainError::transition("report", self.status, next));
        }
        Ok(Self {
            status: next,
            reviewed_by: Some(actor.full_name.clone()),
            reviewed_at: Some(now),
            resolution_notes: notes.or_else(|| self.resolution_notes.clone()),
            ..self.clone()
        })
    }
}
