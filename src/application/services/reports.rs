use chrono::{DateTime, Utc};
use tracing::info;

use super::{next_id, ServiceError};
use crate::domain::access::{require_role, Action};
use crate::domain::entities::report::{Report, ReportStatus, ReportType};
use crate::domain::entities::user::User;
use crate::domain::errors::DomainError;
use crate::domain::ports::store::{ReportStore, TankStore};

/// Input for a new field report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub tank_id: String,
    pub report_type: ReportType,
    pub description: String,
    pub photo_url: Option<String>,
}

/// Field report submission and review.
pub struct ReportService<'a> {
    reports: &'a dyn ReportStore,
    tanks: &'a dyn TankStore,
}

impl<'a> ReportService<'a> {
    #[must_use]
    pub fn new(reports: &'a dyn ReportStore, tanks: &'a dyn TankStore) -> Self {
        Self { reports, tanks }
    }

    /// Reports newest first, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn list(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, ServiceError> {
        Ok(self
            .reports
            .list_reports()?
            .into_iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .collect())
    }

    /// Files a `pending` report against an existing tank.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the actor is not active, the tank does not
    /// exist, or the description is blank.
    pub fn submit(
        &self,
        actor: &User,
        input: NewReport,
        now: DateTime<Utc>,
    ) -> Result<Report, ServiceError> {
        require_role(actor, Action::SubmitReport)?;
        let description = input.description.trim();
        if description.is_empty() {
            return Err(DomainError::InvalidInput("description is required".into()).into());
        }
        let tank = self.tanks.get_tank(&input.tank_id)?;
        let existing = self.reports.list_reports()?;

        let report = Report {
            id: next_id(existing.iter().map(|r| r.id.as_str())),
            tank_id: tank.id,
            tank_name: tank.name,
            submitted_by: actor.id.clone(),
            submitted_by_name: actor.full_name.clone(),
            report_type: input.report_type,
            description: description.to_string(),
            photo_url: input.photo_url.filter(|url| !url.trim().is_empty()),
            status: ReportStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            resolution_notes: None,
            created_at: now,
        };
        self.reports.insert_report(&report)?;
        info!(report = %report.id, tank = %report.tank_name, "report submitted");
        Ok(report)
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the report does not exist or the review
    /// cannot start.
    pub fn start_review(
        &self,
        id: &str,
        actor: &User,
        now: DateTime<Utc>,
    ) -> Result<Report, ServiceError> {
        self.apply(id, |report| report.start_review(actor, now))
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the report does not exist, notes are blank,
    /// or the actor may not resolve.
    pub fn resolve(
        &self,
        id: &str,
        actor: &User,
        notes: &str,
        now: DateTime<Utc>,
    ) -> Result<Report, ServiceError> {
        self.apply(id, |report| report.resolve(actor, notes, now))
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the report does not exist or the actor may
    /// not dismiss.
    pub fn dismiss(
        &self,
        id: &str,
        actor: &User,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Report, ServiceError> {
        self.apply(id, |report| report.dismiss(actor, notes, now))
    }

    fn apply(
        &self,
        id: &str,
        transition: impl FnOnce(&Report) -> Result<Report, DomainError>,
    ) -> Result<Report, ServiceError> {
        let current = self.reports.get_report(id)?;
        let updated = transition(&current)?;
        self.reports.update_report(&updated)?;
        info!(report = %id, from = %current.status, to = %updated.status, "report updated");
        Ok(updated)
    }
}
