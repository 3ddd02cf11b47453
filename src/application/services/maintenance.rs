use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use super::{next_id, ServiceError};
use crate::domain::access::{require_role, Action};
use crate::domain::entities::maintenance::{MaintenanceLog, MaintenanceStatus, MaintenanceType};
use crate::domain::entities::sensor::SensorStatus;
use crate::domain::entities::user::User;
use crate::domain::errors::DomainError;
use crate::domain::ports::store::{MaintenanceStore, SensorStore, TankStore};

/// Input for scheduling a maintenance task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenance {
    pub tank_id: String,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub scheduled_date: NaiveDate,
    pub cost: f64,
    pub notes: Option<String>,
}

/// Maintenance scheduling and sensor health.
pub struct MaintenanceService<'a> {
    logs: &'a dyn MaintenanceStore,
    tanks: &'a dyn TankStore,
    sensors: &'a dyn SensorStore,
}

impl<'a> MaintenanceService<'a> {
    #[must_use]
    pub fn new(
        logs: &'a dyn MaintenanceStore,
        tanks: &'a dyn TankStore,
        sensors: &'a dyn SensorStore,
    ) -> Self {
        Self {
            logs,
            tanks,
            sensors,
        }
    }

    /// Logs by scheduled date, latest first, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn list(
        &self,
        status: Option<MaintenanceStatus>,
    ) -> Result<Vec<MaintenanceLog>, ServiceError> {
        Ok(self
            .logs
            .list_logs()?
            .into_iter()
            .filter(|log| status.is_none_or(|s| log.status == s))
            .collect())
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn sensors(&self) -> Result<Vec<SensorStatus>, ServiceError> {
        Ok(self.sensors.list_sensors()?)
    }

    /// Creates a `scheduled` log performed by `actor`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the actor may not schedule, the tank does not
    /// exist, the description is blank, or the cost is negative.
    pub fn schedule(
        &self,
        actor: &User,
        input: NewMaintenance,
    ) -> Result<MaintenanceLog, ServiceError> {
        require_role(actor, Action::ScheduleMaintenance)?;
        let description = input.description.trim();
        if description.is_empty() {
            return Err(DomainError::InvalidInput("description is required".into()).into());
        }
        if !input.cost.is_finite() || input.cost < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "cost must be a non-negative amount, got {}",
                input.cost
            ))
            .into());
        }
        let tank = self.tanks.get_tank(&input.tank_id)?;
        let existing = self.logs.list_logs()?;

        let log = MaintenanceLog {
            id: next_id(existing.iter().map(|l| l.id.as_str())),
            tank_id: tank.id,
            tank_name: tank.name,
            maintenance_type: input.maintenance_type,
            description: description.to_string(),
            performed_by: actor.id.clone(),
            performed_by_name: actor.full_name.clone(),
            scheduled_date: input.scheduled_date,
            completed_date: None,
            status: MaintenanceStatus::Scheduled,
            cost: input.cost,
            notes: input.notes.filter(|n| !n.trim().is_empty()),
        };
        self.logs.insert_log(&log)?;
        info!(log = %log.id, tank = %log.tank_name, kind = %log.maintenance_type, "maintenance scheduled");
        Ok(log)
    }

    /// Moves a log to `next`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the log does not exist, the actor may not
    /// update maintenance, or the transition is not allowed.
    pub fn transition(
        &self,
        id: &str,
        actor: &User,
        next: MaintenanceStatus,
        now: DateTime<Utc>,
    ) -> Result<MaintenanceLog, ServiceError> {
        let current = self.logs.get_log(id)?;
        let updated = current.transition(actor, next, now)?;
        self.logs.update_log(&updated)?;
        info!(log = %id, from = %current.status, to = %next, "maintenance updated");
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::role::Role;
    use crate::infrastructure::persistence::InMemoryStore;
    use crate::infrastructure::seed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::default();
        seed::seed_store(&store, Utc::now(), 1, &mut StdRng::seed_from_u64(0)).expect("seed");
        store
    }

    fn user(role: Role) -> User {
        seed::users()
            .into_iter()
            .find(|u| u.role == role)
            .expect("seeded user")
    }

    fn new_task(cost: f64) -> NewMaintenance {
        NewMaintenance {
            tank_id: "1".into(),
            maintenance_type: MaintenanceType::Inspection,
            description: "Annual inspection".into(),
            scheduled_date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"),
            cost,
            notes: None,
        }
    }

    #[test]
    fn officer_schedules_and_completes() {
        let store = seeded();
        let service = MaintenanceService::new(&store, &store, &store);
        let officer = user(Role::FieldOfficer);

        let log = service.schedule(&officer, new_task(80.0)).expect("schedule");
        assert_eq!(log.id, "4");
        assert_eq!(log.status, MaintenanceStatus::Scheduled);
        assert_eq!(log.performed_by_name, "Jane Kamau");

        let now = Utc::now();
        service
            .transition(&log.id, &officer, MaintenanceStatus::InProgress, now)
            .expect("start");
        let done = service
            .transition(&log.id, &officer, MaintenanceStatus::Completed, now)
            .expect("complete");
        assert_eq!(done.completed_date, Some(now));
        assert_eq!(store.get_log("4").expect("stored"), done);
    }

    #[test]
    fn observer_cannot_schedule() {
        let store = seeded();
        let service = MaintenanceService::new(&store, &store, &store);
        let err = service
            .schedule(&user(Role::Observer), new_task(10.0))
            .expect_err("observer refused");
        assert!(matches!(
            err.domain(),
            Some(DomainError::PermissionDenied { .. })
        ));
        assert_eq!(service.list(None).expect("list").len(), 3);
    }

    #[test]
    fn negative_cost_is_invalid() {
        let store = seeded();
        let service = MaintenanceService::new(&store, &store, &store);
        let err = service
            .schedule(&user(Role::Admin), new_task(-5.0))
            .expect_err("negative cost");
        assert!(matches!(
            err.domain(),
            Some(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn completed_log_cannot_be_cancelled() {
        let store = seeded();
        let service = MaintenanceService::new(&store, &store, &store);
        let before = store.get_log("3").expect("log");
        let err = service
            .transition("3", &user(Role::Admin), MaintenanceStatus::Cancelled, Utc::now())
            .expect_err("terminal");
        assert!(matches!(
            err.domain(),
            Some(DomainError::InvalidTransition { .. })
        ));
        assert_eq!(store.get_log("3").expect("log"), before);
    }

    #[test]
    fn list_filters_and_sensors() {
        let store = seeded();
        let service = MaintenanceService::new(&store, &store, &store);
        let scheduled = service
            .list(Some(MaintenanceStatus::Scheduled))
            .expect("list");
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].id, "1");
        let needing_attention = service
            .sensors()
            .expect("sensors")
            .iter()
            .filter(|s| s.needs_attention())
            .count();
        assert_eq!(needing_attention, 2);
    }
}
