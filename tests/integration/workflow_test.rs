#![allow(clippy::expect_used)]

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use namjai::application::config::{AppConfig, ThresholdConfig};
use namjai::application::services::admin::AdminService;
use namjai::application::services::assistant::Assistant;
use namjai::application::services::maintenance::{MaintenanceService, NewMaintenance};
use namjai::application::services::reports::{NewReport, ReportService};
use namjai::domain::access::{has_role, require_role, Action};
use namjai::domain::entities::maintenance::{MaintenanceStatus, MaintenanceType};
use namjai::domain::entities::report::{ReportStatus, ReportType};
use namjai::domain::entities::user::{User, UserStatus};
use namjai::domain::errors::DomainError;
use namjai::domain::value_objects::parameter::Parameter;
use namjai::domain::value_objects::role::Role;
use namjai::domain::value_objects::thresholds::ParameterThreshold;
use namjai::infrastructure::persistence::InMemoryStore;
use namjai::infrastructure::seed;

fn seeded() -> InMemoryStore {
    let store = InMemoryStore::default();
    seed::seed_store(&store, Utc::now(), 12, &mut StdRng::seed_from_u64(7)).expect("seed");
    store
}

fn user(role: Role) -> User {
    seed::users()
        .into_iter()
        .find(|u| u.role == role)
        .expect("seeded user")
}

fn is_denied(err: Option<&DomainError>) -> bool {
    matches!(err, Some(DomainError::PermissionDenied { .. }))
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

#[test]
fn role_table_gates_every_action() {
    let admin = user(Role::Admin);
    let officer = user(Role::FieldOfficer);
    let observer = user(Role::Observer);

    for action in [Action::AcknowledgeAlert, Action::ScheduleMaintenance, Action::ReviewReport] {
        assert!(require_role(&admin, action).is_ok());
        assert!(require_role(&officer, action).is_ok());
        assert!(require_role(&observer, action).is_err());
    }
    for action in [Action::ResolveReport, Action::ManageUsers, Action::EditThresholds] {
        assert!(require_role(&admin, action).is_ok());
        assert!(require_role(&officer, action).is_err());
    }
    assert!(require_role(&observer, Action::SubmitReport).is_ok());

    let mut suspended = officer;
    suspended.status = UserStatus::Inactive;
    assert!(!has_role(&suspended, &[Role::FieldOfficer]));
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn report_goes_from_submission_to_resolution() {
    let store = seeded();
    let service = ReportService::new(&store, &store);
    let now = Utc::now();

    let report = service
        .submit(
            &user(Role::Observer),
            NewReport {
                tank_id: "2".into(),
                report_type: ReportType::DirtyWater,
                description: "  Water smells of diesel  ".into(),
                photo_url: Some("   ".into()),
            },
            now,
        )
        .expect("submit");
    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.description, "Water smells of diesel");
    assert_eq!(report.photo_url, None);
    assert_eq!(report.tank_name, "Tank 002B");

    let officer = user(Role::FieldOfficer);
    let admin = user(Role::Admin);
    let err = service
        .resolve(&report.id, &officer, "flushed", now)
        .expect_err("officer cannot resolve");
    assert!(is_denied(err.domain()));

    service.start_review(&report.id, &officer, now).expect("review");
    let resolved = service
        .resolve(&report.id, &admin, "Flushed and refilled", now)
        .expect("resolve");
    assert_eq!(resolved.status, ReportStatus::Resolved);
    assert_eq!(resolved.resolution_notes.as_deref(), Some("Flushed and refilled"));

    assert!(service.dismiss(&report.id, &admin, None, now).is_err());
    let pending = service.list(Some(ReportStatus::Pending)).expect("list");
    assert!(pending.iter().all(|r| r.id != report.id));
}

#[test]
fn report_against_unknown_tank_is_rejected() {
    let store = seeded();
    let service = ReportService::new(&store, &store);
    let before = service.list(None).expect("list").len();
    let result = service.submit(
        &user(Role::FieldOfficer),
        NewReport {
            tank_id: "99".into(),
            report_type: ReportType::Infrastructure,
            description: "Cracked lid".into(),
            photo_url: None,
        },
        Utc::now(),
    );
    assert!(result.is_err());
    assert_eq!(service.list(None).expect("list").len(), before);
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[test]
fn maintenance_lifecycle_and_cancellation() {
    let store = seeded();
    let service = MaintenanceService::new(&store, &store, &store);
    let officer = user(Role::FieldOfficer);
    let now = Utc::now();

    let log = service
        .schedule(
            &officer,
            NewMaintenance {
                tank_id: "1".into(),
                maintenance_type: MaintenanceType::FilterReplacement,
                description: "Swap sediment filter".into(),
                scheduled_date: NaiveDate::from_ymd_opt(2025, 5, 2).expect("date"),
                cost: 40.0,
                notes: None,
            },
        )
        .expect("schedule");
    assert_eq!(log.status, MaintenanceStatus::Scheduled);

    let started = service
        .transition(&log.id, &officer, MaintenanceStatus::InProgress, now)
        .expect("start");
    assert!(started.completed_date.is_none());
    let cancelled = service
        .transition(&log.id, &officer, MaintenanceStatus::Cancelled, now)
        .expect("cancel");
    assert!(cancelled.status.is_terminal());
    assert!(service
        .transition(&log.id, &officer, MaintenanceStatus::InProgress, now)
        .is_err());

    let err = service
        .transition("1", &user(Role::Observer), MaintenanceStatus::InProgress, now)
        .expect_err("observer");
    assert!(is_denied(err.domain()));
}

#[test]
fn overdue_sensors_need_attention() {
    let store = seeded();
    let service = MaintenanceService::new(&store, &store, &store);
    let now = Utc::now();
    let flagged: Vec<_> = service
        .sensors()
        .expect("sensors")
        .into_iter()
        .filter(|s| s.is_calibration_overdue(now))
        .map(|s| s.id)
        .collect();
    assert_eq!(flagged, vec!["2".to_string(), "3".to_string()]);
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

#[test]
fn admin_manages_users_but_not_itself() {
    let store = seeded();
    let service = AdminService::new(&store, &store);
    let admin = user(Role::Admin);

    let added = service
        .add_user(&admin, "noy@waterquality.org", "Noy Phommachanh", Role::FieldOfficer, Utc::now())
        .expect("add");
    assert!(service
        .add_user(&admin, "NOY@waterquality.org", "Duplicate", Role::Observer, Utc::now())
        .is_err());

    let toggled = service.toggle_user_status(&admin, &added.id).expect("toggle");
    assert_eq!(toggled.status, UserStatus::Inactive);
    assert!(service.toggle_user_status(&admin, &admin.id).is_err());
    assert!(service.remove_user(&admin, &admin.id).is_err());
    service.remove_user(&admin, &added.id).expect("remove");
    assert_eq!(service.list_users().expect("users").len(), 3);
}

#[test]
fn threshold_edits_flow_into_config_and_assistant() {
    let store = seeded();
    let service = AdminService::new(&store, &store);
    let band = ParameterThreshold::new(Parameter::Turbidity, 0.0, 4.0, 0.0, 8.0);

    assert!(service.update_threshold(&user(Role::FieldOfficer), band).is_err());
    let malformed = ParameterThreshold::new(Parameter::Turbidity, 0.0, 9.0, 0.0, 8.0);
    assert!(service.update_threshold(&user(Role::Admin), malformed).is_err());

    let updated = service
        .update_threshold(&user(Role::Admin), band)
        .expect("update");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let config = AppConfig {
        thresholds: ThresholdConfig::from(&updated),
        ..AppConfig::default()
    };
    config.save_to(&path).expect("save");
    let reloaded = AppConfig::load_from(&path).expect("load");
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.threshold_set().expect("bands"), updated);

    let answer = Assistant::new(&updated).answer("Why is the water cloudy?");
    assert!(answer.contains("0 NTU – 4 NTU"));
}
