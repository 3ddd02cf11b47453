#![allow(clippy::expect_used)]

use chrono::Utc;

use namjai::application::services::admin::AdminService;
use namjai::application::services::monitor::MonitorService;
use namjai::domain::entities::alert::AlertFilter;
use namjai::domain::entities::reading::SensorReading;
use namjai::domain::entities::tank::WaterTank;
use namjai::domain::entities::user::User;
use namjai::domain::errors::DomainError;
use namjai::domain::ports::store::{AlertStore, ReadingStore, UserStore};
use namjai::domain::value_objects::parameter::Parameter;
use namjai::domain::value_objects::role::Role;
use namjai::domain::value_objects::severity::Severity;
use namjai::domain::value_objects::thresholds::{ParameterThreshold, ThresholdSet};
use namjai::infrastructure::persistence::InMemoryStore;
use namjai::infrastructure::seed;

// ---------------------------------------------------------------------------
// Fixture loader
// ---------------------------------------------------------------------------

fn load_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

/// A store holding the fixture tank and the given reading history.
fn store_with(readings: &str, thresholds: ThresholdSet) -> InMemoryStore {
    let store = InMemoryStore::new(thresholds);
    let tank: WaterTank = load_fixture("tank_hinherb.json");
    store.add_tank(&tank).expect("tank");
    let readings: Vec<SensorReading> = load_fixture(readings);
    store.save_readings(&readings).expect("readings");
    for user in seed::users() {
        store.insert_user(&user).expect("user");
    }
    store
}

fn user(role: Role) -> User {
    seed::users()
        .into_iter()
        .find(|u| u.role == role)
        .expect("seeded user")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn scan_stores_alert_for_contaminated_tank() {
    let store = store_with("readings_contaminated.json", ThresholdSet::default());
    let monitor = MonitorService::new(&store, &store, &store, &store);

    let scan = monitor.scan_tank("7").expect("scan");
    assert_eq!(scan.overall, Severity::Critical);
    assert!(scan.new_alert);
    let alert = scan.alert.expect("alert");
    assert_eq!(alert.id, "alert-r7-3");
    assert_eq!(alert.parameters_triggered.len(), 3);

    let stored = store.get_alert("alert-r7-3").expect("stored");
    assert_eq!(stored, alert);
    let counts = monitor.alert_counts().expect("counts");
    assert_eq!((counts.active, counts.active_critical), (1, 1));
}

#[test]
fn rescanning_the_same_reading_is_idempotent() {
    let store = store_with("readings_contaminated.json", ThresholdSet::default());
    let monitor = MonitorService::new(&store, &store, &store, &store);

    assert!(monitor.scan_tank("7").expect("first").new_alert);
    let again = monitor.scan_tank("7").expect("second");
    assert!(!again.new_alert);
    assert!(again.alert.is_some());
    assert_eq!(store.get_alerts().expect("alerts").len(), 1);
}

#[test]
fn acknowledged_alert_survives_rescan() {
    let store = store_with("readings_contaminated.json", ThresholdSet::default());
    let monitor = MonitorService::new(&store, &store, &store, &store);
    monitor.scan_tank("7").expect("scan");

    let officer = user(Role::FieldOfficer);
    let acked = monitor
        .acknowledge("alert-r7-3", &officer, Utc::now())
        .expect("ack");
    assert_eq!(acked.acknowledged_by(), Some("Jane Kamau"));

    monitor.scan_all().expect("rescan");
    let stored = store.get_alert("alert-r7-3").expect("stored");
    assert!(stored.is_acknowledged());
    assert!(monitor
        .list_alerts(AlertFilter::Active)
        .expect("active")
        .is_empty());
    assert_eq!(monitor.list_alerts(AlertFilter::Acknowledged).expect("acked").len(), 1);
}

#[test]
fn clean_tank_raises_nothing_until_bands_tighten() {
    let store = store_with("readings_clean.json", ThresholdSet::default());
    let monitor = MonitorService::new(&store, &store, &store, &store);

    let scan = monitor.scan_tank("7").expect("scan");
    assert_eq!(scan.overall, Severity::Normal);
    assert!(scan.alert.is_none());

    let admin = AdminService::new(&store, &store);
    admin
        .update_threshold(
            &user(Role::Admin),
            ParameterThreshold::new(Parameter::Temperature, 10.0, 22.0, 5.0, 30.0),
        )
        .expect("tighten");

    let scan = monitor.scan_tank("7").expect("rescan");
    assert_eq!(scan.overall, Severity::Warning);
    let alert = scan.alert.expect("alert");
    assert_eq!(alert.message, "Temperature above warning threshold");
}

#[test]
fn overview_reports_latest_metrics() {
    let store = store_with("readings_contaminated.json", ThresholdSet::default());
    let monitor = MonitorService::new(&store, &store, &store, &store);
    monitor.scan_all().expect("scan");

    let overview = monitor.overview("7").expect("overview");
    assert_eq!(overview.metrics.len(), 4);
    assert_eq!(overview.overall, Severity::Critical);
    assert_eq!(overview.active_alerts, 1);
    let ph = overview
        .metrics
        .iter()
        .find(|m| m.parameter == Parameter::Ph)
        .expect("ph metric");
    assert!((ph.value - 9.2).abs() < f64::EPSILON);
    assert_eq!(ph.severity, Severity::Critical);
}

#[test]
fn unknown_tank_and_missing_band_fail() {
    let store = store_with("readings_clean.json", ThresholdSet::empty());
    let monitor = MonitorService::new(&store, &store, &store, &store);

    assert!(monitor.scan_tank("404").is_err());
    let err = monitor.scan_tank("7").expect_err("no bands");
    assert!(matches!(err.domain(), Some(DomainError::MissingThreshold(_))));
    assert!(store.get_alerts().expect("alerts").is_empty());
}

#[test]
fn seeded_network_scans_every_tank() {
    let store = InMemoryStore::default();
    seed::seed_store(
        &store,
        Utc::now(),
        24,
        &mut <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(42),
    )
    .expect("seed");
    let monitor = MonitorService::new(&store, &store, &store, &store);

    let scans = monitor.scan_all().expect("scan");
    assert_eq!(scans.len(), 4);
    assert!(scans.iter().all(|s| s.reading.is_some()));
    for scan in &scans {
        assert_eq!(scan.alert.is_some(), scan.overall.is_alerting());
    }
}
