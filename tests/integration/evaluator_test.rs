#![allow(clippy::expect_used)]

use chrono::{Duration, TimeZone, Utc};

use namjai::domain::entities::alert::AlertType;
use namjai::domain::entities::reading::SensorReading;
use namjai::domain::entities::tank::WaterTank;
use namjai::domain::errors::DomainError;
use namjai::domain::rules::{analyze, assess, classify, derive_alert, overall, trend};
use namjai::domain::value_objects::parameter::Parameter;
use namjai::domain::value_objects::severity::Severity;
use namjai::domain::value_objects::thresholds::{ParameterThreshold, ThresholdSet};

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

fn tank() -> WaterTank {
    load_fixture("tank_hinherb.json")
}

fn latest(name: &str) -> SensorReading {
    let readings: Vec<SensorReading> = load_fixture(name);
    readings.last().cloned().expect("fixture has readings")
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn ph_between_warning_and_critical_edges_is_warning() {
    let thresholds = ThresholdSet::default();
    assert_eq!(
        classify(Parameter::Ph, 8.7, &thresholds).expect("classify"),
        Severity::Warning
    );
}

#[test]
fn ph_outside_critical_band_is_critical() {
    let thresholds = ThresholdSet::default();
    assert_eq!(
        classify(Parameter::Ph, 9.2, &thresholds).expect("classify"),
        Severity::Critical
    );
}

#[test]
fn band_edges_are_inclusive() {
    let thresholds = ThresholdSet::default();
    let cases = [
        (Parameter::Ph, 6.5, Severity::Normal),
        (Parameter::Ph, 8.5, Severity::Normal),
        (Parameter::Ph, 6.0, Severity::Warning),
        (Parameter::Ph, 9.0, Severity::Warning),
        (Parameter::Turbidity, 5.0, Severity::Normal),
        (Parameter::Turbidity, 10.0, Severity::Warning),
        (Parameter::Turbidity, 10.1, Severity::Critical),
        (Parameter::Temperature, 4.9, Severity::Critical),
        (Parameter::Tds, 1000.0, Severity::Warning),
    ];
    for (parameter, value, expected) in cases {
        assert_eq!(
            classify(parameter, value, &thresholds).expect("classify"),
            expected,
            "{parameter} = {value}"
        );
    }
}

#[test]
fn unreadable_value_is_critical() {
    let thresholds = ThresholdSet::default();
    assert_eq!(
        classify(Parameter::Tds, f64::NAN, &thresholds).expect("classify"),
        Severity::Critical
    );
}

#[test]
fn missing_band_is_a_configuration_error() {
    let err = classify(Parameter::Ph, 7.0, &ThresholdSet::empty()).expect_err("no band");
    assert!(matches!(err, DomainError::MissingThreshold(Parameter::Ph)));
    assert!(err.is_configuration());
}

#[test]
fn custom_band_changes_classification() {
    let mut thresholds = ThresholdSet::default();
    thresholds.set(ParameterThreshold::new(Parameter::Ph, 7.0, 8.0, 6.5, 8.5));
    assert_eq!(
        classify(Parameter::Ph, 8.2, &thresholds).expect("classify"),
        Severity::Warning
    );
    assert_eq!(
        classify(Parameter::Ph, 8.7, &thresholds).expect("classify"),
        Severity::Critical
    );
}

// ---------------------------------------------------------------------------
// Alert derivation
// ---------------------------------------------------------------------------

#[test]
fn contaminated_reading_raises_multiple_critical_alert() {
    let tank = tank();
    let reading = latest("readings_contaminated.json");
    let alert = derive_alert(&tank, &reading, &ThresholdSet::default())
        .expect("derive")
        .expect("alert raised");

    assert_eq!(alert.severity, Severity::Critical);
    assert_eq!(alert.alert_type, AlertType::Multiple);
    assert_eq!(alert.parameters_triggered.len(), 3);
    assert_eq!(alert.id, "alert-r7-3");
    assert_eq!(alert.tank_name, "Tank 007G");
    assert!(!alert.is_acknowledged());

    let triggered: Vec<_> = alert
        .parameters_triggered
        .iter()
        .map(|t| (t.parameter, t.severity, t.threshold.as_str()))
        .collect();
    assert_eq!(
        triggered,
        vec![
            (Parameter::Ph, Severity::Critical, "9.0 max"),
            (Parameter::Turbidity, Severity::Critical, "10 NTU max"),
            (Parameter::Temperature, Severity::Warning, "30°C max"),
        ]
    );
}

#[test]
fn clean_reading_raises_nothing() {
    let reading = latest("readings_clean.json");
    let alert = derive_alert(&tank(), &reading, &ThresholdSet::default()).expect("derive");
    assert!(alert.is_none());

    let assessments = assess(&reading, &ThresholdSet::default()).expect("assess");
    assert_eq!(assessments.len(), 4);
    assert_eq!(overall(&assessments), Severity::Normal);
}

#[test]
fn deriving_twice_yields_the_same_alert() {
    let tank = tank();
    let reading = latest("readings_contaminated.json");
    let thresholds = ThresholdSet::default();
    let first = derive_alert(&tank, &reading, &thresholds).expect("derive");
    let second = derive_alert(&tank, &reading, &thresholds).expect("derive");
    assert_eq!(first, second);
}

#[test]
fn batch_analysis_puts_critical_first() {
    let contaminated = tank();
    let mut warning_tank = tank();
    warning_tank.id = "8".into();
    warning_tank.name = "Tank 008H".into();
    let mut clean_tank = tank();
    clean_tank.id = "9".into();

    let critical = latest("readings_contaminated.json");
    let mut warning = latest("readings_clean.json");
    warning.id = "r8-1".into();
    warning.tank_id = "8".into();
    warning.tds = 650.0;
    warning.timestamp = critical.timestamp + Duration::hours(1);
    let mut clean = latest("readings_clean.json");
    clean.tank_id = "9".into();

    let alerts = analyze(
        [
            (&warning_tank, &warning),
            (&clean_tank, &clean),
            (&contaminated, &critical),
        ],
        &ThresholdSet::default(),
    )
    .expect("analyze");

    let order: Vec<_> = alerts.iter().map(|a| (a.tank_id.as_str(), a.severity)).collect();
    assert_eq!(order, vec![("7", Severity::Critical), ("8", Severity::Warning)]);
    assert_eq!(alerts[1].alert_type, AlertType::Single(Parameter::Tds));
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[test]
fn short_history_has_no_trend() {
    let readings: Vec<SensorReading> = load_fixture("readings_contaminated.json");
    assert_eq!(trend(&readings, Parameter::Ph), None);
}

#[test]
fn trend_compares_consecutive_windows() {
    let start = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).single().expect("time");
    let template = latest("readings_clean.json");
    let readings: Vec<SensorReading> = (0..12)
        .map(|i| SensorReading {
            id: format!("r7-{i}"),
            ph: if i < 6 { 7.0 } else { 7.7 },
            tds: 250.0,
            timestamp: start + Duration::hours(i),
            ..template.clone()
        })
        .collect();

    let ph = trend(&readings, Parameter::Ph).expect("ph trend");
    assert!((ph - 10.0).abs() < 1e-9);
    let tds = trend(&readings, Parameter::Tds).expect("tds trend");
    assert!(tds.abs() < 1e-9);
}
