//! Synthetic world used by every invocation: a fixed registry plus jittered
//! hourly readings.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use tracing::debug;

use crate::domain::entities::alert::{Acknowledgement, Alert, AlertType, TriggeredParameter};
use crate::domain::entities::maintenance::{MaintenanceLog, MaintenanceStatus, MaintenanceType};
use crate::domain::entities::reading::SensorReading;
use crate::domain::entities::report::{Report, ReportStatus, ReportType};
use crate::domain::entities::sensor::{SensorHealth, SensorStatus};
use crate::domain::entities::tank::{RiskLevel, TankStatus, WaterTank};
use crate::domain::entities::user::{User, UserStatus};
use crate::domain::ports::store::{
    AlertStore, MaintenanceStore, ReadingStore, ReportStore, StoreError, UserStore,
};
use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::role::Role;
use crate::domain::value_objects::severity::Severity;
use crate::infrastructure::persistence::in_memory_store::InMemoryStore;

/// Central values a tank's readings jitter around.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Baseline {
    ph: f64,
    turbidity: f64,
    tds: f64,
    temperature: f64,
}

const HEALTHY: Baseline = Baseline {
    ph: 7.2,
    turbidity: 2.0,
    tds: 350.0,
    temperature: 22.0,
};
const ELEVATED: Baseline = Baseline {
    ph: 8.8,
    turbidity: 7.0,
    tds: 520.0,
    temperature: 28.0,
};
const OUT_OF_RANGE: Baseline = Baseline {
    ph: 9.2,
    turbidity: 12.0,
    tds: 850.0,
    temperature: 32.0,
};

fn baseline_for(tank_id: &str) -> Baseline {
    match tank_id {
        "2" => ELEVATED,
        "4" => OUT_OF_RANGE,
        _ => HEALTHY,
    }
}

/// Generates `hours` hourly readings for a tank ending at `now`, oldest first.
///
/// Reading ids count hours back from `now`, so the latest reading is always
/// `reading-<tank>-0`.
pub fn generate_readings<R: Rng + ?Sized>(
    tank_id: &str,
    hours: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SensorReading> {
    let base = baseline_for(tank_id);
    let mut readings: Vec<SensorReading> = (0..hours)
        .map(|i| SensorReading {
            id: format!("reading-{tank_id}-{i}"),
            tank_id: tank_id.to_string(),
            ph: base.ph + rng.gen_range(-0.25..=0.25),
            turbidity: (base.turbidity + rng.gen_range(-1.0..=1.0)).max(0.0),
            tds: (base.tds + rng.gen_range(-25.0..=25.0)).max(0.0),
            temperature: base.temperature + rng.gen_range(-1.5..=1.5),
            timestamp: now - Duration::hours(i64::from(i)),
        })
        .collect();
    readings.reverse();
    readings
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    date(year, month, day).and_time(chrono::NaiveTime::MIN).and_utc()
}

#[must_use]
pub fn tanks() -> Vec<WaterTank> {
    let tank = |id: &str,
                name: &str,
                location: &str,
                (latitude, longitude): (f64, f64),
                capacity_liters: u32,
                installation_date: NaiveDate,
                status: TankStatus,
                risk_level: RiskLevel| WaterTank {
        id: id.into(),
        name: name.into(),
        location_name: location.into(),
        latitude,
        longitude,
        capacity_liters,
        installation_date,
        status,
        risk_level,
    };
    vec![
        tank(
            "1",
            "Tank 001A",
            "Manivong Primary School",
            (-1.3133, 36.789),
            5000,
            date(2023, 1, 15),
            TankStatus::Active,
            RiskLevel::Low,
        ),
        tank(
            "2",
            "Tank 002B",
            "Maythany Community Center",
            (-1.2611, 36.8578),
            10000,
            date(2023, 3, 20),
            TankStatus::Active,
            RiskLevel::High,
        ),
        tank(
            "3",
            "Tank 003C",
            "Hinherb Health Clinic",
            (-1.3028, 36.8833),
            7500,
            date(2023, 5, 10),
            TankStatus::Active,
            RiskLevel::Medium,
        ),
        tank(
            "4",
            "Tank 004D",
            "Xokxay Market",
            (-1.2833, 36.75),
            6000,
            date(2023, 7, 1),
            TankStatus::Maintenance,
            RiskLevel::Critical,
        ),
    ]
}

#[must_use]
pub fn users() -> Vec<User> {
    let user = |id: &str, email: &str, name: &str, role: Role, created_at| User {
        id: id.into(),
        email: email.into(),
        full_name: name.into(),
        role,
        status: UserStatus::Active,
        created_at,
    };
    vec![
        user(
            "1",
            "admin@waterquality.org",
            "Admin User",
            Role::Admin,
            midnight(2023, 1, 1),
        ),
        user(
            "2",
            "field.officer@waterquality.org",
            "Jane Kamau",
            Role::FieldOfficer,
            midnight(2023, 2, 15),
        ),
        user(
            "3",
            "observer@waterquality.org",
            "John Ochieng",
            Role::Observer,
            midnight(2023, 3, 20),
        ),
    ]
}

fn triggered(parameter: Parameter, value: f64, threshold: &str, severity: Severity) -> TriggeredParameter {
    TriggeredParameter {
        parameter,
        value,
        threshold: threshold.into(),
        severity,
    }
}

#[must_use]
pub fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert {
            id: "1".into(),
            tank_id: "2".into(),
            tank_name: "Tank 002B".into(),
            location_name: "Maythany Community Center".into(),
            alert_type: AlertType::Single(Parameter::Ph),
            severity: Severity::Warning,
            message: "pH level exceeds warning threshold".into(),
            parameters_triggered: vec![triggered(Parameter::Ph, 8.7, "8.5 max", Severity::Warning)],
            acknowledgement: None,
            created_at: now - Duration::hours(2),
        },
        Alert {
            id: "2".into(),
            tank_id: "4".into(),
            tank_name: "Tank 004D".into(),
            location_name: "Xokxay Market".into(),
            alert_type: AlertType::Multiple,
            severity: Severity::Critical,
            message: "Multiple parameters exceed critical thresholds".into(),
            parameters_triggered: vec![
                triggered(Parameter::Ph, 9.2, "9.0 max", Severity::Critical),
                triggered(Parameter::Turbidity, 12.3, "10 NTU max", Severity::Critical),
                triggered(Parameter::Temperature, 33.0, "30°C max", Severity::Warning),
            ],
            acknowledgement: None,
            created_at: now - Duration::minutes(30),
        },
        Alert {
            id: "3".into(),
            tank_id: "3".into(),
            tank_name: "Tank 003C".into(),
            location_name: "Hinherb Health Clinic".into(),
            alert_type: AlertType::Single(Parameter::Turbidity),
            severity: Severity::Warning,
            message: "Turbidity level elevated".into(),
            parameters_triggered: vec![triggered(
                Parameter::Turbidity,
                5.8,
                "5 NTU max",
                Severity::Warning,
            )],
            acknowledgement: Some(Acknowledgement {
                by: "Jane Kamau".into(),
                at: now - Duration::hours(1),
            }),
            created_at: now - Duration::hours(5),
        },
    ]
}

#[must_use]
pub fn reports(now: DateTime<Utc>) -> Vec<Report> {
    vec![
        Report {
            id: "1".into(),
            tank_id: "2".into(),
            tank_name: "Tank 002B".into(),
            submitted_by: "2".into(),
            submitted_by_name: "Jane Kamau".into(),
            report_type: ReportType::DirtyWater,
            description: "Water appears cloudy and has unusual odor. Community members reporting stomach issues.".into(),
            photo_url: None,
            status: ReportStatus::UnderReview,
            reviewed_by: None,
            reviewed_at: None,
            resolution_notes: None,
            created_at: now - Duration::hours(3),
        },
        Report {
            id: "2".into(),
            tank_id: "4".into(),
            tank_name: "Tank 004D".into(),
            submitted_by: "3".into(),
            submitted_by_name: "John Ochieng".into(),
            report_type: ReportType::BrokenFilter,
            description: "Primary filtration unit appears damaged. Water flow is reduced significantly.".into(),
            photo_url: Some("https://images.pexels.com/photos/3825517/pexels-photo-3825517.jpeg".into()),
            status: ReportStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            resolution_notes: None,
            created_at: now - Duration::hours(6),
        },
        Report {
            id: "3".into(),
            tank_id: "1".into(),
            tank_name: "Tank 001A".into(),
            submitted_by: "2".into(),
            submitted_by_name: "Jane Kamau".into(),
            report_type: ReportType::Infrastructure,
            description: "Crack observed in tank exterior wall. Requires immediate inspection.".into(),
            photo_url: None,
            status: ReportStatus::Resolved,
            reviewed_by: Some("Admin User".into()),
            reviewed_at: Some(now - Duration::hours(12)),
            resolution_notes: Some(
                "Inspection completed. Minor surface crack, no structural damage. Sealed and monitored.".into(),
            ),
            created_at: now - Duration::hours(24),
        },
    ]
}

#[must_use]
pub fn maintenance_logs(now: DateTime<Utc>) -> Vec<MaintenanceLog> {
    vec![
        MaintenanceLog {
            id: "1".into(),
            tank_id: "2".into(),
            tank_name: "Tank 002B".into(),
            maintenance_type: MaintenanceType::SensorCalibration,
            description: "Quarterly calibration of all sensors".into(),
            performed_by: "2".into(),
            performed_by_name: "Jane Kamau".into(),
            scheduled_date: (now + Duration::days(2)).date_naive(),
            completed_date: None,
            status: MaintenanceStatus::Scheduled,
            cost: 150.0,
            notes: None,
        },
        MaintenanceLog {
            id: "2".into(),
            tank_id: "4".into(),
            tank_name: "Tank 004D".into(),
            maintenance_type: MaintenanceType::FilterReplacement,
            description: "Replace primary and secondary filters".into(),
            performed_by: "2".into(),
            performed_by_name: "Jane Kamau".into(),
            scheduled_date: (now - Duration::days(1)).date_naive(),
            completed_date: None,
            status: MaintenanceStatus::InProgress,
            cost: 450.0,
            notes: Some("Filters severely clogged. Recommend more frequent maintenance.".into()),
        },
        MaintenanceLog {
            id: "3".into(),
            tank_id: "3".into(),
            tank_name: "Tank 003C".into(),
            maintenance_type: MaintenanceType::TankCleaning,
            description: "Deep cleaning and sanitization".into(),
            performed_by: "2".into(),
            performed_by_name: "Jane Kamau".into(),
            scheduled_date: (now - Duration::days(7)).date_naive(),
            completed_date: Some(now - Duration::days(6)),
            status: MaintenanceStatus::Completed,
            cost: 300.0,
            notes: Some("Cleaning completed successfully. Tank back in service.".into()),
        },
    ]
}

#[must_use]
pub fn sensors(now: DateTime<Utc>) -> Vec<SensorStatus> {
    let sensor = |id: &str,
                  tank_id: &str,
                  tank_name: &str,
                  sensor_type: Parameter,
                  status: SensorHealth,
                  (last_days_ago, next_days_ahead): (i64, i64),
                  battery_level: u8,
                  signal_strength: u8| SensorStatus {
        id: id.into(),
        tank_id: tank_id.into(),
        tank_name: tank_name.into(),
        sensor_type,
        status,
        last_calibration: Some(now - Duration::days(last_days_ago)),
        next_calibration: Some(now + Duration::days(next_days_ahead)),
        battery_level,
        signal_strength,
    };
    vec![
        sensor("1", "1", "Tank 001A", Parameter::Ph, SensorHealth::Operational, (30, 60), 85, 95),
        sensor(
            "2",
            "2",
            "Tank 002B",
            Parameter::Turbidity,
            SensorHealth::NeedsCalibration,
            (95, -5),
            72,
            88,
        ),
        sensor("3", "4", "Tank 004D", Parameter::Ph, SensorHealth::Faulty, (120, -30), 45, 60),
        sensor(
            "4",
            "3",
            "Tank 003C",
            Parameter::Temperature,
            SensorHealth::Operational,
            (20, 70),
            92,
            100,
        ),
    ]
}

/// Fills `store` with the registry and `hours` of readings per tank.
///
/// # Errors
///
/// Returns `StoreError` if any insert fails, e.g. when seeding twice.
pub fn seed_store<R: Rng + ?Sized>(
    store: &InMemoryStore,
    now: DateTime<Utc>,
    hours: u32,
    rng: &mut R,
) -> Result<(), StoreError> {
    let tanks = tanks();
    for tank in &tanks {
        store.add_tank(tank)?;
        store.save_readings(&generate_readings(&tank.id, hours, now, rng))?;
    }
    for user in users() {
        store.insert_user(&user)?;
    }
    for alert in alerts(now) {
        store.insert_alert(&alert)?;
    }
    for report in reports(now) {
        store.insert_report(&report)?;
    }
    for log in maintenance_logs(now) {
        store.insert_log(&log)?;
    }
    for sensor in sensors(now) {
        store.add_sensor(&sensor)?;
    }
    debug!(tanks = tanks.len(), hours, "seeded in-memory store");
    Ok(())
}
