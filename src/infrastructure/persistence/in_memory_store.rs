use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::alert::Alert;
use crate::domain::entities::maintenance::MaintenanceLog;
use crate::domain::entities::reading::SensorReading;
use crate::domain::entities::report::Report;
use crate::domain::entities::sensor::SensorStatus;
use crate::domain::entities::tank::WaterTank;
use crate::domain::entities::user::User;
use crate::domain::ports::store::{
    AlertStore, MaintenanceStore, ReadingStore, ReportStore, SensorStore, StoreError, TankStore,
    ThresholdStore, UserStore,
};
use crate::domain::value_objects::thresholds::{ParameterThreshold, ThresholdSet};

/// Store for the whole monitoring world, held in memory for the lifetime of
/// the process.
pub struct InMemoryStore {
    tanks: Mutex<Vec<WaterTank>>,
    readings: Mutex<Vec<SensorReading>>,
    alerts: Mutex<Vec<Alert>>,
    reports: Mutex<Vec<Report>>,
    maintenance: Mutex<Vec<MaintenanceLog>>,
    sensors: Mutex<Vec<SensorStatus>>,
    users: Mutex<Vec<User>>,
    thresholds: Mutex<ThresholdSet>,
}

impl InMemoryStore {
    /// An empty store using `thresholds`.
    #[must_use]
    pub const fn new(thresholds: ThresholdSet) -> Self {
        Self {
            tanks: Mutex::new(Vec::new()),
            readings: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
            reports: Mutex::new(Vec::new()),
            maintenance: Mutex::new(Vec::new()),
            sensors: Mutex::new(Vec::new()),
            users: Mutex::new(Vec::new()),
            thresholds: Mutex::new(thresholds),
        }
    }

    /// Registers a tank. The registry has no write port; tanks are seeded.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` on a duplicate id.
    pub fn add_tank(&self, tank: &WaterTank) -> Result<(), StoreError> {
        insert(&self.tanks, tank)
    }

    /// Registers a sensor health record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` on a duplicate id.
    pub fn add_sensor(&self, sensor: &SensorStatus) -> Result<(), StoreError> {
        insert(&self.sensors, sensor)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(ThresholdSet::default())
    }
}

/// A record addressed by a string id.
trait Keyed: Clone {
    const KIND: &'static str;
    fn key(&self) -> &str;
}

macro_rules! keyed {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(impl Keyed for $ty {
            const KIND: &'static str = $kind;
            fn key(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed! {
    WaterTank => "tank",
    Alert => "alert",
    Report => "report",
    MaintenanceLog => "maintenance log",
    SensorStatus => "sensor",
    User => "user",
}

fn read<T>(lock: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    lock.lock()
        .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))
}

fn write<T>(lock: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    lock.lock()
        .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))
}

fn not_found<T: Keyed>(id: &str) -> StoreError {
    StoreError::NotFound(format!("{} {id}", T::KIND))
}

fn insert<T: Keyed>(lock: &Mutex<Vec<T>>, item: &T) -> Result<(), StoreError> {
    let mut items = write(lock)?;
    if items.iter().any(|existing| existing.key() == item.key()) {
        return Err(StoreError::AlreadyExists(format!("{} {}", T::KIND, item.key())));
    }
    items.push(item.clone());
    drop(items);
    Ok(())
}

fn update<T: Keyed>(lock: &Mutex<Vec<T>>, item: &T) -> Result<(), StoreError> {
    let mut items = write(lock)?;
    let slot = items
        .iter_mut()
        .find(|existing| existing.key() == item.key())
        .ok_or_else(|| not_found::<T>(item.key()))?;
    *slot = item.clone();
    drop(items);
    Ok(())
}

fn get<T: Keyed>(lock: &Mutex<Vec<T>>, id: &str) -> Result<T, StoreError> {
    read(lock)?
        .iter()
        .find(|item| item.key() == id)
        .cloned()
        .ok_or_else(|| not_found::<T>(id))
}

impl TankStore for InMemoryStore {
    fn list_tanks(&self) -> Result<Vec<WaterTank>, StoreError> {
        Ok(read(&self.tanks)?.clone())
    }

    fn get_tank(&self, id: &str) -> Result<WaterTank, StoreError> {
        get(&self.tanks, id)
    }
}

impl ReadingStore for InMemoryStore {
    fn save_readings(&self, readings: &[SensorReading]) -> Result<(), StoreError> {
        write(&self.readings)?.extend_from_slice(readings);
        Ok(())
    }

    fn readings_for(&self, tank_id: &str) -> Result<Vec<SensorReading>, StoreError> {
        let mut readings: Vec<SensorReading> = read(&self.readings)?
            .iter()
            .filter(|r| r.tank_id == tank_id)
            .cloned()
            .collect();
        readings.sort_by_key(|r| r.timestamp);
        Ok(readings)
    }

    fn latest_reading(&self, tank_id: &str) -> Result<Option<SensorReading>, StoreError> {
        Ok(read(&self.readings)?
            .iter()
            .filter(|r| r.tank_id == tank_id)
            .max_by_key(|r| r.timestamp)
            .cloned())
    }
}

impl AlertStore for InMemoryStore {
    fn insert_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        insert(&self.alerts, alert)
    }

    fn update_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        update(&self.alerts, alert)
    }

    fn get_alert(&self, id: &str) -> Result<Alert, StoreError> {
        get(&self.alerts, id)
    }

    fn get_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        let mut alerts = read(&self.alerts)?.clone();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }
}

impl ReportStore for InMemoryStore {
    fn insert_report(&self, report: &Report) -> Result<(), StoreError> {
        insert(&self.reports, report)
    }

    fn update_report(&self, report: &Report) -> Result<(), StoreError> {
        update(&self.reports, report)
    }

    fn get_report(&self, id: &str) -> Result<Report, StoreError> {
        get(&self.reports, id)
    }

    fn list_reports(&self) -> Result<Vec<Report>, StoreError> {
        let mut reports = read(&self.reports)?.clone();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }
}

impl MaintenanceStore for InMemoryStore {
    fn insert_log(&self, log: &MaintenanceLog) -> Result<(), StoreError> {
        insert(&self.maintenance, log)
    }

    fn update_log(&self, log: &MaintenanceLog) -> Result<(), StoreError> {
        update(&self.maintenance, log)
    }

    fn get_log(&self, id: &str) -> Result<MaintenanceLog, StoreError> {
        get(&self.maintenance, id)
    }

    fn list_logs(&self) -> Result<Vec<MaintenanceLog>, StoreError> {
        let mut logs = read(&self.maintenance)?.clone();
        logs.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
        Ok(logs)
    }
}

impl SensorStore for InMemoryStore {
    fn list_sensors(&self) -> Result<Vec<SensorStatus>, StoreError> {
        Ok(read(&self.sensors)?.clone())
    }
}

impl UserStore for InMemoryStore {
    fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        insert(&self.users, user)
    }

    fn update_user(&self, user: &User) -> Result<(), StoreError> {
        update(&self.users, user)
    }

    fn remove_user(&self, id: &str) -> Result<User, StoreError> {
        let mut users = write(&self.users)?;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| not_found::<User>(id))?;
        Ok(users.remove(index))
    }

    fn get_user(&self, id: &str) -> Result<User, StoreError> {
        get(&self.users, id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.trim();
        Ok(read(&self.users)?
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(read(&self.users)?.clone())
    }
}

impl ThresholdStore for InMemoryStore {
    fn get_thresholds(&self) -> Result<ThresholdSet, StoreError> {
        Ok(read(&self.thresholds)?.clone())
    }

    fn save_threshold(&self, threshold: &ParameterThreshold) -> Result<(), StoreError> {
        write(&self.thresholds)?.set(*threshold);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::*;
    use crate::domain::entities::alert::AlertType;
    use crate::domain::entities::tank::{RiskLevel, TankStatus};
    use crate::domain::entities::user::UserStatus;
    use crate::domain::value_objects::parameter::Parameter;
    use crate::domain::value_objects::role::Role;
    use crate::domain::value_objects::severity::Severity;

    fn make_alert(id: &str, minutes_ago: i64) -> Alert {
        Alert {
            id: id.into(),
            tank_id: "2".into(),
            tank_name: "Tank 002B".into(),
            location_name: "Maythany Community Center".into(),
            alert_type: AlertType::Single(Parameter::Ph),
            severity: Severity::Warning,
            message: "pH above warning threshold".into(),
            parameters_triggered: vec![],
            acknowledgement: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn make_tank(id: &str) -> WaterTank {
        WaterTank {
            id: id.into(),
            name: format!("Tank 00{id}"),
            location_name: "Somewhere".into(),
            latitude: 0.0,
            longitude: 0.0,
            capacity_liters: 5000,
            installation_date: NaiveDate::from_ymd_opt(2023, 1, 15).expect("date"),
            status: TankStatus::Active,
            risk_level: RiskLevel::Low,
        }
    }

    fn make_user(id: &str, email: &str) -> User {
        User {
            id: id.into(),
            email: email.into(),
            full_name: "Someone".into(),
            role: Role::Observer,
            status: UserStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn make_reading(tank_id: &str, hours_ago: i64, ph: f64) -> SensorReading {
        SensorReading {
            id: format!("{tank_id}-{hours_ago}"),
            tank_id: tank_id.into(),
            ph,
            turbidity: 2.0,
            tds: 350.0,
            temperature: 22.0,
            timestamp: Utc::now() - Duration::hours(hours_ago),
        }
    }

    #[test]
    fn new_creates_empty_store() {
        let store = InMemoryStore::default();
        assert!(store.get_alerts().expect("get_alerts").is_empty());
        assert!(store.list_tanks().expect("list_tanks").is_empty());
        assert_eq!(
            store.get_thresholds().expect("thresholds"),
            ThresholdSet::default()
        );
    }

    #[test]
    fn alerts_returned_newest_first() {
        let store = InMemoryStore::default();
        store.insert_alert(&make_alert("old", 60)).expect("save old");
        store.insert_alert(&make_alert("new", 1)).expect("save new");
        let ids: Vec<String> = store
            .get_alerts()
            .expect("get_alerts")
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn duplicate_alert_is_rejected() {
        let store = InMemoryStore::default();
        store.insert_alert(&make_alert("a", 0)).expect("first");
        let err = store.insert_alert(&make_alert("a", 0)).expect_err("dup");
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(store.get_alerts().expect("alerts").len(), 1);
    }

    #[test]
    fn update_replaces_and_reports_missing() {
        let store = InMemoryStore::default();
        let mut alert = make_alert("a", 0);
        store.insert_alert(&alert).expect("insert");
        alert.message = "changed".into();
        store.update_alert(&alert).expect("update");
        assert_eq!(store.get_alert("a").expect("get").message, "changed");

        let err = store.update_alert(&make_alert("b", 0)).expect_err("missing");
        assert_eq!(err.to_string(), "entry not found: alert b");
    }

    #[test]
    fn readings_are_filtered_and_ordered() {
        let store = InMemoryStore::default();
        store
            .save_readings(&[
                make_reading("1", 1, 7.1),
                make_reading("2", 1, 8.8),
                make_reading("1", 3, 7.0),
            ])
            .expect("save");
        let readings = store.readings_for("1").expect("readings");
        assert_eq!(readings.len(), 2);
        assert!(readings[0].timestamp < readings[1].timestamp);
        let latest = store.latest_reading("1").expect("latest").expect("some");
        assert!((latest.ph - 7.1).abs() < f64::EPSILON);
        assert!(store.latest_reading("9").expect("latest").is_none());
    }

    #[test]
    fn tanks_keep_registry_order() {
        let store = InMemoryStore::default();
        store.add_tank(&make_tank("2")).expect("add");
        store.add_tank(&make_tank("1")).expect("add");
        let ids: Vec<String> = store
            .list_tanks()
            .expect("tanks")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert!(matches!(store.get_tank("7"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn users_find_by_email_ignoring_case_and_remove() {
        let store = InMemoryStore::default();
        store
            .insert_user(&make_user("1", "admin@waterquality.org"))
            .expect("insert");
        let found = store
            .find_user_by_email(" ADMIN@waterquality.org ")
            .expect("find");
        assert_eq!(found.map(|u| u.id), Some("1".to_string()));

        let removed = store.remove_user("1").expect("remove");
        assert_eq!(removed.id, "1");
        assert!(store.list_users().expect("users").is_empty());
        assert!(matches!(store.remove_user("1"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn save_threshold_replaces_one_band() {
        let store = InMemoryStore::default();
        let band = ParameterThreshold::new(Parameter::Ph, 6.8, 8.2, 6.2, 8.8);
        store.save_threshold(&band).expect("save");
        let set = store.get_thresholds().expect("get");
        assert_eq!(set.get(Parameter::Ph).copied(), Ok(band));
        assert_eq!(set.len(), 4);
    }
}
