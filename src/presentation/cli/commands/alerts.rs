use chrono::Utc;
use colored::Colorize;

use crate::application::services::monitor::MonitorService;
use crate::domain::entities::alert::AlertFilter;
use crate::domain::entities::user::User;
use crate::presentation::cli::formatters::alert_fmt;
use crate::presentation::cli::formatters::status_fmt::print_section_header;

/// Lists stored alerts matching `filter`, newest first.
///
/// # Errors
///
/// Returns an error if the store fails or JSON serialization fails.
pub fn run_alerts(
    monitor: &MonitorService<'_>,
    filter: AlertFilter,
    json: bool,
) -> anyhow::Result<()> {
    let alerts = monitor.list_alerts(filter)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    let counts = monitor.alert_counts()?;
    print_section_header(&format!("🔔 Alerts ({filter})"));
    println!(
        "{} active, {} critical",
        counts.active,
        counts.active_critical.to_string().red().bold()
    );
    if alerts.is_empty() {
        println!("\n{}", "No alerts match this filter".dimmed());
    } else {
        alert_fmt::format_alerts(&alerts);
    }
    Ok(())
}

/// Acknowledges an alert as `actor`.
///
/// # Errors
///
/// Returns an error if the alert does not exist, the actor may not
/// acknowledge alerts, or it is already acknowledged.
pub fn run_ack(monitor: &MonitorService<'_>, actor: &User, alert_id: &str) -> anyhow::Result<()> {
    let alert = monitor.acknowledge(alert_id, actor, Utc::now())?;
    println!(
        "{} Alert #{} on {} acknowledged by {}",
        "✔".green().bold(),
        alert.id,
        alert.tank_name,
        actor.full_name
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::ports::store::AlertStore;
    use crate::domain::value_objects::role::Role;
    use crate::infrastructure::persistence::InMemoryStore;
    use crate::infrastructure::seed;
    use colored::control;
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

    #[test]
    fn lists_with_each_filter() {
        control::set_override(false);
        let store = seeded();
        let monitor = MonitorService::new(&store, &store, &store, &store);
        for filter in [AlertFilter::All, AlertFilter::Active, AlertFilter::Acknowledged] {
            assert!(run_alerts(&monitor, filter, false).is_ok());
            assert!(run_alerts(&monitor, filter, true).is_ok());
        }
    }

    #[test]
    fn officer_acknowledges_once() {
        control::set_override(false);
        let store = seeded();
        let monitor = MonitorService::new(&store, &store, &store, &store);
        let officer = user(Role::FieldOfficer);

        run_ack(&monitor, &officer, "1").expect("ack");
        let alert = store.get_alert("1").expect("alert");
        assert_eq!(alert.acknowledged_by(), Some("Jane Kamau"));

        assert!(run_ack(&monitor, &officer, "1").is_err());
    }

    #[test]
    fn observer_cannot_acknowledge() {
        control::set_override(false);
        let store = seeded();
        let monitor = MonitorService::new(&store, &store, &store, &store);
        assert!(run_ack(&monitor, &user(Role::Observer), "1").is_err());
        assert!(!store.get_alert("1").expect("alert").is_acknowledged());
    }

    #[test]
    fn unknown_alert_is_an_error() {
        control::set_override(false);
        let store = seeded();
        let monitor = MonitorService::new(&store, &store, &store, &store);
        assert!(run_ack(&monitor, &user(Role::Admin), "nope").is_err());
    }
}
