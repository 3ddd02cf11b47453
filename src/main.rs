use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use namjai::application::config::AppConfig;
use namjai::application::services::admin::AdminService;
use namjai::application::services::maintenance::MaintenanceService;
use namjai::application::services::monitor::MonitorService;
use namjai::application::services::reports::ReportService;
use namjai::domain::entities::user::User;
use namjai::infrastructure::persistence::InMemoryStore;
use namjai::infrastructure::seed;
use namjai::presentation::cli::app::{Cli, Commands};
use namjai::presentation::cli::commands::alerts::{run_ack, run_alerts};
use namjai::presentation::cli::commands::ask::run_ask;
use namjai::presentation::cli::commands::config::run_config;
use namjai::presentation::cli::commands::maintenance::run_maintenance;
use namjai::presentation::cli::commands::reports::run_reports;
use namjai::presentation::cli::commands::scan::run_scan;
use namjai::presentation::cli::commands::status::run_status;
use namjai::presentation::cli::commands::thresholds::run_thresholds;
use namjai::presentation::cli::commands::users::run_users;
use namjai::presentation::tui::app::run_tui;

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The signed-in user: `--user` wins over `[session] user_email`.
fn resolve_actor(admin: &AdminService<'_>, cli_user: Option<&str>, config: &AppConfig) -> anyhow::Result<User> {
    let email = cli_user.unwrap_or(&config.session.user_email);
    admin
        .resolve_actor(email)
        .with_context(|| format!("Unknown user '{email}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(ref path) => path.clone(),
        None => AppConfig::config_path()?,
    };
    let config = AppConfig::load_or_create(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Wiring: main.rs is the only place that knows the concrete store.
    let store = InMemoryStore::new(config.threshold_set()?);
    let mut rng = config
        .general
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    seed::seed_store(&store, Utc::now(), config.general.reading_hours, &mut rng)
        .context("Failed to seed demo data")?;
    debug!(hours = config.general.reading_hours, "demo data seeded");

    let monitor = MonitorService::new(&store, &store, &store, &store);
    let reports = ReportService::new(&store, &store);
    let maintenance = MaintenanceService::new(&store, &store, &store);
    let admin = AdminService::new(&store, &store);
    let actor = || resolve_actor(&admin, cli.user.as_deref(), &config);

    match cli.command {
        Some(Commands::Status { tank, json }) => run_status(&monitor, tank.as_deref(), json)?,
        None => run_status(&monitor, None, false)?,
        Some(Commands::Scan { json }) => run_scan(&monitor, &config.notifications, json)?,
        Some(Commands::Alerts { filter, json }) => run_alerts(&monitor, filter, json)?,
        Some(Commands::Ack { alert_id }) => run_ack(&monitor, &actor()?, &alert_id)?,
        Some(Commands::Reports { action }) => run_reports(&reports, &actor()?, action)?,
        Some(Commands::Maintenance { action }) => {
            run_maintenance(&maintenance, &actor()?, action)?;
        }
        Some(Commands::Users { action }) => run_users(&admin, &actor()?, action)?,
        Some(Commands::Thresholds { action }) => {
            run_thresholds(&admin, &actor()?, action, &config, &config_path)?;
        }
        Some(Commands::Ask { question }) => run_ask(&monitor.thresholds()?, &question),
        Some(Commands::Watch { interval }) => {
            let user = match actor() {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "dashboard opened read-only");
                    None
                }
            };
            run_tui(
                &monitor,
                user.as_ref(),
                interval.unwrap_or(config.general.interval_secs),
            )?;
        }
        Some(Commands::Config) => run_config(&config, &config_path)?,
    }

    Ok(())
}
