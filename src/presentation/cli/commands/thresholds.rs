use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use crate::application::config::{AppConfig, ThresholdConfig};
use crate::application::services::admin::AdminService;
use crate::domain::entities::user::User;
use crate::domain::value_objects::thresholds::ParameterThreshold;
use crate::presentation::cli::app::ThresholdsCommand;
use crate::presentation::cli::formatters::status_fmt::print_section_header;
use crate::presentation::cli::formatters::table_fmt::format_threshold_table;

/// Shows the bands, or replaces one and writes the result back to the config
/// file so later runs evaluate against it.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the band is malformed, or
/// the config file cannot be written.
pub fn run_thresholds(
    admin: &AdminService<'_>,
    actor: &User,
    action: ThresholdsCommand,
    config: &AppConfig,
    config_path: &Path,
) -> anyhow::Result<()> {
    match action {
        ThresholdsCommand::Show => {
            print_section_header("📏 Thresholds");
            println!("{}", format_threshold_table(&admin.thresholds()?));
        }
        ThresholdsCommand::Set {
            parameter,
            min_warning,
            max_warning,
            min_critical,
            max_critical,
        } => {
            let band = ParameterThreshold::new(
                parameter,
                min_warning,
                max_warning,
                min_critical,
                max_critical,
            );
            let updated = admin.update_threshold(actor, band)?;

            let mut config = config.clone();
            config.thresholds = ThresholdConfig::from(&updated);
            config
                .save_to(config_path)
                .with_context(|| format!("Failed to save thresholds to {}", config_path.display()))?;

            println!(
                "{} {} warning band is now {}",
                "✔".green().bold(),
                parameter.label(),
                band.warning_range()
            );
        }
    }
    Ok(())
}
