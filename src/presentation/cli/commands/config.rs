use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use crate::application::config::AppConfig;

/// Prints the effective configuration as TOML.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_config(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", format!("# {}", path.display()).dimmed());
    println!("{content}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control;

    #[test]
    fn prints_default_config() {
        control::set_override(false);
        assert!(run_config(&AppConfig::default(), Path::new("/tmp/namjai.toml")).is_ok());
    }
}
