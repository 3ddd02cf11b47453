use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::{ParameterThreshold, ThresholdSet};

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// General settings: refresh interval and synthetic data shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    /// Hours of readings generated per tank.
    #[serde(default = "default_reading_hours")]
    pub reading_hours: u32,
    /// Fixed RNG seed for reproducible readings. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Who is acting when `--user` is not given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_user_email")]
    pub user_email: String,
}

/// Warning and critical bands for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandConfig {
    pub min_warning: f64,
    pub max_warning: f64,
    pub min_critical: f64,
    pub max_critical: f64,
}

/// Per-parameter alert bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_ph")]
    pub ph: BandConfig,
    #[serde(default = "default_turbidity")]
    pub turbidity: BandConfig,
    #[serde(default = "default_tds")]
    pub tds: BandConfig,
    #[serde(default = "default_temperature")]
    pub temperature: BandConfig,
}

/// Which alerts the notification toggles apply to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityFilter {
    #[default]
    All,
    CriticalOnly,
}

/// Notification preferences. Stored and displayed only; nothing is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub email_alerts: bool,
    #[serde(default = "default_true")]
    pub push_alerts: bool,
    #[serde(default)]
    pub alert_severity_filter: SeverityFilter,
    #[serde(default)]
    pub daily_summary: bool,
}

impl NotificationSettings {
    /// Whether an alert of `severity` passes the configured filter.
    #[must_use]
    pub const fn admits(&self, severity: Severity) -> bool {
        match self.alert_severity_filter {
            SeverityFilter::All => severity.is_alerting(),
            SeverityFilter::CriticalOnly => matches!(severity, Severity::Critical),
        }
    }
}

// --- Defaults ---

const fn default_interval() -> u64 {
    5
}

const fn default_reading_hours() -> u32 {
    24
}

fn default_user_email() -> String {
    "observer@waterquality.org".into()
}

const fn default_true() -> bool {
    true
}

fn band_of(parameter: Parameter) -> BandConfig {
    BandConfig::from(ParameterThreshold::default_for(parameter))
}

fn default_ph() -> BandConfig {
    band_of(Parameter::Ph)
}

fn default_turbidity() -> BandConfig {
    band_of(Parameter::Turbidity)
}

fn default_tds() -> BandConfig {
    band_of(Parameter::Tds)
}

fn default_temperature() -> BandConfig {
    band_of(Parameter::Temperature)
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            reading_hours: default_reading_hours(),
            seed: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_email: default_user_email(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            ph: default_ph(),
            turbidity: default_turbidity(),
            tds: default_tds(),
            temperature: default_temperature(),
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_alerts: default_true(),
            push_alerts: default_true(),
            alert_severity_filter: SeverityFilter::default(),
            daily_summary: false,
        }
    }
}

// --- Conversions ---

impl From<ParameterThreshold> for BandConfig {
    fn from(t: ParameterThreshold) -> Self {
        Self {
            min_warning: t.min_warning,
            max_warning: t.max_warning,
            min_critical: t.min_critical,
            max_critical: t.max_critical,
        }
    }
}

impl BandConfig {
    #[must_use]
    pub const fn for_parameter(&self, parameter: Parameter) -> ParameterThreshold {
        ParameterThreshold::new(
            parameter,
            self.min_warning,
            self.max_warning,
            self.min_critical,
            self.max_critical,
        )
    }
}

impl ThresholdConfig {
    #[must_use]
    pub const fn band(&self, parameter: Parameter) -> &BandConfig {
        match parameter {
            Parameter::Ph => &self.ph,
            Parameter::Turbidity => &self.turbidity,
            Parameter::Tds => &self.tds,
            Parameter::Temperature => &self.temperature,
        }
    }

    pub fn band_mut(&mut self, parameter: Parameter) -> &mut BandConfig {
        match parameter {
            Parameter::Ph => &mut self.ph,
            Parameter::Turbidity => &mut self.turbidity,
            Parameter::Tds => &mut self.tds,
            Parameter::Temperature => &mut self.temperature,
        }
    }
}

impl TryFrom<&ThresholdConfig> for ThresholdSet {
    type Error = DomainError;

    fn try_from(config: &ThresholdConfig) -> Result<Self, Self::Error> {
        let set = Self::from(
            Parameter::ALL
                .iter()
                .map(|&p| config.band(p).for_parameter(p))
                .collect::<Vec<_>>(),
        );
        set.validate()?;
        Ok(set)
    }
}

impl From<&ThresholdSet> for ThresholdConfig {
    fn from(set: &ThresholdSet) -> Self {
        let mut config = Self::default();
        for band in set.iter() {
            *config.band_mut(band.parameter) = BandConfig::from(*band);
        }
        config
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path. Threshold bands are validated on load.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// invalid, or a threshold band is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config.threshold_set().context("Invalid thresholds in config file")?;
        Ok(config)
    }

    /// Save config to default path
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// The validated threshold set described by `[thresholds]`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedThreshold` for a band that is not nested.
    pub fn threshold_set(&self) -> Result<ThresholdSet, DomainError> {
        ThresholdSet::try_from(&self.thresholds)
    }

    /// Default location: `<config dir>/namjai/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no config directory.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("namjai").join("config.toml"))
    }
}
