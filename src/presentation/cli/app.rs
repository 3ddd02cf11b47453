use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::entities::alert::AlertFilter;
use crate::domain::entities::maintenance::{MaintenanceStatus, MaintenanceType};
use crate::domain::entities::report::{ReportStatus, ReportType};
use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::role::Role;

/// namjai: water quality monitoring for community tanks
///
/// Evaluates sensor readings against configurable thresholds, raises alerts,
/// and tracks field reports and maintenance.
#[derive(Parser, Debug)]
#[command(name = "namjai")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Email of the acting user (defaults to the session user in config)
    #[arg(short, long, global = true)]
    pub user: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show tank status with metric cards
    #[command(alias = "s")]
    Status {
        /// Only show this tank
        #[arg(short, long)]
        tank: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the latest readings of every tank
    #[command(alias = "sc")]
    Scan {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List alerts, newest first
    #[command(alias = "a")]
    Alerts {
        /// all, active or acknowledged
        #[arg(short, long, default_value = "all")]
        filter: AlertFilter,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Acknowledge an alert
    Ack {
        /// Alert ID
        alert_id: String,
    },

    /// Field reports
    #[command(alias = "r")]
    Reports {
        #[command(subcommand)]
        action: ReportsCommand,
    },

    /// Maintenance schedule and sensor health
    #[command(alias = "m")]
    Maintenance {
        #[command(subcommand)]
        action: MaintenanceCommand,
    },

    /// User administration
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },

    /// Show or edit alert thresholds
    #[command(alias = "t")]
    Thresholds {
        #[command(subcommand)]
        action: ThresholdsCommand,
    },

    /// Ask the help assistant a question
    #[command(alias = "?")]
    Ask {
        /// The question; empty prints a greeting
        question: Vec<String>,
    },

    /// Launch the interactive dashboard
    #[command(alias = "w")]
    Watch {
        /// Refresh interval in seconds (default: config)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Print the effective configuration
    #[command(alias = "c")]
    Config,
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// List reports, newest first
    List {
        /// pending, under_review, resolved or dismissed
        #[arg(short, long)]
        status: Option<ReportStatus>,
    },

    /// Submit a new report
    Submit {
        /// Tank ID
        #[arg(long)]
        tank: String,

        /// dirty_water, broken_filter, infrastructure or other
        #[arg(long)]
        kind: ReportType,

        #[arg(short, long)]
        description: String,

        /// Photo URL
        #[arg(long)]
        photo: Option<String>,
    },

    /// Start reviewing a pending report
    Review { id: String },

    /// Resolve a report under review
    Resolve {
        id: String,

        #[arg(short, long)]
        notes: String,
    },

    /// Dismiss a report under review
    Dismiss {
        id: String,

        #[arg(short, long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MaintenanceCommand {
    /// List maintenance logs, latest scheduled date first
    List {
        /// scheduled, in_progress, completed or cancelled
        #[arg(short, long)]
        status: Option<MaintenanceStatus>,
    },

    /// Show sensor health
    Sensors,

    /// Schedule a maintenance task
    Schedule {
        /// Tank ID
        #[arg(long)]
        tank: String,

        /// sensor_calibration, sensor_replacement, tank_cleaning,
        /// filter_replacement, repair or inspection
        #[arg(long)]
        kind: MaintenanceType,

        #[arg(short, long)]
        description: String,

        /// Scheduled date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        #[arg(long, default_value = "0")]
        cost: f64,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Mark a scheduled task as in progress
    Start { id: String },

    /// Mark a task in progress as completed
    Complete { id: String },

    /// Cancel a task that has not finished
    Cancel { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users
    List,

    /// Add a user
    Add {
        #[arg(long)]
        email: String,

        /// Full name
        #[arg(long)]
        name: String,

        /// admin, field_officer or observer
        #[arg(long, default_value = "observer")]
        role: Role,
    },

    /// Remove a user
    Remove { id: String },

    /// Toggle a user between active and inactive
    Toggle { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ThresholdsCommand {
    /// Show the configured bands
    Show,

    /// Replace the band of one parameter
    Set {
        /// ph, turbidity, tds or temperature
        parameter: Parameter,

        #[arg(long, allow_negative_numbers = true)]
        min_warning: f64,

        #[arg(long, allow_negative_numbers = true)]
        max_warning: f64,

        #[arg(long, allow_negative_numbers = true)]
        min_critical: f64,

        #[arg(long, allow_negative_numbers = true)]
        max_critical: f64,
    },
}
