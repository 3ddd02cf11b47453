pub mod alerts;
pub mod ask;
pub mod config;
pub mod maintenance;
pub mod reports;
pub mod scan;
pub mod status;
pub mod thresholds;
pub mod users;
