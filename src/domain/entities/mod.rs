pub mod alert;
pub mod maintenance;
pub mod reading;
pub mod report;
pub mod sensor;
pub mod tank;
pub mod user;

pub use alert::{Acknowledgement, Alert, AlertFilter, AlertType, TriggeredParameter};
pub use maintenance::{MaintenanceLog, MaintenanceStatus, MaintenanceType};
pub use reading::SensorReading;
pub use report::{Report, ReportStatus, ReportType};
pub use sensor::{SensorHealth, SensorStatus};
pub use tank::{RiskLevel, TankStatus, WaterTank};
pub use user::{User, UserStatus};
