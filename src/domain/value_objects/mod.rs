pub mod parameter;
pub mod role;
pub mod severity;
pub mod thresholds;

pub use parameter::Parameter;
pub use role::Role;
pub use severity::Severity;
pub use thresholds::{ParameterThreshold, ThresholdSet};
