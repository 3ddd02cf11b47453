use thiserror::Error;

use crate::domain::access::Action;
use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::role::Role;

/// Errors raised by domain rules and workflows.
///
/// All of them are recoverable: the operation is refused and nothing is
/// mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("no threshold configured for {0}")]
    MissingThreshold(Parameter),

    #[error("malformed threshold for {parameter}: {reason}")]
    MalformedThreshold { parameter: Parameter, reason: String },

    #[error("permission denied: {actor} ({role}) may not {action}")]
    PermissionDenied {
        actor: String,
        role: Role,
        action: Action,
    },

    #[error("invalid {entity} transition: {from} -> {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Whether the error comes from threshold configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingThreshold(_) | Self::MalformedThreshold { .. }
        )
    }

    pub(crate) fn transition(
        entity: &'static str,
        from: impl std::fmt::Display,
        to: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidTransition {
            entity,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
