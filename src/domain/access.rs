//! Role-based capability checks.
//!
//! Every mutating operation names its [`Action`] and goes through
//! [`require_role`]; the role table lives in [`Action::allowed_roles`] and
//! nowhere else.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{User, UserStatus};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::role::Role;

/// A permission-gated operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AcknowledgeAlert,
    ScheduleMaintenance,
    UpdateMaintenance,
    SubmitReport,
    ReviewReport,
    ResolveReport,
    ManageUsers,
    EditThresholds,
}

const STAFF: &[Role] = &[Role::Admin, Role::FieldOfficer];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const EVERYONE: &[Role] = &[Role::Admin, Role::FieldOfficer, Role::Observer];

impl Action {
    #[must_use]
    pub const fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::AcknowledgeAlert
            | Self::ScheduleMaintenance
            | Self::UpdateMaintenance
            | Self::ReviewReport => STAFF,
            Self::ResolveReport | Self::ManageUsers | Self::EditThresholds => ADMIN_ONLY,
            Self::SubmitReport => EVERYONE,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::AcknowledgeAlert => "acknowledge alerts",
            Self::ScheduleMaintenance => "schedule maintenance",
            Self::UpdateMaintenance => "update maintenance status",
            Self::SubmitReport => "submit reports",
            Self::ReviewReport => "review reports",
            Self::ResolveReport => "resolve or dismiss reports",
            Self::ManageUsers => "manage users",
            Self::EditThresholds => "edit thresholds",
        };
        f.write_str(text)
    }
}

/// True when the actor is active and holds one of `allowed`.
#[must_use]
pub fn has_role(actor: &User, allowed: &[Role]) -> bool {
    actor.status == UserStatus::Active && allowed.contains(&actor.role)
}

/// Refuses `action` unless the actor may perform it.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` naming the actor, role and action.
pub fn require_role(actor: &User, action: Action) -> Result<(), DomainError> {
    if has_role(actor, action.allowed_roles()) {
        Ok(())
    } else {
        Err(DomainError::PermissionDenied {
            actor: actor.full_name.clone(),
            role: actor.role,
            action,
        })
    }
}
