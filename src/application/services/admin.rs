use chrono::{DateTime, Utc};
use tracing::info;

use super::{next_id, ServiceError};
use crate::domain::access::{require_role, Action};
use crate::domain::entities::user::{User, UserStatus};
use crate::domain::errors::DomainError;
use crate::domain::ports::store::{StoreError, ThresholdStore, UserStore};
use crate::domain::value_objects::role::Role;
use crate::domain::value_objects::thresholds::{ParameterThreshold, ThresholdSet};

/// User directory and threshold administration.
pub struct AdminService<'a> {
    users: &'a dyn UserStore,
    thresholds: &'a dyn ThresholdStore,
}

impl<'a> AdminService<'a> {
    #[must_use]
    pub fn new(users: &'a dyn UserStore, thresholds: &'a dyn ThresholdStore) -> Self {
        Self { users, thresholds }
    }

    /// Resolves the acting user by email.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no user has this email.
    pub fn resolve_actor(&self, email: &str) -> Result<User, ServiceError> {
        self.users
            .find_user_by_email(email)?
            .ok_or_else(|| StoreError::NotFound(format!("user {email}")).into())
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.list_users()?)
    }

    /// Creates an active user.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the actor is not an admin, the email is
    /// malformed or taken, or the name is blank.
    pub fn add_user(
        &self,
        actor: &User,
        email: &str,
        full_name: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<User, ServiceError> {
        require_role(actor, Action::ManageUsers)?;
        let email = email.trim();
        let full_name = full_name.trim();
        if !is_plausible_email(email) {
            return Err(DomainError::InvalidInput(format!("'{email}' is not an email address")).into());
        }
        if full_name.is_empty() {
            return Err(DomainError::InvalidInput("full name is required".into()).into());
        }
        if self.users.find_user_by_email(email)?.is_some() {
            return Err(StoreError::AlreadyExists(format!("user {email}")).into());
        }

        let existing = self.users.list_users()?;
        let user = User {
            id: next_id(existing.iter().map(|u| u.id.as_str())),
            email: email.to_string(),
            full_name: full_name.to_string(),
            role,
            status: UserStatus::Active,
            created_at: now,
        };
        self.users.insert_user(&user)?;
        info!(user = %user.email, role = %user.role, "user added");
        Ok(user)
    }

    /// Deletes a user. Admins cannot delete themselves.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the actor is not an admin, targets their own
    /// account, or the user does not exist.
    pub fn remove_user(&self, actor: &User, id: &str) -> Result<User, ServiceError> {
        require_role(actor, Action::ManageUsers)?;
        if actor.id == id {
            return Err(DomainError::InvalidInput("cannot remove your own account".into()).into());
        }
        let removed = self.users.remove_user(id)?;
        info!(user = %removed.email, "user removed");
        Ok(removed)
    }

    /// Flips `active` to `inactive`; reactivates anything else.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the actor is not an admin, targets their own
    /// account, or the user does not exist.
    pub fn toggle_user_status(&self, actor: &User, id: &str) -> Result<User, ServiceError> {
        require_role(actor, Action::ManageUsers)?;
        if actor.id == id {
            return Err(
                DomainError::InvalidInput("cannot change your own account status".into()).into(),
            );
        }
        let mut user = self.users.get_user(id)?;
        user.status = user.status.toggled();
        self.users.update_user(&user)?;
        info!(user = %user.email, status = %user.status, "user status changed");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the store fails.
    pub fn thresholds(&self) -> Result<ThresholdSet, ServiceError> {
        Ok(self.thresholds.get_thresholds()?)
    }

    /// Replaces one parameter's band, returning the full updated set.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the actor is not an admin or the band is
    /// malformed; the previous band stays in place.
    pub fn update_threshold(
        &self,
        actor: &User,
        threshold: ParameterThreshold,
    ) -> Result<ThresholdSet, ServiceError> {
        require_role(actor, Action::EditThresholds)?;
        threshold.validate()?;
        self.thresholds.save_threshold(&threshold)?;
        info!(parameter = %threshold.parameter, range = %threshold.warning_range(), "threshold updated");
        Ok(self.thresholds.get_thresholds()?)
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
