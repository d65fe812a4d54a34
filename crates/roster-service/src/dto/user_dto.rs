//! User-related DTOs.

use roster_core::validation::rules;
use roster_core::{NewUser, Patch, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// User-settable fields, used for both create and update.
///
/// Each field is a [`Patch`]: a missing key leaves the stored value alone,
/// `null` clears it, and a value overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub email: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub password: Patch<String>,
}

impl UserData {
    /// Validates the payload for a create, where name and email are required.
    pub fn validate_for_create(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.name.as_value().is_none() {
            errors.add("name", required());
        }
        if self.email.as_value().is_none() {
            errors.add("email", required());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds an insert payload; `Absent` and `Null` both become `None`.
    #[must_use]
    pub fn into_new_user(self) -> NewUser {
        NewUser::new(
            self.name.into_option(),
            self.email.into_option(),
            self.password.into_option(),
        )
    }

    /// Applies the patch to a stored user.
    pub fn merge_into(self, user: &mut User) {
        self.name.merge_into(&mut user.name);
        self.email.merge_into(&mut user.email);
        self.password.merge_into(&mut user.password);
    }
}

impl Validate for UserData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(name) = self.name.as_value() {
            if let Err(e) = rules::not_blank(name).and_then(|()| rules::fits_column(name)) {
                errors.add("name", e);
            }
        }

        if let Some(email) = self.email.as_value() {
            if let Err(e) = rules::fits_column(email).and_then(|()| rules::email(email)) {
                errors.add("email", e);
            }
        }

        if let Some(password) = self.password.as_value() {
            if let Err(e) = rules::fits_column(password) {
                errors.add("password", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn required() -> ValidationError {
    let mut error = ValidationError::new("required");
    error.message = Some("is required".into());
    error
}

/// User response DTO. The stored password is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
