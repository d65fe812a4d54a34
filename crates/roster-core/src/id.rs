//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

/// A strongly-typed wrapper for user IDs.
///
/// Identifiers are assigned by the record store and start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Error returned when a path segment is not a usable user ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    /// Empty, or outside the 32-bit range.
    #[error("invalid user id: {0}")]
    Malformed(#[from] ParseIntError),
    /// Contains something other than ASCII digits, such as a sign.
    #[error("user id must contain only digits")]
    NotDigits,
    /// Zero is never assigned by the store.
    #[error("user id must be greater than zero")]
    Zero,
}

impl UserId {
    /// Creates a user ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parses a user ID from its decimal form.
    ///
    /// Accepts `1..=u32::MAX`, the range exposed over HTTP.
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UserIdError::NotDigits);
        }
        let raw: u32 = s.parse()?;
        if raw == 0 {
            return Err(UserIdError::Zero);
        }
        Ok(Self(u64::from(raw)))
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}
