//! User identifier

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Reference to `users.id`
///
/// Ids come from the account system; any non-empty text is accepted and
/// bound verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user id. Only the empty string is rejected.
    ///
    /// # Example
    /// ```
    /// use profilectl_store::UserId;
    ///
    /// assert!(UserId::new("8f14e45f-ceea-467f-a0e6-3c4a9d1f2b7e").is_ok());
    /// assert!(UserId::new("john doe").is_ok());
    /// assert!(UserId::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::EmptyUserId);
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ValidationError::EmptyUserId);
        }
        Ok(Self(value))
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
