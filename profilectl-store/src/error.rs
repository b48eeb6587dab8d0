//! Error types for profilectl-store
//!
//! Driver errors are wrapped, never rewritten. The remaining variants are
//! raised by validation or by the in-memory store.

use thiserror::Error;

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Input rejected before it reaches a store
///
/// Only values that can never name a row are rejected; everything else is
/// passed to the database as given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("user id cannot be empty")]
    EmptyUserId,

    #[error("availability status cannot be blank")]
    BlankStatus,
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// Error surfaced by sqlx (constraint violations, connection failures, decoding)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("profile already exists for user '{user_id}'")]
    DuplicateProfile { user_id: String },

    #[error("user '{user_id}' does not exist")]
    UnknownUser { user_id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// True when the error reports an existing profile for the user,
    /// from either the database's unique constraint or the memory store.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::DuplicateProfile { .. } => true,
            Self::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }

    /// True when the referenced user row is missing.
    pub fn is_missing_user(&self) -> bool {
        match self {
            Self::UnknownUser { .. } => true,
            Self::Database(sqlx::Error::Database(db)) => db.is_foreign_key_violation(),
            _ => false,
        }
    }
}
