// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store error types.

use mongodb::error::{ErrorKind, WriteFailure};

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Error returned by every store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Document has not been persisted")]
    NotPersisted,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Message used when an OAuth operation is called on a store
    /// configured without an OAuth account type.
    pub const OAUTH_NOT_CONFIGURED: &'static str = "no OAuth account type configured";

    /// Returns `true` if a unique index rejected the write.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey(_))
    }

    /// Returns `true` if an identifier could not be parsed.
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, StoreError::InvalidId(_))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        let code = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) => Some(e.code),
            ErrorKind::Command(e) => Some(e.code),
            _ => None,
        };

        if code == Some(DUPLICATE_KEY_CODE) {
            StoreError::DuplicateKey(err.to_string())
        } else {
            StoreError::Database(err.to_string())
        }
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(err: bson::de::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
