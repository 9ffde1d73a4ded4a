// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the ledger core. None of these are retried
/// internally; transient storage failures propagate as `Storage` and the
/// caller decides on retry policy.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input: non-positive amounts, unknown enum values,
    /// inverted date ranges.
    #[error("validation: {0}")]
    Validation(String),

    /// The referenced id does not exist.
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: i64 },

    /// The operation would break a referential constraint, e.g. deleting a
    /// category that transactions still point at.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The row exists but belongs to another user. The message carries only
    /// the id the caller supplied; nothing about the row leaks.
    #[error("not permitted to access {what} {id}")]
    Authorization { what: &'static str, id: i64 },

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub fn not_found(what: &'static str, id: i64) -> Self {
        LedgerError::NotFound { what, id }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
