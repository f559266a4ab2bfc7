// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The stored version does not match the version the caller read.
    ///
    /// The caller must reload the aggregate and reapply its operation.
    VersionConflict {
        /// The version the caller expected.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },
    /// A record with the same identity already exists.
    DuplicateRecord(String),
    /// The referenced record does not exist.
    RecordNotFound(String),
    /// Password hashing failed.
    HashingFailed(String),
    /// A general storage error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VersionConflict { expected, actual } => {
                write!(
                    f,
                    "Version conflict: expected version {expected}, found {actual}"
                )
            }
            Self::DuplicateRecord(msg) => write!(f, "Duplicate record: {msg}"),
            Self::RecordNotFound(msg) => write!(f, "Record not found: {msg}"),
            Self::HashingFailed(msg) => write!(f, "Password hashing failed: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}
