// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The password-hashing port.
//!
//! The core treats password hashes as opaque strings; any memory-hard KDF
//! satisfies this contract.

use crate::error::PersistenceError;
use tracing::warn;

/// Hashes and verifies passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into an opaque string.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::HashingFailed` if the underlying KDF
    /// fails.
    fn hash(&self, plaintext: &str) -> Result<String, PersistenceError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// A malformed stored hash counts as a failed verification rather than
    /// an error, so callers cannot be tricked into a distinct failure path.
    fn verify(&self, hash: &str, plaintext: &str) -> bool;
}

/// The production hasher, backed by bcrypt at the default cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptPasswordHasher;

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PersistenceError> {
        bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
            .map_err(|e| PersistenceError::HashingFailed(format!("Failed to hash password: {e}")))
    }

    fn verify(&self, hash: &str, plaintext: &str) -> bool {
        match bcrypt::verify(plaintext, hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Stored password hash could not be verified: {e}");
                false
            }
        }
    }
}
