// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EmailAddress, Role, UserId};
use serde::{Deserialize, Serialize};

/// The aggregate root for authentication state.
///
/// A user account is a small state machine: `Active` while the failed-login
/// counter sits below the lockout threshold, `Locked` once it reaches it.
/// The password hash is opaque to this core; hashing and verification happen
/// behind the password-hashing port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's opaque identifier.
    user_id: UserId,
    /// The username, normalized to lowercase for case-insensitive
    /// uniqueness.
    username: String,
    /// The user's email address.
    email: EmailAddress,
    /// The opaque password hash produced by the hashing port.
    password_hash: String,
    /// The user's role.
    role: Role,
    /// Consecutive failed login attempts since the last reset.
    failed_login_count: u32,
    /// Whether the account is locked.
    locked: bool,
}

impl User {
    /// Consecutive failed logins that trigger an account lock.
    pub const LOCKOUT_THRESHOLD: u32 = 5;
    /// Maximum permitted username length in characters.
    pub const USERNAME_MAX_LENGTH: usize = 64;

    /// Creates a new `User`.
    ///
    /// The username is normalized to lowercase to ensure case-insensitive
    /// uniqueness.
    ///
    /// # Arguments
    ///
    /// * `username` - The username (non-empty, at most 64 characters, no whitespace)
    /// * `email` - The validated email address
    /// * `password_hash` - The opaque password hash (non-empty)
    /// * `role` - The user's role
    ///
    /// # Errors
    ///
    /// Returns an error if the username is empty, too long, or contains
    /// whitespace, or if the password hash is empty.
    pub fn create(
        username: &str,
        email: EmailAddress,
        password_hash: &str,
        role: Role,
    ) -> Result<Self, DomainError> {
        let username: String = validate_username(username)?;

        if password_hash.is_empty() {
            return Err(DomainError::EmptyPasswordHash);
        }

        Ok(Self {
            user_id: UserId::generate(),
            username,
            email,
            password_hash: password_hash.to_owned(),
            role,
            failed_login_count: 0,
            locked: false,
        })
    }

    /// Records one failed credential check.
    ///
    /// Increments the failed-login counter; reaching the lockout threshold
    /// locks the account. Calls past the threshold keep counting but the
    /// account stays locked either way.
    pub const fn register_access_failure(&mut self) {
        self.failed_login_count += 1;
        if self.failed_login_count >= Self::LOCKOUT_THRESHOLD {
            self.locked = true;
        }
    }

    /// Clears the failed-login counter and unlocks the account.
    ///
    /// Called on successful login or administrative intervention.
    pub const fn reset_access_failures(&mut self) {
        self.failed_login_count = 0;
        self.locked = false;
    }

    /// Replaces the password hash.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyPasswordHash` if the hash is empty.
    pub fn set_password_hash(&mut self, password_hash: &str) -> Result<(), DomainError> {
        if password_hash.is_empty() {
            return Err(DomainError::EmptyPasswordHash);
        }
        self.password_hash = password_hash.to_owned();
        Ok(())
    }

    /// Replaces the role.
    pub const fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Returns the user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the normalized username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the opaque password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns the user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the consecutive failed login count since the last reset.
    #[must_use]
    pub const fn failed_login_count(&self) -> u32 {
        self.failed_login_count
    }

    /// Returns whether the account is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Validates and normalizes a username.
fn validate_username(username: &str) -> Result<String, DomainError> {
    let trimmed: &str = username.trim();

    // Rule: username must not be empty
    if trimmed.is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }

    // Rule: username must not exceed the maximum length
    let length: usize = trimmed.chars().count();
    if length > User::USERNAME_MAX_LENGTH {
        return Err(DomainError::InvalidUsername(format!(
            "Username is {length} characters long; maximum is {}",
            User::USERNAME_MAX_LENGTH
        )));
    }

    // Rule: username must not contain whitespace
    if trimmed.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot contain whitespace",
        )));
    }

    Ok(trimmed.to_lowercase())
}
