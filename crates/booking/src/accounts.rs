// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account registration, sign-in, and lockout service.

use crate::error::{BookingError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{LoginOutcome, LoginRequest, RegisterAccountRequest};
use seatline_domain::{DomainError, EmailAddress, User, UserId};
use seatline_persistence::{PasswordHasher, PersistenceError, UnitOfWork, UserRepository, Versioned};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How many times an account mutation re-reads and re-applies after losing
/// a version race before surfacing `ConcurrencyConflict`.
pub(crate) const MAX_CONCURRENCY_RETRIES: u32 = 3;

/// Application service for account lifecycle and authentication.
///
/// Failed sign-ins drive a per-account counter behind the same
/// compare-and-swap discipline as event writes, so concurrent failures are
/// all counted and the lockout threshold cannot be skipped over. Credential
/// failures always surface the same stable message whether the username was
/// unknown or the password wrong.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    unit_of_work: Arc<dyn UnitOfWork>,
    policy: PasswordPolicy,
}

impl AccountService {
    /// Creates a new `AccountService` over the given ports, with the
    /// default password policy.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            users,
            hasher,
            unit_of_work,
            policy: PasswordPolicy::default(),
        }
    }

    /// Registers a new account.
    ///
    /// The username is normalized to lowercase; username and email
    /// uniqueness are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Validation` for an invalid username or email,
    /// `BookingError::PasswordPolicyViolation` for a weak password, or
    /// `BookingError::Conflict` if the username or email is already taken.
    pub fn register(&self, request: &RegisterAccountRequest) -> Result<User, BookingError> {
        self.policy.validate(&request.password, &request.username)?;

        let email: EmailAddress =
            EmailAddress::parse(&request.email).map_err(translate_domain_error)?;

        let password_hash: String = self
            .hasher
            .hash(&request.password)
            .map_err(translate_persistence_error)?;

        let user: User = User::create(&request.username, email, &password_hash, request.role)
            .map_err(translate_domain_error)?;

        self.users.add(&user).map_err(translate_persistence_error)?;
        self.unit_of_work
            .commit()
            .map_err(translate_persistence_error)?;

        info!(
            user_id = user.user_id().value(),
            username = user.username(),
            "Account registered"
        );
        Ok(user)
    }

    /// Checks credentials and records the outcome on the account.
    ///
    /// A locked account is rejected before the password is checked, so a
    /// correct guess against a locked account learns nothing. A wrong
    /// password increments the failed-login counter; the fifth consecutive
    /// failure locks the account. A successful check clears the counter.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidCredentials` for an unknown username
    /// or a wrong password (one stable message for both),
    /// `BookingError::LockedAccount` for a locked account, or
    /// `BookingError::ConcurrencyConflict` after exhausted retries when
    /// recording the outcome.
    pub fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, BookingError> {
        let Some(versioned) = self
            .users
            .get_by_username(&request.username)
            .map_err(translate_persistence_error)?
        else {
            debug!("Sign-in failed: unknown username");
            return Err(BookingError::InvalidCredentials);
        };
        let user_id: UserId = versioned.value.user_id().clone();

        if versioned.value.is_locked() {
            warn!(user_id = user_id.value(), "Sign-in attempt on locked account");
            return Err(BookingError::LockedAccount);
        }

        if !self
            .hasher
            .verify(versioned.value.password_hash(), &request.password)
        {
            let failed: User = self.modify_user(&user_id, |user| {
                user.register_access_failure();
                Ok(user.clone())
            })?;
            self.unit_of_work
                .commit()
                .map_err(translate_persistence_error)?;

            if failed.is_locked() {
                warn!(
                    user_id = user_id.value(),
                    failed_logins = failed.failed_login_count(),
                    "Account locked after repeated sign-in failures"
                );
            } else {
                debug!(
                    user_id = user_id.value(),
                    failed_logins = failed.failed_login_count(),
                    "Sign-in failed: wrong password"
                );
            }
            return Err(BookingError::InvalidCredentials);
        }

        if versioned.value.failed_login_count() > 0 {
            self.modify_user(&user_id, |user| {
                user.reset_access_failures();
                Ok(())
            })?;
            self.unit_of_work
                .commit()
                .map_err(translate_persistence_error)?;
        }

        info!(user_id = user_id.value(), "Sign-in succeeded");
        Ok(LoginOutcome {
            user_id,
            username: versioned.value.username().to_owned(),
            role: versioned.value.role(),
        })
    }

    /// Unlocks an account and clears its failed-login counter.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` for an unknown user or
    /// `BookingError::ConcurrencyConflict` after exhausted retries.
    pub fn unlock(&self, user_id: &UserId) -> Result<(), BookingError> {
        self.modify_user(user_id, |user| {
            user.reset_access_failures();
            Ok(())
        })?;
        self.unit_of_work
            .commit()
            .map_err(translate_persistence_error)?;

        info!(user_id = user_id.value(), "Account unlocked");
        Ok(())
    }

    /// Replaces an account's password.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` for an unknown user,
    /// `BookingError::PasswordPolicyViolation` for a weak password, or
    /// `BookingError::ConcurrencyConflict` after exhausted retries.
    pub fn change_password(
        &self,
        user_id: &UserId,
        new_password: &str,
    ) -> Result<(), BookingError> {
        let versioned: Versioned<User> = self
            .users
            .get(user_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| user_not_found(user_id))?;

        self.policy
            .validate(new_password, versioned.value.username())?;

        // Hash once; the retry loop only re-applies the cheap assignment.
        let password_hash: String = self
            .hasher
            .hash(new_password)
            .map_err(translate_persistence_error)?;

        self.modify_user(user_id, |user| {
            user.set_password_hash(&password_hash)?;
            Ok(())
        })?;
        self.unit_of_work
            .commit()
            .map_err(translate_persistence_error)?;

        info!(user_id = user_id.value(), "Password changed");
        Ok(())
    }

    /// Loads a user.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` for an unknown user.
    pub fn get_user(&self, user_id: &UserId) -> Result<User, BookingError> {
        let versioned: Versioned<User> = self
            .users
            .get(user_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| user_not_found(user_id))?;
        Ok(versioned.value)
    }

    /// Loads a user, applies a mutation, and writes it back under a
    /// version check, retrying lost races from a fresh load.
    fn modify_user<T>(
        &self,
        user_id: &UserId,
        mut apply: impl FnMut(&mut User) -> Result<T, DomainError>,
    ) -> Result<T, BookingError> {
        for attempt in 1..=MAX_CONCURRENCY_RETRIES {
            let mut versioned: Versioned<User> = self
                .users
                .get(user_id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| user_not_found(user_id))?;

            let outcome: T = apply(&mut versioned.value).map_err(translate_domain_error)?;

            match self.users.update(&versioned.value, versioned.version) {
                Ok(_) => return Ok(outcome),
                Err(PersistenceError::VersionConflict { .. }) => {
                    debug!(
                        user_id = user_id.value(),
                        attempt, "Write lost a version race; retrying"
                    );
                }
                Err(err) => return Err(translate_persistence_error(err)),
            }
        }

        Err(BookingError::ConcurrencyConflict {
            attempts: MAX_CONCURRENCY_RETRIES,
        })
    }
}

fn user_not_found(user_id: &UserId) -> BookingError {
    BookingError::NotFound {
        resource: String::from("User"),
        message: format!("User '{}' does not exist", user_id.value()),
    }
}
