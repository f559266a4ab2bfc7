// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the service layer.

use crate::password_policy::PasswordPolicyError;
use seatline_domain::DomainError;
use seatline_persistence::PersistenceError;

/// The stable message for a failed credential check.
///
/// Identical for an unknown username and a wrong password, so callers
/// cannot enumerate accounts.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// The stable message for a locked account.
///
/// Reveals neither whether the username exists elsewhere nor whether the
/// supplied password was correct.
pub const LOCKED_ACCOUNT_MESSAGE: &str =
    "Account is locked due to repeated failed sign-in attempts";

/// Service-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// service contract; lower-level errors are translated explicitly and never
/// leaked directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Invalid input was provided. Recoverable by correcting the input;
    /// never retried automatically.
    Validation {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Requested quantity exceeds the remaining seats. A legitimate
    /// business outcome under correct concurrency control, not a bug.
    CapacityExceeded {
        /// The requested quantity.
        requested: u32,
        /// The seats still available at evaluation time.
        remaining: u32,
    },
    /// A referenced resource does not exist.
    NotFound {
        /// The type of resource that was not found.
        resource: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation kept losing version races and gave up after bounded
    /// internal retry.
    ConcurrencyConflict {
        /// The number of attempts made before surfacing the failure.
        attempts: u32,
    },
    /// Authentication denied because the account is locked.
    LockedAccount,
    /// Authentication failed. Covers unknown usernames and wrong passwords
    /// with one stable message.
    InvalidCredentials,
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// A uniqueness conflict, e.g. a taken username at registration.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An opaque infrastructure failure from the persistence layer,
    /// distinct from every domain error kind.
    Infrastructure {
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Requested {requested} seats but only {remaining} remain"
                )
            }
            Self::NotFound { resource, message } => {
                write!(f, "{resource} not found: {message}")
            }
            Self::ConcurrencyConflict { attempts } => {
                write!(
                    f,
                    "Operation conflicted with concurrent writes after {attempts} attempts"
                )
            }
            Self::LockedAccount => write!(f, "{LOCKED_ACCOUNT_MESSAGE}"),
            Self::InvalidCredentials => write!(f, "{INVALID_CREDENTIALS_MESSAGE}"),
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Infrastructure { message } => write!(f, "Storage failure: {message}"),
        }
    }
}

impl std::error::Error for BookingError {}

impl From<PasswordPolicyError> for BookingError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into a service error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> BookingError {
    match err {
        DomainError::EmptyTitle | DomainError::TitleTooLong { .. } => BookingError::Validation {
            field: String::from("title"),
            message: err.to_string(),
        },
        DomainError::EmptyDescription => BookingError::Validation {
            field: String::from("description"),
            message: err.to_string(),
        },
        DomainError::StartInPast { .. } => BookingError::Validation {
            field: String::from("start"),
            message: err.to_string(),
        },
        DomainError::DurationTooShort { .. } => BookingError::Validation {
            field: String::from("duration"),
            message: err.to_string(),
        },
        DomainError::CapacityTooSmall { .. } | DomainError::CapacityTooLarge { .. } => {
            BookingError::Validation {
                field: String::from("capacity"),
                message: err.to_string(),
            }
        }
        DomainError::CapacityBelowActiveReservations { .. } => BookingError::DomainRuleViolation {
            rule: String::from("capacity_covers_reservations"),
            message: err.to_string(),
        },
        DomainError::EventCancelled { .. } => BookingError::DomainRuleViolation {
            rule: String::from("event_not_cancelled"),
            message: err.to_string(),
        },
        DomainError::ActiveReservationsExist { .. } => BookingError::DomainRuleViolation {
            rule: String::from("no_active_reservations"),
            message: err.to_string(),
        },
        DomainError::InvalidQuantity { .. } => BookingError::Validation {
            field: String::from("quantity"),
            message: err.to_string(),
        },
        DomainError::CapacityExceeded {
            requested,
            remaining,
        } => BookingError::CapacityExceeded {
            requested,
            remaining,
        },
        DomainError::ReservationNotFound { ref reservation_id } => BookingError::NotFound {
            resource: String::from("Reservation"),
            message: format!("Reservation '{reservation_id}' does not exist"),
        },
        DomainError::InvalidEventId => BookingError::Validation {
            field: String::from("event_id"),
            message: err.to_string(),
        },
        DomainError::InvalidUserId => BookingError::Validation {
            field: String::from("user_id"),
            message: err.to_string(),
        },
        DomainError::EmptyCity => BookingError::Validation {
            field: String::from("city"),
            message: err.to_string(),
        },
        DomainError::EmptyAddress => BookingError::Validation {
            field: String::from("address"),
            message: err.to_string(),
        },
        DomainError::InvalidEmail(msg) => BookingError::Validation {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidCategory(msg) => BookingError::Validation {
            field: String::from("category"),
            message: msg,
        },
        DomainError::InvalidRole(msg) => BookingError::Validation {
            field: String::from("role"),
            message: msg,
        },
        DomainError::InvalidUsername(msg) => BookingError::Validation {
            field: String::from("username"),
            message: msg,
        },
        DomainError::EmptyPasswordHash => BookingError::Validation {
            field: String::from("password_hash"),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into a service error.
///
/// Version conflicts are normally consumed by the services' retry loops;
/// one reaching this function is surfaced as a single-attempt conflict.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> BookingError {
    match err {
        PersistenceError::VersionConflict { .. } => {
            BookingError::ConcurrencyConflict { attempts: 1 }
        }
        PersistenceError::DuplicateRecord(msg) => BookingError::Conflict { message: msg },
        PersistenceError::RecordNotFound(msg) => BookingError::NotFound {
            resource: String::from("Record"),
            message: msg,
        },
        PersistenceError::HashingFailed(msg) | PersistenceError::Other(msg) => {
            BookingError::Infrastructure { message: msg }
        }
    }
}
