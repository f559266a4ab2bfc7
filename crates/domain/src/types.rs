// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generates an opaque identifier value.
///
/// Identifiers are random, never sequential, and never reused.
fn generate_id(prefix: &str) -> String {
    format!(
        "{prefix}_{:016x}{:016x}",
        rand::random::<u64>(),
        rand::random::<u64>()
    )
}

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            /// The opaque identifier value.
            value: String,
        }

        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self {
                    value: generate_id($prefix),
                }
            }

            /// Wraps an existing identifier value.
            #[must_use]
            pub fn from_value(value: &str) -> Self {
                Self {
                    value: value.to_owned(),
                }
            }

            /// Returns the identifier value.
            #[must_use]
            pub fn value(&self) -> &str {
                &self.value
            }

            /// Returns whether the identifier value is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.value.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.value)
            }
        }
    };
}

id_type!(
    /// Opaque identifier for an Event aggregate.
    EventId,
    "evt"
);
id_type!(
    /// Opaque identifier for a Reservation entity.
    ReservationId,
    "rsv"
);
id_type!(
    /// Opaque identifier for a User aggregate.
    UserId,
    "usr"
);

/// A validated, normalized email address.
///
/// Email addresses are normalized to lowercase to ensure case-insensitive
/// uniqueness, and compare by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress {
    /// The normalized email address value.
    value: String,
}

impl EmailAddress {
    /// Parses and normalizes an email address.
    ///
    /// # Arguments
    ///
    /// * `value` - The candidate email address (will be normalized to lowercase)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the address is empty, contains
    /// whitespace, does not contain exactly one `@`, has an empty local or
    /// domain part, or has a domain without a `.`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::InvalidEmail(String::from(
                "Email address cannot be empty",
            )));
        }

        if normalized.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidEmail(String::from(
                "Email address cannot contain whitespace",
            )));
        }

        let mut parts = normalized.splitn(2, '@');
        let local: &str = parts.next().unwrap_or("");
        let Some(domain) = parts.next() else {
            return Err(DomainError::InvalidEmail(format!(
                "Email address '{normalized}' is missing '@'"
            )));
        };

        if local.is_empty() {
            return Err(DomainError::InvalidEmail(String::from(
                "Email address is missing the local part",
            )));
        }

        if domain.is_empty() || domain.contains('@') {
            return Err(DomainError::InvalidEmail(format!(
                "Email address '{normalized}' has an invalid domain"
            )));
        }

        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(DomainError::InvalidEmail(format!(
                "Email domain '{domain}' is not a valid domain name"
            )));
        }

        Ok(Self { value: normalized })
    }

    /// Returns the normalized email address value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for EmailAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A validated event location: city plus street address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// The city name.
    city: String,
    /// The street address within the city.
    address: String,
}

impl Location {
    /// Creates a new `Location`.
    ///
    /// # Arguments
    ///
    /// * `city` - The city name (must be non-empty after trimming)
    /// * `address` - The street address (must be non-empty after trimming)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyCity` or `DomainError::EmptyAddress` if
    /// either field is blank.
    pub fn new(city: &str, address: &str) -> Result<Self, DomainError> {
        let city: &str = city.trim();
        let address: &str = address.trim();

        if city.is_empty() {
            return Err(DomainError::EmptyCity);
        }
        if address.is_empty() {
            return Err(DomainError::EmptyAddress);
        }

        Ok(Self {
            city: city.to_owned(),
            address: address.to_owned(),
        })
    }

    /// Returns the city name.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the street address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// The category tag assigned to an event.
///
/// Categories are fixed domain constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Concerts and live music.
    Music,
    /// Sporting events.
    Sports,
    /// Exhibitions, theatre, and the arts.
    Arts,
    /// Conferences, meetups, and workshops.
    Technology,
    /// Networking and business events.
    Business,
    /// Community gatherings.
    Community,
    /// Anything that fits no other category.
    Other,
}

impl EventCategory {
    /// Parses an event category from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid category.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Music" => Ok(Self::Music),
            "Sports" => Ok(Self::Sports),
            "Arts" => Ok(Self::Arts),
            "Technology" => Ok(Self::Technology),
            "Business" => Ok(Self::Business),
            "Community" => Ok(Self::Community),
            "Other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidCategory(format!(
                "Unknown category: {s}"
            ))),
        }
    }

    /// Returns the string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Sports => "Sports",
            Self::Arts => "Arts",
            Self::Technology => "Technology",
            Self::Business => "Business",
            Self::Community => "Community",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The role assigned to a user account.
///
/// Roles are fixed domain constants governing what a user may do in the
/// layers above this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// System administrators with corrective authority.
    Admin,
    /// Users who create and manage events.
    Organizer,
    /// Users who book seats.
    Attendee,
}

impl Role {
    /// Parses a role from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Organizer" => Ok(Self::Organizer),
            "Attendee" => Ok(Self::Attendee),
            _ => Err(DomainError::InvalidRole(format!("Unknown role: {s}"))),
        }
    }

    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Organizer => "Organizer",
            Self::Attendee => "Attendee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
