// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repository and unit-of-work port contracts.
//!
//! These traits are the only way the service layer touches storage. Every
//! aggregate write goes through a compare-and-swap `update` keyed on the
//! version the caller read, so an unguarded read-check-then-write sequence
//! is not expressible through these ports. Contention is scoped per
//! aggregate id; operations on different ids never block each other.

use crate::error::PersistenceError;
use seatline_domain::{
    EmailAddress, Event, EventCategory, EventId, Reservation, ReservationId, User, UserId,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An aggregate snapshot paired with the version counter it was read at.
///
/// The version must be passed back on `update`; a mismatch at write time
/// means another operation committed in between and the caller must retry
/// from a fresh load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// The aggregate snapshot.
    pub value: T,
    /// The version the snapshot was read at.
    pub version: u64,
}

impl<T> Versioned<T> {
    /// Pairs an aggregate snapshot with its version.
    #[must_use]
    pub const fn new(value: T, version: u64) -> Self {
        Self { value, version }
    }
}

/// Storage port for Event aggregates.
pub trait EventRepository: Send + Sync {
    /// Loads an event and its current version.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get(&self, event_id: &EventId) -> Result<Option<Versioned<Event>>, PersistenceError>;

    /// Stores a new event at version 1.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateRecord` if the id already exists.
    fn add(&self, event: &Event) -> Result<u64, PersistenceError>;

    /// Replaces a stored event if and only if its version still matches.
    ///
    /// Returns the new version on success.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` if another write
    /// committed since the caller's read, or `RecordNotFound` if the event
    /// was deleted.
    fn update(&self, event: &Event, expected_version: u64) -> Result<u64, PersistenceError>;

    /// Removes an event and its reservation projections, if and only if
    /// the stored version still matches.
    ///
    /// The version check keeps a delete from racing a concurrent reserve:
    /// the caller's "no active reservations" check stays valid through the
    /// removal.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` on a stale version, or
    /// `RecordNotFound` if the id does not exist.
    fn delete(&self, event_id: &EventId, expected_version: u64) -> Result<(), PersistenceError>;

    /// Lists non-cancelled events starting at or after `from`, ordered by
    /// start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn search_upcoming(&self, from: OffsetDateTime) -> Result<Vec<Event>, PersistenceError>;

    /// Lists non-cancelled events matching the given filters, ordered by
    /// start time. City matching is case-insensitive; `None` filters match
    /// everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn search_by_filter(
        &self,
        city: Option<&str>,
        category: Option<EventCategory>,
    ) -> Result<Vec<Event>, PersistenceError>;
}

/// Storage port for reservation projections.
///
/// Reservations are owned by their Event aggregate; this port holds a
/// read-mostly projection maintained by the booking service so reservations
/// can be listed without loading every event.
pub trait ReservationRepository: Send + Sync {
    /// Loads a reservation projection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Option<Reservation>, PersistenceError>;

    /// Stores a new reservation projection.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateRecord` if the id already exists.
    fn add(&self, reservation: &Reservation) -> Result<(), PersistenceError>;

    /// Replaces a stored reservation projection.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RecordNotFound` if the id does not exist.
    fn update(&self, reservation: &Reservation) -> Result<(), PersistenceError>;

    /// Lists all reservations for an event, in booking order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_by_event(&self, event_id: &EventId) -> Result<Vec<Reservation>, PersistenceError>;

    /// Lists all reservations made by a user, in booking order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Reservation>, PersistenceError>;
}

/// Storage port for User aggregates.
pub trait UserRepository: Send + Sync {
    /// Loads a user and its current version.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get(&self, user_id: &UserId) -> Result<Option<Versioned<User>>, PersistenceError>;

    /// Looks a user up by email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Versioned<User>>, PersistenceError>;

    /// Looks a user up by username (case-insensitive via normalization).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_by_username(&self, username: &str) -> Result<Option<Versioned<User>>, PersistenceError>;

    /// Stores a new user at version 1.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateRecord` if the id, username, or
    /// email is already taken.
    fn add(&self, user: &User) -> Result<u64, PersistenceError>;

    /// Replaces a stored user if and only if its version still matches.
    ///
    /// Returns the new version on success.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` on a stale version or
    /// `RecordNotFound` if the user does not exist.
    fn update(&self, user: &User, expected_version: u64) -> Result<u64, PersistenceError>;
}

/// End-of-transaction marker.
///
/// A durable backend makes all writes since the previous commit visible
/// atomically, or none at all. The in-memory backend applies each
/// compare-and-swap write atomically at `update` time and reports the
/// number of writes drained here.
pub trait UnitOfWork: Send + Sync {
    /// Marks the end of a logical transaction.
    ///
    /// Returns the number of writes made visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot commit.
    fn commit(&self) -> Result<usize, PersistenceError>;
}
