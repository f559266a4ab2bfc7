// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The in-memory backend.
//!
//! One store struct implements every repository port plus the unit of
//! work. Aggregate tables hold `Versioned` records; `update` is a
//! compare-and-swap under the table's write lock, which is what makes the
//! load-mutate-save cycle safe under concurrent callers.

use crate::error::PersistenceError;
use crate::ports::{
    EventRepository, ReservationRepository, UnitOfWork, UserRepository, Versioned,
};
use seatline_domain::{
    EmailAddress, Event, EventCategory, EventId, Reservation, ReservationId, User, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use time::OffsetDateTime;
use tracing::{debug, info};

/// An in-memory, versioned implementation of every storage port.
///
/// Intended for tests and single-process deployments. A durable backend
/// satisfies the same contracts by mapping the version check onto a
/// conditional update.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Event aggregates keyed by id.
    events: RwLock<HashMap<EventId, Versioned<Event>>>,
    /// Reservation projections keyed by id.
    reservations: RwLock<HashMap<ReservationId, Reservation>>,
    /// User aggregates keyed by id.
    users: RwLock<HashMap<UserId, Versioned<User>>>,
    /// Writes applied since the last commit.
    pending_writes: AtomicUsize,
}

/// Maps a poisoned-lock failure to a persistence error.
fn lock_poisoned(table: &str) -> PersistenceError {
    PersistenceError::Other(format!("{table} table lock poisoned"))
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_events(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<EventId, Versioned<Event>>>, PersistenceError> {
        self.events.read().map_err(|_| lock_poisoned("events"))
    }

    fn write_events(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<EventId, Versioned<Event>>>, PersistenceError> {
        self.events.write().map_err(|_| lock_poisoned("events"))
    }

    fn read_reservations(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<ReservationId, Reservation>>, PersistenceError> {
        self.reservations
            .read()
            .map_err(|_| lock_poisoned("reservations"))
    }

    fn write_reservations(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<ReservationId, Reservation>>, PersistenceError> {
        self.reservations
            .write()
            .map_err(|_| lock_poisoned("reservations"))
    }

    fn read_users(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<UserId, Versioned<User>>>, PersistenceError> {
        self.users.read().map_err(|_| lock_poisoned("users"))
    }

    fn write_users(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<UserId, Versioned<User>>>, PersistenceError> {
        self.users.write().map_err(|_| lock_poisoned("users"))
    }

    fn record_write(&self) {
        self.pending_writes.fetch_add(1, Ordering::Relaxed);
    }
}

impl EventRepository for MemoryStore {
    fn get(&self, event_id: &EventId) -> Result<Option<Versioned<Event>>, PersistenceError> {
        Ok(self.read_events()?.get(event_id).cloned())
    }

    fn add(&self, event: &Event) -> Result<u64, PersistenceError> {
        let mut events = self.write_events()?;

        if events.contains_key(event.event_id()) {
            return Err(PersistenceError::DuplicateRecord(format!(
                "Event '{}' already exists",
                event.event_id()
            )));
        }

        events.insert(event.event_id().clone(), Versioned::new(event.clone(), 1));
        drop(events);
        self.record_write();
        debug!(event_id = %event.event_id(), "Event stored at version 1");
        Ok(1)
    }

    fn update(&self, event: &Event, expected_version: u64) -> Result<u64, PersistenceError> {
        let mut events = self.write_events()?;

        let record: &mut Versioned<Event> =
            events.get_mut(event.event_id()).ok_or_else(|| {
                PersistenceError::RecordNotFound(format!(
                    "Event '{}' does not exist",
                    event.event_id()
                ))
            })?;

        if record.version != expected_version {
            return Err(PersistenceError::VersionConflict {
                expected: expected_version,
                actual: record.version,
            });
        }

        record.value = event.clone();
        record.version += 1;
        let new_version: u64 = record.version;
        drop(events);
        self.record_write();
        debug!(event_id = %event.event_id(), version = new_version, "Event updated");
        Ok(new_version)
    }

    fn delete(&self, event_id: &EventId, expected_version: u64) -> Result<(), PersistenceError> {
        let mut events = self.write_events()?;

        let record: &Versioned<Event> = events.get(event_id).ok_or_else(|| {
            PersistenceError::RecordNotFound(format!("Event '{event_id}' does not exist"))
        })?;

        if record.version != expected_version {
            return Err(PersistenceError::VersionConflict {
                expected: expected_version,
                actual: record.version,
            });
        }

        events.remove(event_id);
        drop(events);

        // Drop the reservation projections that belonged to the event.
        let mut reservations = self.write_reservations()?;
        reservations.retain(|_, r| r.event_id() != event_id);
        drop(reservations);

        self.record_write();
        info!(event_id = %event_id, "Event deleted");
        Ok(())
    }

    fn search_upcoming(&self, from: OffsetDateTime) -> Result<Vec<Event>, PersistenceError> {
        let events = self.read_events()?;
        let mut matches: Vec<Event> = events
            .values()
            .filter(|record| !record.value.is_cancelled() && record.value.start() >= from)
            .map(|record| record.value.clone())
            .collect();
        drop(events);
        matches.sort_by_key(Event::start);
        Ok(matches)
    }

    fn search_by_filter(
        &self,
        city: Option<&str>,
        category: Option<EventCategory>,
    ) -> Result<Vec<Event>, PersistenceError> {
        let city_lower: Option<String> = city.map(str::to_lowercase);
        let events = self.read_events()?;
        let mut matches: Vec<Event> = events
            .values()
            .filter(|record| !record.value.is_cancelled())
            .filter(|record| {
                city_lower
                    .as_ref()
                    .is_none_or(|c| record.value.location().city().to_lowercase() == *c)
            })
            .filter(|record| category.is_none_or(|c| record.value.category() == c))
            .map(|record| record.value.clone())
            .collect();
        drop(events);
        matches.sort_by_key(Event::start);
        Ok(matches)
    }
}

impl ReservationRepository for MemoryStore {
    fn get(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Option<Reservation>, PersistenceError> {
        Ok(self.read_reservations()?.get(reservation_id).cloned())
    }

    fn add(&self, reservation: &Reservation) -> Result<(), PersistenceError> {
        let mut reservations = self.write_reservations()?;

        if reservations.contains_key(reservation.reservation_id()) {
            return Err(PersistenceError::DuplicateRecord(format!(
                "Reservation '{}' already exists",
                reservation.reservation_id()
            )));
        }

        reservations.insert(reservation.reservation_id().clone(), reservation.clone());
        drop(reservations);
        self.record_write();
        debug!(reservation_id = %reservation.reservation_id(), "Reservation stored");
        Ok(())
    }

    fn update(&self, reservation: &Reservation) -> Result<(), PersistenceError> {
        let mut reservations = self.write_reservations()?;

        let record: &mut Reservation = reservations
            .get_mut(reservation.reservation_id())
            .ok_or_else(|| {
                PersistenceError::RecordNotFound(format!(
                    "Reservation '{}' does not exist",
                    reservation.reservation_id()
                ))
            })?;

        *record = reservation.clone();
        drop(reservations);
        self.record_write();
        debug!(reservation_id = %reservation.reservation_id(), "Reservation updated");
        Ok(())
    }

    fn list_by_event(&self, event_id: &EventId) -> Result<Vec<Reservation>, PersistenceError> {
        let reservations = self.read_reservations()?;
        let mut matches: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.event_id() == event_id)
            .cloned()
            .collect();
        drop(reservations);
        matches.sort_by_key(Reservation::created_at);
        Ok(matches)
    }

    fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Reservation>, PersistenceError> {
        let reservations = self.read_reservations()?;
        let mut matches: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();
        drop(reservations);
        matches.sort_by_key(Reservation::created_at);
        Ok(matches)
    }
}

impl UserRepository for MemoryStore {
    fn get(&self, user_id: &UserId) -> Result<Option<Versioned<User>>, PersistenceError> {
        Ok(self.read_users()?.get(user_id).cloned())
    }

    fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Versioned<User>>, PersistenceError> {
        let users = self.read_users()?;
        Ok(users
            .values()
            .find(|record| record.value.email() == email)
            .cloned())
    }

    fn get_by_username(&self, username: &str) -> Result<Option<Versioned<User>>, PersistenceError> {
        let normalized: String = username.trim().to_lowercase();
        let users = self.read_users()?;
        Ok(users
            .values()
            .find(|record| record.value.username() == normalized)
            .cloned())
    }

    fn add(&self, user: &User) -> Result<u64, PersistenceError> {
        let mut users = self.write_users()?;

        if users.contains_key(user.user_id()) {
            return Err(PersistenceError::DuplicateRecord(format!(
                "User '{}' already exists",
                user.user_id()
            )));
        }
        if users
            .values()
            .any(|record| record.value.username() == user.username())
        {
            return Err(PersistenceError::DuplicateRecord(format!(
                "Username '{}' is already taken",
                user.username()
            )));
        }
        if users
            .values()
            .any(|record| record.value.email() == user.email())
        {
            return Err(PersistenceError::DuplicateRecord(format!(
                "Email '{}' is already registered",
                user.email()
            )));
        }

        users.insert(user.user_id().clone(), Versioned::new(user.clone(), 1));
        drop(users);
        self.record_write();
        debug!(user_id = %user.user_id(), "User stored at version 1");
        Ok(1)
    }

    fn update(&self, user: &User, expected_version: u64) -> Result<u64, PersistenceError> {
        let mut users = self.write_users()?;

        let record: &mut Versioned<User> = users.get_mut(user.user_id()).ok_or_else(|| {
            PersistenceError::RecordNotFound(format!("User '{}' does not exist", user.user_id()))
        })?;

        if record.version != expected_version {
            return Err(PersistenceError::VersionConflict {
                expected: expected_version,
                actual: record.version,
            });
        }

        record.value = user.clone();
        record.version += 1;
        let new_version: u64 = record.version;
        drop(users);
        self.record_write();
        debug!(user_id = %user.user_id(), version = new_version, "User updated");
        Ok(new_version)
    }
}

impl UnitOfWork for MemoryStore {
    fn commit(&self) -> Result<usize, PersistenceError> {
        let count: usize = self.pending_writes.swap(0, Ordering::Relaxed);
        info!(writes = count, "Transaction committed");
        Ok(count)
    }
}
