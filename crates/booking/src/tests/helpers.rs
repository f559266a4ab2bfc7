// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures shared by the booking service tests.

use crate::accounts::AccountService;
use crate::booking::BookingService;
use crate::request_response::{CreateEventRequest, RegisterAccountRequest};
use seatline_domain::{
    Clock, EmailAddress, Event, EventCategory, EventId, FixedClock, Role, User, UserId,
};
use seatline_persistence::{
    EventRepository, MemoryStore, PasswordHasher, PersistenceError, UserRepository, Versioned,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

/// A transparent hasher so credential tests run without bcrypt cost.
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PersistenceError> {
        Ok(format!("plain:{plaintext}"))
    }

    fn verify(&self, hash: &str, plaintext: &str) -> bool {
        hash == format!("plain:{plaintext}")
    }
}

/// An event store whose versioned writes always lose to a phantom
/// concurrent writer. Reads delegate to the wrapped store.
pub struct ContendedEventStore {
    inner: Arc<MemoryStore>,
    write_attempts: AtomicU32,
}

impl ContendedEventStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            write_attempts: AtomicU32::new(0),
        }
    }

    pub fn write_attempts(&self) -> u32 {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn lose_race(&self, expected_version: u64) -> PersistenceError {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        PersistenceError::VersionConflict {
            expected: expected_version,
            actual: expected_version + 1,
        }
    }
}

impl EventRepository for ContendedEventStore {
    fn get(&self, event_id: &EventId) -> Result<Option<Versioned<Event>>, PersistenceError> {
        EventRepository::get(self.inner.as_ref(), event_id)
    }

    fn add(&self, event: &Event) -> Result<u64, PersistenceError> {
        EventRepository::add(self.inner.as_ref(), event)
    }

    fn update(&self, _event: &Event, expected_version: u64) -> Result<u64, PersistenceError> {
        Err(self.lose_race(expected_version))
    }

    fn delete(&self, _event_id: &EventId, expected_version: u64) -> Result<(), PersistenceError> {
        Err(self.lose_race(expected_version))
    }

    fn search_upcoming(&self, from: OffsetDateTime) -> Result<Vec<Event>, PersistenceError> {
        self.inner.search_upcoming(from)
    }

    fn search_by_filter(
        &self,
        city: Option<&str>,
        category: Option<EventCategory>,
    ) -> Result<Vec<Event>, PersistenceError> {
        self.inner.search_by_filter(city, category)
    }
}

/// The user-store counterpart of [`ContendedEventStore`].
pub struct ContendedUserStore {
    inner: Arc<MemoryStore>,
    write_attempts: AtomicU32,
}

impl ContendedUserStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            write_attempts: AtomicU32::new(0),
        }
    }

    pub fn write_attempts(&self) -> u32 {
        self.write_attempts.load(Ordering::SeqCst)
    }
}

impl UserRepository for ContendedUserStore {
    fn get(&self, user_id: &UserId) -> Result<Option<Versioned<User>>, PersistenceError> {
        UserRepository::get(self.inner.as_ref(), user_id)
    }

    fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Versioned<User>>, PersistenceError> {
        self.inner.get_by_email(email)
    }

    fn get_by_username(&self, username: &str) -> Result<Option<Versioned<User>>, PersistenceError> {
        self.inner.get_by_username(username)
    }

    fn add(&self, user: &User) -> Result<u64, PersistenceError> {
        UserRepository::add(self.inner.as_ref(), user)
    }

    fn update(&self, _user: &User, expected_version: u64) -> Result<u64, PersistenceError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(PersistenceError::VersionConflict {
            expected: expected_version,
            actual: expected_version + 1,
        })
    }
}

pub fn booking_service(store: &Arc<MemoryStore>) -> BookingService {
    BookingService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(FixedClock::new(NOW)) as Arc<dyn Clock>,
    )
}

pub fn booking_service_with_clock(
    store: &Arc<MemoryStore>,
    clock: Arc<FixedClock>,
) -> BookingService {
    BookingService::new(store.clone(), store.clone(), store.clone(), clock)
}

pub fn account_service(store: &Arc<MemoryStore>) -> AccountService {
    AccountService::new(store.clone(), Arc::new(PlainTextHasher), store.clone())
}

pub fn create_event_request(capacity: u32) -> CreateEventRequest {
    CreateEventRequest {
        title: String::from("Concert in the Park"),
        description: String::from("An open-air evening concert"),
        start: NOW + Duration::days(7),
        duration_minutes: 120,
        city: String::from("Berlin"),
        address: String::from("Main Street 1"),
        capacity,
        category: EventCategory::Music,
    }
}

pub fn register_request(username: &str) -> RegisterAccountRequest {
    RegisterAccountRequest {
        username: String::from(username),
        email: format!("{username}@example.com"),
        password: String::from("Str0ng-Passw0rd!"),
        role: Role::Attendee,
    }
}
