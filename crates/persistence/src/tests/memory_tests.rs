// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    NOW, create_test_event, create_test_event_starting_at, create_test_user,
};
use crate::{
    EventRepository, MemoryStore, PersistenceError, ReservationRepository, UnitOfWork,
    UserRepository, Versioned,
};
use seatline_domain::{Event, EventCategory, EventId, Reservation, User, UserId};
use time::Duration;

#[test]
fn test_add_and_get_event() {
    let store: MemoryStore = MemoryStore::new();
    let event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);

    let version: u64 = EventRepository::add(&store, &event).unwrap();
    assert_eq!(version, 1);

    let loaded: Versioned<Event> = EventRepository::get(&store, event.event_id())
        .unwrap()
        .unwrap();
    assert_eq!(loaded.value, event);
    assert_eq!(loaded.version, 1);
}

#[test]
fn test_get_missing_event_returns_none() {
    let store: MemoryStore = MemoryStore::new();
    let result = EventRepository::get(&store, &EventId::from_value("evt_missing")).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_add_duplicate_event_fails() {
    let store: MemoryStore = MemoryStore::new();
    let event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);

    EventRepository::add(&store, &event).unwrap();
    let result = EventRepository::add(&store, &event);
    assert!(matches!(result, Err(PersistenceError::DuplicateRecord(_))));
}

#[test]
fn test_update_bumps_version() {
    let store: MemoryStore = MemoryStore::new();
    let mut event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    EventRepository::add(&store, &event).unwrap();

    event.cancel();
    let version: u64 = EventRepository::update(&store, &event, 1).unwrap();
    assert_eq!(version, 2);

    let loaded: Versioned<Event> = EventRepository::get(&store, event.event_id())
        .unwrap()
        .unwrap();
    assert!(loaded.value.is_cancelled());
    assert_eq!(loaded.version, 2);
}

#[test]
fn test_update_with_stale_version_conflicts() {
    let store: MemoryStore = MemoryStore::new();
    let mut event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    EventRepository::add(&store, &event).unwrap();

    EventRepository::update(&store, &event, 1).unwrap();

    // A second writer still holding version 1 must be rejected.
    event.cancel();
    let result = EventRepository::update(&store, &event, 1);
    assert_eq!(
        result,
        Err(PersistenceError::VersionConflict {
            expected: 1,
            actual: 2
        })
    );

    // The stale write left no trace.
    let loaded: Versioned<Event> = EventRepository::get(&store, event.event_id())
        .unwrap()
        .unwrap();
    assert!(!loaded.value.is_cancelled());
}

#[test]
fn test_update_missing_event_fails() {
    let store: MemoryStore = MemoryStore::new();
    let event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    let result = EventRepository::update(&store, &event, 1);
    assert!(matches!(result, Err(PersistenceError::RecordNotFound(_))));
}

#[test]
fn test_delete_event_drops_reservation_projections() {
    let store: MemoryStore = MemoryStore::new();
    let mut event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    let reservation: Reservation = event
        .reserve(UserId::generate(), 2, NOW)
        .unwrap();
    EventRepository::add(&store, &event).unwrap();
    ReservationRepository::add(&store, &reservation).unwrap();

    store.delete(event.event_id(), 1).unwrap();

    assert!(
        EventRepository::get(&store, event.event_id())
            .unwrap()
            .is_none()
    );
    assert!(
        ReservationRepository::get(&store, reservation.reservation_id())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_with_stale_version_conflicts() {
    let store: MemoryStore = MemoryStore::new();
    let mut event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    EventRepository::add(&store, &event).unwrap();

    event.reserve(UserId::generate(), 1, NOW).unwrap();
    EventRepository::update(&store, &event, 1).unwrap();

    let result = store.delete(event.event_id(), 1);
    assert_eq!(
        result,
        Err(PersistenceError::VersionConflict {
            expected: 1,
            actual: 2
        })
    );
    assert!(
        EventRepository::get(&store, event.event_id())
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_delete_missing_event_fails() {
    let store: MemoryStore = MemoryStore::new();
    let result = store.delete(&EventId::from_value("evt_missing"), 1);
    assert!(matches!(result, Err(PersistenceError::RecordNotFound(_))));
}

#[test]
fn test_search_upcoming_filters_and_orders() {
    let store: MemoryStore = MemoryStore::new();
    let soon: Event = create_test_event_starting_at("Soon", NOW + Duration::days(1));
    let later: Event = create_test_event_starting_at("Later", NOW + Duration::days(10));
    let past: Event = create_test_event_starting_at("Past", NOW - Duration::minutes(5));
    let mut cancelled: Event = create_test_event_starting_at("Cancelled", NOW + Duration::days(2));
    cancelled.cancel();

    for event in [&soon, &later, &past, &cancelled] {
        EventRepository::add(&store, event).unwrap();
    }

    let upcoming: Vec<Event> = store.search_upcoming(NOW).unwrap();
    let titles: Vec<&str> = upcoming.iter().map(Event::title).collect();
    assert_eq!(titles, vec!["Soon", "Later"]);
}

#[test]
fn test_search_by_filter_city_and_category() {
    let store: MemoryStore = MemoryStore::new();
    let jazz: Event = create_test_event("Berlin Jazz", "Berlin", EventCategory::Music);
    let rust: Event = create_test_event("Berlin Rust", "Berlin", EventCategory::Technology);
    let hamburg: Event = create_test_event("Hamburg Jazz", "Hamburg", EventCategory::Music);
    for event in [&jazz, &rust, &hamburg] {
        EventRepository::add(&store, event).unwrap();
    }

    let by_city: Vec<Event> = store.search_by_filter(Some("berlin"), None).unwrap();
    assert_eq!(by_city.len(), 2);

    let by_category: Vec<Event> = store
        .search_by_filter(None, Some(EventCategory::Music))
        .unwrap();
    assert_eq!(by_category.len(), 2);

    let both: Vec<Event> = store
        .search_by_filter(Some("BERLIN"), Some(EventCategory::Music))
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].title(), "Berlin Jazz");

    let none: Vec<Event> = store.search_by_filter(None, None).unwrap();
    assert_eq!(none.len(), 3);
}

#[test]
fn test_reservation_projection_round_trip() {
    let store: MemoryStore = MemoryStore::new();
    let mut event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    let user: UserId = UserId::generate();
    let reservation: Reservation = event.reserve(user.clone(), 2, NOW).unwrap();

    ReservationRepository::add(&store, &reservation).unwrap();

    let by_event: Vec<Reservation> = store.list_by_event(event.event_id()).unwrap();
    assert_eq!(by_event, vec![reservation.clone()]);

    let by_user: Vec<Reservation> = store.list_by_user(&user).unwrap();
    assert_eq!(by_user, vec![reservation.clone()]);

    // Update the projection after a cancellation inside the aggregate.
    event
        .cancel_reservation(reservation.reservation_id())
        .unwrap();
    let cancelled: Reservation = event
        .reservation(reservation.reservation_id())
        .unwrap()
        .clone();
    ReservationRepository::update(&store, &cancelled).unwrap();

    let loaded: Reservation = ReservationRepository::get(&store, reservation.reservation_id())
        .unwrap()
        .unwrap();
    assert!(loaded.is_cancelled());
}

#[test]
fn test_reservation_update_missing_fails() {
    let store: MemoryStore = MemoryStore::new();
    let mut event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    let reservation: Reservation = event.reserve(UserId::generate(), 1, NOW).unwrap();

    let result = ReservationRepository::update(&store, &reservation);
    assert!(matches!(result, Err(PersistenceError::RecordNotFound(_))));
}

#[test]
fn test_user_lookup_by_username_and_email() {
    let store: MemoryStore = MemoryStore::new();
    let user: User = create_test_user("alice", "alice@example.com");
    UserRepository::add(&store, &user).unwrap();

    let by_name: Versioned<User> = store.get_by_username("ALICE").unwrap().unwrap();
    assert_eq!(by_name.value.user_id(), user.user_id());

    let by_email: Versioned<User> = store.get_by_email(user.email()).unwrap().unwrap();
    assert_eq!(by_email.value.user_id(), user.user_id());

    assert!(store.get_by_username("bob").unwrap().is_none());
}

#[test]
fn test_user_uniqueness_is_case_insensitive() {
    let store: MemoryStore = MemoryStore::new();
    UserRepository::add(&store, &create_test_user("alice", "alice@example.com")).unwrap();

    let same_name = UserRepository::add(&store, &create_test_user("Alice", "other@example.com"));
    assert!(matches!(same_name, Err(PersistenceError::DuplicateRecord(_))));

    let same_email = UserRepository::add(&store, &create_test_user("bob", "ALICE@example.com"));
    assert!(matches!(same_email, Err(PersistenceError::DuplicateRecord(_))));
}

#[test]
fn test_user_update_with_stale_version_conflicts() {
    let store: MemoryStore = MemoryStore::new();
    let mut user: User = create_test_user("alice", "alice@example.com");
    UserRepository::add(&store, &user).unwrap();

    user.register_access_failure();
    assert_eq!(UserRepository::update(&store, &user, 1).unwrap(), 2);

    let result = UserRepository::update(&store, &user, 1);
    assert_eq!(
        result,
        Err(PersistenceError::VersionConflict {
            expected: 1,
            actual: 2
        })
    );
}

#[test]
fn test_commit_reports_writes_since_last_commit() {
    let store: MemoryStore = MemoryStore::new();
    assert_eq!(store.commit().unwrap(), 0);

    let event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    EventRepository::add(&store, &event).unwrap();
    let user: User = create_test_user("alice", "alice@example.com");
    UserRepository::add(&store, &user).unwrap();

    assert_eq!(store.commit().unwrap(), 2);
    assert_eq!(store.commit().unwrap(), 0);
}

#[test]
fn test_versioned_snapshot_serializes() {
    let event: Event = create_test_event("Concert", "Berlin", EventCategory::Music);
    let record: Versioned<Event> = Versioned::new(event, 1);

    let json: String = serde_json::to_string(&record).unwrap();
    let restored: Versioned<Event> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, record);
}
