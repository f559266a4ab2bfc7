// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures shared by the persistence tests.

use seatline_domain::{EmailAddress, Event, EventCategory, Location, Role, User};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

pub fn create_test_event(title: &str, city: &str, category: EventCategory) -> Event {
    Event::create(
        title,
        "A test event",
        NOW + Duration::days(7),
        Duration::hours(2),
        Location::new(city, "Main Street 1").unwrap(),
        100,
        category,
        NOW,
    )
    .unwrap()
}

pub fn create_test_event_starting_at(title: &str, start: OffsetDateTime) -> Event {
    Event::create(
        title,
        "A test event",
        start,
        Duration::hours(2),
        Location::new("Berlin", "Main Street 1").unwrap(),
        100,
        EventCategory::Technology,
        NOW,
    )
    .unwrap()
}

pub fn create_test_user(username: &str, email: &str) -> User {
    User::create(
        username,
        EmailAddress::parse(email).unwrap(),
        "$2b$12$fakehashfakehashfakehash",
        Role::Attendee,
    )
    .unwrap()
}
