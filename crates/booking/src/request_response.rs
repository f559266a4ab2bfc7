// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and outcome types for the service layer.

use seatline_domain::{EventCategory, EventId, Role, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request to create a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// The event title.
    pub title: String,
    /// The event description.
    pub description: String,
    /// When the event starts (UTC).
    pub start: OffsetDateTime,
    /// How long the event runs, in minutes.
    pub duration_minutes: i64,
    /// The city the event takes place in.
    pub city: String,
    /// The street address within the city.
    pub address: String,
    /// The seat capacity.
    pub capacity: u32,
    /// The category tag.
    pub category: EventCategory,
}

/// Request to update an existing event's details.
///
/// Carries the full field set; the update is all-or-nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    /// The event to update.
    pub event_id: EventId,
    /// The new title.
    pub title: String,
    /// The new description.
    pub description: String,
    /// The new start time (UTC).
    pub start: OffsetDateTime,
    /// The new duration, in minutes.
    pub duration_minutes: i64,
    /// The new city.
    pub city: String,
    /// The new street address.
    pub address: String,
    /// The new seat capacity.
    pub capacity: u32,
    /// The new category tag.
    pub category: EventCategory,
}

/// Request to reserve seats on an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    /// The event to book seats on.
    pub event_id: EventId,
    /// The booking user.
    pub user_id: UserId,
    /// The number of seats requested.
    pub quantity: u32,
}

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAccountRequest {
    /// The desired username.
    pub username: String,
    /// The account email address.
    pub email: String,
    /// The plain-text password (hashed behind the hashing port, never
    /// stored).
    pub password: String,
    /// The account role.
    pub role: Role,
}

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The username.
    pub username: String,
    /// The plain-text password.
    pub password: String,
}

/// The result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// The authenticated user's identifier.
    pub user_id: UserId,
    /// The authenticated user's normalized username.
    pub username: String,
    /// The authenticated user's role.
    pub role: Role,
}
