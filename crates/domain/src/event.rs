// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::reservation::Reservation;
use crate::types::{EventCategory, EventId, Location, ReservationId, UserId};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// The aggregate root for event capacity and seat reservations.
///
/// An event exclusively owns its reservations: every mutation goes through
/// this type, which keeps the capacity invariant in one place. Remaining
/// capacity is derived (`capacity` minus the quantities of non-cancelled
/// reservations), so appending or soft-cancelling a reservation is the
/// single atomic state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The event's opaque identifier. Immutable after creation.
    event_id: EventId,
    /// The event title.
    title: String,
    /// The event description.
    description: String,
    /// When the event starts (UTC).
    start: OffsetDateTime,
    /// How long the event runs.
    duration: Duration,
    /// Where the event takes place.
    location: Location,
    /// The total number of seats.
    capacity: u32,
    /// The category tag.
    category: EventCategory,
    /// Whether the event has been cancelled.
    cancelled: bool,
    /// All reservations ever made, in booking order. Soft-cancelled
    /// reservations stay in place for audit.
    reservations: Vec<Reservation>,
}

impl Event {
    /// Maximum permitted title length in characters.
    pub const TITLE_MAX_LENGTH: usize = 200;
    /// Minimum permitted event duration in minutes.
    pub const MIN_DURATION_MINUTES: i64 = 15;
    /// Minimum permitted capacity.
    pub const CAPACITY_MIN: u32 = 1;
    /// Maximum permitted capacity.
    pub const CAPACITY_MAX: u32 = 10_000;
    /// Grace window: a start time may be up to this many minutes in the past.
    pub const START_GRACE_MINUTES: i64 = 5;

    /// Creates a new `Event` after validating every field constraint.
    ///
    /// # Arguments
    ///
    /// * `title` - The event title (non-empty, at most 200 characters)
    /// * `description` - The event description (non-empty)
    /// * `start` - The start time (at least `now` minus 5 minutes)
    /// * `duration` - The event duration (at least 15 minutes)
    /// * `location` - The validated location
    /// * `capacity` - The seat capacity (1 to 10000)
    /// * `category` - The category tag
    /// * `now` - The current time, supplied by the caller's clock
    ///
    /// # Errors
    ///
    /// Returns a distinct `DomainError` variant for each violated
    /// constraint: empty title, title too long, empty description, start
    /// too far in the past, duration under 15 minutes, capacity below 1,
    /// capacity above 10000.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        title: &str,
        description: &str,
        start: OffsetDateTime,
        duration: Duration,
        location: Location,
        capacity: u32,
        category: EventCategory,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        validate_details(title, description, start, duration, capacity, now)?;

        Ok(Self {
            event_id: EventId::generate(),
            title: title.trim().to_owned(),
            description: description.trim().to_owned(),
            start,
            duration,
            location,
            capacity,
            category,
            cancelled: false,
            reservations: Vec::new(),
        })
    }

    /// Replaces all mutable detail fields after re-validation.
    ///
    /// Runs the same field validation as [`Self::create`], then
    /// additionally rejects any new capacity below the seats held by
    /// currently active reservations, so remaining capacity cannot go
    /// negative. All-or-nothing: on any failure no field changes.
    ///
    /// # Errors
    ///
    /// Returns the same validation errors as [`Self::create`], plus
    /// `DomainError::CapacityBelowActiveReservations` if the new capacity
    /// cannot cover the active reservations.
    #[allow(clippy::too_many_arguments)]
    pub fn update_details(
        &mut self,
        title: &str,
        description: &str,
        start: OffsetDateTime,
        duration: Duration,
        location: Location,
        capacity: u32,
        category: EventCategory,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        validate_details(title, description, start, duration, capacity, now)?;

        let reserved: u32 = self.reserved_seats();
        if capacity < reserved {
            return Err(DomainError::CapacityBelowActiveReservations { capacity, reserved });
        }

        self.title = title.trim().to_owned();
        self.description = description.trim().to_owned();
        self.start = start;
        self.duration = duration;
        self.location = location;
        self.capacity = capacity;
        self.category = category;
        Ok(())
    }

    /// Cancels the event.
    ///
    /// Idempotent. Existing reservations are not retroactively cancelled;
    /// they remain queryable for refund and audit workflows outside this
    /// core.
    pub const fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Reserves `quantity` seats for `user_id`.
    ///
    /// Preconditions are checked in order: event not cancelled, user id
    /// non-empty, quantity positive, enough remaining capacity. On success
    /// the new reservation is appended to the aggregate, which is the
    /// atomic state change that reduces remaining capacity, and a copy of
    /// the record is returned to the caller.
    ///
    /// # Errors
    ///
    /// * `DomainError::EventCancelled` if the event has been cancelled
    /// * `DomainError::InvalidUserId` if the user id is empty
    /// * `DomainError::InvalidQuantity` if the quantity is zero
    /// * `DomainError::CapacityExceeded` if fewer than `quantity` seats remain
    pub fn reserve(
        &mut self,
        user_id: UserId,
        quantity: u32,
        now: OffsetDateTime,
    ) -> Result<Reservation, DomainError> {
        if self.cancelled {
            return Err(DomainError::EventCancelled {
                event_id: self.event_id.value().to_owned(),
            });
        }
        if user_id.is_empty() {
            return Err(DomainError::InvalidUserId);
        }
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }

        let remaining: u32 = self.remaining_capacity();
        if quantity > remaining {
            return Err(DomainError::CapacityExceeded {
                requested: quantity,
                remaining,
            });
        }

        let reservation: Reservation =
            Reservation::create(self.event_id.clone(), user_id, quantity, now)?;
        self.reservations.push(reservation.clone());
        Ok(reservation)
    }

    /// Cancels the reservation with the given id.
    ///
    /// Looks the reservation up within this aggregate's own collection
    /// only. Soft-cancels it (the record stays for audit), which restores
    /// the seats to the remaining capacity. Idempotent for an already
    /// cancelled reservation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReservationNotFound` if no reservation with
    /// that id belongs to this event.
    pub fn cancel_reservation(
        &mut self,
        reservation_id: &ReservationId,
    ) -> Result<(), DomainError> {
        let reservation: &mut Reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.reservation_id() == reservation_id)
            .ok_or_else(|| DomainError::ReservationNotFound {
                reservation_id: reservation_id.value().to_owned(),
            })?;

        reservation.cancel();
        Ok(())
    }

    /// Returns the number of seats not allocated to any active reservation.
    ///
    /// This never underflows, because every reservation was
    /// admitted against the remaining capacity at its booking time and
    /// capacity can never be lowered below the active reservation count.
    #[must_use]
    pub fn remaining_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.reserved_seats())
    }

    /// Returns the total seats held by non-cancelled reservations.
    #[must_use]
    pub fn reserved_seats(&self) -> u32 {
        self.reservations
            .iter()
            .filter(|r| !r.is_cancelled())
            .map(Reservation::quantity)
            .sum()
    }

    /// Returns the number of non-cancelled reservations.
    #[must_use]
    pub fn active_reservation_count(&self) -> usize {
        self.reservations.iter().filter(|r| !r.is_cancelled()).count()
    }

    /// Looks up a reservation by id within this aggregate.
    #[must_use]
    pub fn reservation(&self, reservation_id: &ReservationId) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.reservation_id() == reservation_id)
    }

    /// Returns all reservations in booking order, cancelled ones included.
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Returns the event's identifier.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Returns the event title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the event description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the start time.
    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the seat capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the category tag.
    #[must_use]
    pub const fn category(&self) -> EventCategory {
        self.category
    }

    /// Returns whether the event has been cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Validates the detail fields shared by `create` and `update_details`.
///
/// Each rule fails with its own distinct error variant so callers can
/// identify exactly which constraint was violated.
fn validate_details(
    title: &str,
    description: &str,
    start: OffsetDateTime,
    duration: Duration,
    capacity: u32,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let title: &str = title.trim();

    // Rule: title must not be empty
    if title.is_empty() {
        return Err(DomainError::EmptyTitle);
    }

    // Rule: title must not exceed the maximum length
    let length: usize = title.chars().count();
    if length > Event::TITLE_MAX_LENGTH {
        return Err(DomainError::TitleTooLong {
            length,
            max: Event::TITLE_MAX_LENGTH,
        });
    }

    // Rule: description must not be empty
    if description.trim().is_empty() {
        return Err(DomainError::EmptyDescription);
    }

    // Rule: start must be no earlier than now minus the grace window
    let earliest: OffsetDateTime = now - Duration::minutes(Event::START_GRACE_MINUTES);
    if start < earliest {
        return Err(DomainError::StartInPast { start, now });
    }

    // Rule: duration must be at least the minimum
    if duration < Duration::minutes(Event::MIN_DURATION_MINUTES) {
        return Err(DomainError::DurationTooShort {
            minutes: duration.whole_minutes(),
            minimum: Event::MIN_DURATION_MINUTES,
        });
    }

    // Rule: capacity must be within bounds
    if capacity < Event::CAPACITY_MIN {
        return Err(DomainError::CapacityTooSmall { capacity });
    }
    if capacity > Event::CAPACITY_MAX {
        return Err(DomainError::CapacityTooLarge { capacity });
    }

    Ok(())
}
