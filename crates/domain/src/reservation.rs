// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EventId, ReservationId, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A booking of seats on an event, owned exclusively by that event.
///
/// Reservations are created by [`crate::Event::reserve`] and cancelled by
/// [`crate::Event::cancel_reservation`]. The quantity is fixed at creation;
/// only the cancelled flag ever changes afterwards. Reservations are never
/// physically removed (soft-cancel only, for audit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// The reservation's opaque identifier.
    reservation_id: ReservationId,
    /// Back-reference to the owning event (id-based, not ownership).
    event_id: EventId,
    /// The user who booked the seats.
    user_id: UserId,
    /// The number of seats booked. Fixed at creation.
    quantity: u32,
    /// When the reservation was created.
    created_at: OffsetDateTime,
    /// Whether the reservation has been cancelled.
    cancelled: bool,
}

impl Reservation {
    /// Creates a new `Reservation`.
    ///
    /// This is invoked only by the owning event's `reserve` operation; the
    /// timestamp is supplied by the caller so that validation stays
    /// deterministic under an injected clock.
    ///
    /// # Arguments
    ///
    /// * `event_id` - The owning event's identifier
    /// * `user_id` - The booking user's identifier
    /// * `quantity` - The number of seats (must be positive)
    /// * `now` - The creation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the event id or user id is empty, or if the
    /// quantity is zero.
    pub(crate) fn create(
        event_id: EventId,
        user_id: UserId,
        quantity: u32,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if event_id.is_empty() {
            return Err(DomainError::InvalidEventId);
        }
        if user_id.is_empty() {
            return Err(DomainError::InvalidUserId);
        }
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }

        Ok(Self {
            reservation_id: ReservationId::generate(),
            event_id,
            user_id,
            quantity,
            created_at: now,
            cancelled: false,
        })
    }

    /// Marks this reservation as cancelled.
    ///
    /// Idempotent. Restricted to the owning event so that remaining
    /// capacity is always recomputed consistently; external callers go
    /// through `Event::cancel_reservation`.
    pub(crate) const fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns the reservation's identifier.
    #[must_use]
    pub const fn reservation_id(&self) -> &ReservationId {
        &self.reservation_id
    }

    /// Returns the owning event's identifier.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Returns the booking user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the number of seats booked.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns when the reservation was created.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns whether the reservation has been cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
