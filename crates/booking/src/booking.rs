// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and reservation application service.

use crate::error::{BookingError, translate_domain_error, translate_persistence_error};
use crate::request_response::{CreateEventRequest, ReserveRequest, UpdateEventRequest};
use seatline_domain::{
    Clock, DomainError, Event, EventCategory, EventId, Location, Reservation, ReservationId,
    UserId,
};
use seatline_persistence::{
    EventRepository, PersistenceError, ReservationRepository, UnitOfWork, Versioned,
};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

/// How many times an operation re-reads and re-applies after losing a
/// version race before surfacing `ConcurrencyConflict`.
pub(crate) const MAX_CONCURRENCY_RETRIES: u32 = 3;

/// Application service for event lifecycle and seat reservations.
///
/// Every event mutation runs as load, apply, compare-and-swap write: the
/// aggregate method re-evaluates its preconditions against the freshly
/// loaded state, and the versioned write rejects the result if another
/// operation committed in between. Lost races are retried a bounded number
/// of times; domain rule failures are never retried.
#[derive(Clone)]
pub struct BookingService {
    events: Arc<dyn EventRepository>,
    reservations: Arc<dyn ReservationRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    /// Creates a new `BookingService` over the given ports.
    #[must_use]
    pub fn new(
        events: Arc<dyn EventRepository>,
        reservations: Arc<dyn ReservationRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            reservations,
            unit_of_work,
            clock,
        }
    }

    /// Creates a new event.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Validation` for any invalid field, or an
    /// infrastructure error if the event cannot be stored.
    pub fn create_event(&self, request: &CreateEventRequest) -> Result<Event, BookingError> {
        let location: Location =
            Location::new(&request.city, &request.address).map_err(translate_domain_error)?;
        let now: OffsetDateTime = self.clock.now();

        let event: Event = Event::create(
            &request.title,
            &request.description,
            request.start,
            Duration::minutes(request.duration_minutes),
            location,
            request.capacity,
            request.category,
            now,
        )
        .map_err(translate_domain_error)?;

        self.events.add(&event).map_err(translate_persistence_error)?;
        self.unit_of_work
            .commit()
            .map_err(translate_persistence_error)?;

        info!(
            event_id = event.event_id().value(),
            capacity = event.capacity(),
            "Event created"
        );
        Ok(event)
    }

    /// Replaces an event's details, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` for an unknown event,
    /// `BookingError::Validation` for invalid fields,
    /// `BookingError::DomainRuleViolation` if the new capacity cannot cover
    /// the seats held by active reservations, or
    /// `BookingError::ConcurrencyConflict` after exhausted retries.
    pub fn update_event(&self, request: &UpdateEventRequest) -> Result<Event, BookingError> {
        let location: Location =
            Location::new(&request.city, &request.address).map_err(translate_domain_error)?;
        let now: OffsetDateTime = self.clock.now();

        let updated: Event = self.modify_event(&request.event_id, |event| {
            event.update_details(
                &request.title,
                &request.description,
                request.start,
                Duration::minutes(request.duration_minutes),
                location.clone(),
                request.capacity,
                request.category,
                now,
            )?;
            Ok(event.clone())
        })?;
        self.unit_of_work
            .commit()
            .map_err(translate_persistence_error)?;

        info!(event_id = request.event_id.value(), "Event updated");
        Ok(updated)
    }

    /// Cancels an event. Idempotent; existing reservations are untouched.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` for an unknown event or
    /// `BookingError::ConcurrencyConflict` after exhausted retries.
    pub fn cancel_event(&self, event_id: &EventId) -> Result<(), BookingError> {
        self.modify_event(event_id, |event| {
            event.cancel();
            Ok(())
        })?;
        self.unit_of_work
            .commit()
            .map_err(translate_persistence_error)?;

        info!(event_id = event_id.value(), "Event cancelled");
        Ok(())
    }

    /// Permanently removes an event that has no active reservations.
    ///
    /// The removal passes the version read during the reservation check
    /// down to the store, so a reservation booked in between fails the
    /// versioned delete and the check is re-run against fresh state.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` for an unknown event,
    /// `BookingError::DomainRuleViolation` if active reservations exist, or
    /// `BookingError::ConcurrencyConflict` after exhausted retries.
    pub fn delete_event(&self, event_id: &EventId) -> Result<(), BookingError> {
        for attempt in 1..=MAX_CONCURRENCY_RETRIES {
            let versioned: Versioned<Event> = self
                .events
                .get(event_id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| event_not_found(event_id))?;

            let count: usize = versioned.value.active_reservation_count();
            if count > 0 {
                return Err(translate_domain_error(
                    DomainError::ActiveReservationsExist { count },
                ));
            }

            match self.events.delete(event_id, versioned.version) {
                Ok(()) => {
                    self.unit_of_work
                        .commit()
                        .map_err(translate_persistence_error)?;
                    info!(event_id = event_id.value(), "Event deleted");
                    return Ok(());
                }
                Err(PersistenceError::VersionConflict { .. }) => {
                    debug!(
                        event_id = event_id.value(),
                        attempt, "Delete lost a version race; retrying"
                    );
                }
                Err(err) => return Err(translate_persistence_error(err)),
            }
        }

        Err(BookingError::ConcurrencyConflict {
            attempts: MAX_CONCURRENCY_RETRIES,
        })
    }

    /// Reserves seats on an event for a user.
    ///
    /// The capacity check and the reservation append happen inside one
    /// compare-and-swap cycle, so two racing reservations for the last
    /// seats can never both succeed: the loser's write is rejected and its
    /// retry re-evaluates capacity against the winner's committed state.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` for an unknown event,
    /// `BookingError::DomainRuleViolation` for a cancelled event,
    /// `BookingError::Validation` for a zero quantity or empty user id,
    /// `BookingError::CapacityExceeded` when fewer seats remain than
    /// requested, or `BookingError::ConcurrencyConflict` after exhausted
    /// retries.
    pub fn reserve(&self, request: &ReserveRequest) -> Result<Reservation, BookingError> {
        let now: OffsetDateTime = self.clock.now();

        let reservation: Reservation = self.modify_event(&request.event_id, |event| {
            event.reserve(request.user_id.clone(), request.quantity, now)
        })?;

        self.reservations
            .add(&reservation)
            .map_err(translate_persistence_error)?;
        self.unit_of_work
            .commit()
            .map_err(translate_persistence_error)?;

        info!(
            event_id = request.event_id.value(),
            reservation_id = reservation.reservation_id().value(),
            quantity = request.quantity,
            "Seats reserved"
        );
        Ok(reservation)
    }

    /// Cancels a reservation, restoring its seats to the event.
    ///
    /// Idempotent for an already cancelled reservation.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` if no reservation with that id
    /// exists, or `BookingError::ConcurrencyConflict` after exhausted
    /// retries.
    pub fn cancel_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Reservation, BookingError> {
        let projection: Reservation = self
            .reservations
            .get(reservation_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| BookingError::NotFound {
                resource: String::from("Reservation"),
                message: format!("Reservation '{}' does not exist", reservation_id.value()),
            })?;

        let cancelled: Reservation =
            self.modify_event(projection.event_id(), |event| {
                event.cancel_reservation(reservation_id)?;
                event
                    .reservation(reservation_id)
                    .map(Reservation::clone)
                    .ok_or_else(|| DomainError::ReservationNotFound {
                        reservation_id: reservation_id.value().to_owned(),
                    })
            })?;

        self.reservations
            .update(&cancelled)
            .map_err(translate_persistence_error)?;
        self.unit_of_work
            .commit()
            .map_err(translate_persistence_error)?;

        info!(
            reservation_id = reservation_id.value(),
            event_id = cancelled.event_id().value(),
            "Reservation cancelled"
        );
        Ok(cancelled)
    }

    /// Loads an event.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` for an unknown event.
    pub fn get_event(&self, event_id: &EventId) -> Result<Event, BookingError> {
        let versioned: Versioned<Event> = self
            .events
            .get(event_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| event_not_found(event_id))?;
        Ok(versioned.value)
    }

    /// Lists all reservations on an event, cancelled ones included, in
    /// booking order.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if the backend fails.
    pub fn list_reservations_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Reservation>, BookingError> {
        self.reservations
            .list_by_event(event_id)
            .map_err(translate_persistence_error)
    }

    /// Lists all reservations made by a user, in booking order.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if the backend fails.
    pub fn list_reservations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Reservation>, BookingError> {
        self.reservations
            .list_by_user(user_id)
            .map_err(translate_persistence_error)
    }

    /// Lists non-cancelled events starting at or after the current time,
    /// ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if the backend fails.
    pub fn search_upcoming(&self) -> Result<Vec<Event>, BookingError> {
        self.events
            .search_upcoming(self.clock.now())
            .map_err(translate_persistence_error)
    }

    /// Lists non-cancelled events matching the given filters, ordered by
    /// start time. `None` filters match everything.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if the backend fails.
    pub fn search_by_filter(
        &self,
        city: Option<&str>,
        category: Option<EventCategory>,
    ) -> Result<Vec<Event>, BookingError> {
        self.events
            .search_by_filter(city, category)
            .map_err(translate_persistence_error)
    }

    /// Loads an event, applies a mutation, and writes it back under a
    /// version check, retrying lost races from a fresh load.
    ///
    /// Domain errors from `apply` abort immediately without retry: the
    /// aggregate rejected the operation against current state, and current
    /// state is exactly what a retry would see again.
    fn modify_event<T>(
        &self,
        event_id: &EventId,
        mut apply: impl FnMut(&mut Event) -> Result<T, DomainError>,
    ) -> Result<T, BookingError> {
        for attempt in 1..=MAX_CONCURRENCY_RETRIES {
            let mut versioned: Versioned<Event> = self
                .events
                .get(event_id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| event_not_found(event_id))?;

            let outcome: T = apply(&mut versioned.value).map_err(translate_domain_error)?;

            match self.events.update(&versioned.value, versioned.version) {
                Ok(_) => return Ok(outcome),
                Err(PersistenceError::VersionConflict { .. }) => {
                    debug!(
                        event_id = event_id.value(),
                        attempt, "Write lost a version race; retrying"
                    );
                }
                Err(err) => return Err(translate_persistence_error(err)),
            }
        }

        Err(BookingError::ConcurrencyConflict {
            attempts: MAX_CONCURRENCY_RETRIES,
        })
    }
}

fn event_not_found(event_id: &EventId) -> BookingError {
    BookingError::NotFound {
        resource: String::from("Event"),
        message: format!("Event '{}' does not exist", event_id.value()),
    }
}
