// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and aggregate operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Event title is empty.
    EmptyTitle,
    /// Event title exceeds the maximum length.
    TitleTooLong {
        /// The actual title length.
        length: usize,
        /// The maximum permitted length.
        max: usize,
    },
    /// Event description is empty.
    EmptyDescription,
    /// Event start time is too far in the past.
    StartInPast {
        /// The rejected start time.
        start: time::OffsetDateTime,
        /// The current time against which it was checked.
        now: time::OffsetDateTime,
    },
    /// Event duration is below the minimum.
    DurationTooShort {
        /// The rejected duration in whole minutes.
        minutes: i64,
        /// The minimum permitted duration in whole minutes.
        minimum: i64,
    },
    /// Event capacity is below the minimum.
    CapacityTooSmall {
        /// The rejected capacity value.
        capacity: u32,
    },
    /// Event capacity exceeds the maximum.
    CapacityTooLarge {
        /// The rejected capacity value.
        capacity: u32,
    },
    /// New capacity would fall below the seats held by active reservations.
    CapacityBelowActiveReservations {
        /// The requested capacity.
        capacity: u32,
        /// The seats currently held by non-cancelled reservations.
        reserved: u32,
    },
    /// The event has been cancelled and accepts no new reservations.
    EventCancelled {
        /// The cancelled event's identifier.
        event_id: String,
    },
    /// The event still has active reservations.
    ActiveReservationsExist {
        /// The number of active reservations blocking the operation.
        count: usize,
    },
    /// Reservation quantity must be positive.
    InvalidQuantity {
        /// The rejected quantity.
        quantity: u32,
    },
    /// Requested quantity exceeds the remaining capacity.
    CapacityExceeded {
        /// The requested quantity.
        requested: u32,
        /// The seats still available.
        remaining: u32,
    },
    /// Reservation was not found within the event.
    ReservationNotFound {
        /// The reservation identifier that was looked up.
        reservation_id: String,
    },
    /// Event identifier is empty.
    InvalidEventId,
    /// User identifier is empty.
    InvalidUserId,
    /// City is empty.
    EmptyCity,
    /// Address is empty.
    EmptyAddress,
    /// Email address is malformed.
    InvalidEmail(String),
    /// Event category is not recognized.
    InvalidCategory(String),
    /// Role is not recognized.
    InvalidRole(String),
    /// Username is empty or malformed.
    InvalidUsername(String),
    /// Password hash is empty.
    EmptyPasswordHash,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Event title cannot be empty"),
            Self::TitleTooLong { length, max } => {
                write!(
                    f,
                    "Event title is {length} characters long; maximum is {max}"
                )
            }
            Self::EmptyDescription => write!(f, "Event description cannot be empty"),
            Self::StartInPast { start, now } => {
                write!(f, "Event start {start} is in the past (now: {now})")
            }
            Self::DurationTooShort { minutes, minimum } => {
                write!(
                    f,
                    "Event duration of {minutes} minutes is below the minimum of {minimum} minutes"
                )
            }
            Self::CapacityTooSmall { capacity } => {
                write!(f, "Event capacity must be at least 1, got {capacity}")
            }
            Self::CapacityTooLarge { capacity } => {
                write!(f, "Event capacity must be at most 10000, got {capacity}")
            }
            Self::CapacityBelowActiveReservations { capacity, reserved } => {
                write!(
                    f,
                    "Capacity {capacity} is below the {reserved} seats held by active reservations"
                )
            }
            Self::EventCancelled { event_id } => {
                write!(f, "Event '{event_id}' has been cancelled")
            }
            Self::ActiveReservationsExist { count } => {
                write!(f, "Event still has {count} active reservations")
            }
            Self::InvalidQuantity { quantity } => {
                write!(f, "Reservation quantity must be positive, got {quantity}")
            }
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Requested {requested} seats but only {remaining} remain"
                )
            }
            Self::ReservationNotFound { reservation_id } => {
                write!(f, "Reservation '{reservation_id}' not found")
            }
            Self::InvalidEventId => write!(f, "Event identifier cannot be empty"),
            Self::InvalidUserId => write!(f, "User identifier cannot be empty"),
            Self::EmptyCity => write!(f, "City cannot be empty"),
            Self::EmptyAddress => write!(f, "Address cannot be empty"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email address: {msg}"),
            Self::InvalidCategory(msg) => write!(f, "Invalid category: {msg}"),
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::EmptyPasswordHash => write!(f, "Password hash cannot be empty"),
        }
    }
}

impl std::error::Error for DomainError {}
