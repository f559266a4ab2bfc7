// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod clock;
mod error;
mod event;
mod reservation;
mod types;
mod user;

#[cfg(test)]
mod tests;

// Re-export public types
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DomainError;
pub use event::Event;
pub use reservation::Reservation;
pub use types::{EmailAddress, EventCategory, EventId, Location, ReservationId, Role, UserId};
pub use user::User;
