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

mod error;
mod memory;
mod password;
mod ports;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::PersistenceError;
pub use memory::MemoryStore;
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use ports::{
    EventRepository, ReservationRepository, UnitOfWork, UserRepository, Versioned,
};
