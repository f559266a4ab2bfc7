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

mod accounts;
mod booking;
mod error;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

// Re-export public types
pub use accounts::AccountService;
pub use booking::BookingService;
pub use error::{
    BookingError, INVALID_CREDENTIALS_MESSAGE, LOCKED_ACCOUNT_MESSAGE, translate_domain_error,
    translate_persistence_error,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    CreateEventRequest, LoginOutcome, LoginRequest, RegisterAccountRequest, ReserveRequest,
    UpdateEventRequest,
};
