// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The clock port.
//!
//! Validation rules that compare against "now" take their time from this
//! trait rather than reading the system clock directly, so they can be
//! exercised with fixed times in tests.

use std::sync::RwLock;
use time::OffsetDateTime;

/// Supplies the current UTC time.
pub trait Clock: Send + Sync {
    /// Returns the current time in UTC.
    fn now(&self) -> OffsetDateTime;
}

/// The production clock, backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock frozen at a settable instant, for tests.
#[derive(Debug)]
pub struct FixedClock {
    /// The instant this clock reports.
    instant: RwLock<OffsetDateTime>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self {
            instant: RwLock::new(instant),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, instant: OffsetDateTime) {
        if let Ok(mut guard) = self.instant.write() {
            *guard = instant;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.instant
            .read()
            .map_or_else(|poisoned| *poisoned.into_inner(), |guard| *guard)
    }
}
