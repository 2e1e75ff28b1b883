//! # Turfbook Testing
//!
//! Testing utilities for the turfbook client.
//!
//! This crate provides:
//! - Deterministic clocks
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use turfbook_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(AppReducer::new())
//!     .with_env(test_environment())
//!     .given_state(slots_state())
//!     .when_action(AppAction::ToggleSlot { slot })
//!     .then_state(|state| assert_eq!(state.selected_slot_count(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use turfbook_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::{NaiveDate, TimeZone};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, so "today" and the booking window
    /// never drift between assertions.
    ///
    /// # Example
    ///
    /// ```
    /// use turfbook_testing::mocks::FixedClock;
    /// use turfbook_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// Clock pinned to noon UTC on the given calendar day
        ///
        /// Returns `None` for an invalid date.
        #[must_use]
        pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            let noon = date.and_hms_opt(12, 0, 0)?;
            Some(Self::new(Utc.from_utc_datetime(&noon)))
        }

        /// The calendar day this clock reports
        #[must_use]
        pub fn today(&self) -> NaiveDate {
            self.time.date_naive()
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-25 12:00:00 UTC, a Saturday)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 25, 12, 0, 0).single().unwrap_or_default())
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
