//! Injected dependencies of the client reducer.

use crate::config::Config;
use crate::gateway::RemoteStore;
use crate::hold::DEFAULT_HOLD_SECONDS;
use crate::schedule;
use crate::session::SessionStore;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::sync::Arc;
use std::time::Duration;
use turfbook_core::environment::Clock;

/// Environment dependencies for the client reducer
#[derive(Clone)]
pub struct AppEnvironment {
    /// Clock deciding "today"
    pub clock: Arc<dyn Clock>,
    /// Venues and bookings
    pub remote: Arc<dyn RemoteStore>,
    /// Persisted login
    pub sessions: Arc<dyn SessionStore>,
    /// Length of one hold countdown tick
    pub tick: Duration,
    /// Hold countdown length in ticks
    pub hold_seconds: u32,
    /// Number of selectable dates
    pub window_days: u32,
    /// UTC offset the calendar day is read in
    pub offset: FixedOffset,
}

impl AppEnvironment {
    /// Environment with a one-second tick and default booking settings
    ///
    /// Days are read in UTC until [`with_offset`](Self::with_offset) says otherwise.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        remote: Arc<dyn RemoteStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            clock,
            remote,
            sessions,
            tick: Duration::from_secs(1),
            hold_seconds: DEFAULT_HOLD_SECONDS,
            window_days: 7,
            offset: Utc.fix(),
        }
    }

    /// Read calendar days at `offset` from UTC
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Apply the booking settings from `config`
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        self.hold_seconds = config.booking.hold_seconds;
        self.window_days = config.booking.window_days;
        self
    }

    /// Today at the configured offset according to the clock
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.offset).date_naive()
    }

    /// Selectable dates, starting today
    #[must_use]
    pub fn booking_window(&self) -> Vec<NaiveDate> {
        schedule::booking_window(self.today(), self.window_days)
    }
}
