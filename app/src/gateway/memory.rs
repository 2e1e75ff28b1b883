//! In-memory remote store
//!
//! Used by tests and by the offline `memory` backend. It can be told to fail
//! or to swallow inserts, to exercise the client's failure paths.

use super::{GatewayError, GatewayFuture, RemoteStore};
use crate::types::{Booking, BookingId, Money, NewBooking, Venue, VenueId};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    venues: Vec<Venue>,
    bookings: Vec<Booking>,
    fail_reads: bool,
    fail_writes: bool,
    drop_rows: bool,
}

/// Remote store held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryRemoteStore {
    /// Store holding `venues` and no bookings
    #[must_use]
    pub fn with_venues(venues: Vec<Venue>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                venues,
                ..Inner::default()
            })),
        }
    }

    /// Store seeded with a few sample venues
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_venues(sample_venues())
    }

    /// Make venue reads fail
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make booking inserts fail
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Accept inserts but return no row
    pub fn drop_rows(&self, drop: bool) {
        self.lock().drop_rows = drop;
    }

    /// Bookings stored so far
    #[must_use]
    pub fn bookings(&self) -> Vec<Booking> {
        self.lock().bookings.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RemoteStore for InMemoryRemoteStore {
    fn list_venues(&self, city: &str) -> GatewayFuture<Vec<Venue>> {
        let result = {
            let inner = self.lock();
            if inner.fail_reads {
                Err(GatewayError::Unavailable("venue reads disabled".to_string()))
            } else {
                Ok(inner
                    .venues
                    .iter()
                    .filter(|venue| venue.city == city)
                    .cloned()
                    .collect())
            }
        };
        Box::pin(async move { result })
    }

    fn insert_booking(&self, booking: NewBooking) -> GatewayFuture<Option<Booking>> {
        let result = {
            let mut inner = self.lock();
            if inner.fail_writes {
                Err(GatewayError::Unavailable("booking inserts disabled".to_string()))
            } else if inner.drop_rows {
                Ok(None)
            } else {
                let stored = booking.with_id(BookingId::generate());
                inner.bookings.push(stored.clone());
                Ok(Some(stored))
            }
        };
        Box::pin(async move { result })
    }
}

/// Sample venues for the offline backend
#[must_use]
pub fn sample_venues() -> Vec<Venue> {
    let venue = |id: &str, name: &str, location: &str, city: &str, price: u64, rating: f64| Venue {
        id: VenueId::new(id),
        name: name.to_string(),
        location: location.to_string(),
        city: city.to_string(),
        price_per_hour: Money::rupees(price),
        rating,
        image_url: None,
    };

    vec![
        venue("gfa", "Green Field Arena", "Indiranagar", "Bengaluru", 800, 4.6),
        venue("sst", "Sky Sports Turf", "Koramangala", "Bengaluru", 1000, 4.4),
        venue("chg", "Champions Ground", "Whitefield", "Bengaluru", 750, 4.1),
        venue("mrt", "Marina Turf", "Besant Nagar", "Chennai", 900, 4.3),
        venue("kov", "Kovai Kickoff", "RS Puram", "Coimbatore", 700, 4.2),
    ]
}
