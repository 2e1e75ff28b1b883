//! Remote store gateway.
//!
//! Venues and bookings live in an external backend-as-a-service. The client
//! only lists venues by city and inserts bookings; availability, payment and
//! accounts are the backend's business.

use crate::types::{Booking, NewBooking, Venue};
use futures::future::BoxFuture;
use thiserror::Error;

pub mod memory;
pub mod postgrest;

pub use memory::InMemoryRemoteStore;
pub use postgrest::PostgrestClient;

/// Gateway result
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Boxed gateway future
pub type GatewayFuture<T> = BoxFuture<'static, GatewayResult<T>>;

/// Errors talking to the remote store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// HTTP request failed (connection, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was not what the table should return
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Backend answered with an error status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Body returned by the backend
        message: String,
    },

    /// Backend refused the operation
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),
}

/// Remote store of venues and bookings
///
/// Futures are `'static` so they can be handed to the runtime as effects.
pub trait RemoteStore: Send + Sync {
    /// Venues listed under `city`
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the read fails.
    fn list_venues(&self, city: &str) -> GatewayFuture<Vec<Venue>>;

    /// Insert `booking` and return the stored row, if the backend returned one
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the insert fails.
    fn insert_booking(&self, booking: NewBooking) -> GatewayFuture<Option<Booking>>;
}
