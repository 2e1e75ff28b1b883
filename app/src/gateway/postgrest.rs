//! Supabase / `PostgREST` HTTP gateway

use super::{GatewayError, GatewayFuture, GatewayResult, RemoteStore};
use crate::config::RemoteConfig;
use crate::types::{Booking, NewBooking, Venue};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

/// `PostgREST` client for the `turfs` and `bookings` tables
#[derive(Clone)]
pub struct PostgrestClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl PostgrestClient {
    /// Create a client for the project at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RequestFailed`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RequestFailed`] if the HTTP client cannot be built.
    pub fn from_config(config: &RemoteConfig) -> GatewayResult<Self> {
        Self::new(config.url.clone(), config.anon_key.clone(), config.timeout())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// `GET /rest/v1/turfs?select=*&city=eq.{city}`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    #[tracing::instrument(skip(self))]
    pub async fn fetch_venues(&self, city: &str) -> GatewayResult<Vec<Venue>> {
        let response = self
            .authorized(self.client.get(self.table_url("turfs")))
            .query(&[("select", "*".to_string()), ("city", format!("eq.{city}"))])
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let result = match response.status() {
            StatusCode::OK => response
                .json::<Vec<Venue>>()
                .await
                .map_err(|e| GatewayError::ResponseParseFailed(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GatewayError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            },
        };
        record("list_venues", result.is_ok());
        result
    }

    /// `POST /rest/v1/bookings` with `Prefer: return=representation`
    ///
    /// Returns the first row of the representation, or `None` when the
    /// backend returned none.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    #[tracing::instrument(skip(self, booking), fields(turf_id = %booking.turf_id))]
    pub async fn create_booking(&self, booking: &NewBooking) -> GatewayResult<Option<Booking>> {
        let response = self
            .authorized(self.client.post(self.table_url("bookings")))
            .header("Prefer", "return=representation")
            .json(&[booking])
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let result = match response.status() {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<Vec<Booking>>()
                .await
                .map(|rows| rows.into_iter().next())
                .map_err(|e| GatewayError::ResponseParseFailed(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GatewayError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            },
        };
        record("insert_booking", result.is_ok());
        result
    }
}

fn record(operation: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("turfbook.remote.requests", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

impl RemoteStore for PostgrestClient {
    fn list_venues(&self, city: &str) -> GatewayFuture<Vec<Venue>> {
        let client = self.clone();
        let city = city.to_string();
        Box::pin(async move { client.fetch_venues(&city).await })
    }

    fn insert_booking(&self, booking: NewBooking) -> GatewayFuture<Option<Booking>> {
        let client = self.clone();
        Box::pin(async move { client.create_booking(&booking).await })
    }
}
