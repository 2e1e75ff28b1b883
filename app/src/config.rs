//! Configuration management for the booking client.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::cities::DEFAULT_CITY;
use crate::hold::DEFAULT_HOLD_SECONDS;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `TURFBOOK_BACKEND` names no known backend
    #[error("unknown backend '{0}' (expected 'postgrest' or 'memory')")]
    UnknownBackend(String),
}

/// Where venues and bookings live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Supabase / `PostgREST` over HTTP
    PostgRest,
    /// Seeded in-memory store (offline demo)
    Memory,
}

impl std::str::FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgrest" | "supabase" => Ok(Self::PostgRest),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Remote store connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Which backend to use
    pub backend: Backend,
    /// Base URL of the Supabase project
    pub url: String,
    /// Anon API key
    pub anon_key: String,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
}

impl RemoteConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Booking flow settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// City selected at startup
    pub default_city: String,
    /// Hold countdown length in seconds
    pub hold_seconds: u32,
    /// Number of selectable dates, starting today
    pub window_days: u32,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote store
    pub remote: RemoteConfig,
    /// Booking flow
    pub booking: BookingConfig,
    /// File holding the persisted session
    pub session_file: PathBuf,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Invalid numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownBackend`] for an unrecognised `TURFBOOK_BACKEND`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownBackend`] for an unrecognised `TURFBOOK_BACKEND`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("TURFBOOK_BACKEND")
            .map_or(Ok(Backend::PostgRest), |s| s.parse())?;

        Ok(Self {
            remote: RemoteConfig {
                backend,
                url: lookup("SUPABASE_URL")
                    .unwrap_or_else(|| "http://localhost:54321".to_string()),
                anon_key: lookup("SUPABASE_ANON_KEY").unwrap_or_default(),
                request_timeout: lookup("TURFBOOK_REQUEST_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .filter(|seconds| *seconds > 0)
                    .unwrap_or(10),
            },
            booking: BookingConfig {
                default_city: lookup("TURFBOOK_DEFAULT_CITY")
                    .unwrap_or_else(|| DEFAULT_CITY.to_string()),
                hold_seconds: lookup("TURFBOOK_HOLD_SECONDS")
                    .and_then(|s| s.parse().ok())
                    .filter(|seconds| *seconds > 0)
                    .unwrap_or(DEFAULT_HOLD_SECONDS),
                window_days: lookup("TURFBOOK_BOOKING_WINDOW_DAYS")
                    .and_then(|s| s.parse().ok())
                    .filter(|days| *days > 0)
                    .unwrap_or(7),
            },
            session_file: lookup("TURFBOOK_SESSION_FILE")
                .map_or_else(|| PathBuf::from(".turfbook/session.json"), PathBuf::from),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.remote.backend, Backend::PostgRest);
        assert_eq!(config.remote.url, "http://localhost:54321");
        assert_eq!(config.remote.timeout(), Duration::from_secs(10));
        assert_eq!(config.booking.default_city, "Bengaluru");
        assert_eq!(config.booking.hold_seconds, 300);
        assert_eq!(config.booking.window_days, 7);
        assert_eq!(config.session_file, PathBuf::from(".turfbook/session.json"));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("TURFBOOK_HOLD_SECONDS", "soon"),
            ("TURFBOOK_BOOKING_WINDOW_DAYS", "0"),
            ("TURFBOOK_REQUEST_TIMEOUT", "3"),
        ]))
        .unwrap();

        assert_eq!(config.booking.hold_seconds, 300);
        assert_eq!(config.booking.window_days, 7);
        assert_eq!(config.remote.request_timeout, 3);
    }

    #[test]
    fn zero_timeout_falls_back() {
        let config =
            Config::from_lookup(lookup_from(&[("TURFBOOK_REQUEST_TIMEOUT", "0")])).unwrap();

        assert_eq!(config.remote.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn memory_backend_and_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TURFBOOK_BACKEND", "Memory"),
            ("TURFBOOK_DEFAULT_CITY", "Chennai"),
            ("TURFBOOK_SESSION_FILE", "/tmp/s.json"),
        ]))
        .unwrap();

        assert_eq!(config.remote.backend, Backend::Memory);
        assert_eq!(config.booking.default_city, "Chennai");
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn unknown_backend_is_an_error() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[("TURFBOOK_BACKEND", "mongo")])),
            Err(ConfigError::UnknownBackend("mongo".to_string()))
        );
    }
}
