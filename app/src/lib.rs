//! # Turfbook
//!
//! Terminal client for booking football turfs: list venues in a city, hold
//! hourly slots for a few minutes, pay with a simulated method and get an
//! entry ticket. Admins get a dashboard of sample figures with CSV export.
//!
//! The client is a single [`app::AppReducer`] run by a
//! [`turfbook_runtime::Store`]. Remote calls, session persistence and the
//! hold countdown are effects; their results come back as actions.
//!
//! ## Modules
//!
//! - [`app`]: state, actions, environment and reducer
//! - [`gateway`]: the remote store (PostgREST over HTTP, or in memory)
//! - [`session`]: persisted login
//! - [`hold`], [`pricing`], [`schedule`], [`payment`], [`login`], [`cities`]:
//!   booking rules
//! - [`ticket`], [`admin`]: confirmation ticket and admin dashboard data
//! - [`command`], [`view`]: terminal input and output
//! - [`config`]: environment configuration

pub mod admin;
pub mod app;
pub mod cities;
pub mod command;
pub mod config;
pub mod gateway;
pub mod hold;
pub mod login;
pub mod payment;
pub mod pricing;
pub mod schedule;
pub mod session;
pub mod ticket;
pub mod types;
pub mod view;

pub use app::{AppAction, AppEnvironment, AppReducer, AppState};
pub use config::Config;
