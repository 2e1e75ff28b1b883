//! The booking client as a reducer.
//!
//! - [`AppState`]: the active screen plus session, city and venues
//! - [`AppAction`]: user commands and results fed back by effects
//! - [`AppEnvironment`]: clock, remote store, session store and booking settings
//! - [`AppReducer`]: every transition of the flow

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod state;

pub use actions::AppAction;
pub use environment::AppEnvironment;
pub use reducer::{AppReducer, HOLD_TIMER, VENUE_FETCH};
pub use state::{
    AdminView, AppState, Confirmation, HomeView, PaymentDraft, Screen, ScreenKind, SlotSelection,
};
