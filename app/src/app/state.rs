//! Client state: the active screen and what it needs to render.

use crate::admin::{self, BookingRow};
use crate::hold::SlotHold;
use crate::login::LoginForm;
use crate::pricing::Quote;
use crate::schedule::Slot;
use crate::session::SessionError;
use crate::types::{Booking, Role, Session, Venue};
use chrono::NaiveDate;

/// Which screen is active, without its data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    /// Login
    Login,
    /// Venue list
    Home,
    /// Date and slot selection
    Slots,
    /// Payment
    Payment,
    /// Confirmation
    Success,
    /// Admin dashboard
    Admin,
}

/// Home screen state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeView {
    /// Search text of the location picker while it is open
    pub picker: Option<String>,
}

/// Slot selector state
#[derive(Clone, Debug, PartialEq)]
pub struct SlotSelection {
    /// Venue being booked
    pub venue: Venue,
    /// Chosen date
    pub date: Option<NaiveDate>,
    /// Selected slots and countdown
    pub hold: SlotHold,
}

impl SlotSelection {
    /// Fresh selector for `venue`: no date, no slots
    #[must_use]
    pub fn new(venue: Venue, hold_seconds: u32) -> Self {
        Self {
            venue,
            date: None,
            hold: SlotHold::new(hold_seconds),
        }
    }

    /// Price of the current selection
    #[must_use]
    pub fn quote(&self) -> Quote {
        Quote::new(self.venue.price_per_hour, self.hold.len() as u64)
    }
}

/// Payment screen state
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentDraft {
    /// Venue being booked
    pub venue: Venue,
    /// Chosen date
    pub date: NaiveDate,
    /// Chosen slots, in selection order
    pub slots: Vec<Slot>,
    /// Price breakdown
    pub quote: Quote,
    /// An insert is in flight
    pub submitting: bool,
    /// Submission the in-flight insert belongs to
    pub attempt: u64,
    /// Why the last attempt failed
    pub error: Option<String>,
}

impl PaymentDraft {
    /// Whether a result for `attempt` belongs to the insert in flight
    #[must_use]
    pub const fn awaits(&self, attempt: u64) -> bool {
        self.submitting && self.attempt == attempt
    }
}

/// Success screen state
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    /// Venue booked
    pub venue: Venue,
    /// Row returned by the remote store
    pub booking: Booking,
}

/// Admin dashboard state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminView {
    /// Bookings table filter
    pub search: String,
}

impl AdminView {
    /// Rows matching the current filter
    #[must_use]
    pub fn visible_rows(&self) -> Vec<BookingRow> {
        admin::filter_bookings(&self.search)
    }
}

/// The active screen, owning exactly the data it renders
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// Login form
    Login(LoginForm),
    /// Venue list for the current city
    Home(HomeView),
    /// Date and slot selection
    Slots(SlotSelection),
    /// Payment for a selection
    Payment(PaymentDraft),
    /// Booking confirmed
    Success(Confirmation),
    /// Admin dashboard
    Admin(AdminView),
}

impl Screen {
    /// The screen without its data
    #[must_use]
    pub const fn kind(&self) -> ScreenKind {
        match self {
            Self::Login(_) => ScreenKind::Login,
            Self::Home(_) => ScreenKind::Home,
            Self::Slots(_) => ScreenKind::Slots,
            Self::Payment(_) => ScreenKind::Payment,
            Self::Success(_) => ScreenKind::Success,
            Self::Admin(_) => ScreenKind::Admin,
        }
    }

    /// Landing screen for a signed-in `role`
    #[must_use]
    pub fn landing(role: Role) -> Self {
        match role {
            Role::User => Self::Home(HomeView::default()),
            Role::Admin => Self::Admin(AdminView::default()),
        }
    }
}

/// Everything the client knows
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    /// Active screen
    pub screen: Screen,
    /// Signed-in session
    pub session: Option<Session>,
    /// City venues are listed for
    pub city: String,
    /// City restored at logout
    pub default_city: String,
    /// Venues of `city`
    pub venues: Vec<Venue>,
    /// A venue fetch is in flight
    pub venues_loading: bool,
    /// Message shown above the screen
    pub notice: Option<String>,
    /// Payment submissions made so far; numbers each insert
    pub submissions: u64,
}

impl AppState {
    /// Signed out, on the login screen
    #[must_use]
    pub fn signed_out(default_city: impl Into<String>) -> Self {
        let default_city = default_city.into();
        Self {
            screen: Screen::Login(LoginForm::default()),
            session: None,
            city: default_city.clone(),
            default_city,
            venues: Vec::new(),
            venues_loading: false,
            notice: None,
            submissions: 0,
        }
    }

    /// Startup state from whatever the session store returned
    ///
    /// A saved session lands on its role's screen; an unreadable one lands on
    /// login with a notice.
    #[must_use]
    pub fn restore(
        loaded: Result<Option<Session>, SessionError>,
        default_city: impl Into<String>,
    ) -> Self {
        let mut state = Self::signed_out(default_city);
        match loaded {
            Ok(Some(session)) => {
                state.screen = Screen::landing(session.role);
                state.session = Some(session);
            },
            Ok(None) => {},
            Err(error) => {
                tracing::warn!(%error, "Ignoring unreadable saved session");
                state.screen =
                    Screen::Login(LoginForm::with_notice("Saved session could not be read. Please log in again."));
            },
        }
        state
    }

    /// Role of the signed-in user; `user` when signed out
    #[must_use]
    pub fn role(&self) -> Role {
        self.session.as_ref().map_or(Role::User, |s| s.role)
    }

    /// Number of slots currently held
    #[must_use]
    pub fn selected_slot_count(&self) -> usize {
        match &self.screen {
            Screen::Slots(selection) => selection.hold.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::User;

    fn session(role: Role) -> Session {
        Session {
            role,
            user: User {
                name: "Askar".to_string(),
                email: "askar@example.com".to_string(),
                mobile: "98765".to_string(),
            },
        }
    }

    #[test]
    fn restore_routes_by_role() {
        let user = AppState::restore(Ok(Some(session(Role::User))), "Bengaluru");
        assert_eq!(user.screen.kind(), ScreenKind::Home);

        let admin = AppState::restore(Ok(Some(session(Role::Admin))), "Bengaluru");
        assert_eq!(admin.screen.kind(), ScreenKind::Admin);
        assert_eq!(admin.role(), Role::Admin);
    }

    #[test]
    fn restore_without_session_lands_on_login() {
        let state = AppState::restore(Ok(None), "Chennai");
        assert_eq!(state.screen.kind(), ScreenKind::Login);
        assert_eq!(state.city, "Chennai");
        assert!(state.session.is_none());
    }

    #[test]
    fn malformed_session_shows_notice() {
        let error = serde_json::from_str::<Session>("{").unwrap_err();
        let state = AppState::restore(Err(SessionError::Malformed(error)), "Bengaluru");

        assert!(matches!(
            &state.screen,
            Screen::Login(form)
                if form.notice.as_deref().is_some_and(|n| n.contains("could not be read"))
        ));
    }
}
