//! The client reducer: every screen transition, hold tick and remote result.
//!
//! Actions that do not apply to the active screen are ignored. They are
//! logged at `debug` and change nothing.

use super::actions::AppAction;
use super::environment::AppEnvironment;
use super::state::{AdminView, AppState, Confirmation, HomeView, PaymentDraft, Screen, SlotSelection};
use crate::cities;
use crate::hold::{TickOutcome, Toggle};
use crate::schedule;
use crate::types::{BookingStatus, NewBooking, Role, Session};
use turfbook_core::{
    async_effect, cancellable, delay,
    effect::{Effect, EffectId},
    reducer::Reducer,
    smallvec, SmallVec,
};

/// Registration id of the hold countdown tick
pub const HOLD_TIMER: EffectId = EffectId::new("hold-timer");

/// Registration id of the in-flight venue fetch
pub const VENUE_FETCH: EffectId = EffectId::new("venue-fetch");

type Effects = SmallVec<[Effect<AppAction>; 4]>;

/// Reducer for the booking client
#[derive(Clone, Debug, Default)]
pub struct AppReducer;

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    // ========== Effects ==========

    /// Show the venue list for the current city and fetch it
    fn enter_home(state: &mut AppState, env: &AppEnvironment) -> Effect<AppAction> {
        state.screen = Screen::Home(HomeView::default());
        Self::fetch_venues(state, env)
    }

    fn fetch_venues(state: &mut AppState, env: &AppEnvironment) -> Effect<AppAction> {
        state.venues.clear();
        state.venues_loading = true;

        let remote = env.remote.clone();
        let city = state.city.clone();
        tracing::debug!(%city, "Fetching venues");

        cancellable! {
            id: VENUE_FETCH,
            effect: async_effect! {
                Some(match remote.list_venues(&city).await {
                    Ok(venues) => AppAction::VenuesLoaded { city, venues },
                    Err(error) => AppAction::VenuesFailed {
                        city,
                        error: error.to_string(),
                    },
                })
            }
        }
    }

    fn arm_hold_timer(selection: &SlotSelection, env: &AppEnvironment) -> Effect<AppAction> {
        cancellable! {
            id: HOLD_TIMER,
            effect: delay! {
                duration: env.tick,
                action: AppAction::HoldTick { epoch: selection.hold.epoch() }
            }
        }
    }

    fn save_session(session: Session, env: &AppEnvironment) -> Effect<AppAction> {
        let sessions = env.sessions.clone();
        Effect::Future(Box::pin(async move {
            sessions.save(&session).err().map(|error| AppAction::SessionPersistFailed {
                message: error.to_string(),
            })
        }))
    }

    fn clear_session(env: &AppEnvironment) -> Effect<AppAction> {
        let sessions = env.sessions.clone();
        Effect::Future(Box::pin(async move {
            sessions.clear().err().map(|error| AppAction::SessionPersistFailed {
                message: error.to_string(),
            })
        }))
    }

    fn ignored(state: &AppState, action: &AppAction) -> Effects {
        tracing::debug!(screen = ?state.screen.kind(), ?action, "Ignored action");
        SmallVec::new()
    }

    // ========== Screens ==========

    fn reduce_login(state: &mut AppState, action: AppAction, env: &AppEnvironment) -> Effects {
        let Screen::Login(form) = &mut state.screen else {
            return Self::ignored(state, &action);
        };

        match action {
            AppAction::SubmitLoginDetails {
                role,
                ref name,
                ref email,
                ref mobile,
            } => {
                if !form.submit_details(role, name, email, mobile) {
                    return Self::ignored(state, &action);
                }
                SmallVec::new()
            },
            AppAction::EditLoginDetails => {
                form.edit();
                SmallVec::new()
            },
            AppAction::VerifyOtp { ref otp } => {
                let Some(session) = form.verify(otp) else {
                    return Self::ignored(state, &action);
                };

                tracing::info!(role = %session.role, user = %session.user.name, "Logged in");
                state.notice = None;
                state.session = Some(session.clone());

                let mut effects: Effects = smallvec![Self::save_session(session.clone(), env)];
                match session.role {
                    Role::User => effects.push(Self::enter_home(state, env)),
                    Role::Admin => state.screen = Screen::Admin(AdminView::default()),
                }
                effects
            },
            other => Self::ignored(state, &other),
        }
    }

    fn reduce_home(state: &mut AppState, action: AppAction, env: &AppEnvironment) -> Effects {
        let Screen::Home(home) = &mut state.screen else {
            return Self::ignored(state, &action);
        };

        match action {
            AppAction::OpenLocationPicker => {
                home.picker = Some(String::new());
                SmallVec::new()
            },
            AppAction::SearchCities { query } => {
                home.picker = Some(query);
                SmallVec::new()
            },
            AppAction::CloseLocationPicker => {
                home.picker = None;
                SmallVec::new()
            },
            AppAction::SelectCity { ref city } => {
                let Some(city) = cities::lookup(city) else {
                    return Self::ignored(state, &action);
                };
                home.picker = None;
                tracing::info!(city, "City changed");
                state.city = city.to_string();
                smallvec![Self::fetch_venues(state, env)]
            },
            AppAction::SelectVenue { ref venue_id } => {
                let Some(venue) = state.venues.iter().find(|v| &v.id == venue_id).cloned() else {
                    return Self::ignored(state, &action);
                };
                state.screen = Screen::Slots(SlotSelection::new(venue, env.hold_seconds));
                SmallVec::new()
            },
            other => Self::ignored(state, &other),
        }
    }

    fn reduce_venues_result(state: &mut AppState, action: AppAction) -> Effects {
        let (city, venues) = match action {
            AppAction::VenuesLoaded { city, venues } => (city, venues),
            AppAction::VenuesFailed { city, error } => {
                tracing::warn!(%city, %error, "Venue fetch failed; showing no venues");
                (city, Vec::new())
            },
            other => return Self::ignored(state, &other),
        };

        if city != state.city || !matches!(state.screen, Screen::Home(_)) {
            tracing::debug!(%city, current = %state.city, "Dropped stale venue list");
            return SmallVec::new();
        }

        state.venues = venues;
        state.venues_loading = false;
        SmallVec::new()
    }

    fn reduce_slots(state: &mut AppState, action: AppAction, env: &AppEnvironment) -> Effects {
        let Screen::Slots(selection) = &mut state.screen else {
            return Self::ignored(state, &action);
        };

        match action {
            AppAction::SelectDate { date } => {
                if !env.booking_window().contains(&date) {
                    return Self::ignored(state, &action);
                }
                selection.date = Some(date);
                selection.hold.reset();
                smallvec![Effect::Cancel(HOLD_TIMER)]
            },
            AppAction::ToggleSlot { slot } => {
                if selection.date.is_none() || !slot.availability().is_selectable() {
                    return Self::ignored(state, &action);
                }
                match selection.hold.toggle(slot) {
                    Toggle::Started => smallvec![Self::arm_hold_timer(selection, env)],
                    Toggle::Released => smallvec![Effect::Cancel(HOLD_TIMER)],
                    Toggle::Added | Toggle::Removed => SmallVec::new(),
                }
            },
            AppAction::HoldTick { epoch } => match selection.hold.tick(epoch) {
                TickOutcome::Counted => smallvec![Self::arm_hold_timer(selection, env)],
                TickOutcome::Expired => {
                    tracing::debug!(venue = %selection.venue.name, "Slot hold expired");
                    SmallVec::new()
                },
                TickOutcome::Stale | TickOutcome::Idle => SmallVec::new(),
            },
            AppAction::ContinueToPayment => {
                let Some(date) = selection.date else {
                    return Self::ignored(state, &action);
                };
                if selection.hold.is_empty() {
                    return Self::ignored(state, &action);
                }

                let draft = PaymentDraft {
                    venue: selection.venue.clone(),
                    date,
                    slots: selection.hold.selected().to_vec(),
                    quote: selection.quote(),
                    submitting: false,
                    attempt: 0,
                    error: None,
                };
                state.screen = Screen::Payment(draft);
                smallvec![Effect::Cancel(HOLD_TIMER)]
            },
            AppAction::BackToHome => {
                smallvec![Effect::Cancel(HOLD_TIMER), Self::enter_home(state, env)]
            },
            other => Self::ignored(state, &other),
        }
    }

    fn reduce_payment(state: &mut AppState, action: AppAction, env: &AppEnvironment) -> Effects {
        let Screen::Payment(draft) = &mut state.screen else {
            return Self::ignored(state, &action);
        };

        match action {
            AppAction::SubmitPayment { ref method } => {
                let Some(session) = state.session.as_ref() else {
                    return Self::ignored(state, &action);
                };
                if draft.submitting {
                    return Self::ignored(state, &action);
                }

                let booking = NewBooking {
                    turf_id: draft.venue.id.clone(),
                    booking_date: draft.date,
                    time_slot: schedule::join_labels(&draft.slots),
                    user_name: session.user.name.clone(),
                    user_email: session.user.email.clone(),
                    payment_method: method.label().to_string(),
                    total_amount: draft.quote.total,
                    status: BookingStatus::Confirmed,
                };
                state.submissions = state.submissions.wrapping_add(1);
                let attempt = state.submissions;
                draft.submitting = true;
                draft.attempt = attempt;
                draft.error = None;
                tracing::info!(
                    attempt,
                    venue = %draft.venue.name,
                    date = %draft.date,
                    amount = draft.quote.total.as_rupees(),
                    method = method.label(),
                    "Submitting booking"
                );

                let remote = env.remote.clone();
                smallvec![async_effect! {
                    Some(match remote.insert_booking(booking).await {
                        Ok(Some(booking)) => AppAction::BookingInserted { attempt, booking },
                        Ok(None) => AppAction::BookingNotReturned { attempt },
                        Err(error) => AppAction::BookingFailed {
                            attempt,
                            error: error.to_string(),
                        },
                    })
                }]
            },
            AppAction::BookingInserted { attempt, booking } if draft.awaits(attempt) => {
                tracing::info!(booking_id = %booking.id, "Booking confirmed");
                state.screen = Screen::Success(Confirmation {
                    venue: draft.venue.clone(),
                    booking,
                });
                SmallVec::new()
            },
            AppAction::BookingNotReturned { attempt } if draft.awaits(attempt) => {
                tracing::warn!("Booking insert returned no row");
                draft.submitting = false;
                draft.error =
                    Some("The booking could not be confirmed. Please try again.".to_string());
                SmallVec::new()
            },
            AppAction::BookingFailed { attempt, ref error } if draft.awaits(attempt) => {
                tracing::warn!(%error, "Booking insert failed");
                draft.submitting = false;
                draft.error = Some(format!("Payment could not be completed: {error}"));
                SmallVec::new()
            },
            AppAction::BackToSlots => {
                state.screen =
                    Screen::Slots(SlotSelection::new(draft.venue.clone(), env.hold_seconds));
                SmallVec::new()
            },
            other => Self::ignored(state, &other),
        }
    }

    fn logout(state: &mut AppState, env: &AppEnvironment) -> Effects {
        if let Some(session) = &state.session {
            tracing::info!(user = %session.user.name, "Logged out");
        }

        let default_city = state.default_city.clone();
        let submissions = state.submissions;
        *state = AppState::signed_out(default_city);
        state.submissions = submissions;

        smallvec![
            Effect::Cancel(HOLD_TIMER),
            Effect::Cancel(VENUE_FETCH),
            Self::clear_session(env),
        ]
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Started => match state.screen {
                Screen::Home(_) => smallvec![Self::fetch_venues(state, env)],
                _ => SmallVec::new(),
            },

            AppAction::SubmitLoginDetails { .. }
            | AppAction::EditLoginDetails
            | AppAction::VerifyOtp { .. } => Self::reduce_login(state, action, env),

            AppAction::SessionPersistFailed { message } => {
                tracing::warn!(%message, "Session storage failed");
                state.notice = Some(message);
                SmallVec::new()
            },

            AppAction::OpenLocationPicker
            | AppAction::SearchCities { .. }
            | AppAction::SelectCity { .. }
            | AppAction::CloseLocationPicker
            | AppAction::SelectVenue { .. } => Self::reduce_home(state, action, env),

            AppAction::VenuesLoaded { .. } | AppAction::VenuesFailed { .. } => {
                Self::reduce_venues_result(state, action)
            },

            AppAction::SelectDate { .. }
            | AppAction::ToggleSlot { .. }
            | AppAction::HoldTick { .. }
            | AppAction::ContinueToPayment
            | AppAction::BackToHome => Self::reduce_slots(state, action, env),

            AppAction::SubmitPayment { .. }
            | AppAction::BookingInserted { .. }
            | AppAction::BookingNotReturned { .. }
            | AppAction::BookingFailed { .. }
            | AppAction::BackToSlots => Self::reduce_payment(state, action, env),

            AppAction::ReturnHome => match state.screen {
                Screen::Success(_) => smallvec![Self::enter_home(state, env)],
                _ => Self::ignored(state, &action),
            },

            AppAction::SearchBookings { query } => match &mut state.screen {
                Screen::Admin(view) => {
                    view.search = query;
                    SmallVec::new()
                },
                _ => Self::ignored(state, &AppAction::SearchBookings { query }),
            },

            AppAction::Logout => Self::logout(state, env),
        }
    }
}
