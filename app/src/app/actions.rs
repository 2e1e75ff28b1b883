//! Actions: user input plus the results fed back by effects.

use crate::payment::PaymentMethod;
use crate::schedule::Slot;
use crate::types::{Booking, Role, Venue, VenueId};
use chrono::NaiveDate;

/// Everything that can happen to the client
#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    // ========== Startup ==========
    /// Store is running; fetch venues if a restored session landed on home
    Started,

    // ========== Login ==========
    /// Submit role and contact details, "sending" the code
    SubmitLoginDetails {
        /// Role to sign in as
        role: Role,
        /// Full name
        name: String,
        /// Email
        email: String,
        /// Mobile number
        mobile: String,
    },
    /// Go back from the code step
    EditLoginDetails,
    /// Enter the one-time code
    VerifyOtp {
        /// The code
        otp: String,
    },
    /// Saving or clearing the session failed
    SessionPersistFailed {
        /// What went wrong
        message: String,
    },

    // ========== Home ==========
    /// Open the location picker
    OpenLocationPicker,
    /// Filter the location picker
    SearchCities {
        /// Search text
        query: String,
    },
    /// Switch to a catalog city
    SelectCity {
        /// City name, any case
        city: String,
    },
    /// Close the location picker
    CloseLocationPicker,
    /// Venue fetch for `city` finished
    VenuesLoaded {
        /// City the fetch was for
        city: String,
        /// Venues returned
        venues: Vec<Venue>,
    },
    /// Venue fetch for `city` failed
    VenuesFailed {
        /// City the fetch was for
        city: String,
        /// Failure description
        error: String,
    },
    /// Open the slot selector for a venue
    SelectVenue {
        /// Venue to book
        venue_id: VenueId,
    },

    // ========== Slots ==========
    /// Pick a date from the booking window
    SelectDate {
        /// The date
        date: NaiveDate,
    },
    /// Select or deselect a slot
    ToggleSlot {
        /// The slot
        slot: Slot,
    },
    /// One second of the hold countdown scheduled under `epoch`
    HoldTick {
        /// Countdown generation the tick belongs to
        epoch: u64,
    },
    /// Proceed to payment
    ContinueToPayment,
    /// Leave the selector for the venue list
    BackToHome,

    // ========== Payment ==========
    /// Pay with `method`, inserting the booking
    SubmitPayment {
        /// Validated method
        method: PaymentMethod,
    },
    /// Insert returned the stored row
    BookingInserted {
        /// Submission this result answers
        attempt: u64,
        /// Stored booking
        booking: Booking,
    },
    /// Insert succeeded but returned no row
    BookingNotReturned {
        /// Submission this result answers
        attempt: u64,
    },
    /// Insert failed
    BookingFailed {
        /// Submission this result answers
        attempt: u64,
        /// Failure description
        error: String,
    },
    /// Back to a fresh slot selector for the same venue
    BackToSlots,

    // ========== Success ==========
    /// Back to the venue list
    ReturnHome,

    // ========== Admin ==========
    /// Filter the bookings table
    SearchBookings {
        /// Search text
        query: String,
    },

    // ========== Anywhere ==========
    /// Sign out and forget the session
    Logout,
}
