//! Confirmation ticket shown after a successful booking.
//!
//! The entry pattern is a placeholder derived from the booking id. It is
//! not a QR code and cannot be scanned.

use crate::types::{Booking, BookingId};
use chrono::NaiveDate;

/// Side length of the entry pattern
pub const PATTERN_SIZE: usize = 25;

/// Short booking reference: the first eight characters of the id, uppercased
#[must_use]
pub fn reference(id: &BookingId) -> String {
    id.as_str().chars().take(8).collect::<String>().to_uppercase()
}

/// 32-bit rolling hash (`h = (h << 5) - h + c` over UTF-16 units)
///
/// The shift wraps to 32 bits but the subtraction and addition do not, so
/// the accumulator is kept in 64 bits between steps.
#[must_use]
pub fn pattern_hash(data: &str) -> i64 {
    data.encode_utf16().fold(0i64, |acc, unit| {
        #[allow(clippy::cast_possible_truncation)]
        let shifted = i64::from((acc as i32).wrapping_shl(5));
        shifted - acc + i64::from(unit)
    })
}

/// Entry pattern for a booking: `pattern[y][x]` is true for a dark cell
#[must_use]
pub fn entry_pattern(id: &BookingId) -> Vec<Vec<bool>> {
    let hash = pattern_hash(&format!("KICKO-{id}"));
    (0..PATTERN_SIZE as i64)
        .map(|y| {
            (0..PATTERN_SIZE as i64)
                .map(|x| (hash + x * 127 + y * 257) % 100 > 40)
                .collect()
        })
        .collect()
}

/// Long-form date, e.g. `Saturday, January 25, 2025`
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Everything the success screen shows about a booking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// Short reference
    pub reference: String,
    /// Long-form date
    pub date: String,
    /// Slot labels
    pub slots: String,
    /// Amount line, e.g. `₹1600`
    pub amount: String,
    /// `Paid via {method}`
    pub paid_via: String,
    /// Entry pattern
    pub pattern: Vec<Vec<bool>>,
}

impl Ticket {
    /// Ticket for an inserted booking
    #[must_use]
    pub fn for_booking(booking: &Booking) -> Self {
        Self {
            reference: reference(&booking.id),
            date: long_date(booking.booking_date),
            slots: booking.time_slot.clone(),
            amount: booking.total_amount.to_string(),
            paid_via: format!("Paid via {}", booking.payment_method),
            pattern: entry_pattern(&booking.id),
        }
    }
}
