//! The daily slot grid and the booking window.

use chrono::{Days, NaiveDate};
use std::fmt;

/// Number of one-hour slots offered per day
pub const SLOTS_PER_DAY: usize = 16;

const LABELS: [&str; SLOTS_PER_DAY] = [
    "06:00 AM - 07:00 AM",
    "07:00 AM - 08:00 AM",
    "08:00 AM - 09:00 AM",
    "09:00 AM - 10:00 AM",
    "10:00 AM - 11:00 AM",
    "11:00 AM - 12:00 PM",
    "12:00 PM - 01:00 PM",
    "01:00 PM - 02:00 PM",
    "02:00 PM - 03:00 PM",
    "03:00 PM - 04:00 PM",
    "04:00 PM - 05:00 PM",
    "05:00 PM - 06:00 PM",
    "06:00 PM - 07:00 PM",
    "07:00 PM - 08:00 PM",
    "08:00 PM - 09:00 PM",
    "09:00 PM - 10:00 PM",
];

/// Whether a slot can be picked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
    /// Free to book
    Available,
    /// Already booked by someone else
    Busy,
    /// Not offered
    Disabled,
}

impl Availability {
    /// True only for [`Availability::Available`]
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// One of the sixteen one-hour windows between 06:00 AM and 10:00 PM
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u8);

impl Slot {
    /// Slot at zero-based `index`, if it exists
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SLOTS_PER_DAY)
            .then(|| u8::try_from(index).ok())
            .flatten()
            .map(Self)
    }

    /// Slot with the given display label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        LABELS
            .iter()
            .position(|l| *l == label)
            .and_then(Self::from_index)
    }

    /// Every slot of the day, in order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLOTS_PER_DAY).filter_map(Self::from_index)
    }

    /// Zero-based position in the day
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Display label, e.g. `07:00 AM - 08:00 AM`
    #[must_use]
    pub const fn label(self) -> &'static str {
        LABELS[self.0 as usize]
    }

    /// Fixed availability of this slot
    #[must_use]
    pub const fn availability(self) -> Availability {
        match self.0 {
            0 => Availability::Disabled,
            2 | 9 | 13 => Availability::Busy,
            _ => Availability::Available,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Joins slot labels the way bookings store them
#[must_use]
pub fn join_labels(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(|slot| slot.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The selectable dates: `today` plus the following `days - 1` days
#[must_use]
pub fn booking_window(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..u64::from(days))
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}
