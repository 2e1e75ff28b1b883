//! Domain types for the turf booking client.
//!
//! Wire names follow the remote store's `turfs` and `bookings` tables.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a venue (turf)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(String);

impl VenueId {
    /// Wraps a raw identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a booking, assigned by the remote store
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Wraps a raw identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Amount in whole rupees
///
/// Numeric columns may come back fractional; those round to the nearest rupee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero rupees
    pub const ZERO: Self = Self(0);

    /// Creates an amount from whole rupees
    #[must_use]
    pub const fn rupees(amount: u64) -> Self {
        Self(amount)
    }

    /// The amount in whole rupees
    #[must_use]
    pub const fn as_rupees(self) -> u64 {
        self.0
    }

    /// Multiplies by a count, saturating on overflow
    #[must_use]
    pub const fn times(self, count: u64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Subtracts, flooring at zero
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl de::Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative amount")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        Ok(Money(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        u64::try_from(value)
            .map(Money)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        if !value.is_finite() || value < 0.0 || value > u64::MAX as f64 {
            return Err(E::invalid_value(de::Unexpected::Float(value), &self));
        }
        Ok(Money(value.round() as u64))
    }
}

/// `null` decodes as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

// ============================================================================
// Venue
// ============================================================================

/// A bookable turf, as stored in the remote `turfs` table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Venue ID
    pub id: VenueId,
    /// Display name
    pub name: String,
    /// Street or area
    pub location: String,
    /// City the venue is listed under
    pub city: String,
    /// Price for one one-hour slot
    pub price_per_hour: Money,
    /// Average rating; missing or `null` reads as zero
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    /// Image reference
    #[serde(default)]
    pub image_url: Option<String>,
}

// ============================================================================
// Booking
// ============================================================================

/// Booking status
///
/// The client only ever writes `confirmed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Paid and confirmed
    #[default]
    Confirmed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => f.write_str("confirmed"),
        }
    }
}

/// Insert payload for the remote `bookings` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    /// Venue being booked
    pub turf_id: VenueId,
    /// Calendar day (`YYYY-MM-DD` on the wire)
    pub booking_date: NaiveDate,
    /// Slot labels joined by `", "`
    pub time_slot: String,
    /// Purchaser name
    pub user_name: String,
    /// Purchaser email
    pub user_email: String,
    /// Uppercase payment method label
    pub payment_method: String,
    /// Quoted total
    pub total_amount: Money,
    /// Always confirmed
    pub status: BookingStatus,
}

impl NewBooking {
    /// Attaches the identifier the remote store assigned
    #[must_use]
    pub fn with_id(self, id: BookingId) -> Booking {
        Booking {
            id,
            turf_id: self.turf_id,
            booking_date: self.booking_date,
            time_slot: self.time_slot,
            user_name: self.user_name,
            user_email: self.user_email,
            payment_method: self.payment_method,
            total_amount: self.total_amount,
            status: self.status,
        }
    }
}

/// A booking row returned by the remote store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking ID
    pub id: BookingId,
    /// Venue booked
    pub turf_id: VenueId,
    /// Calendar day
    pub booking_date: NaiveDate,
    /// Slot labels joined by `", "`
    pub time_slot: String,
    /// Purchaser name
    pub user_name: String,
    /// Purchaser email
    pub user_email: String,
    /// Uppercase payment method label
    pub payment_method: String,
    /// Amount paid
    pub total_amount: Money,
    /// Status
    #[serde(default)]
    pub status: BookingStatus,
}

// ============================================================================
// Session
// ============================================================================

/// Who is signed in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer
    #[default]
    User,
    /// Venue administrator
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Contact details of the signed-in person
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Full name
    pub name: String,
    /// Email
    pub email: String,
    /// Mobile number
    pub mobile: String,
}

/// Persisted login: `{ "role": ..., "user": { ... } }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Role chosen at login
    pub role: Role,
    /// Signed-in user
    pub user: User,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn venue_decodes_from_wire_row() {
        let venue: Venue = serde_json::from_str(
            r#"{"id":"t1","name":"Green Field Arena","location":"Indiranagar",
                "city":"Bengaluru","price_per_hour":800,"rating":4.5,"image_url":null}"#,
        )
        .unwrap();

        assert_eq!(venue.price_per_hour, Money::rupees(800));
        assert_eq!(venue.image_url, None);
    }

    #[test]
    fn venue_list_tolerates_fractional_price_and_null_rating() {
        let venues: Vec<Venue> = serde_json::from_str(
            r#"[{"id":"t1","name":"Green Field Arena","location":"Indiranagar",
                 "city":"Bengaluru","price_per_hour":750.5,"rating":4.5},
                {"id":"t2","name":"Kick Off Zone","location":"Koramangala",
                 "city":"Bengaluru","price_per_hour":900,"rating":null}]"#,
        )
        .unwrap();

        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].price_per_hour, Money::rupees(751));
        assert!(venues[1].rating.abs() < f64::EPSILON);
        assert_eq!(venues[1].price_per_hour, Money::rupees(900));
    }

    #[test]
    fn money_rejects_negative_amounts() {
        assert!(serde_json::from_str::<Money>("-5").is_err());
        assert!(serde_json::from_str::<Money>("-0.5").is_err());
        assert_eq!(serde_json::from_str::<Money>("1599.4").unwrap(), Money::rupees(1599));
    }

    #[test]
    fn booking_row_accepts_fractional_total() {
        let booking: Booking = serde_json::from_str(
            r#"{"id":"b1","turf_id":"t1","booking_date":"2025-01-25",
                "time_slot":"07:00 AM - 08:00 AM","user_name":"Askar",
                "user_email":"askar@example.com","payment_method":"UPI",
                "total_amount":1600.0,"status":"confirmed"}"#,
        )
        .unwrap();

        assert_eq!(booking.total_amount, Money::rupees(1600));
    }

    #[test]
    fn new_booking_wire_shape() {
        let booking = NewBooking {
            turf_id: VenueId::new("t1"),
            booking_date: NaiveDate::from_ymd_opt(2025, 1, 25).unwrap(),
            time_slot: "07:00 AM - 08:00 AM, 09:00 AM - 10:00 AM".to_string(),
            user_name: "Askar".to_string(),
            user_email: "askar@example.com".to_string(),
            payment_method: "UPI".to_string(),
            total_amount: Money::rupees(1600),
            status: BookingStatus::Confirmed,
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["booking_date"], "2025-01-25");
        assert_eq!(json["total_amount"], 1600);
        assert_eq!(json["status"], "confirmed");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn session_document_roundtrips_role_in_lowercase() {
        let session = Session {
            role: Role::Admin,
            user: User {
                name: "Rahul".to_string(),
                email: "rahul@example.com".to_string(),
                mobile: "9876543210".to_string(),
            },
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains(r#""role":"admin""#));
        assert_eq!(serde_json::from_str::<Session>(&json).unwrap(), session);
    }

    #[test]
    fn money_arithmetic_saturates() {
        assert_eq!(Money::rupees(800).times(2), Money::rupees(1600));
        assert_eq!(Money::rupees(5).saturating_sub(Money::rupees(9)), Money::ZERO);
        assert_eq!(Money::rupees(12).to_string(), "₹12");
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert!("guest".parse::<Role>().is_err());
    }
}
