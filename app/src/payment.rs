//! Simulated payment methods.
//!
//! Nothing is charged. A valid method only decides the label recorded on
//! the booking.

use std::fmt;
use thiserror::Error;

/// Payment validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// UPI selected without an id
    #[error("enter a UPI id (e.g. name@upi)")]
    MissingUpiId,

    /// Net banking with a bank we do not list
    #[error("unknown bank '{0}' (choose HDFC Bank, ICICI Bank, SBI or Axis Bank)")]
    UnknownBank(String),

    /// Unrecognised method keyword
    #[error("unknown payment method '{0}' (upi, card or netbanking)")]
    UnknownMethod(String),
}

/// Banks offered for net banking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bank {
    /// HDFC Bank
    Hdfc,
    /// ICICI Bank
    Icici,
    /// State Bank of India
    Sbi,
    /// Axis Bank
    Axis,
}

impl Bank {
    /// Every supported bank, in display order
    pub const ALL: [Self; 4] = [Self::Hdfc, Self::Icici, Self::Sbi, Self::Axis];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hdfc => "HDFC Bank",
            Self::Icici => "ICICI Bank",
            Self::Sbi => "SBI",
            Self::Axis => "Axis Bank",
        }
    }

    /// Finds a bank by display name or short name, ignoring case
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::UnknownBank`] when nothing matches.
    pub fn parse(input: &str) -> Result<Self, PaymentError> {
        let wanted = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|bank| {
                let name = bank.name().to_lowercase();
                name == wanted || name.trim_end_matches(" bank") == wanted
            })
            .ok_or_else(|| PaymentError::UnknownBank(input.trim().to_string()))
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated payment method
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentMethod {
    /// UPI transfer
    Upi {
        /// Virtual payment address
        id: String,
    },
    /// Debit or credit card
    Card,
    /// Net banking
    NetBanking {
        /// Chosen bank
        bank: Bank,
    },
}

impl PaymentMethod {
    /// UPI with the given id
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::MissingUpiId`] for a blank id.
    pub fn upi(id: &str) -> Result<Self, PaymentError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(PaymentError::MissingUpiId);
        }
        Ok(Self::Upi { id: id.to_string() })
    }

    /// Net banking through the named bank
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::UnknownBank`] when the bank is not listed.
    pub fn net_banking(bank: &str) -> Result<Self, PaymentError> {
        Ok(Self::NetBanking {
            bank: Bank::parse(bank)?,
        })
    }

    /// Builds a method from a keyword and its argument
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] for an unknown keyword or a missing detail.
    pub fn parse(keyword: &str, argument: &str) -> Result<Self, PaymentError> {
        match keyword.to_lowercase().as_str() {
            "upi" => Self::upi(argument),
            "card" => Ok(Self::Card),
            "netbanking" | "net-banking" => Self::net_banking(argument),
            other => Err(PaymentError::UnknownMethod(other.to_string())),
        }
    }

    /// Label recorded on the booking
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Upi { .. } => "UPI",
            Self::Card => "CARD",
            Self::NetBanking { .. } => "NETBANKING",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upi_requires_an_id() {
        assert_eq!(PaymentMethod::upi("   "), Err(PaymentError::MissingUpiId));
        assert_eq!(PaymentMethod::upi("askar@upi").unwrap().label(), "UPI");
    }

    #[test]
    fn net_banking_requires_a_listed_bank() {
        assert_eq!(
            PaymentMethod::net_banking("sbi").unwrap(),
            PaymentMethod::NetBanking { bank: Bank::Sbi }
        );
        assert_eq!(Bank::parse("icici").unwrap(), Bank::Icici);
        assert_eq!(Bank::parse("Axis Bank").unwrap(), Bank::Axis);
        assert!(matches!(
            PaymentMethod::net_banking("Kotak"),
            Err(PaymentError::UnknownBank(bank)) if bank == "Kotak"
        ));
    }

    #[test]
    fn labels_are_uppercase() {
        assert_eq!(PaymentMethod::parse("card", "").unwrap().label(), "CARD");
        assert_eq!(
            PaymentMethod::parse("NetBanking", "HDFC Bank").unwrap().label(),
            "NETBANKING"
        );
        assert!(matches!(
            PaymentMethod::parse("cash", ""),
            Err(PaymentError::UnknownMethod(_))
        ));
    }
}
