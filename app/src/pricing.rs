//! Price quotes for a slot selection.

use crate::types::Money;

/// Price breakdown shown on the slot and payment screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    /// Hourly price of the venue
    pub price_per_hour: Money,
    /// Number of slots selected
    pub slot_count: u64,
    /// `price_per_hour × slot_count`
    pub base: Money,
    /// Always zero
    pub discount: Money,
    /// Always zero
    pub platform_fee: Money,
    /// `base − discount`
    pub total: Money,
}

impl Quote {
    /// Quote `slot_count` slots at `price_per_hour`
    #[must_use]
    pub const fn new(price_per_hour: Money, slot_count: u64) -> Self {
        let base = price_per_hour.times(slot_count);
        let discount = Money::ZERO;
        Self {
            price_per_hour,
            slot_count,
            base,
            discount,
            platform_fee: Money::ZERO,
            total: base.saturating_sub(discount),
        }
    }

    /// Average price per slot, rounded half up; zero when nothing is selected
    #[must_use]
    pub const fn per_slot(&self) -> Money {
        if self.slot_count == 0 {
            return Money::ZERO;
        }
        let total = self.total.as_rupees();
        Money::rupees((total + self.slot_count / 2) / self.slot_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn two_slots_at_800() {
        let quote = Quote::new(Money::rupees(800), 2);

        assert_eq!(quote.total, Money::rupees(1600));
        assert_eq!(quote.discount, Money::ZERO);
        assert_eq!(quote.per_slot(), Money::rupees(800));
    }

    #[test]
    fn empty_selection_is_free() {
        let quote = Quote::new(Money::rupees(800), 0);
        assert_eq!(quote.total, Money::ZERO);
        assert_eq!(quote.per_slot(), Money::ZERO);
    }

    proptest! {
        #[test]
        fn total_is_price_times_count(price in 0u64..100_000, count in 0u64..=16) {
            let quote = Quote::new(Money::rupees(price), count);
            prop_assert_eq!(quote.total, Money::rupees(price * count));
            prop_assert_eq!(quote.platform_fee, Money::ZERO);
        }
    }
}
