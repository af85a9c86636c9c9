//! Totals

use crate::prices::Price;

/// Derived cart figures, recomputed from the cart on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    subtotal: Price,
    discount: Price,
    total: Price,
    total_items: u32,
}

impl CartTotals {
    /// Builds the totals for a given subtotal, discount, and unit count.
    ///
    /// The discount is capped at the subtotal, so the total is
    /// `subtotal - discount` and never negative.
    #[must_use]
    pub fn new(subtotal: Price, discount: Price, total_items: u32) -> Self {
        let discount = discount.clamp_to(subtotal);

        Self {
            subtotal,
            discount,
            total: subtotal.saturating_sub(discount),
            total_items,
        }
    }

    /// Sum of `unit price x quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// The applied discount, capped at the subtotal.
    #[must_use]
    pub fn discount(&self) -> Price {
        self.discount
    }

    /// Amount payable after the discount.
    #[must_use]
    pub fn total(&self) -> Price {
        self.total
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.total_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_subtotal_minus_discount() {
        let totals = CartTotals::new(Price::from_minor(5000), Price::from_minor(500), 3);

        assert_eq!(totals.total(), Price::from_minor(4500));
    }

    #[test]
    fn oversized_discount_is_capped_at_subtotal() {
        let totals = CartTotals::new(Price::from_minor(300), Price::from_minor(1000), 1);

        assert_eq!(totals.discount(), Price::from_minor(300));
        assert_eq!(totals.total(), Price::ZERO);
    }
}
