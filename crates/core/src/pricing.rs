//! Pricing

use crate::{lines::CartLine, prices::Price};

/// Calculates the subtotal of a list of cart lines.
///
/// Always recomputed from scratch; nothing in the cart accumulates totals
/// incrementally, so the subtotal cannot drift from the line list.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Price {
    lines
        .iter()
        .fold(Price::ZERO, |acc, line| acc.saturating_add(line.line_total()))
}

/// Calculates the total unit count across a list of cart lines.
#[must_use]
pub fn total_items(lines: &[CartLine]) -> u32 {
    lines
        .iter()
        .fold(0, |acc, line| acc.saturating_add(line.quantity()))
}

#[cfg(test)]
mod tests {
    use crate::products::{ProductId, ProductSnapshot};

    use super::*;

    fn line(id: u64, minor: u64, quantity: u32) -> CartLine {
        CartLine::new(
            ProductId::new(id),
            ProductSnapshot::new("tire", Price::from_minor(minor)),
            quantity,
        )
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let lines = [line(1, 1000, 3), line(2, 250, 2)];

        assert_eq!(subtotal(&lines), Price::from_minor(3500));
    }

    #[test]
    fn subtotal_of_no_lines_is_zero() {
        assert_eq!(subtotal(&[]), Price::ZERO);
    }

    #[test]
    fn total_items_sums_quantities() {
        let lines = [line(1, 1000, 3), line(2, 250, 2)];

        assert_eq!(total_items(&lines), 5);
    }
}
