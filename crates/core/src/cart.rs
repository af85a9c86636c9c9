//! Cart

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    lines::CartLine,
    prices::Price,
    pricing,
    products::{ProductId, ProductSnapshot},
    promotions::{AppliedDiscount, PromoState},
    totals::CartTotals,
};

/// The cart aggregate: an ordered list of lines plus the promo state.
///
/// Lines keep insertion order; new products are appended at the end and the
/// order is stable across quantity changes and snapshot refreshes. Exactly
/// one line exists per product id, every line has quantity >= 1, and an
/// empty cart never carries a promo; each mutation re-establishes these
/// invariants before returning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    promo: PromoState,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cart from restored lines, sanitizing the input.
    ///
    /// Restored content is not trusted to uphold the aggregate invariants:
    /// duplicate product ids are merged by summing quantities, with the
    /// first occurrence keeping its position and snapshot.
    #[must_use]
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
        let mut index: FxHashMap<ProductId, usize> = FxHashMap::default();

        for line in lines {
            match index.get(&line.product_id()) {
                Some(&at) => {
                    if let Some(existing) = merged.get_mut(at) {
                        existing.add_quantity(line.quantity());
                    }
                }
                None => {
                    index.insert(line.product_id(), merged.len());
                    merged.push(line);
                }
            }
        }

        Self {
            lines: merged,
            promo: PromoState::None,
        }
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a product.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == id)
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The distinct product ids currently in the cart, in display order.
    #[must_use]
    pub fn product_ids(&self) -> SmallVec<[ProductId; 8]> {
        self.lines.iter().map(CartLine::product_id).collect()
    }

    /// Adds units of a product.
    ///
    /// An existing line for the product has its quantity incremented and
    /// keeps its current snapshot; otherwise a new line is appended. A zero
    /// quantity counts as one.
    pub fn add(&mut self, id: ProductId, snapshot: ProductSnapshot, quantity: u32) {
        let quantity = quantity.max(1);

        match self.position(id) {
            Some(at) => {
                if let Some(line) = self.lines.get_mut(at) {
                    line.add_quantity(quantity);
                }
            }
            None => self.lines.push(CartLine::new(id, snapshot, quantity)),
        }
    }

    /// Increments a line's quantity by one. No-op for an absent product.
    pub fn increment(&mut self, id: ProductId) -> bool {
        match self.position(id) {
            Some(at) => {
                if let Some(line) = self.lines.get_mut(at) {
                    line.add_quantity(1);
                }
                true
            }
            None => false,
        }
    }

    /// Decrements a line's quantity by one, removing the line at zero.
    /// No-op for an absent product.
    pub fn decrement(&mut self, id: ProductId) -> bool {
        let Some(at) = self.position(id) else {
            return false;
        };

        let remove = match self.lines.get_mut(at) {
            Some(line) if line.quantity() > 1 => {
                line.set_quantity(line.quantity() - 1);
                false
            }
            Some(_) => true,
            None => false,
        };

        if remove {
            self.lines.remove(at);
            self.normalize();
        }

        true
    }

    /// Sets a line's quantity directly; zero removes the line. No-op for an
    /// absent product.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        let Some(at) = self.position(id) else {
            return false;
        };

        if quantity == 0 {
            self.lines.remove(at);
            self.normalize();
        } else if let Some(line) = self.lines.get_mut(at) {
            line.set_quantity(quantity);
        }

        true
    }

    /// Removes a line. Idempotent: removing an absent product is a no-op.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let Some(at) = self.position(id) else {
            return false;
        };

        self.lines.remove(at);
        self.normalize();

        true
    }

    /// Empties the cart and detaches any promo.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.promo = PromoState::None;
    }

    /// Overwrites a line's denormalized snapshot, preserving its quantity.
    ///
    /// Returns `true` when the line existed and its snapshot changed. A
    /// refresh for a product no longer in the cart is a no-op, so a removal
    /// that lands while catalog results are in flight is never undone.
    pub fn refresh(&mut self, id: ProductId, snapshot: ProductSnapshot) -> bool {
        match self.position(id) {
            Some(at) => self
                .lines
                .get_mut(at)
                .is_some_and(|line| line.refresh(snapshot)),
            None => false,
        }
    }

    /// The promo state.
    #[must_use]
    pub fn promo(&self) -> &PromoState {
        &self.promo
    }

    /// Attaches a validated discount, replacing any previous one.
    ///
    /// Attaching to an empty cart is a no-op; an empty cart never carries a
    /// promo.
    pub fn apply_discount(&mut self, applied: AppliedDiscount) {
        if self.is_empty() {
            return;
        }

        self.promo = PromoState::Active(applied);
    }

    /// Detaches the promo code and discount, if any.
    pub fn clear_discount(&mut self) -> bool {
        if self.promo.is_active() {
            self.promo = PromoState::None;
            true
        } else {
            false
        }
    }

    /// Sum of `unit price x quantity` over all lines, recomputed fresh.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        pricing::subtotal(&self.lines)
    }

    /// Derived totals: subtotal, capped discount, payable total, unit count.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::new(
            self.subtotal(),
            self.promo.discount(),
            pricing::total_items(&self.lines),
        )
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.product_id() == id)
    }

    /// An empty cart cannot keep a promo attached.
    fn normalize(&mut self) {
        if self.lines.is_empty() {
            self.promo = PromoState::None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(minor: u64) -> ProductSnapshot {
        ProductSnapshot::new("tire", Price::from_minor(minor))
    }

    fn id(raw: u64) -> ProductId {
        ProductId::new(raw)
    }

    #[test]
    fn adding_same_product_merges_into_one_line() {
        let mut cart = Cart::new();

        cart.add(id(1), snapshot(1000), 1);
        cart.add(id(1), snapshot(1000), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(id(1)).map(CartLine::quantity), Some(3));
        assert_eq!(cart.subtotal(), Price::from_minor(3000));
    }

    #[test]
    fn adding_keeps_insertion_order() {
        let mut cart = Cart::new();

        cart.add(id(3), snapshot(100), 1);
        cart.add(id(1), snapshot(200), 1);
        cart.add(id(3), snapshot(100), 1);
        cart.add(id(2), snapshot(300), 1);

        let order: Vec<_> = cart.lines().iter().map(|l| l.product_id()).collect();
        assert_eq!(order, vec![id(3), id(1), id(2)]);
    }

    #[test]
    fn add_with_zero_quantity_adds_one_unit() {
        let mut cart = Cart::new();

        cart.add(id(1), snapshot(1000), 0);

        assert_eq!(cart.line(id(1)).map(CartLine::quantity), Some(1));
    }

    #[test]
    fn decrement_to_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(id(5), snapshot(1000), 1);

        assert!(cart.decrement(id(5)));

        assert!(cart.is_empty());
    }

    #[test]
    fn decrement_above_one_keeps_the_line() {
        let mut cart = Cart::new();
        cart.add(id(5), snapshot(1000), 3);

        cart.decrement(id(5));

        assert_eq!(cart.line(id(5)).map(CartLine::quantity), Some(2));
    }

    #[test]
    fn increment_and_decrement_on_absent_product_are_noops() {
        let mut cart = Cart::new();

        assert!(!cart.increment(id(9)));
        assert!(!cart.decrement(id(9)));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(1000), 4);

        cart.set_quantity(id(1), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_overwrites_directly() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(1000), 4);

        cart.set_quantity(id(1), 7);

        assert_eq!(cart.line(id(1)).map(CartLine::quantity), Some(7));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(1000), 1);

        assert!(cart.remove(id(1)));
        let after_first = cart.clone();
        assert!(!cart.remove(id(1)));

        assert_eq!(cart, after_first);
    }

    #[test]
    fn no_mutation_sequence_leaves_a_zero_quantity_line() {
        let mut cart = Cart::new();

        cart.add(id(1), snapshot(1000), 0);
        cart.add(id(2), snapshot(500), 2);
        cart.decrement(id(1));
        cart.decrement(id(2));
        cart.set_quantity(id(2), 0);
        cart.add(id(2), snapshot(500), 1);
        cart.increment(id(2));

        assert!(cart.lines().iter().all(|line| line.quantity() >= 1));
    }

    #[test]
    fn clear_resets_lines_and_promo() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(5000), 1);
        cart.apply_discount(AppliedDiscount::new(
            "SAVE10",
            Price::from_minor(500),
            Price::from_minor(5000),
        ));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.promo().code(), None);
        assert_eq!(cart.promo().discount(), Price::ZERO);
    }

    #[test]
    fn emptying_the_cart_detaches_the_promo() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(5000), 1);
        cart.apply_discount(AppliedDiscount::new(
            "SAVE10",
            Price::from_minor(500),
            Price::from_minor(5000),
        ));

        cart.remove(id(1));

        assert!(!cart.promo().is_active());
    }

    #[test]
    fn discount_on_empty_cart_is_rejected() {
        let mut cart = Cart::new();

        cart.apply_discount(AppliedDiscount::new(
            "SAVE10",
            Price::from_minor(500),
            Price::ZERO,
        ));

        assert!(!cart.promo().is_active());
    }

    #[test]
    fn total_never_goes_negative() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(300), 1);
        cart.apply_discount(AppliedDiscount::new(
            "BIG",
            Price::from_minor(10_000),
            Price::from_minor(300),
        ));

        let totals = cart.totals();

        assert_eq!(totals.total(), Price::ZERO);
        assert_eq!(totals.discount(), Price::from_minor(300));
    }

    #[test]
    fn refresh_updates_snapshot_and_preserves_quantity() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(1000), 3);

        let changed = cart.refresh(id(1), snapshot(1200));

        assert!(changed);
        assert_eq!(
            cart.line(id(1)).map(CartLine::unit_price),
            Some(Price::from_minor(1200))
        );
        assert_eq!(cart.line(id(1)).map(CartLine::quantity), Some(3));
    }

    #[test]
    fn refresh_of_removed_product_is_a_noop() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(1000), 1);
        cart.remove(id(1));

        assert!(!cart.refresh(id(1), snapshot(1200)));
        assert!(cart.is_empty());
    }

    #[test]
    fn with_lines_merges_duplicate_products() {
        let lines = vec![
            CartLine::new(id(1), snapshot(1000), 2),
            CartLine::new(id(2), snapshot(500), 1),
            CartLine::new(id(1), snapshot(1100), 3),
        ];

        let cart = Cart::with_lines(lines);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.line(id(1)).map(CartLine::quantity), Some(5));
        // first occurrence wins the snapshot
        assert_eq!(
            cart.line(id(1)).map(CartLine::unit_price),
            Some(Price::from_minor(1000))
        );
    }

    #[test]
    fn totals_reports_subtotal_discount_total_and_items() {
        let mut cart = Cart::new();
        cart.add(id(1), snapshot(1000), 3);
        cart.add(id(2), snapshot(500), 2);
        cart.apply_discount(AppliedDiscount::new(
            "SAVE10",
            Price::from_minor(400),
            Price::from_minor(4000),
        ));

        let totals = cart.totals();

        assert_eq!(totals.subtotal(), Price::from_minor(4000));
        assert_eq!(totals.discount(), Price::from_minor(400));
        assert_eq!(totals.total(), Price::from_minor(3600));
        assert_eq!(totals.total_items(), 5);
    }
}
