//! Cart lines

use crate::{
    prices::Price,
    products::{ProductId, ProductSnapshot},
};

/// One product entry in the cart, keyed by its product id.
///
/// Invariant: `quantity >= 1`. A line that would drop to zero is removed
/// from the cart instead; [`Cart`](crate::cart::Cart) enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    product_id: ProductId,
    snapshot: ProductSnapshot,
    quantity: u32,
}

impl CartLine {
    /// Creates a line for the given product.
    ///
    /// A zero quantity is treated as one, matching the add-to-cart
    /// behaviour where a missing or degenerate count defaults to a single
    /// unit.
    #[must_use]
    pub fn new(product_id: ProductId, snapshot: ProductSnapshot, quantity: u32) -> Self {
        Self {
            product_id,
            snapshot,
            quantity: quantity.max(1),
        }
    }

    /// The product id keying this line.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// The denormalized catalog snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &ProductSnapshot {
        &self.snapshot
    }

    /// The unit price from the snapshot.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.snapshot.price
    }

    /// The line quantity.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of the whole line (`unit price x quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.snapshot.price.times(self.quantity)
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Overwrites the snapshot, preserving the quantity.
    pub(crate) fn refresh(&mut self, snapshot: ProductSnapshot) -> bool {
        if self.snapshot == snapshot {
            return false;
        }

        self.snapshot = snapshot;
        true
    }
}
