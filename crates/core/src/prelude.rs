//! Treadline prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    lines::CartLine,
    prices::Price,
    products::{ProductId, ProductSnapshot},
    promotions::{AppliedDiscount, PromoState},
    totals::CartTotals,
};
