//! End-to-end cart flows exercising mutations, totals and the discount
//! lifecycle together.

use treadline::prelude::*;

fn tire(name: &str, minor: u64) -> ProductSnapshot {
    ProductSnapshot::new(name, Price::from_minor(minor)).with_brand("Michelin")
}

#[test]
fn shopping_session_accumulates_and_prunes_lines() {
    let mut cart = Cart::new();

    cart.add(ProductId::new(1), tire("Pilot Sport 4", 150_00), 1);
    cart.add(ProductId::new(2), tire("CrossClimate 2", 130_00), 2);
    cart.add(ProductId::new(1), tire("Pilot Sport 4", 150_00), 2);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.totals().total_items(), 5);
    assert_eq!(cart.subtotal(), Price::from_minor(710_00));

    cart.decrement(ProductId::new(2));
    cart.decrement(ProductId::new(2));

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.subtotal(), Price::from_minor(450_00));
}

#[test]
fn subtotal_is_always_the_sum_over_lines() {
    let mut cart = Cart::new();

    cart.add(ProductId::new(1), tire("a", 1000), 3);
    cart.add(ProductId::new(2), tire("b", 250), 2);
    cart.set_quantity(ProductId::new(1), 5);
    cart.remove(ProductId::new(2));
    cart.add(ProductId::new(3), tire("c", 99), 1);

    let expected = cart
        .lines()
        .iter()
        .fold(0u64, |acc, line| {
            acc + line.unit_price().minor_units() * u64::from(line.quantity())
        });

    assert_eq!(cart.subtotal().minor_units(), expected);
}

#[test]
fn discount_lifecycle_across_mutations() {
    let mut cart = Cart::new();
    cart.add(ProductId::new(1), tire("Primacy 4", 50_00), 1);

    cart.apply_discount(AppliedDiscount::new(
        "SAVE10",
        Price::from_minor(5_00),
        cart.subtotal(),
    ));

    assert_eq!(cart.promo().code(), Some("SAVE10"));
    assert_eq!(cart.totals().total(), Price::from_minor(45_00));

    // the stored basis flags the discount as stale once the subtotal moves
    cart.add(ProductId::new(2), tire("Alpin 6", 70_00), 1);
    let stale = cart
        .promo()
        .applied()
        .is_some_and(|applied| applied.is_stale_for(cart.subtotal()));
    assert!(stale, "discount should be stale after the subtotal changed");

    cart.clear();

    assert_eq!(cart.promo().code(), None);
    assert_eq!(cart.totals().discount(), Price::ZERO);
}

#[test]
fn restored_lines_behave_like_the_original_cart() {
    let mut original = Cart::new();
    original.add(ProductId::new(1), tire("Pilot Sport 4", 150_00), 2);
    original.add(ProductId::new(7), tire("e.Primacy", 110_00), 1);

    let restored = Cart::with_lines(original.lines().to_vec());

    assert_eq!(restored.lines(), original.lines());
    assert_eq!(restored.subtotal(), original.subtotal());
}

#[test]
fn reconciliation_merge_semantics_on_plain_cart() {
    let mut cart = Cart::new();
    cart.add(ProductId::new(1), tire("kept", 10_00), 2);
    cart.add(ProductId::new(9), tire("deleted upstream", 20_00), 1);

    // catalog refresh for a surviving product
    cart.refresh(ProductId::new(1), tire("kept", 12_00));
    // upstream deletion prunes the line
    cart.remove(ProductId::new(9));
    // a late refresh for the pruned product must not resurrect it
    cart.refresh(ProductId::new(9), tire("deleted upstream", 20_00));

    assert_eq!(cart.len(), 1);
    assert_eq!(
        cart.line(ProductId::new(1)).map(CartLine::unit_price),
        Some(Price::from_minor(12_00))
    );
}
