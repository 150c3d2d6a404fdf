//! End-to-end checks of the cart's observable behaviour through the public API.

use till_core::{
    Cart, CatalogProduct, CustomerRef, DiscountSpec, Money, OrderRequest, PaymentMethod, TaxRate,
};

fn product(id: &str, price_cents: i64) -> CatalogProduct {
    CatalogProduct::new(id, format!("Product {}", id), Money::from_cents(price_cents))
}

/// Lines [10.00 × 2, 5.00 × 3] at 18% tax.
fn thirty_five_dollar_cart() -> Cart {
    let mut cart = Cart::new(TaxRate::from_fraction(0.18));
    let p1 = product("P1", 1000);
    let p2 = product("P2", 500);

    cart.add_item(&p1);
    cart.add_item(&p1);
    for _ in 0..3 {
        cart.add_item(&p2);
    }
    cart
}

#[test]
fn accessors_are_idempotent() {
    let mut cart = thirty_five_dollar_cart();
    cart.set_discount(DiscountSpec::percentage_bps(1000));

    let first = cart.totals();
    let second = cart.totals();
    assert_eq!(first, second);
    assert_eq!(cart.total(), cart.total());
}

#[test]
fn adding_twice_dedups_into_one_line() {
    let mut cart = Cart::new(TaxRate::zero());
    let p1 = product("P1", 1000);
    cart.add_item(&p1);
    cart.add_item(&p1);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
}

#[test]
fn decrement_to_zero_deletes_the_line() {
    let mut cart = Cart::new(TaxRate::zero());
    cart.add_item(&product("P1", 1000));
    cart.decrement_quantity("P1");

    assert!(cart.line("P1").is_none());
}

#[test]
fn non_positive_quantities_delete_the_line() {
    for qty in [0, -5] {
        let mut cart = thirty_five_dollar_cart();
        cart.update_quantity("P1", qty);
        assert!(cart.line("P1").is_none(), "quantity {} should remove P1", qty);
        assert!(cart.line("P2").is_some());
    }
}

#[test]
fn percentage_discount_arithmetic() {
    let mut cart = thirty_five_dollar_cart();
    cart.set_discount(DiscountSpec::percentage(10.0));

    let totals = cart.totals();
    assert_eq!(totals.subtotal, Money::from_major_minor(35, 0));
    assert_eq!(totals.discount_amount, Money::from_major_minor(3, 50));
    assert_eq!(totals.taxable_amount, Money::from_major_minor(31, 50));
    assert_eq!(totals.tax_amount, Money::from_major_minor(5, 67));
    assert_eq!(totals.total, Money::from_major_minor(37, 17));
}

#[test]
fn fixed_discount_arithmetic() {
    let mut cart = thirty_five_dollar_cart();
    cart.set_discount(DiscountSpec::fixed(Money::from_major_minor(5, 0)));

    let totals = cart.totals();
    assert_eq!(totals.discount_amount, Money::from_major_minor(5, 0));
    assert_eq!(totals.taxable_amount, Money::from_major_minor(30, 0));
    assert_eq!(totals.tax_amount, Money::from_major_minor(5, 40));
    assert_eq!(totals.total, Money::from_major_minor(35, 40));
}

#[test]
fn clear_resets_fully() {
    let mut cart = thirty_five_dollar_cart();
    cart.set_customer(Some(CustomerRef::new("C-1", "Ada")));
    cart.set_discount(DiscountSpec::percentage_bps(500));
    cart.set_notes("table 4");

    cart.clear();

    assert_eq!(cart.subtotal(), Money::zero());
    assert_eq!(cart.item_count(), 0);
    assert!(cart.customer().is_none());
    assert_eq!(cart.discount(), DiscountSpec::default());
    assert_eq!(cart.notes(), "");
}

#[test]
fn snapshot_round_trip_preserves_cart_and_totals() {
    let mut cart = thirty_five_dollar_cart();
    cart.add_item(&product("P3", 250).with_sku("SKU-3").with_image("/img/p3.png"));
    cart.set_customer(Some(CustomerRef::new("C-9", "Grace")));
    cart.set_discount(DiscountSpec::percentage_bps(1000));
    cart.set_payment_method(PaymentMethod::Card);
    cart.set_notes("gift");

    let json = serde_json::to_string(&cart).unwrap();
    let restored: Cart = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, cart);
    assert_eq!(restored.lines(), cart.lines());
    assert_eq!(restored.discount(), cart.discount());
    assert_eq!(restored.customer(), cart.customer());
    assert_eq!(restored.totals(), cart.totals());
}

#[test]
fn checkout_then_clear_starts_a_new_sale() {
    let mut cart = thirty_five_dollar_cart();
    let request = OrderRequest::from_cart(&cart).unwrap();
    assert_eq!(request.total, cart.total());

    cart.clear();
    assert!(OrderRequest::from_cart(&cart).is_err());
}

#[test]
fn absurd_quantity_passes_through_without_overflow() {
    let mut cart = Cart::new(TaxRate::from_bps(1800));
    cart.add_item(&product("P1", 1000));
    cart.update_quantity("P1", i64::MAX);

    let max = Money::from_cents(i64::MAX);
    assert_eq!(cart.line("P1").map(|l| l.quantity), Some(i64::MAX));
    assert_eq!(cart.subtotal(), max);
    assert_eq!(cart.discount_amount(), Money::zero());
    assert_eq!(cart.tax(), max.calculate_tax(TaxRate::from_bps(1800)));
    assert_eq!(cart.total(), max);
    assert_eq!(cart.item_count(), i64::MAX);

    cart.increment_quantity("P1");
    assert_eq!(cart.item_count(), i64::MAX);

    let order = OrderRequest::from_cart(&cart).unwrap();
    assert_eq!(order.total, max);
}
