//! # Receipt Totals Calculator
//!
//! Pure arithmetic over cart data: line totals, the IGV split, and the
//! request body handed to the submission layer.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    From Cart to ReceiptRequest                          │
//! │                                                                         │
//! │  LineItem[] ──► compute_line_total (each) ──► Σ ──► subtotal            │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                    compute_final_totals(subtotal)       │
//! │                                    ├── tax_exclusive_base = s / 1.18    │
//! │                                    ├── tax_amount        = s - base     │
//! │                                    └── final_total       = s            │
//! │                                                        │                │
//! │  Customer ─────────────────────────────────────────────┤                │
//! │                                                        ▼                │
//! │                                    build_receipt_request                │
//! │                                    (subtotal == total, no discount)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Gaps (kept on purpose)
//! - Discounts larger than `quantity * unit_price` yield negative line
//!   totals; nothing here rejects them.
//! - The outbound request repeats the tax-inclusive sum in both `subtotal`
//!   and `total`, and drops per-line discounts. The backend contract for
//!   either has not been confirmed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItemRequest, Customer, LineItem, ReceiptRequest, TaxRate};

/// Email sent when the customer left theirs blank.
pub const DEFAULT_CUSTOMER_EMAIL: &str = "example@gmail.com";

/// Tax applied by the calculator. Not configurable per call.
pub const RECEIPT_TAX_RATE: TaxRate = TaxRate::IGV;

// =============================================================================
// Totals Breakdown
// =============================================================================

/// Result of aggregating a cart.
///
/// Serialized with fixed two-decimal strings so that every consumer renders
/// the same digits:
/// ```json
/// { "taxExclusiveBase": "21.19", "taxAmount": "3.81", "finalTotal": "25.00" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TotalsBreakdown {
    /// Portion of the subtotal that excludes IGV ("op. gravadas").
    #[serde(with = "crate::money::fixed2")]
    #[ts(type = "string")]
    pub tax_exclusive_base: Money,

    /// IGV contained in the subtotal.
    #[serde(with = "crate::money::fixed2")]
    #[ts(type = "string")]
    pub tax_amount: Money,

    /// Amount charged; equal to the tax-inclusive subtotal.
    #[serde(with = "crate::money::fixed2")]
    #[ts(type = "string")]
    pub final_total: Money,
}

impl TotalsBreakdown {
    /// The tax-inclusive subtotal the breakdown was derived from.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.final_total
    }
}

// =============================================================================
// Calculator Operations
// =============================================================================

/// `quantity * unit_price - discount`.
///
/// Inputs are already whole céntimos, so the result needs no further
/// rounding. No validation: an over-large discount gives a negative total.
///
/// ## Example
/// ```rust
/// use boleta_core::money::Money;
/// use boleta_core::totals::compute_line_total;
///
/// let total = compute_line_total(1, Money::from_cents(550), Money::from_cents(50));
/// assert_eq!(total.to_string(), "5.00");
/// ```
#[inline]
pub fn compute_line_total(quantity: i64, unit_price: Money, discount: Money) -> Money {
    unit_price.multiply_quantity(quantity) - discount
}

/// Derives the IGV breakdown from a tax-inclusive subtotal.
///
/// ## Example
/// ```rust
/// use boleta_core::money::Money;
/// use boleta_core::totals::compute_final_totals;
///
/// let totals = compute_final_totals(Money::from_cents(2500));
/// assert_eq!(totals.tax_exclusive_base.to_string(), "21.19");
/// assert_eq!(totals.tax_amount.to_string(), "3.81");
/// assert_eq!(totals.final_total.to_string(), "25.00");
/// ```
pub fn compute_final_totals(subtotal: Money) -> TotalsBreakdown {
    let (tax_exclusive_base, tax_amount) = subtotal.split_inclusive_tax(RECEIPT_TAX_RATE);
    TotalsBreakdown {
        tax_exclusive_base,
        tax_amount,
        final_total: subtotal,
    }
}

/// Sums every line total and derives the breakdown. An empty cart is legal
/// and yields all zeros.
pub fn compute_cart_totals(items: &[LineItem]) -> TotalsBreakdown {
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    compute_final_totals(subtotal)
}

/// Packages cart, customer and totals into the outbound request.
///
/// Never fails. Checking that the cart is non-empty, the total positive and
/// the document present is the caller's job (see
/// [`crate::validation::validate_checkout`]).
pub fn build_receipt_request(
    items: &[LineItem],
    customer: &Customer,
    totals: &TotalsBreakdown,
) -> ReceiptRequest {
    let customer_email = if customer.email.trim().is_empty() {
        DEFAULT_CUSTOMER_EMAIL.to_string()
    } else {
        customer.email.trim().to_string()
    };

    ReceiptRequest {
        user_id: None,
        cart_items: items.iter().map(CartItemRequest::from).collect(),
        total: totals.final_total,
        subtotal: totals.final_total,
        customer_name: customer.name.trim().to_string(),
        customer_document: customer.document.trim().to_string(),
        customer_email,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn soles(text: &str) -> Money {
        text.parse().unwrap()
    }

    fn sample_cart() -> Vec<LineItem> {
        vec![
            LineItem::new("Cuaderno", 2, soles("10.00")),
            LineItem::new("Lapicero", 1, soles("5.50")).with_discount(soles("0.50")),
        ]
    }

    #[test]
    fn test_line_totals() {
        let cart = sample_cart();
        assert_eq!(cart[0].line_total().to_string(), "20.00");
        assert_eq!(cart[1].line_total().to_string(), "5.00");
    }

    #[test]
    fn test_scenario_cart_breakdown() {
        let totals = compute_cart_totals(&sample_cart());

        assert_eq!(totals.subtotal().to_string(), "25.00");
        assert_eq!(totals.tax_exclusive_base.to_string(), "21.19");
        assert_eq!(totals.tax_amount.to_string(), "3.81");
        assert_eq!(totals.final_total.to_string(), "25.00");
    }

    #[test]
    fn test_out_of_range_cart_saturates_instead_of_panicking() {
        let cart = vec![LineItem::new("Resma", 1_000_000_000_000_000, soles("100000"))];
        let totals = compute_cart_totals(&cart);

        assert_eq!(totals.final_total.cents(), i64::MAX);
        assert_eq!(totals.tax_exclusive_base + totals.tax_amount, totals.final_total);
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = compute_cart_totals(&[]);
        assert_eq!(totals, TotalsBreakdown::default());
        assert_eq!(totals.subtotal().to_string(), "0.00");
        assert_eq!(totals.tax_amount.to_string(), "0.00");
        assert_eq!(totals.final_total.to_string(), "0.00");
    }

    #[test]
    fn test_free_items_are_all_zero() {
        let totals = compute_cart_totals(&[LineItem::new("Muestra", 3, Money::zero())]);
        assert_eq!(totals.tax_exclusive_base.to_string(), "0.00");
        assert_eq!(totals.tax_amount.to_string(), "0.00");
        assert_eq!(totals.final_total.to_string(), "0.00");
    }

    #[test]
    fn test_over_large_discount_passes_through() {
        let line = compute_line_total(1, soles("2.00"), soles("3.00"));
        assert_eq!(line.to_string(), "-1.00");

        let totals = compute_cart_totals(&[
            LineItem::new("Oferta", 1, soles("2.00")).with_discount(soles("3.00"))
        ]);
        assert!(totals.final_total.is_negative());
        assert_eq!(
            totals.tax_exclusive_base + totals.tax_amount,
            totals.final_total
        );
    }

    #[test]
    fn test_totals_serialize_as_fixed_strings() {
        let json = serde_json::to_value(compute_cart_totals(&sample_cart())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "taxExclusiveBase": "21.19",
                "taxAmount": "3.81",
                "finalTotal": "25.00"
            })
        );
    }

    #[test]
    fn test_build_request_defaults_blank_email() {
        let cart = sample_cart();
        let totals = compute_cart_totals(&cart);
        let customer = Customer::new("ANA QUISPE", "12345678", "   ");

        let request = build_receipt_request(&cart, &customer, &totals);

        assert_eq!(request.customer_email, DEFAULT_CUSTOMER_EMAIL);
        assert_eq!(request.subtotal, request.total);
        assert_eq!(request.total.to_string(), "25.00");
        assert_eq!(request.cart_items.len(), 2);
        assert_eq!(request.user_id, None);
    }

    #[test]
    fn test_build_request_drops_discount() {
        let cart = sample_cart();
        let request = build_receipt_request(
            &cart,
            &Customer::new("Ana", "12345678", "ana@example.com"),
            &compute_cart_totals(&cart),
        );

        let lapicero = &request.cart_items[1];
        assert_eq!(lapicero.product_name, "Lapicero");
        assert_eq!(lapicero.unit_price.to_string(), "5.50");
        assert_eq!(lapicero.quantity, 1);
        assert_eq!(request.customer_email, "ana@example.com");

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("discount"));
        assert!(!json.contains("descuento"));
    }

    #[test]
    fn test_cart_totals_idempotent() {
        let cart = sample_cart();
        assert_eq!(compute_cart_totals(&cart), compute_cart_totals(&cart));
    }

    fn arb_line() -> impl Strategy<Value = LineItem> {
        (1i64..=999, 0i64..=100_000).prop_flat_map(|(quantity, price)| {
            (0i64..=price * quantity).prop_map(move |discount| {
                LineItem::new("item", quantity, Money::from_cents(price))
                    .with_discount(Money::from_cents(discount))
            })
        })
    }

    proptest! {
        #[test]
        fn prop_line_total_matches_formula(
            quantity in 0i64..=999,
            price in 0i64..=1_000_000,
            discount_share in 0.0f64..=1.0,
        ) {
            let discount = ((price * quantity) as f64 * discount_share) as i64;
            let total = compute_line_total(quantity, Money::from_cents(price), Money::from_cents(discount));
            prop_assert_eq!(total.cents(), price * quantity - discount);
            prop_assert!(!total.is_negative());
        }

        #[test]
        fn prop_breakdown_is_consistent(cents in 0i64..=1_000_000_000) {
            let totals = compute_final_totals(Money::from_cents(cents));
            prop_assert_eq!(totals.tax_exclusive_base + totals.tax_amount, totals.final_total);
            prop_assert!(!totals.tax_amount.is_negative());
            prop_assert!(totals.tax_exclusive_base <= totals.final_total);
        }

        #[test]
        fn prop_cart_total_is_sum_of_lines(items in proptest::collection::vec(arb_line(), 0..20)) {
            let totals = compute_cart_totals(&items);
            let expected: i64 = items.iter().map(|i| i.line_total().cents()).sum();
            prop_assert_eq!(totals.final_total.cents(), expected);
            prop_assert_eq!(compute_cart_totals(&items), totals);
        }

        #[test]
        fn prop_cart_total_is_order_independent(items in proptest::collection::vec(arb_line(), 0..20)) {
            let mut reversed = items.clone();
            reversed.reverse();
            prop_assert_eq!(compute_cart_totals(&items), compute_cart_totals(&reversed));
        }
    }
}
