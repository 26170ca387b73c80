//! # Receipt Form
//!
//! In-memory state of the "issue boleta" screen: a customer draft plus a
//! list of editable line items.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ReceiptForm Lifecycle                            │
//! │                                                                         │
//! │   new() ──► one blank item, empty customer                              │
//! │     │                                                                   │
//! │     ├── update_customer(CustomerField::Dni(..))                         │
//! │     ├── apply_identity(lookup result)   names / surnames filled         │
//! │     ├── add_item / update_item / remove_item                            │
//! │     │        │                                                          │
//! │     │        └──► totals() recomputed on demand                         │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │   checkout_request()  ── precondition failed ──► CoreError              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │   ReceiptRequest ──► submitted ──► reset()                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits go through the closed [`ItemField`] / [`CustomerField`] enums, one
//! variant per input on the screen.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::totals::{build_receipt_request, compute_cart_totals, TotalsBreakdown};
use crate::types::{Customer, IdentityRecord, LineItem, ReceiptRequest};
use crate::validation::{validate_cart_size, validate_checkout};

// =============================================================================
// Customer Draft
// =============================================================================

/// Customer fields as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[serde(default)]
    pub dni: String,
    #[serde(default)]
    pub names: String,
    #[serde(default)]
    pub surnames: String,
    #[serde(default)]
    pub email: String,
}

impl CustomerDraft {
    /// `"names surnames"`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.names, self.surnames).trim().to_string()
    }

    /// The customer as printed on the receipt. The DNI is the document.
    pub fn to_customer(&self) -> Customer {
        Customer::new(self.full_name(), self.dni.trim(), self.email.trim())
    }
}

/// A single customer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerField {
    Dni(String),
    Email(String),
    Names(String),
    Surnames(String),
}

/// A single line-item input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemField {
    ProductName(String),
    UnitPrice(Money),
    Quantity(i64),
    Discount(Money),
}

// =============================================================================
// Receipt Form
// =============================================================================

/// Checkout form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptForm {
    pub customer: CustomerDraft,
    pub items: Vec<LineItem>,
}

impl Default for ReceiptForm {
    fn default() -> Self {
        ReceiptForm::new()
    }
}

impl ReceiptForm {
    /// A fresh form: empty customer and one blank item.
    pub fn new() -> Self {
        ReceiptForm {
            customer: CustomerDraft::default(),
            items: vec![LineItem::blank()],
        }
    }

    /// Builds a form from data entered elsewhere (a cart file, a saved draft).
    pub fn with_contents(customer: CustomerDraft, items: Vec<LineItem>) -> Self {
        ReceiptForm { customer, items }
    }

    /// Appends a blank item and returns its index.
    pub fn add_item(&mut self) -> CoreResult<usize> {
        validate_cart_size(self.items.len() + 1)?;
        self.items.push(LineItem::blank());
        Ok(self.items.len() - 1)
    }

    /// Removes and returns the item at `index`. The list may become empty.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<LineItem> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Applies one edit to the item at `index`.
    ///
    /// Values are stored as typed; range checks happen at checkout.
    pub fn update_item(&mut self, index: usize, field: ItemField) -> CoreResult<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        match field {
            ItemField::ProductName(name) => item.product_name = name,
            ItemField::UnitPrice(price) => item.unit_price = price,
            ItemField::Quantity(quantity) => item.quantity = quantity,
            ItemField::Discount(discount) => item.discount = discount,
        }
        Ok(())
    }

    pub fn update_customer(&mut self, field: CustomerField) {
        match field {
            CustomerField::Dni(dni) => self.customer.dni = dni,
            CustomerField::Email(email) => self.customer.email = email,
            CustomerField::Names(names) => self.customer.names = names,
            CustomerField::Surnames(surnames) => self.customer.surnames = surnames,
        }
    }

    /// Copies a DNI lookup result into the customer draft.
    ///
    /// A hit fills names and surnames; a miss clears both so stale data
    /// from a previous DNI is never submitted.
    pub fn apply_identity(&mut self, identity: Option<&IdentityRecord>) {
        match identity {
            Some(record) => {
                self.customer.names = record.names.trim().to_string();
                self.customer.surnames = record.surnames();
            }
            None => {
                self.customer.names.clear();
                self.customer.surnames.clear();
            }
        }
    }

    pub fn totals(&self) -> TotalsBreakdown {
        compute_cart_totals(&self.items)
    }

    /// Checks the checkout preconditions and builds the outbound request.
    pub fn checkout_request(&self) -> CoreResult<ReceiptRequest> {
        let totals = self.totals();
        validate_checkout(&self.customer.dni, &self.items, &totals)?;
        Ok(build_receipt_request(
            &self.items,
            &self.customer.to_customer(),
            &totals,
        ))
    }

    /// Back to the fresh state.
    pub fn reset(&mut self) {
        *self = ReceiptForm::new();
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.items.len() {
            return Err(CoreError::ItemIndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::totals::DEFAULT_CUSTOMER_EMAIL;
    use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

    fn soles(text: &str) -> Money {
        text.parse().unwrap()
    }

    fn filled_form() -> ReceiptForm {
        let mut form = ReceiptForm::new();
        form.update_customer(CustomerField::Dni("12345678".into()));
        form.update_customer(CustomerField::Names("Ana".into()));
        form.update_customer(CustomerField::Surnames("Quispe Mamani".into()));
        form.update_item(0, ItemField::ProductName("Cuaderno".into())).unwrap();
        form.update_item(0, ItemField::UnitPrice(soles("10.00"))).unwrap();
        form.update_item(0, ItemField::Quantity(2)).unwrap();

        let second = form.add_item().unwrap();
        form.update_item(second, ItemField::ProductName("Lapicero".into())).unwrap();
        form.update_item(second, ItemField::UnitPrice(soles("5.50"))).unwrap();
        form.update_item(second, ItemField::Discount(soles("0.50"))).unwrap();
        form
    }

    #[test]
    fn test_new_form_has_one_blank_item() {
        let form = ReceiptForm::new();
        assert_eq!(form.items, vec![LineItem::blank()]);
        assert_eq!(form.items[0].quantity, 1);
        assert_eq!(form.customer, CustomerDraft::default());
        assert_eq!(form.totals(), TotalsBreakdown::default());
    }

    #[test]
    fn test_totals_follow_edits() {
        let mut form = filled_form();
        assert_eq!(form.totals().final_total.to_string(), "25.00");
        assert_eq!(form.totals().tax_amount.to_string(), "3.81");

        form.remove_item(1).unwrap();
        assert_eq!(form.totals().final_total.to_string(), "20.00");
    }

    #[test]
    fn test_item_index_out_of_range() {
        let mut form = ReceiptForm::new();
        assert!(matches!(
            form.update_item(5, ItemField::Quantity(2)),
            Err(CoreError::ItemIndexOutOfRange { index: 5, len: 1 })
        ));
        assert!(form.remove_item(1).is_err());
        assert!(form.remove_item(0).is_ok());
        assert!(form.items.is_empty());
    }

    #[test]
    fn test_add_item_respects_cart_limit() {
        let mut form = ReceiptForm::new();
        for _ in 1..MAX_CART_ITEMS {
            form.add_item().unwrap();
        }
        assert_eq!(form.items.len(), MAX_CART_ITEMS);
        assert!(matches!(
            form.add_item(),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_apply_identity_hit_and_miss() {
        let mut form = ReceiptForm::new();
        let record = IdentityRecord {
            dni: "12345678".into(),
            names: "ANA MARIA".into(),
            paternal_surname: "QUISPE".into(),
            maternal_surname: "".into(),
        };

        form.apply_identity(Some(&record));
        assert_eq!(form.customer.names, "ANA MARIA");
        assert_eq!(form.customer.surnames, "QUISPE");

        form.apply_identity(None);
        assert!(form.customer.names.is_empty());
        assert!(form.customer.surnames.is_empty());
    }

    #[test]
    fn test_checkout_request() {
        let request = filled_form().checkout_request().unwrap();

        assert_eq!(request.customer_name, "Ana Quispe Mamani");
        assert_eq!(request.customer_document, "12345678");
        assert_eq!(request.customer_email, DEFAULT_CUSTOMER_EMAIL);
        assert_eq!(request.total.to_string(), "25.00");
        assert_eq!(request.subtotal, request.total);
        assert_eq!(request.cart_items.len(), 2);
    }

    #[test]
    fn test_checkout_preconditions() {
        let mut form = filled_form();
        form.update_customer(CustomerField::Dni(String::new()));
        assert!(matches!(form.checkout_request(), Err(CoreError::Validation(_))));

        let mut form = filled_form();
        form.items.clear();
        assert!(matches!(form.checkout_request(), Err(CoreError::EmptyCart)));

        assert!(matches!(
            {
                let mut fresh = ReceiptForm::new();
                fresh.update_customer(CustomerField::Dni("12345678".into()));
                fresh.checkout_request()
            },
            Err(CoreError::NonPositiveTotal { .. })
        ));
    }

    #[test]
    fn test_checkout_rejects_bad_lines() {
        let cases = [
            ItemField::Quantity(0),
            ItemField::Quantity(-3),
            ItemField::Quantity(MAX_ITEM_QUANTITY + 1),
            ItemField::UnitPrice(soles("-1.00")),
            ItemField::Discount(soles("-0.50")),
        ];

        for field in cases {
            let mut form = filled_form();
            form.update_item(1, field.clone()).unwrap();
            assert!(
                matches!(form.checkout_request(), Err(CoreError::InvalidLine { line: 2, .. })),
                "{field:?} was accepted"
            );
        }
    }

    #[test]
    fn test_huge_values_do_not_panic() {
        let mut form = filled_form();
        form.update_item(0, ItemField::Quantity(1_000_000_000_000_000)).unwrap();
        form.update_item(0, ItemField::UnitPrice(soles("100000"))).unwrap();

        assert_eq!(form.totals().final_total, Money::from_cents(i64::MAX));
        assert!(matches!(
            form.checkout_request(),
            Err(CoreError::InvalidLine { line: 1, source: ValidationError::OutOfRange { .. } })
        ));
    }

    #[test]
    fn test_reset() {
        let mut form = filled_form();
        form.reset();
        assert_eq!(form, ReceiptForm::new());
    }
}
