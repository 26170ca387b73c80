//! # Cart Files
//!
//! The CLI's stand-in for the checkout screen: a JSON file with the
//! customer and the lines to bill.
//!
//! ```json
//! {
//!   "customer": { "dni": "12345678", "names": "Ana", "surnames": "Quispe", "email": "" },
//!   "items": [
//!     { "productName": "Cuaderno", "quantity": 2, "unitPrice": "10.00" },
//!     { "productName": "Lapicero", "quantity": 1, "unitPrice": 5.5, "discount": "0.50" }
//!   ]
//! }
//! ```
//!
//! Amounts may be JSON numbers or decimal strings, in whole céntimos.
//! Every line is range-checked on read, so nothing out of bounds reaches
//! the totals.

use anyhow::Context;
use boleta_core::form::{CustomerDraft, ReceiptForm};
use boleta_core::types::LineItem;
use boleta_core::validation::{validate_cart_size, validate_line_item};
use boleta_core::CoreError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartFile {
    #[serde(default)]
    pub customer: CustomerDraft,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl CartFile {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let cart: CartFile = serde_json::from_str(json).context("cart file is not valid")?;
        cart.check_items().context("cart file is not valid")?;
        Ok(cart)
    }

    fn check_items(&self) -> Result<(), CoreError> {
        validate_cart_size(self.items.len())?;
        for (index, item) in self.items.iter().enumerate() {
            validate_line_item(item).map_err(|source| CoreError::InvalidLine {
                line: index + 1,
                source,
            })?;
        }
        Ok(())
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read cart file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("in {}", path.display()))
    }

    pub fn into_form(self) -> ReceiptForm {
        ReceiptForm::with_contents(self.customer, self.items)
    }
}
