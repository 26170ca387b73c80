//! # boleta-core: Pure Business Logic for the Boleta Client
//!
//! Everything needed to turn a cart into an electronic sales receipt
//! ("boleta de venta") request, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Boleta Client Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (boleta binary)                     │   │
//! │  │    login ──► dni ──► totals ──► create ──► list / show          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    boleta-client (HTTP + session)               │   │
//! │  │    AuthApi, ReceiptApi, IdentityApi, SessionStore, config       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ boleta-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  totals   │  │   form    │  │ validation│  │   │
//! │  │   │   Money   │  │ IGV split │  │ Receipt-  │  │   rules   │  │   │
//! │  │   │  TaxRate  │  │  request  │  │   Form    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in integer céntimos, decimal parsing, IGV split
//! - [`types`] - Line items, customers and the backend wire contract
//! - [`totals`] - The receipt totals calculator
//! - [`form`] - Checkout form state
//! - [`auth`] - Authentication wire types
//! - [`format`] - Currency and timestamp display
//! - [`validation`] - Field and checkout validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use boleta_core::money::Money;
//! use boleta_core::totals::compute_cart_totals;
//! use boleta_core::types::LineItem;
//!
//! let cart = vec![
//!     LineItem::new("Cuaderno", 2, Money::from_cents(1000)),
//!     LineItem::new("Lapicero", 1, Money::from_cents(550)).with_discount(Money::from_cents(50)),
//! ];
//!
//! let totals = compute_cart_totals(&cart);
//! assert_eq!(totals.tax_exclusive_base.to_string(), "21.19");
//! assert_eq!(totals.tax_amount.to_string(), "3.81");
//! assert_eq!(totals.final_total.to_string(), "25.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod form;
pub mod format;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use form::{CustomerDraft, CustomerField, ItemField, ReceiptForm};
pub use money::Money;
pub use totals::{
    build_receipt_request, compute_cart_totals, compute_final_totals, compute_line_total,
    TotalsBreakdown,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed on a single receipt.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a line may carry (S/ 1,000,000.00).
pub const MAX_UNIT_PRICE: Money = Money::from_cents(100_000_000);
