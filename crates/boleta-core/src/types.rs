//! # Domain Types
//!
//! Core domain types and the wire contract shared with the backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  WRITE PATH (client → backend)        READ PATH (backend → client)     │
//! │  ─────────────────────────────        ────────────────────────────     │
//! │  LineItem (local, has discount)       ReceiptRecord                    │
//! │      │                                  ├── ReceiptDetail[]             │
//! │      ▼                                  └── SellerSnapshot?             │
//! │  CartItemRequest (no discount)                                          │
//! │      │                                ReceiptCreated                    │
//! │      ▼                                  (ack of POST /api/boletas)      │
//! │  ReceiptRequest ─────────────────────►                                  │
//! │                                                                         │
//! │  Customer ◄── IdentityRecord (DNI lookup)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Naming
//! The backend contract uses Spanish camelCase names (`nombreProducto`) and,
//! on the read path, a few snake_case ones (`fecha_creacion`). Rust field
//! names are English; serde renames carry the exact wire names.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (Peruvian IGV)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Peruvian IGV, applied on a tax-inclusive basis.
    pub const IGV: TaxRate = TaxRate(1800);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::IGV
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One product/quantity/price/discount entry in a cart.
///
/// The discount lives only on the client: it reduces the local line total
/// but is not part of [`CartItemRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Free-text product description printed on the receipt.
    #[serde(default)]
    pub product_name: String,

    /// Units sold.
    pub quantity: i64,

    /// Tax-inclusive price of one unit, in whole céntimos.
    #[serde(deserialize_with = "crate::money::exact::deserialize")]
    pub unit_price: Money,

    /// Amount taken off the whole line (not per unit).
    #[serde(default, deserialize_with = "crate::money::exact::deserialize")]
    pub discount: Money,
}

impl LineItem {
    /// Creates a line without discount.
    pub fn new(product_name: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        LineItem {
            product_name: product_name.into(),
            quantity,
            unit_price,
            discount: Money::zero(),
        }
    }

    /// Sets the line discount.
    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount = discount;
        self
    }

    /// The blank row a fresh checkout form starts with.
    pub fn blank() -> Self {
        LineItem::new("", 1, Money::zero())
    }

    /// `quantity * unit_price - discount`, see [`crate::totals::compute_line_total`].
    #[inline]
    pub fn line_total(&self) -> Money {
        crate::totals::compute_line_total(self.quantity, self.unit_price, self.discount)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Customer identity copied onto the receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Full display name ("nombres apellidos").
    #[serde(default)]
    pub name: String,

    /// National ID (DNI) or other document number.
    #[serde(default)]
    pub document: String,

    /// Contact email; blank means "use the placeholder".
    #[serde(default)]
    pub email: String,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Customer {
            name: name.into(),
            document: document.into(),
            email: email.into(),
        }
    }
}

// =============================================================================
// Identity Lookup Result
// =============================================================================

/// Name components returned by the DNI lookup service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub dni: String,
    pub names: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
}

impl IdentityRecord {
    /// `"paterno materno"`, trimmed so a missing half leaves no stray space.
    pub fn surnames(&self) -> String {
        format!("{} {}", self.paternal_surname, self.maternal_surname)
            .trim()
            .to_string()
    }

    /// `"nombres paterno materno"`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.names, self.surnames()).trim().to_string()
    }
}

// =============================================================================
// Receipt Request (outbound)
// =============================================================================

/// One cart line as the backend expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItemRequest {
    #[serde(rename = "nombreProducto")]
    pub product_name: String,

    #[serde(rename = "precioUnitario")]
    pub unit_price: Money,

    #[serde(rename = "cantidad")]
    pub quantity: i64,
}

impl From<&LineItem> for CartItemRequest {
    fn from(item: &LineItem) -> Self {
        CartItemRequest {
            product_name: item.product_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// The canonical payload of `POST /api/boletas`.
///
/// ## Wire Shape
/// ```json
/// {
///   "cartItems": [{ "nombreProducto": "Cuaderno", "precioUnitario": 10.0, "cantidad": 2 }],
///   "total": 25.0,
///   "subtotal": 25.0,
///   "nombreCliente": "Ana Quispe",
///   "documentoCliente": "12345678",
///   "emailCliente": "example@gmail.com"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptRequest {
    /// Never set by this client; the backend reads the user from the JWT.
    #[serde(rename = "idUsuario", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    #[serde(rename = "cartItems")]
    pub cart_items: Vec<CartItemRequest>,

    pub total: Money,

    pub subtotal: Money,

    #[serde(rename = "nombreCliente")]
    pub customer_name: String,

    #[serde(rename = "documentoCliente")]
    pub customer_document: String,

    #[serde(rename = "emailCliente")]
    pub customer_email: String,
}

// =============================================================================
// Receipt Acknowledgment
// =============================================================================

/// Response of `POST /api/boletas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptCreated {
    pub success: bool,

    #[serde(rename = "mensaje", default)]
    pub message: String,

    /// Absent when `success` is false.
    #[serde(rename = "boletaId", default)]
    pub receipt_id: Option<i64>,
}

// =============================================================================
// Receipt Record (read path)
// =============================================================================

/// A persisted detail line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptDetail {
    #[serde(rename = "idDetalle", default)]
    pub id: Option<i64>,

    #[serde(rename = "producto", default, deserialize_with = "null_as_default")]
    pub product: String,

    #[serde(rename = "precio_unitario")]
    pub unit_price: Money,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    /// Some endpoints leave this out; use [`ReceiptDetail::line_subtotal`].
    #[serde(default)]
    pub subtotal: Option<Money>,
}

impl ReceiptDetail {
    /// The stored subtotal, or `unit_price * quantity` when the backend
    /// omitted it.
    pub fn line_subtotal(&self) -> Money {
        self.subtotal
            .unwrap_or_else(|| self.unit_price.multiply_quantity(self.quantity))
    }
}

/// The seller who issued a receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SellerSnapshot {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(rename = "nombres", default, deserialize_with = "null_as_default")]
    pub names: String,

    #[serde(rename = "apellidos", default, deserialize_with = "null_as_default")]
    pub surnames: String,

    #[serde(rename = "numero_documento", default, deserialize_with = "null_as_default")]
    pub document_number: String,

    #[serde(default)]
    pub email: Option<String>,
}

/// A receipt as returned by `GET /api/boletas/{id}` and the list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptRecord {
    #[serde(rename = "idBoleta")]
    pub id: i64,

    #[serde(rename = "idUsuario", default)]
    pub user_id: Option<i64>,

    /// Raw backend timestamp, e.g. `2025-10-16 22:34:34.39801`.
    /// Render with [`crate::format::format_timestamp`].
    #[serde(rename = "fecha_creacion", default, deserialize_with = "null_as_default")]
    pub created_at: String,

    pub total: Money,

    #[serde(rename = "detalles", default, deserialize_with = "null_as_default")]
    pub details: Vec<ReceiptDetail>,

    #[serde(rename = "nombreCliente", default, deserialize_with = "null_as_default")]
    pub customer_name: String,

    #[serde(rename = "documentoCliente", default, deserialize_with = "null_as_default")]
    pub customer_document: String,

    #[serde(rename = "emailCliente", default, deserialize_with = "null_as_default")]
    pub customer_email: String,

    #[serde(rename = "usuarioVendedor", default)]
    pub seller: Option<SellerSnapshot>,
}

impl ReceiptRecord {
    /// Total number of units across all detail lines.
    pub fn total_quantity(&self) -> i64 {
        self.details.iter().map(|d| d.quantity).sum()
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_igv_rate() {
        assert_eq!(TaxRate::IGV.bps(), 1800);
        assert!((TaxRate::IGV.percentage() - 18.0).abs() < 0.001);
        assert_eq!(TaxRate::default(), TaxRate::IGV);
    }

    #[test]
    fn test_identity_names() {
        let identity = IdentityRecord {
            dni: "12345678".into(),
            names: "ANA MARIA".into(),
            paternal_surname: "QUISPE".into(),
            maternal_surname: String::new(),
        };
        assert_eq!(identity.surnames(), "QUISPE");
        assert_eq!(identity.full_name(), "ANA MARIA QUISPE");
    }

    #[test]
    fn test_cart_item_request_wire_names() {
        let item = LineItem::new("Cuaderno A4", 2, Money::from_cents(1000))
            .with_discount(Money::from_cents(100));
        let json = serde_json::to_value(CartItemRequest::from(&item)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "nombreProducto": "Cuaderno A4",
                "precioUnitario": 10.0,
                "cantidad": 2
            })
        );
    }

    #[test]
    fn test_line_item_amounts_must_be_whole_centimos() {
        let item: LineItem = serde_json::from_str(
            r#"{ "productName": "Clip", "quantity": 3, "unitPrice": "0.330", "discount": 0.09 }"#,
        )
        .unwrap();
        assert_eq!(item.unit_price.cents(), 33);
        assert_eq!(item.line_total().cents(), 90);

        let err = serde_json::from_str::<LineItem>(
            r#"{ "productName": "Clip", "quantity": 3, "unitPrice": "0.333" }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at most two decimal places"));

        assert!(serde_json::from_str::<LineItem>(
            r#"{ "productName": "Clip", "quantity": 1, "unitPrice": 1, "discount": 0.005 }"#,
        )
        .is_err());
    }

    #[test]
    fn test_receipt_request_skips_user_id() {
        let request = ReceiptRequest {
            user_id: None,
            cart_items: vec![],
            total: Money::zero(),
            subtotal: Money::zero(),
            customer_name: "Ana".into(),
            customer_document: "12345678".into(),
            customer_email: "ana@example.com".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("idUsuario"));
        for key in [
            "cartItems",
            "total",
            "subtotal",
            "nombreCliente",
            "documentoCliente",
            "emailCliente",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_receipt_record_from_backend_json() {
        let json = r#"{
            "idBoleta": 7,
            "idUsuario": 3,
            "fecha_creacion": "2025-10-16 22:34:34.39801",
            "total": 25.00,
            "nombreCliente": "ANA QUISPE",
            "documentoCliente": "12345678",
            "emailCliente": null,
            "detalles": [
                { "idDetalle": 1, "producto": "Cuaderno", "precio_unitario": 10.00, "cantidad": 2, "subtotal": 20.00 },
                { "idDetalle": 2, "producto": "Lapicero", "precio_unitario": 5.50, "cantidad": 1 }
            ],
            "usuarioVendedor": { "id": 3, "nombres": "Luis", "apellidos": "Rojas", "numero_documento": "87654321" }
        }"#;

        let record: ReceiptRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.total.cents(), 2500);
        assert_eq!(record.customer_email, "");
        assert_eq!(record.details.len(), 2);
        assert_eq!(record.details[0].line_subtotal().cents(), 2000);
        assert_eq!(record.details[1].line_subtotal().cents(), 550);
        assert_eq!(record.total_quantity(), 3);
        assert_eq!(record.seller.unwrap().names, "Luis");
    }

    #[test]
    fn test_receipt_record_tolerates_missing_details() {
        let json = r#"{ "idBoleta": 1, "total": 0, "detalles": null }"#;
        let record: ReceiptRecord = serde_json::from_str(json).unwrap();
        assert!(record.details.is_empty());
        assert!(record.seller.is_none());
    }

    #[test]
    fn test_receipt_created_failure_has_no_id() {
        let json = r#"{ "success": false, "mensaje": "El carrito está vacío" }"#;
        let ack: ReceiptCreated = serde_json::from_str(json).unwrap();
        assert!(!ack.success);
        assert_eq!(ack.receipt_id, None);
    }
}
