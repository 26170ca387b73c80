//! # Validation Module
//!
//! Input validation for the receipt form and the registration screen.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client side)                                     │
//! │  ├── Field format checks (DNI, email, lengths)                          │
//! │  └── Checkout preconditions (DNI, items, total > 0)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend DTO validation                                        │
//! │  └── Same rules, reported back as `mensaje`                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use boleta_core::validation::{validate_dni, validate_quantity};
//!
//! validate_dni("12345678").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::auth::RegistrationRequest;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::totals::TotalsBreakdown;
use crate::types::LineItem;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Digits in a Peruvian DNI.
pub const DNI_LENGTH: usize = 8;

/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a DNI: exactly eight ASCII digits.
///
/// ## Example
/// ```rust
/// use boleta_core::validation::validate_dni;
///
/// assert!(validate_dni("12345678").is_ok());
/// assert!(validate_dni("1234567").is_err());
/// assert!(validate_dni("1234567a").is_err());
/// ```
pub fn validate_dni(dni: &str) -> ValidationResult<()> {
    let dni = dni.trim();

    if dni.is_empty() {
        return Err(required("dni"));
    }

    if dni.len() != DNI_LENGTH || !dni.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "dni".to_string(),
            reason: "must be exactly 8 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an identity document number used at registration: 8 to 20 digits.
pub fn validate_document_number(document: &str) -> ValidationResult<()> {
    let document = document.trim();

    if document.is_empty() {
        return Err(required("document number"));
    }

    if !(8..=20).contains(&document.len()) || !document.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "document number".to_string(),
            reason: "must be 8 to 20 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address of the form `local@domain.tld`.
///
/// ## Rules
/// - local part: letters, digits, `.`, `_`, `%`, `+`, `-`
/// - domain: letters, digits, `.`, `-`, with at least one dot
/// - top-level domain: 2 to 6 letters
///
/// ## Example
/// ```rust
/// use boleta_core::validation::validate_email;
///
/// assert!(validate_email("ana.quispe@example.com").is_ok());
/// assert!(validate_email("ana@example").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(required("email"));
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain.com".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = (2..=6).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic());

    if local_ok && host_ok && tld_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Validates a password: at least six characters.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(required("password"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Validates given names or surnames: 2 to 100 characters after trimming.
///
/// `field` names the input in the error message.
pub fn validate_person_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();
    let len = value.chars().count();

    if len == 0 {
        return Err(required(field));
    }

    if len < 2 {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: 2,
        });
    }

    if len > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price: zero (free items) up to [`MAX_UNIT_PRICE`].
///
/// ## Example
/// ```rust
/// use boleta_core::money::Money;
/// use boleta_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE.soles(),
        });
    }

    Ok(())
}

/// Validates a line discount. It may exceed the line itself (the total
/// then goes negative) but not the largest possible line.
pub fn validate_discount(discount: Money) -> ValidationResult<()> {
    let ceiling = MAX_UNIT_PRICE.multiply_quantity(MAX_ITEM_QUANTITY);
    if discount.is_negative() || discount > ceiling {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: ceiling.soles(),
        });
    }

    Ok(())
}

/// Quantity, unit price and discount of one line.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    validate_discount(item.discount)?;
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size: at most MAX_CART_ITEMS (100) lines.
pub fn validate_cart_size(items: usize) -> ValidationResult<()> {
    if items > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Checks the preconditions for issuing a boleta.
///
/// ```text
/// dni blank?        → Validation(Required { field: "dni" })
/// no items?         → EmptyCart
/// > MAX_CART_ITEMS? → Validation(OutOfRange { field: "cart items" })
/// bad line?         → InvalidLine { line, source }  (quantity, price, discount)
/// final_total <= 0? → NonPositiveTotal
/// ```
pub fn validate_checkout(
    dni: &str,
    items: &[LineItem],
    totals: &TotalsBreakdown,
) -> CoreResult<()> {
    if dni.trim().is_empty() {
        return Err(required("dni").into());
    }

    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    validate_cart_size(items.len())?;

    for (index, item) in items.iter().enumerate() {
        validate_line_item(item).map_err(|source| CoreError::InvalidLine {
            line: index + 1,
            source,
        })?;
    }

    if !totals.final_total.is_positive() {
        return Err(CoreError::NonPositiveTotal {
            total: totals.final_total.to_string(),
        });
    }

    Ok(())
}

/// Validates every field of a registration form, stopping at the first
/// failure.
pub fn validate_registration(request: &RegistrationRequest) -> ValidationResult<()> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    validate_person_name("names", &request.names)?;
    validate_person_name("surnames", &request.surnames)?;
    validate_document_number(&request.document_number)?;
    Ok(())
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::compute_cart_totals;

    #[test]
    fn test_validate_dni() {
        assert!(validate_dni("12345678").is_ok());
        assert!(validate_dni(" 12345678 ").is_ok());

        assert!(matches!(validate_dni(""), Err(ValidationError::Required { .. })));
        assert!(validate_dni("1234567").is_err());
        assert!(validate_dni("123456789").is_err());
        assert!(validate_dni("1234567a").is_err());
        assert!(validate_dni("１２３４５６７８").is_err());
    }

    #[test]
    fn test_validate_document_number() {
        assert!(validate_document_number("12345678").is_ok());
        assert!(validate_document_number("12345678901234567890").is_ok());
        assert!(validate_document_number("1234567").is_err());
        assert!(validate_document_number("123456789012345678901").is_err());
        assert!(validate_document_number("20-1234567").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana.q+tienda@mail.example.pe").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("ana").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@example").is_err());
        assert!(validate_email("ana@example.c").is_err());
        assert!(validate_email("ana@example.company").is_err());
        assert!(validate_email("ana maria@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(matches!(
            validate_password("12345"),
            Err(ValidationError::TooShort { min: 6, .. })
        ));
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_person_name() {
        assert!(validate_person_name("names", "Ana").is_ok());
        assert!(validate_person_name("names", "A").is_err());
        assert!(validate_person_name("names", "  ").is_err());
        assert!(validate_person_name("surnames", &"Q".repeat(101)).is_err());
        assert!(validate_person_name("surnames", "Ñu").is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_unit_price_and_discount() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(MAX_UNIT_PRICE).is_ok());
        assert!(validate_unit_price(MAX_UNIT_PRICE + Money::from_cents(1)).is_err());
        assert!(validate_unit_price(Money::from_cents(-1)).is_err());

        assert!(validate_discount(Money::zero()).is_ok());
        assert!(validate_discount(Money::from_cents(50_000)).is_ok());
        assert!(validate_discount(Money::from_cents(-50)).is_err());
        assert!(validate_discount(Money::from_cents(i64::MAX)).is_err());
    }

    #[test]
    fn test_validate_line_item() {
        assert!(validate_line_item(&LineItem::new("Cuaderno", 2, Money::from_cents(1000))).is_ok());

        let err = validate_line_item(&LineItem::new("Cuaderno", 0, Money::from_cents(1000)))
            .unwrap_err();
        assert_eq!(err.field(), "quantity");

        let err = validate_line_item(&LineItem::new("Cuaderno", 1, Money::from_cents(-1000)))
            .unwrap_err();
        assert_eq!(err.field(), "unit price");
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS + 1).is_err());
    }

    #[test]
    fn test_validate_checkout() {
        let items = vec![LineItem::new("Cuaderno", 1, Money::from_cents(1000))];
        let totals = compute_cart_totals(&items);

        assert!(validate_checkout("12345678", &items, &totals).is_ok());

        assert!(matches!(
            validate_checkout("  ", &items, &totals),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            validate_checkout("12345678", &[], &compute_cart_totals(&[])),
            Err(CoreError::EmptyCart)
        ));

        let bulk = vec![
            LineItem::new("Cuaderno", 1, Money::from_cents(1000)),
            LineItem::new("Cuaderno", 5000, Money::from_cents(1000)),
        ];
        assert!(matches!(
            validate_checkout("12345678", &bulk, &compute_cart_totals(&bulk)),
            Err(CoreError::InvalidLine { line: 2, source: ValidationError::OutOfRange { .. } })
        ));

        let free = vec![LineItem::new("Muestra", 1, Money::zero())];
        assert!(matches!(
            validate_checkout("12345678", &free, &compute_cart_totals(&free)),
            Err(CoreError::NonPositiveTotal { .. })
        ));
    }

    #[test]
    fn test_validate_registration() {
        let mut request = RegistrationRequest {
            email: "ana@example.com".to_string(),
            password: "secreto".to_string(),
            names: "Ana".to_string(),
            surnames: "Quispe".to_string(),
            document_number: "12345678".to_string(),
        };
        assert!(validate_registration(&request).is_ok());

        request.document_number = "abc".to_string();
        let err = validate_registration(&request).unwrap_err();
        assert_eq!(err.field(), "document number");
    }
}
