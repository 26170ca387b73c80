//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The backend stores BigDecimal, the browser used f64, and the two      │
//! │  drifted by a céntimo every few hundred receipts.                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Céntimos                                         │
//! │    S/ 5.50 is stored as 550                                             │
//! │    Rounding happens only when a decimal enters the system              │
//! │    (parsing, JSON decoding) or when we divide (IGV split)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The backend speaks JSON numbers in soles (`"precioUnitario": 5.5`).
//! `Money` serializes to that shape and deserializes from a number or a
//! decimal string, rounding half away from zero to the céntimo. Amounts
//! typed into a cart go through [`exact`] instead, which refuses anything
//! finer than a céntimo.
//!
//! ## Usage
//! ```rust
//! use boleta_core::money::Money;
//!
//! let price: Money = "5.50".parse().unwrap();
//! assert_eq!(price.cents(), 550);
//!
//! let line = price * 3 - Money::from_cents(50);
//! assert_eq!(line.to_string(), "16.00");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in céntimos (1/100 of a sol).
///
/// ## Design Decisions
/// - **i64 (signed)**: Over-large discounts produce negative line totals,
///   which are passed through rather than rejected
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: Absurd cart inputs pin at the `i64` bounds
///   instead of panicking; checkout validation rejects them later
/// - **Custom serde**: Soles as a JSON number, matching the backend contract
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► line total ──► subtotal ──► IGV split
///                                             │
///                                             └──► ReceiptRequest.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from céntimos.
    ///
    /// ## Example
    /// ```rust
    /// use boleta_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // S/ 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount such as `"25"`, `"5.5"` or `"-0.125"`.
    ///
    /// Digits past the second decimal place are rounded half away from zero,
    /// so `"0.125"` becomes 13 céntimos and `"-0.125"` becomes -13.
    ///
    /// ## Example
    /// ```rust
    /// use boleta_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10").unwrap().cents(), 1000);
    /// assert_eq!(Money::parse_decimal("3.333").unwrap().cents(), 333);
    /// assert!(Money::parse_decimal("1,50").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Self, ValidationError> {
        parse_amount(input, Rounding::HalfAwayFromZero)
    }

    /// Parses a decimal amount that must already be whole céntimos.
    ///
    /// Cart inputs go through here: a price like `"0.333"` is refused
    /// instead of being rounded before it is multiplied by the quantity.
    /// Trailing zeros are fine.
    ///
    /// ## Example
    /// ```rust
    /// use boleta_core::money::Money;
    ///
    /// assert_eq!(Money::parse_exact("0.330").unwrap().cents(), 33);
    /// assert!(Money::parse_exact("0.333").is_err());
    /// ```
    pub fn parse_exact(input: &str) -> Result<Self, ValidationError> {
        parse_amount(input, Rounding::Reject)
    }

    /// Returns the value in céntimos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-soles portion (truncated toward zero).
    #[inline]
    pub const fn soles(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the céntimos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount in soles as a float, for the JSON wire format only.
    #[inline]
    pub fn to_soles_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use boleta_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Splits a tax-inclusive amount into its tax-exclusive base and the tax.
    ///
    /// ## Tax-Inclusive Split
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Prices on a boleta already contain IGV.                           │
    /// │                                                                     │
    /// │    base = amount / (1 + rate)     rounded half away from zero      │
    /// │    tax  = amount - base           exact, never rounded again       │
    /// │                                                                     │
    /// │  S/ 25.00 at 18%:                                                   │
    /// │    base = 2500 / 1.18 = 2118.64 → 2119  (S/ 21.19)                 │
    /// │    tax  = 2500 - 2119      = 381        (S/ 3.81)                  │
    /// │                                                                     │
    /// │  base + tax == amount holds to the céntimo by construction         │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use boleta_core::money::Money;
    /// use boleta_core::types::TaxRate;
    ///
    /// let (base, tax) = Money::from_cents(2500).split_inclusive_tax(TaxRate::IGV);
    /// assert_eq!(base.cents(), 2119);
    /// assert_eq!(tax.cents(), 381);
    /// ```
    pub fn split_inclusive_tax(&self, rate: TaxRate) -> (Money, Money) {
        let numerator = self.0 as i128 * 10_000;
        let denominator = 10_000 + rate.bps() as i128;
        let base = Money(div_round_half_away(numerator, denominator) as i64);
        (base, *self - base)
    }
}

/// What to do with digits past the second decimal place.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Rounding {
    HalfAwayFromZero,
    Reject,
}

fn parse_amount(input: &str, rounding: Rounding) -> Result<Money, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (whole, frac) = match unsigned.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (unsigned, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("must contain at least one digit"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("must be a plain decimal number like 12.50"));
    }

    let overflow = || invalid("amount is too large");

    let mut cents: i64 = 0;
    for b in whole.bytes() {
        cents = cents
            .checked_mul(10)
            .and_then(|c| c.checked_add(i64::from(b - b'0')))
            .ok_or_else(overflow)?;
    }
    cents = cents.checked_mul(100).ok_or_else(overflow)?;

    let mut frac_digits = frac.bytes().map(|b| i64::from(b - b'0'));
    let tenths = frac_digits.next().unwrap_or(0);
    let hundredths = frac_digits.next().unwrap_or(0);
    cents = cents
        .checked_add(tenths * 10 + hundredths)
        .ok_or_else(overflow)?;

    match rounding {
        Rounding::Reject => {
            if frac_digits.any(|d| d != 0) {
                return Err(invalid("at most two decimal places"));
            }
        }
        // Half away from zero: only the first dropped digit matters
        Rounding::HalfAwayFromZero => {
            if frac_digits.next().unwrap_or(0) >= 5 {
                cents = cents.checked_add(1).ok_or_else(overflow)?;
            }
        }
    }

    Ok(Money(if negative { -cents } else { cents }))
}

/// Integer division rounding half away from zero. `den` must be positive.
fn div_round_half_away(num: i128, den: i128) -> i128 {
    let quotient = num / den;
    let remainder = num % den;
    if remainder.abs() * 2 >= den {
        quotient + num.signum()
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Canonical fixed two-decimal text: `21.19`, `-5.50`, `0.00`.
///
/// ## Note
/// Currency symbols and digit grouping live in [`crate::format`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.soles().abs(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by i64 (quantity).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_soles_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor {
            rounding: Rounding::HalfAwayFromZero,
        })
    }
}

struct MoneyVisitor {
    rounding: Rounding,
}

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount in soles as a number or decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom("amount is too large"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .ok_or_else(|| E::custom("amount is too large"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be a finite number"));
        }
        // Shortest round-trip text keeps 1.005 as "1.005" instead of 1.00499..
        parse_amount(&v.to_string(), self.rounding).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        parse_amount(v, self.rounding).map_err(E::custom)
    }
}

/// Deserializes `Money` refusing amounts finer than a céntimo.
///
/// Used for amounts typed into a cart, where rounding the input would
/// change the line total:
/// ```rust,ignore
/// #[serde(deserialize_with = "crate::money::exact::deserialize")]
/// pub unit_price: Money,
/// ```
pub mod exact {
    use super::{Money, MoneyVisitor, Rounding};
    use serde::Deserializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(MoneyVisitor {
            rounding: Rounding::Reject,
        })
    }
}

/// Serializes `Money` as its canonical fixed two-decimal string.
///
/// Used by display-oriented payloads such as `TotalsBreakdown`:
/// ```rust,ignore
/// #[serde(with = "crate::money::fixed2")]
/// pub tax_amount: Money,
/// ```
pub mod fixed2 {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(money)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        Money::deserialize(deserializer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.soles(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display_is_fixed_two_decimals() {
        assert_eq!(Money::from_cents(2119).to_string(), "21.19");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("25").unwrap().cents(), 2500);
        assert_eq!(Money::parse_decimal("5.5").unwrap().cents(), 550);
        assert_eq!(Money::parse_decimal(" 0.50 ").unwrap().cents(), 50);
        assert_eq!(Money::parse_decimal(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse_decimal("-12.30").unwrap().cents(), -1230);
        assert_eq!(Money::parse_decimal("+1").unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::parse_decimal("0.125").unwrap().cents(), 13);
        assert_eq!(Money::parse_decimal("0.124").unwrap().cents(), 12);
        assert_eq!(Money::parse_decimal("-0.125").unwrap().cents(), -13);
        assert_eq!(Money::parse_decimal("9.995").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal(".").is_err());
        assert!(Money::parse_decimal("-").is_err());
        assert!(Money::parse_decimal("1,50").is_err());
        assert!(Money::parse_decimal("S/ 5").is_err());
        assert!(Money::parse_decimal("1e3").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_exact_refuses_sub_centimo_digits() {
        assert_eq!(Money::parse_exact("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse_exact("0.33").unwrap().cents(), 33);
        assert_eq!(Money::parse_exact("0.3300").unwrap().cents(), 33);
        assert_eq!(Money::parse_exact("-5.5").unwrap().cents(), -550);

        let err = Money::parse_exact("0.333").unwrap_err();
        assert!(err.to_string().contains("at most two decimal places"));
        assert!(Money::parse_exact("9.995").is_err());
        assert!(Money::parse_exact("abc").is_err());
    }

    #[test]
    fn test_exact_deserializer() {
        #[derive(serde::Deserialize)]
        struct Price {
            #[serde(deserialize_with = "exact::deserialize")]
            amount: Money,
        }

        let parse = |json: &str| serde_json::from_str::<Price>(json).map(|p| p.amount.cents());
        assert_eq!(parse(r#"{ "amount": 10.99 }"#).unwrap(), 1099);
        assert_eq!(parse(r#"{ "amount": "0.50" }"#).unwrap(), 50);
        assert_eq!(parse(r#"{ "amount": 3 }"#).unwrap(), 300);
        assert!(parse(r#"{ "amount": 0.333 }"#).is_err());
        assert!(parse(r#"{ "amount": "0.333" }"#).is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!((huge * 2).cents(), i64::MAX);
        assert_eq!(huge.multiply_quantity(-2).cents(), i64::MIN);
        assert_eq!((huge + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!((-huge - Money::from_cents(10)).cents(), i64::MIN);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);

        let total: Money = [huge, huge].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-a).cents(), -1000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_split_inclusive_tax() {
        let (base, tax) = Money::from_cents(2500).split_inclusive_tax(TaxRate::IGV);
        assert_eq!(base.cents(), 2119);
        assert_eq!(tax.cents(), 381);

        let (base, tax) = Money::from_cents(118).split_inclusive_tax(TaxRate::IGV);
        assert_eq!(base.cents(), 100);
        assert_eq!(tax.cents(), 18);

        let (base, tax) = Money::from_cents(1).split_inclusive_tax(TaxRate::IGV);
        assert_eq!(base.cents(), 1);
        assert_eq!(tax.cents(), 0);
    }

    #[test]
    fn test_split_inclusive_tax_negative_mirrors_positive() {
        let (base, tax) = Money::from_cents(-2500).split_inclusive_tax(TaxRate::IGV);
        assert_eq!(base.cents(), -2119);
        assert_eq!(tax.cents(), -381);
    }

    #[test]
    fn test_split_with_zero_rate_is_identity() {
        let (base, tax) = Money::from_cents(999).split_inclusive_tax(TaxRate::zero());
        assert_eq!(base.cents(), 999);
        assert!(tax.is_zero());
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&Money::from_cents(550)).unwrap();
        assert_eq!(json, "5.5");

        let from_number: Money = serde_json::from_str("10.99").unwrap();
        assert_eq!(from_number.cents(), 1099);

        let from_int: Money = serde_json::from_str("25").unwrap();
        assert_eq!(from_int.cents(), 2500);

        let from_string: Money = serde_json::from_str("\"5.50\"").unwrap();
        assert_eq!(from_string.cents(), 550);

        // f64 noise must not leak into céntimos
        let noisy: Money = serde_json::from_str("1.005").unwrap();
        assert_eq!(noisy.cents(), 101);

        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }
}
