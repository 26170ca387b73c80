//! # Display Formatting
//!
//! Currency and date rendering for receipt screens and the CLI.
//!
//! ```text
//! Money::from_cents(123450)        ──► "S/ 1,234.50"
//! "2025-10-16 22:34:34.39801"      ──► "16/10/2025 10 PM"
//! ```

use chrono::NaiveDateTime;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Shown in place of a timestamp the backend sent in an unknown shape.
pub const INVALID_DATE_LABEL: &str = "Fecha inválida";

// =============================================================================
// Currency
// =============================================================================

/// How to render amounts for one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// ISO 4217 code.
    pub code: String,
    /// Prefix printed before the amount.
    pub symbol: String,
}

impl CurrencyFormat {
    /// Peruvian sol, the currency every boleta is issued in.
    pub fn pen() -> Self {
        CurrencyFormat {
            code: "PEN".to_string(),
            symbol: "S/".to_string(),
        }
    }

    /// Looks up the display symbol for a currency code. Unknown codes are
    /// rendered with the code itself as prefix (`"EUR 5.00"`).
    pub fn for_code(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        let symbol = match code.as_str() {
            "PEN" => "S/",
            "USD" => "US$",
            _ => code.as_str(),
        }
        .to_string();
        CurrencyFormat { code, symbol }
    }

    /// Formats an amount: symbol, space, grouped soles, two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use boleta_core::format::CurrencyFormat;
    /// use boleta_core::money::Money;
    ///
    /// let pen = CurrencyFormat::pen();
    /// assert_eq!(pen.format(Money::from_cents(123450)), "S/ 1,234.50");
    /// assert_eq!(pen.format(Money::from_cents(-550)), "-S/ 5.50");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{} {}.{:02}",
            sign,
            self.symbol,
            group_thousands(amount.soles().unsigned_abs()),
            amount.cents_part()
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::pen()
    }
}

/// Formats an amount in soles. Shorthand for `CurrencyFormat::pen().format`.
pub fn format_currency(amount: Money) -> String {
    CurrencyFormat::pen().format(amount)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Timestamps
// =============================================================================

/// Parses a backend timestamp, dropping anything past whole seconds.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.ffffff]` and the `T`-separated form that
/// Java's `LocalDateTime::toString` produces. Seconds may be absent
/// (`2025-10-16T22:34`).
pub fn parse_backend_timestamp(raw: &str) -> CoreResult<NaiveDateTime> {
    let normalized = raw.trim().replacen(' ', "T", 1);
    let truncated: String = normalized.chars().take(19).collect();

    NaiveDateTime::parse_from_str(&truncated, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&truncated, "%Y-%m-%dT%H:%M"))
        .map_err(|_| CoreError::InvalidTimestamp(raw.to_string()))
}

/// Renders a backend timestamp as `DD/MM/YYYY HH AM|PM`.
///
/// Minutes and seconds are not shown; the hour uses a two-digit 12-hour
/// clock, so midnight is `12 AM`.
///
/// ## Example
/// ```rust
/// use boleta_core::format::format_timestamp;
///
/// assert_eq!(format_timestamp("2025-10-16 22:34:34.39801").unwrap(), "16/10/2025 10 PM");
/// assert!(format_timestamp("yesterday").is_err());
/// ```
pub fn format_timestamp(raw: &str) -> CoreResult<String> {
    Ok(parse_backend_timestamp(raw)?
        .format("%d/%m/%Y %I %p")
        .to_string())
}

/// Like [`format_timestamp`] but never fails: unparseable input shows
/// [`INVALID_DATE_LABEL`].
pub fn display_timestamp(raw: &str) -> String {
    format_timestamp(raw).unwrap_or_else(|_| INVALID_DATE_LABEL.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
