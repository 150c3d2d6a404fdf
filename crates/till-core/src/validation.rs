//! # Validation Module
//!
//! Input checks applied at the register's command boundary.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console / UI                                                 │
//! │  └── Raw text ("2", "12.50", "10%")                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command boundary                                             │
//! │  └── THIS MODULE: parse + range checks                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart                                                         │
//! │  └── No checks at all: whatever arrives is priced as-is                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities ≤ 0 are accepted on purpose: the cart treats them as removal.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountKind, DiscountSpec};
use crate::{MAX_ITEM_QUANTITY, MAX_NOTES_LENGTH, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier: non-blank, at most 64 characters.
///
/// ```rust
/// use till_core::validation::validate_product_id;
///
/// assert!(validate_product_id("P-1001").is_ok());
/// assert!(validate_product_id("  ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a product display name: non-blank, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates free-text sale notes.
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity typed by the cashier.
///
/// ## Rules
/// - Must not exceed MAX_ITEM_QUANTITY (999)
/// - Zero and negatives pass: they mean "remove the line"
///
/// ## User Workflow
/// ```text
/// Cashier types 1000 instead of 10
///      │
///      ▼
/// validate_quantity(1000) ← THIS FUNCTION
///      │
///      └── qty > 999? → Error: "quantity must be between 1 and 999"
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Parses a quantity typed as text. Fractions such as "1.5" are rejected.
///
/// ```rust
/// use till_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("3").unwrap(), 3);
/// assert_eq!(parse_quantity("0").unwrap(), 0);
/// assert!(parse_quantity("1.5").is_err());
/// ```
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let qty: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        })?;

    validate_quantity(qty)?;
    Ok(qty)
}

/// Validates a unit price. Zero is allowed (free items); anything above
/// MAX_UNIT_PRICE_CENTS is a typo.
///
/// ```rust
/// use till_core::money::Money;
/// use till_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// assert!(validate_price(Money::from_cents(i64::MAX)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price (cents)".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Parses a decimal amount such as "12", "12.5" or "12.50" into cents.
///
/// ```rust
/// use till_core::validation::parse_price;
///
/// assert_eq!(parse_price("12.5").unwrap().cents(), 1250);
/// assert!(parse_price("12.505").is_err());
/// assert!(parse_price("-1").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let cents = parse_hundredths(text, "price")?;
    let price = Money::from_cents(cents);
    validate_price(price)?;
    Ok(price)
}

/// Validates a discount before it reaches the cart.
///
/// ## Rules
/// - Amount must not be negative
/// - Percentage discounts may not exceed 100% (10000 bps)
pub fn validate_discount(discount: &DiscountSpec) -> ValidationResult<()> {
    if discount.amount < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "discount".to_string(),
        });
    }

    if discount.kind == DiscountKind::Percentage && discount.amount > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "discount percentage (bps)".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Parses a discount from a kind and an amount typed as text.
///
/// Fixed amounts are currency ("5" → 500 cents); percentages are percent
/// ("12.5" → 1250 bps).
pub fn parse_discount(kind: DiscountKind, amount: &str) -> ValidationResult<DiscountSpec> {
    let hundredths = parse_hundredths(amount.trim_end_matches('%'), "discount")?;
    let discount = DiscountSpec {
        amount: hundredths,
        kind,
    };
    validate_discount(&discount)?;
    Ok(discount)
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Parses a decimal with at most two fractional digits into hundredths.
fn parse_hundredths(text: &str, field: &str) -> ValidationResult<i64> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("must be a number"));
    }
    if !is_digits(whole) || !is_digits(frac) {
        return Err(invalid("must be a number"));
    }
    if frac.len() > 2 {
        return Err(invalid("at most two decimal places"));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("too large"))?
    };
    let frac: i64 = format!("{:0<2}", frac)
        .parse()
        .map_err(|_| invalid("must be a number"))?;

    let value = whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(|| invalid("too large"))?;

    if negative {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("P1").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id(&"X".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Masala Chai").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("-5").unwrap(), -5);
        assert_eq!(parse_quantity("999").unwrap(), 999);

        assert!(parse_quantity("1000").is_err());
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("two").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("10").unwrap().cents(), 1000);
        assert_eq!(parse_price("0.05").unwrap().cents(), 5);
        assert_eq!(parse_price(".5").unwrap().cents(), 50);

        assert!(parse_price("").is_err());
        assert!(parse_price(".").is_err());
        assert!(parse_price("1,50").is_err());
        assert!(parse_price("-0.01").is_err());
    }

    #[test]
    fn test_price_ceiling() {
        assert_eq!(parse_price("10000000").unwrap().cents(), MAX_UNIT_PRICE_CENTS);
        assert!(matches!(
            parse_price("10000000.01"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(parse_price("92233720368547758.07").is_err());
    }

    #[test]
    fn test_parse_discount() {
        let pct = parse_discount(DiscountKind::Percentage, "10%").unwrap();
        assert_eq!(pct, DiscountSpec::percentage_bps(1000));

        let fixed = parse_discount(DiscountKind::Fixed, "5").unwrap();
        assert_eq!(fixed, DiscountSpec::fixed(Money::from_cents(500)));

        assert!(parse_discount(DiscountKind::Percentage, "150").is_err());
        assert!(parse_discount(DiscountKind::Fixed, "-5").is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(1800).is_ok());
        assert!(validate_tax_rate_bps(10_000).is_ok());
        assert!(validate_tax_rate_bps(10_001).is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert!(validate_notes("deliver after 6pm").is_ok());
        assert!(validate_notes(&"n".repeat(MAX_NOTES_LENGTH + 1)).is_err());
    }
}
