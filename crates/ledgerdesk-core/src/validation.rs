//! # Validation Module
//!
//! Checks run on records before they reach the calculation core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser forms                                                 │
//! │  ├── Required fields, positive prices                                   │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ledgerdesk-data boundary                                      │
//! │  ├── Type coercion (decimal strings, ids, labels)                      │
//! │  └── THIS MODULE: business rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculation core                                              │
//! │  └── Total functions, never fail                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{LedgerEntry, Product, TaxRate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted free-text search.
pub const MAX_SEARCH_LEN: usize = 100;

/// Longest accepted name or description.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, bounded text field.
///
/// ```rust
/// use ledgerdesk_core::validation::validate_required;
///
/// assert!(validate_required("name", "Mesa de Reunião").is_ok());
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
///
/// An empty query is valid and disables search.
pub fn validate_search_text(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an amount that must be strictly positive.
pub fn validate_positive_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity (zero allowed).
pub fn validate_quantity(field: &str, quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate: 0% to 100%.
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product before it is accepted.
///
/// ## Rules
/// - name, category and tax required
/// - sell price > 0; cost price, when given, ≥ 0
/// - quantity on hand and minimum quantity ≥ 0
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_required("name", &product.name)?;
    validate_required("category", &product.category)?;
    validate_required("tax", product.tax_id.as_deref().unwrap_or_default())?;
    validate_positive_amount("sell price", product.sell_price)?;

    if let Some(cost) = product.cost_price {
        if cost.is_negative() {
            return Err(ValidationError::MustNotBeNegative {
                field: "cost price".to_string(),
            });
        }
    }

    validate_quantity("quantity", product.quantity_on_hand)?;
    validate_quantity("minimum quantity", product.min_quantity)?;
    Ok(())
}

/// Validates a ledger entry before it is accepted.
///
/// ## Rules
/// - description and category required
/// - amount > 0 (the kind carries the direction)
pub fn validate_ledger_entry(entry: &LedgerEntry) -> ValidationResult<()> {
    validate_required("description", &entry.description)?;
    validate_required("category", &entry.category)?;
    validate_positive_amount("amount", entry.amount)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActiveStatus, EntryKind, EntryStatus};
    use chrono::NaiveDate;

    fn product() -> Product {
        Product {
            id: "1".to_string(),
            name: "Laptop Dell Inspiron".to_string(),
            description: String::new(),
            sell_price: Money::from_cents(1_250_000),
            cost_price: Some(Money::from_cents(980_000)),
            quantity_on_hand: 15,
            min_quantity: 5,
            category: "Eletrônicos".to_string(),
            tax_id: Some("1".to_string()),
            barcode: None,
            supplier: None,
            status: ActiveStatus::Active,
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Cliente").is_ok());
        assert_eq!(
            validate_required("name", ""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_required("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_text() {
        assert_eq!(validate_search_text("  laptop ").unwrap(), "laptop");
        assert_eq!(validate_search_text("").unwrap(), "");
        assert!(validate_search_text(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product()).is_ok());

        let mut free = product();
        free.sell_price = Money::zero();
        assert_eq!(
            validate_product(&free),
            Err(ValidationError::MustBePositive {
                field: "sell price".to_string()
            })
        );

        let mut negative_stock = product();
        negative_stock.quantity_on_hand = -1;
        assert!(validate_product(&negative_stock).is_err());

        let mut no_category = product();
        no_category.category = " ".to_string();
        assert!(validate_product(&no_category).is_err());

        let mut unknown_cost = product();
        unknown_cost.cost_price = None;
        assert!(validate_product(&unknown_cost).is_ok());
    }

    #[test]
    fn test_validate_product_requires_tax() {
        let mut untaxed = product();
        untaxed.tax_id = None;
        assert_eq!(
            validate_product(&untaxed),
            Err(ValidationError::Required {
                field: "tax".to_string()
            })
        );

        untaxed.tax_id = Some("  ".to_string());
        assert!(validate_product(&untaxed).is_err());
    }

    #[test]
    fn test_validate_ledger_entry() {
        let mut entry = LedgerEntry {
            id: "1".to_string(),
            description: "Aluguel".to_string(),
            kind: EntryKind::Outflow,
            amount: Money::from_cents(80_000),
            date: NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            category: "Despesas Fixas".to_string(),
            payment_method: "Débito Direto".to_string(),
            status: EntryStatus::Completed,
            notes: None,
        };
        assert!(validate_ledger_entry(&entry).is_ok());

        entry.category = String::new();
        assert_eq!(
            validate_ledger_entry(&entry),
            Err(ValidationError::Required {
                field: "category".to_string()
            })
        );

        entry.category = "Despesas Fixas".to_string();
        entry.amount = Money::zero();
        assert!(validate_ledger_entry(&entry).is_err());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::from_percent(17)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10_000)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10_001)).is_err());
    }
}
