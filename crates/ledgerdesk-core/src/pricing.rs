//! # Tax & Pricing Calculator
//!
//! Tax-inclusive prices and profit margins for the product catalog.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Product.sell_price ──┬──► TaxTable::find(tax_id) ──► price_with_tax    │
//! │                       │         (missing id = untaxed)                  │
//! │                       │                                                 │
//! │  Product.cost_price ──┴──► profit_percent ──► Percentage (0.1% steps)  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both calculations are total: a missing tax or a zero cost falls back to
//! an identity value instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::money::{div_round_half_even, saturate_i64, Money};
use crate::types::{Product, Tax};

// =============================================================================
// Percentage
// =============================================================================

/// A percentage with one decimal place, stored in tenths of a percent.
///
/// `Percentage::from_tenths(276)` is 27.6%.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Percentage(i64);

impl Percentage {
    #[inline]
    pub const fn from_tenths(tenths: i64) -> Self {
        Percentage(tenths)
    }

    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    #[inline]
    pub const fn tenths(&self) -> i64 {
        self.0
    }

    /// Value as a float, for charts and display only.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{}%", sign, (self.0 / 10).abs(), (self.0 % 10).abs())
    }
}

// =============================================================================
// Calculations
// =============================================================================

/// Returns `base` with `tax` applied, rounded half to even to the cent.
///
/// A missing tax leaves the price untouched. Negative bases are computed
/// arithmetically; rejecting them is the caller's job.
///
/// ```rust
/// use ledgerdesk_core::money::Money;
/// use ledgerdesk_core::pricing::price_with_tax;
/// use ledgerdesk_core::types::{Tax, TaxRate};
///
/// let vat = Tax { id: "1".into(), label: "IVA Padrão".into(), rate: TaxRate::from_percent(17) };
/// assert_eq!(price_with_tax(Money::from_cents(10_000), Some(&vat)).cents(), 11_700);
/// assert_eq!(price_with_tax(Money::from_cents(10_000), None).cents(), 10_000);
/// ```
pub fn price_with_tax(base: Money, tax: Option<&Tax>) -> Money {
    match tax {
        Some(tax) => base + base.calculate_tax(tax.rate),
        None => base,
    }
}

/// Markup of `sell` over `cost`, as a percentage of cost.
///
/// Returns zero when the cost is absent or zero. Rounded half to even to
/// one decimal place; negative when selling at a loss. Saturates at the
/// `i64` bounds of tenths for margins over a near-zero cost.
///
/// ```rust
/// use ledgerdesk_core::money::Money;
/// use ledgerdesk_core::pricing::profit_percent;
///
/// let margin = profit_percent(Money::from_cents(1_250_000), Some(Money::from_cents(980_000)));
/// assert_eq!(margin.tenths(), 276); // 27.6%
/// ```
pub fn profit_percent(sell: Money, cost: Option<Money>) -> Percentage {
    let cost = match cost {
        Some(cost) if !cost.is_zero() => cost.cents() as i128,
        _ => return Percentage::zero(),
    };

    // (sell - cost) / cost × 100, expressed in tenths: × 1000
    let numerator = (sell.cents() as i128 - cost) * 1000;
    let tenths = if cost < 0 {
        div_round_half_even(-numerator, -cost)
    } else {
        div_round_half_even(numerator, cost)
    };
    Percentage::from_tenths(saturate_i64(tenths))
}

// =============================================================================
// Tax Table
// =============================================================================

/// Read-only index of taxes by id.
///
/// Borrows the caller's collection; building one is cheap and it can be
/// rebuilt on every call.
#[derive(Debug, Clone, Default)]
pub struct TaxTable<'a> {
    by_id: HashMap<&'a str, &'a Tax>,
}

impl<'a> TaxTable<'a> {
    pub fn new(taxes: &'a [Tax]) -> Self {
        TaxTable {
            by_id: taxes.iter().map(|t| (t.id.as_str(), t)).collect(),
        }
    }

    /// Looks up a tax. Unknown ids return `None`.
    pub fn find(&self, id: &str) -> Option<&'a Tax> {
        self.by_id.get(id).copied()
    }

    /// The product's sell price with its tax applied.
    ///
    /// A product without a tax id, or whose tax id is unknown, is priced
    /// untaxed.
    pub fn price_with_tax_for(&self, product: &Product) -> Money {
        let tax = product.tax_id.as_deref().and_then(|id| self.find(id));
        price_with_tax(product.sell_price, tax)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActiveStatus, TaxRate};

    fn taxes() -> Vec<Tax> {
        vec![
            Tax {
                id: "1".to_string(),
                label: "IVA Padrão".to_string(),
                rate: TaxRate::from_percent(17),
            },
            Tax {
                id: "2".to_string(),
                label: "IVA Reduzido".to_string(),
                rate: TaxRate::from_percent(7),
            },
            Tax {
                id: "3".to_string(),
                label: "Isento".to_string(),
                rate: TaxRate::zero(),
            },
        ]
    }

    fn product(sell: i64, tax_id: Option<&str>) -> Product {
        Product {
            id: "p".to_string(),
            name: "Cadeira de Escritório".to_string(),
            description: String::new(),
            sell_price: Money::from_cents(sell),
            cost_price: None,
            quantity_on_hand: 0,
            min_quantity: 1,
            category: "Mobília".to_string(),
            tax_id: tax_id.map(str::to_string),
            barcode: None,
            supplier: None,
            status: ActiveStatus::Active,
        }
    }

    #[test]
    fn test_price_with_tax_example() {
        let taxes = taxes();
        let price = price_with_tax(Money::from_cents(10_000), Some(&taxes[0]));
        assert_eq!(price.cents(), 11_700);
    }

    #[test]
    fn test_price_with_zero_rate_is_identity() {
        let taxes = taxes();
        for cents in [0, 1, 99, 12_345, 1_250_000, -500] {
            let base = Money::from_cents(cents);
            assert_eq!(price_with_tax(base, Some(&taxes[2])), base);
        }
    }

    #[test]
    fn test_price_with_missing_tax_is_identity() {
        let base = Money::from_cents(4_500_00);
        assert_eq!(price_with_tax(base, None), base);
    }

    #[test]
    fn test_price_with_tax_negative_base() {
        let taxes = taxes();
        let price = price_with_tax(Money::from_cents(-10_000), Some(&taxes[0]));
        assert_eq!(price.cents(), -11_700);
    }

    #[test]
    fn test_price_with_tax_rounds_half_even() {
        let half_cent = Tax {
            id: "h".to_string(),
            label: "Half".to_string(),
            rate: TaxRate::from_bps(50), // 0.5%
        };
        // 1.00 × 0.5% = 0.005 → 0.00 (even), total 1.00
        assert_eq!(
            price_with_tax(Money::from_cents(100), Some(&half_cent)).cents(),
            100
        );
        // 3.00 × 0.5% = 0.015 → 0.02 (even), total 3.02
        assert_eq!(
            price_with_tax(Money::from_cents(300), Some(&half_cent)).cents(),
            302
        );
    }

    #[test]
    fn test_profit_percent() {
        let margin = profit_percent(Money::from_cents(890_000), Some(Money::from_cents(720_000)));
        // 1700 / 7200 = 23.611% → 23.6
        assert_eq!(margin.tenths(), 236);

        let margin = profit_percent(Money::from_cents(80_000), Some(Money::from_cents(60_000)));
        assert_eq!(margin.tenths(), 333);
        assert_eq!(margin.to_string(), "33.3%");
    }

    #[test]
    fn test_profit_percent_zero_or_missing_cost() {
        assert_eq!(
            profit_percent(Money::from_cents(1000), Some(Money::zero())),
            Percentage::zero()
        );
        assert_eq!(profit_percent(Money::from_cents(1000), None), Percentage::zero());
    }

    #[test]
    fn test_profit_percent_loss() {
        let margin = profit_percent(Money::from_cents(500), Some(Money::from_cents(1000)));
        assert_eq!(margin.tenths(), -500);
        assert_eq!(margin.to_string(), "-50.0%");
        assert!((margin.as_f64() + 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_profit_percent_rounds_half_even() {
        // 1.0005 markup: (10005 - 10000) / 10000 = 0.05% → 0.0% (even)
        let margin = profit_percent(Money::from_cents(10_005), Some(Money::from_cents(10_000)));
        assert_eq!(margin.tenths(), 0);
        // 0.15% → 0.2% (even)
        let margin = profit_percent(Money::from_cents(10_015), Some(Money::from_cents(10_000)));
        assert_eq!(margin.tenths(), 2);
    }

    #[test]
    fn test_profit_percent_saturates() {
        let margin = profit_percent(Money::from_cents(i64::MAX / 2), Some(Money::from_cents(1)));
        assert_eq!(margin.tenths(), i64::MAX);

        let margin = profit_percent(Money::from_cents(i64::MIN / 2), Some(Money::from_cents(1)));
        assert_eq!(margin.tenths(), i64::MIN);
    }

    #[test]
    fn test_price_with_tax_saturates() {
        let taxes = taxes();
        let max = Money::from_cents(i64::MAX);
        assert_eq!(price_with_tax(max, Some(&taxes[0])), max);

        let min = Money::from_cents(i64::MIN);
        assert_eq!(price_with_tax(min, Some(&taxes[0])), min);
    }

    #[test]
    fn test_tax_table_lookup() {
        let taxes = taxes();
        let table = TaxTable::new(&taxes);

        assert_eq!(table.len(), 3);
        assert_eq!(table.find("2").map(|t| t.label.as_str()), Some("IVA Reduzido"));
        assert!(table.find("99").is_none());
    }

    #[test]
    fn test_tax_table_prices_products() {
        let taxes = taxes();
        let table = TaxTable::new(&taxes);

        assert_eq!(table.price_with_tax_for(&product(120_000, Some("2"))).cents(), 128_400);
        assert_eq!(table.price_with_tax_for(&product(120_000, Some("99"))).cents(), 120_000);
        assert_eq!(table.price_with_tax_for(&product(120_000, None)).cents(), 120_000);
    }

    #[test]
    fn test_empty_tax_table() {
        let table = TaxTable::new(&[]);
        assert!(table.is_empty());
        assert_eq!(table.price_with_tax_for(&product(100, Some("1"))).cents(), 100);
    }
}
