//! # Aggregation Engine
//!
//! Reducers that turn record collections into the figures shown on the
//! products, invoices, ledger and dashboard pages.
//!
//! ## Reducers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  &[Invoice]     ──► total_value, count_by_status, InvoiceSummary        │
//! │  &[LedgerEntry] ──► ledger_totals { inflow, outflow, balance }          │
//! │  &[Product]     ──► stock_value, ProductSummary, categories             │
//! │  (qty, min)     ──► stock_status: Depleted | Critical | Low | Available │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every reducer is order-independent, never fails, and yields zero for an
//! empty collection. Missing amounts count as zero.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Client, EntryKind, Invoice, InvoiceStatus, LedgerEntry, Product};

// =============================================================================
// Stock Status
// =============================================================================

/// Inventory sufficiency of a product relative to its minimum quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Nothing on hand.
    Depleted,
    /// At or below the minimum.
    Critical,
    /// Above the minimum, at or below twice the minimum.
    Low,
    Available,
}

/// Classifies stock on hand against the minimum quantity.
///
/// ## Bands
/// ```text
///   q ≤ 0             Depleted
///   0 < q ≤ min       Critical
///   min < q ≤ 2×min   Low
///   q > 2×min         Available
/// ```
/// Each boundary belongs to the lower band: exactly `min` is Critical.
pub fn stock_status(quantity_on_hand: i64, min_quantity: i64) -> StockStatus {
    if quantity_on_hand <= 0 {
        StockStatus::Depleted
    } else if quantity_on_hand <= min_quantity {
        StockStatus::Critical
    } else if quantity_on_hand <= min_quantity.saturating_mul(2) {
        StockStatus::Low
    } else {
        StockStatus::Available
    }
}

// =============================================================================
// Product Catalog
// =============================================================================

/// Read-only index of products by id, used to price invoice items.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog<'a> {
    by_id: HashMap<&'a str, &'a Product>,
}

impl<'a> ProductCatalog<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        ProductCatalog {
            by_id: products.iter().map(|p| (p.id.as_str(), p)).collect(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&'a Product> {
        self.by_id.get(id).copied()
    }

    /// Like [`find`](Self::find) but reports the missing id.
    ///
    /// For callers that want to flag dangling references; totals never
    /// use it.
    pub fn require(&self, id: &str) -> CoreResult<&'a Product> {
        self.find(id).ok_or_else(|| CoreError::NotFound {
            entity: "Product".to_string(),
            id: id.to_string(),
        })
    }

    /// Sell price of a product, zero when the product is unknown.
    pub fn sell_price(&self, id: &str) -> Money {
        self.find(id).map(|p| p.sell_price).unwrap_or_default()
    }
}

// =============================================================================
// Invoice Reducers
// =============================================================================

/// Total of a single invoice.
///
/// The precomputed `value` wins when present; otherwise each item is
/// priced at the product's current sell price.
pub fn invoice_total(invoice: &Invoice, catalog: &ProductCatalog<'_>) -> Money {
    match invoice.value {
        Some(value) => value,
        None => invoice
            .items
            .iter()
            .map(|item| catalog.sell_price(&item.product_id) * item.quantity)
            .sum(),
    }
}

/// Sum of every invoice's total.
pub fn total_value(invoices: &[Invoice], catalog: &ProductCatalog<'_>) -> Money {
    invoices.iter().map(|inv| invoice_total(inv, catalog)).sum()
}

/// Number of invoices in the given status.
pub fn count_by_status(invoices: &[Invoice], status: InvoiceStatus) -> usize {
    invoices.iter().filter(|inv| inv.status == status).count()
}

/// Invoice page header figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub cancelled: usize,
    pub total_value: Money,
}

impl InvoiceSummary {
    pub fn from_invoices(invoices: &[Invoice], catalog: &ProductCatalog<'_>) -> Self {
        InvoiceSummary {
            total: invoices.len(),
            paid: count_by_status(invoices, InvoiceStatus::Paid),
            pending: count_by_status(invoices, InvoiceStatus::Pending),
            cancelled: count_by_status(invoices, InvoiceStatus::Cancelled),
            total_value: total_value(invoices, catalog),
        }
    }
}

// =============================================================================
// Ledger Reducers
// =============================================================================

/// Inflow and outflow totals of a set of ledger entries.
///
/// `balance` is always `inflow - outflow`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub inflow: Money,
    pub outflow: Money,
    pub balance: Money,
}

pub fn ledger_totals(entries: &[LedgerEntry]) -> LedgerTotals {
    let (inflow, outflow) = entries.iter().fold(
        (Money::zero(), Money::zero()),
        |(inflow, outflow), entry| match entry.kind {
            EntryKind::Inflow => (inflow + entry.amount, outflow),
            EntryKind::Outflow => (inflow, outflow + entry.amount),
        },
    );

    LedgerTotals {
        inflow,
        outflow,
        balance: inflow - outflow,
    }
}

// =============================================================================
// Product Reducers
// =============================================================================

/// Inventory value at cost: `Σ cost_price × quantity_on_hand`.
///
/// Saturates instead of overflowing, like every `Money` operation.
pub fn stock_value(products: &[Product]) -> Money {
    products
        .iter()
        .map(|p| p.cost_or_zero() * p.quantity_on_hand)
        .sum()
}

/// Products page header figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub total: usize,
    /// At least one unit on hand.
    pub in_stock: usize,
    /// On hand but at or below twice the minimum (Critical or Low).
    pub low_stock: usize,
    pub stock_value: Money,
}

impl ProductSummary {
    pub fn from_products(products: &[Product]) -> Self {
        let low_stock = products
            .iter()
            .filter(|p| {
                matches!(
                    stock_status(p.quantity_on_hand, p.min_quantity),
                    StockStatus::Critical | StockStatus::Low
                )
            })
            .count();

        ProductSummary {
            total: products.len(),
            in_stock: products.iter().filter(|p| p.in_stock()).count(),
            low_stock,
            stock_value: stock_value(products),
        }
    }
}

/// Distinct product categories, in the order they first appear.
///
/// Blank categories are skipped.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| !c.trim().is_empty())
        .filter(|c| seen.insert(*c))
        .collect()
}

// =============================================================================
// Lookups
// =============================================================================

/// Name of the client with the given id, if it exists.
pub fn client_name<'a>(clients: &'a [Client], id: &str) -> Option<&'a str> {
    clients
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
}

// =============================================================================
// Unit Tests
// =============================================================================
