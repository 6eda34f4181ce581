//! # Domain Types
//!
//! Record shapes used throughout LedgerDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Invoice     │   │   LedgerEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  sell_price     │   │  client_id (FK) │   │  kind           │       │
//! │  │  cost_price     │   │  items[]        │   │  amount         │       │
//! │  │  quantity       │   │  value?         │   │  date           │       │
//! │  │  tax_id (FK)    │   │  status         │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Tax        │   │     Client      │   │   Accountant    │       │
//! │  │  rate (bps)     │   │  name, email    │   │  name, status   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are plain data. They are fetched as whole collections by the
//! caller and never mutated by the core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Company Scope
// =============================================================================

/// Identifier of the company whose records are being worked on.
///
/// Every data-source call takes one explicitly; nothing reads an
/// "active company" from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyId(String);

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        CompanyId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1700 bps = 17% (standard VAT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole percentage.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        TaxRate(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax
// =============================================================================

/// A tax definition. Immutable reference data, looked up by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    pub id: String,
    /// Display label ("IVA Padrão", "Isento", ...).
    pub label: String,
    pub rate: TaxRate,
}

// =============================================================================
// Active / Inactive
// =============================================================================

/// Whether a product or accountant is in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
}

impl ActiveStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActiveStatus::Active => "active",
            ActiveStatus::Inactive => "inactive",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

fn default_min_quantity() -> i64 {
    1
}

/// A product in the company catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    /// Sell price before tax.
    pub sell_price: Money,

    /// Purchase cost. Absent means unknown and counts as zero.
    #[serde(default)]
    pub cost_price: Option<Money>,

    #[serde(default)]
    pub quantity_on_hand: i64,

    /// Reorder threshold used by the stock bands.
    #[serde(default = "default_min_quantity")]
    pub min_quantity: i64,

    #[serde(default)]
    pub category: String,

    /// Reference to a [`Tax`] by id.
    #[serde(default)]
    pub tax_id: Option<String>,

    #[serde(default)]
    pub barcode: Option<String>,

    #[serde(default)]
    pub supplier: Option<String>,

    #[serde(default)]
    pub status: ActiveStatus,
}

impl Product {
    /// Cost price, with an unknown cost read as zero.
    #[inline]
    pub fn cost_or_zero(&self) -> Money {
        self.cost_price.unwrap_or_default()
    }

    /// Checks if at least one unit is on hand.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity_on_hand > 0
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// The status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Cancelled,
}

impl InvoiceStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// A line on an invoice. Priced from the product catalog when the invoice
/// carries no precomputed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub product_id: String,
    pub quantity: i64,
}

/// An invoice issued to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub client_id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    /// Precomputed total. Takes precedence over the item total when present.
    #[serde(default)]
    pub value: Option<Money>,
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Inflow,
    Outflow,
}

impl EntryKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Inflow => "inflow",
            EntryKind::Outflow => "outflow",
        }
    }
}

/// Settlement state of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Completed,
    Pending,
    Cancelled,
}

impl EntryStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Completed => "completed",
            EntryStatus::Pending => "pending",
            EntryStatus::Cancelled => "cancelled",
        }
    }
}

/// A single financial inflow or outflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub description: String,
    pub kind: EntryKind,
    #[serde(default)]
    pub amount: Money,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub payment_method: String,
    pub status: EntryStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// People
// =============================================================================

/// A client invoices are issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// An accountant attached to the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Accountant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Taxpayer number (NUIT/NIF).
    #[serde(default)]
    pub tax_number: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub status: ActiveStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================
