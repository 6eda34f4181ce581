//! # ledgerdesk-core: Pure Business Logic for LedgerDesk
//!
//! The calculation and query core behind the back-office pages: product
//! pricing, invoice and ledger totals, stock bands, and list filtering.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       LedgerDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Back end REST API (plain JSON records)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │       ledgerdesk-data (coercion, validation, DataSource)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ typed records                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ ledgerdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │ aggregate │  │  filter   │  │ validation│  │   │
//! │  │   │  TaxTable │  │  totals   │  │ criteria  │  │   rules   │  │   │
//! │  │   │  margins  │  │  stock    │  │  search   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO AMBIENT STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record shapes (Product, Invoice, LedgerEntry, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Tax-inclusive prices and profit margins
//! - [`aggregate`] - Totals, counts, stock value and stock bands
//! - [`filter`] - Compound filtering and free-text search
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ledgerdesk_core::aggregate::{stock_status, StockStatus};
//! use ledgerdesk_core::money::Money;
//! use ledgerdesk_core::pricing::price_with_tax;
//! use ledgerdesk_core::types::{Tax, TaxRate};
//!
//! let vat = Tax { id: "1".into(), label: "IVA".into(), rate: TaxRate::from_percent(17) };
//! assert_eq!(price_with_tax(Money::from_cents(10_000), Some(&vat)).cents(), 11_700);
//! assert_eq!(stock_status(5, 5), StockStatus::Critical);
//! ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{LedgerTotals, ProductCatalog, StockStatus};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{filter_records, FilterCriteria, Filterable, SearchField, Selector, StockBandFilter};
pub use money::Money;
pub use pricing::{Percentage, TaxTable};
pub use types::*;
