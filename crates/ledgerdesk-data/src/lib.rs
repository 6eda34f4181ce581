//! # ledgerdesk-data: Boundary Layer for LedgerDesk
//!
//! Turns the back end's loosely typed JSON into ledgerdesk-core records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LedgerDesk Data Flow                             │
//! │                                                                         │
//! │  produtos.json, faturas.json, lancamentos.json, ...                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  ledgerdesk-data (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     wire      │    │    coerce     │    │    source    │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ WireProduct   │───►│ "12500.00"    │───►│ DataSource   │  │   │
//! │  │   │ WireInvoice   │    │  → 1250000    │    │ JsonDirSource│  │   │
//! │  │   │ ...           │    │ "Paga" → Paid │    │ Snapshot     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledgerdesk-core (typed, validated records)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledgerdesk_core::CompanyId;
//! use ledgerdesk_data::{CompanySnapshot, JsonDirSource};
//!
//! let source = JsonDirSource::new("./data");
//! let snapshot = CompanySnapshot::load(&source, &CompanyId::new("42"))?;
//! println!("{} products", snapshot.products.len());
//! # Ok::<(), ledgerdesk_data::DataError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coerce;
pub mod error;
pub mod source;
pub mod wire;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DataError, DataResult};
pub use source::{decode_collection, CompanySnapshot, DataSource, JsonDirSource, ValidationMode};
