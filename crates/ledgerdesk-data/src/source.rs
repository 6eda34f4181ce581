//! # Data Sources
//!
//! Where company records come from.
//!
//! ## Loading Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Collection, One Company                          │
//! │                                                                         │
//! │  <root>/<company>/produtos.json                                        │
//! │       │  missing file ──► empty collection                             │
//! │       ▼                                                                 │
//! │  Vec<serde_json::Value>    (not an array ──► error)                    │
//! │       │  wrong JSON shape ──► Strict: error                            │
//! │       ▼                       Lenient: warn, skip record               │
//! │  WireProduct, one by one   (serde_json::from_value)                     │
//! │       │  bad number / label / date ──► Strict: error                   │
//! │       ▼                                Lenient: warn, skip record      │
//! │  Vec<Product>              (TryFrom)                                    │
//! │       │  rule violation ──► Strict: DataError::Invalid                 │
//! │       ▼                     Lenient: warn, keep record                 │
//! │  Vec<Product>              (validate_product)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call takes the company explicitly. Sources hold no notion of a
//! "current" company.

use std::path::{Path, PathBuf};

use ledgerdesk_core::types::{
    Accountant, Client, CompanyId, Invoice, LedgerEntry, Product, Tax,
};
use ledgerdesk_core::validation::{
    validate_ledger_entry, validate_product, validate_tax_rate, ValidationResult,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{DataError, DataResult};
use crate::wire::{
    WireAccountant, WireClient, WireInvoice, WireLedgerEntry, WireProduct, WireTax,
};

// =============================================================================
// Validation Mode
// =============================================================================

/// How records that fail to convert or validate are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// The first bad record fails the whole collection.
    Strict,
    /// Malformed records are skipped and rule violations are kept, both
    /// with a warning.
    #[default]
    Lenient,
}

// =============================================================================
// DataSource Trait
// =============================================================================

/// Supplies whole collections of records for one company.
pub trait DataSource {
    fn products(&self, company: &CompanyId) -> DataResult<Vec<Product>>;
    fn taxes(&self, company: &CompanyId) -> DataResult<Vec<Tax>>;
    fn invoices(&self, company: &CompanyId) -> DataResult<Vec<Invoice>>;
    fn ledger_entries(&self, company: &CompanyId) -> DataResult<Vec<LedgerEntry>>;
    fn clients(&self, company: &CompanyId) -> DataResult<Vec<Client>>;
    fn accountants(&self, company: &CompanyId) -> DataResult<Vec<Accountant>>;
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes a JSON array of wire records into core records.
///
/// The outer array must parse. Each element is then decoded on its own, so
/// in lenient mode a record of the wrong shape (`"nome": 5`) is skipped
/// without losing its neighbours.
///
/// `check` runs the business rules for the record type; pass `|_| Ok(())`
/// when there are none.
pub fn decode_collection<W, T>(
    entity: &'static str,
    json: &[u8],
    mode: ValidationMode,
    check: impl Fn(&T) -> ValidationResult<()>,
) -> DataResult<Vec<T>>
where
    W: DeserializeOwned,
    T: TryFrom<W, Error = DataError> + RecordId,
{
    let elements: Vec<serde_json::Value> = serde_json::from_slice(json)?;
    let mut records = Vec::with_capacity(elements.len());

    for (index, element) in elements.into_iter().enumerate() {
        let raw = match serde_json::from_value::<W>(element) {
            Ok(raw) => raw,
            Err(e) if mode == ValidationMode::Lenient => {
                warn!(entity, index, error = %e, "Skipping record of the wrong shape");
                continue;
            }
            Err(e) => return Err(DataError::Decode(e)),
        };

        let record = match T::try_from(raw) {
            Ok(record) => record,
            Err(e) if mode == ValidationMode::Lenient => {
                warn!(entity, index, error = %e, "Skipping malformed record");
                continue;
            }
            Err(e) => return Err(e),
        };

        if let Err(source) = check(&record) {
            if mode == ValidationMode::Strict {
                return Err(DataError::Invalid {
                    entity,
                    id: record.record_id().to_string(),
                    source,
                });
            }
            warn!(entity, id = record.record_id(), error = %source, "Record breaks a business rule");
        }

        records.push(record);
    }

    Ok(records)
}

/// Records that carry an id, for error and log context.
pub trait RecordId {
    fn record_id(&self) -> &str;
}

macro_rules! impl_record_id {
    ($($ty:ty),* $(,)?) => {
        $(impl RecordId for $ty {
            fn record_id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_record_id!(Product, Tax, Invoice, LedgerEntry, Client, Accountant);

fn no_rules<T>(_: &T) -> ValidationResult<()> {
    Ok(())
}

// =============================================================================
// JSON Directory Source
// =============================================================================

/// Reads `<root>/<company>/<collection>.json` files.
///
/// ## Layout
/// ```text
/// data/
/// └── 42/
///     ├── produtos.json
///     ├── impostos.json
///     ├── faturas.json
///     ├── lancamentos.json
///     ├── clientes.json
///     └── contabilistas.json
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
    mode: ValidationMode,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonDirSource {
            root: root.into(),
            mode: ValidationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one company's collections.
    ///
    /// The id is used as a single path component, so anything that could
    /// escape the root is rejected.
    pub fn company_dir(&self, company: &CompanyId) -> DataResult<PathBuf> {
        let id = company.as_str();
        let unsafe_id = id.trim().is_empty()
            || id == "."
            || id.contains("..")
            || id.contains(['/', '\\', '\0']);

        if unsafe_id {
            return Err(DataError::InvalidCompany(id.to_string()));
        }

        Ok(self.root.join(id))
    }

    fn load<W, T>(
        &self,
        company: &CompanyId,
        collection: &'static str,
        check: impl Fn(&T) -> ValidationResult<()>,
    ) -> DataResult<Vec<T>>
    where
        W: DeserializeOwned,
        T: TryFrom<W, Error = DataError> + RecordId,
    {
        let path = self.company_dir(company)?.join(format!("{collection}.json"));

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(company = %company, collection, path = %path.display(), "Collection file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(DataError::Io { path, source }),
        };

        let records = decode_collection::<W, T>(collection, &bytes, self.mode, check).map_err(
            |e| match e {
                DataError::Decode(source) => DataError::Json {
                    path: path.clone(),
                    source,
                },
                other => other,
            },
        )?;

        debug!(company = %company, collection, count = records.len(), "Loaded collection");
        Ok(records)
    }
}

impl DataSource for JsonDirSource {
    fn products(&self, company: &CompanyId) -> DataResult<Vec<Product>> {
        self.load::<WireProduct, _>(company, "produtos", validate_product)
    }

    fn taxes(&self, company: &CompanyId) -> DataResult<Vec<Tax>> {
        self.load::<WireTax, _>(company, "impostos", |tax: &Tax| validate_tax_rate(tax.rate))
    }

    fn invoices(&self, company: &CompanyId) -> DataResult<Vec<Invoice>> {
        self.load::<WireInvoice, _>(company, "faturas", no_rules)
    }

    fn ledger_entries(&self, company: &CompanyId) -> DataResult<Vec<LedgerEntry>> {
        self.load::<WireLedgerEntry, _>(company, "lancamentos", validate_ledger_entry)
    }

    fn clients(&self, company: &CompanyId) -> DataResult<Vec<Client>> {
        self.load::<WireClient, _>(company, "clientes", no_rules)
    }

    fn accountants(&self, company: &CompanyId) -> DataResult<Vec<Accountant>> {
        self.load::<WireAccountant, _>(company, "contabilistas", no_rules)
    }
}

// =============================================================================
// Company Snapshot
// =============================================================================

/// Every collection of one company, loaded together.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanySnapshot {
    pub company: CompanyId,
    pub products: Vec<Product>,
    pub taxes: Vec<Tax>,
    pub invoices: Vec<Invoice>,
    pub ledger_entries: Vec<LedgerEntry>,
    pub clients: Vec<Client>,
    pub accountants: Vec<Accountant>,
}

impl CompanySnapshot {
    pub fn load<S: DataSource + ?Sized>(source: &S, company: &CompanyId) -> DataResult<Self> {
        let snapshot = CompanySnapshot {
            company: company.clone(),
            products: source.products(company)?,
            taxes: source.taxes(company)?,
            invoices: source.invoices(company)?,
            ledger_entries: source.ledger_entries(company)?,
            clients: source.clients(company)?,
            accountants: source.accountants(company)?,
        };

        info!(
            company = %company,
            products = snapshot.products.len(),
            taxes = snapshot.taxes.len(),
            invoices = snapshot.invoices.len(),
            ledger_entries = snapshot.ledger_entries.len(),
            clients = snapshot.clients.len(),
            accountants = snapshot.accountants.len(),
            "Company snapshot loaded"
        );

        Ok(snapshot)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
