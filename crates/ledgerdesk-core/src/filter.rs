//! # Filter & Search Engine
//!
//! Compound, order-preserving filtering over record collections.
//!
//! ## How a Record is Tested
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FilterCriteria                        record: impl Filterable          │
//! │                                                                         │
//! │  status      "all" | exact label  ──►  status_label()    ─┐            │
//! │  kind        "all" | exact label  ──►  kind_label()       │            │
//! │  category    "all" | exact value  ──►  category()         ├─ AND ──►   │
//! │  date_equals none  | ISO date     ──►  date()             │   keep?    │
//! │  stock_band  all | low | critical ──►  stock()            │            │
//! │  search_text ""    | substring    ──►  text(field) OR ... ┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A disabled criterion always passes. An enabled criterion on a field the
//! record does not have never passes. The result borrows the input
//! elements in their original order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregate::{stock_status, StockStatus};
use crate::types::{Accountant, Client, Invoice, LedgerEntry, Product};

// =============================================================================
// Selector
// =============================================================================

/// An exact-match criterion that can be switched off.
///
/// Parsed from the value of a select box: `"all"` (or the legacy
/// `"todos"`, or an empty string) disables it, anything else must match
/// exactly, case included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" | "todos" => Selector::All,
            other => Selector::Only(other.to_string()),
        }
    }

    pub fn only(value: impl Into<String>) -> Self {
        Selector::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    /// Tests a record's field value. A missing value only passes `All`.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Selector::parse(&value)
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Selector::parse(value)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::All => "all".to_string(),
            Selector::Only(value) => value,
        }
    }
}

// =============================================================================
// Stock Band Filter
// =============================================================================

/// Restricts products to a stock band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockBandFilter {
    #[default]
    All,
    /// At or below twice the minimum (includes Critical and Depleted).
    Low,
    /// At or below the minimum (includes Depleted).
    Critical,
}

impl StockBandFilter {
    pub fn matches(&self, stock: Option<(i64, i64)>) -> bool {
        let (quantity, min) = match (self, stock) {
            (StockBandFilter::All, _) => return true,
            (_, None) => return false,
            (_, Some(stock)) => stock,
        };

        let band = stock_status(quantity, min);
        match self {
            StockBandFilter::All => true,
            StockBandFilter::Low => band != StockStatus::Available,
            StockBandFilter::Critical => {
                matches!(band, StockStatus::Depleted | StockStatus::Critical)
            }
        }
    }
}

// =============================================================================
// Searchable Fields
// =============================================================================

/// Text fields free-text search can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Name,
    Description,
    Number,
    Barcode,
    Supplier,
    Category,
    Notes,
    PaymentMethod,
    Email,
    Phone,
    TaxNumber,
    Specialty,
}

// =============================================================================
// Filterable
// =============================================================================

/// Read access to the fields the filter engine understands.
///
/// Defaults return `None`: a record type without, say, a date never
/// matches an enabled date criterion.
pub trait Filterable {
    /// Fields searched when the criteria name none.
    const DEFAULT_SEARCH_FIELDS: &'static [SearchField];

    fn status_label(&self) -> Option<&str> {
        None
    }

    fn kind_label(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// `(quantity_on_hand, min_quantity)` for stocked records.
    fn stock(&self) -> Option<(i64, i64)> {
        None
    }

    fn text(&self, field: SearchField) -> Option<&str>;
}

impl Filterable for Product {
    const DEFAULT_SEARCH_FIELDS: &'static [SearchField] = &[
        SearchField::Name,
        SearchField::Description,
        SearchField::Barcode,
        SearchField::Supplier,
    ];

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn stock(&self) -> Option<(i64, i64)> {
        Some((self.quantity_on_hand, self.min_quantity))
    }

    fn text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Name => Some(&self.name),
            SearchField::Description => Some(&self.description),
            SearchField::Barcode => self.barcode.as_deref(),
            SearchField::Supplier => self.supplier.as_deref(),
            SearchField::Category => Some(&self.category),
            _ => None,
        }
    }
}

impl Filterable for Invoice {
    const DEFAULT_SEARCH_FIELDS: &'static [SearchField] = &[SearchField::Number];

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Number => Some(&self.number),
            _ => None,
        }
    }
}

impl Filterable for LedgerEntry {
    const DEFAULT_SEARCH_FIELDS: &'static [SearchField] = &[
        SearchField::Description,
        SearchField::Category,
        SearchField::Notes,
    ];

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn kind_label(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Description => Some(&self.description),
            SearchField::Category => Some(&self.category),
            SearchField::Notes => self.notes.as_deref(),
            SearchField::PaymentMethod => Some(&self.payment_method),
            _ => None,
        }
    }
}

impl Filterable for Client {
    const DEFAULT_SEARCH_FIELDS: &'static [SearchField] =
        &[SearchField::Name, SearchField::Email];

    fn text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Name => Some(&self.name),
            SearchField::Email => Some(&self.email),
            SearchField::Phone => Some(&self.phone),
            _ => None,
        }
    }
}

impl Filterable for Accountant {
    const DEFAULT_SEARCH_FIELDS: &'static [SearchField] =
        &[SearchField::Name, SearchField::Email];

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Name => Some(&self.name),
            SearchField::Email => Some(&self.email),
            SearchField::Phone => Some(&self.phone),
            SearchField::TaxNumber => Some(&self.tax_number),
            SearchField::Specialty => Some(&self.specialty),
            _ => None,
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// The set of criteria a list page applies. All enabled criteria are
/// AND-combined.
///
/// `status` and `kind` compare against the canonical lowercase labels
/// returned by the record's `as_str`:
///
/// | Record | `status` | `kind` |
/// |---|---|---|
/// | `Invoice` | `paid`, `pending`, `cancelled` | |
/// | `LedgerEntry` | `completed`, `pending`, `cancelled` | `inflow`, `outflow` |
/// | `Product`, `Accountant` | `active`, `inactive` | |
///
/// Any other spelling (`"Paid"`, `"Paga"`) matches nothing. Callers holding
/// display or back-end labels normalize them first (the data crate's
/// `coerce` label parsers do this).
///
/// ```rust
/// use ledgerdesk_core::filter::{FilterCriteria, StockBandFilter};
///
/// let criteria = FilterCriteria::new()
///     .with_category("Mobília")
///     .with_stock_band(StockBandFilter::Low)
///     .with_search("mesa");
/// assert!(!criteria.is_empty());
/// assert!(FilterCriteria::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    #[ts(as = "String")]
    pub status: Selector,
    #[ts(as = "String")]
    pub kind: Selector,
    #[ts(as = "String")]
    pub category: Selector,
    #[ts(as = "Option<String>")]
    pub date_equals: Option<NaiveDate>,
    pub stock_band: StockBandFilter,
    pub search_text: String,
    /// Fields to search, in order. Empty means the record type's defaults.
    pub search_fields: Vec<SearchField>,
}

impl FilterCriteria {
    /// Criteria that match everything.
    pub fn new() -> Self {
        FilterCriteria::default()
    }

    pub fn with_status(mut self, status: impl Into<Selector>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<Selector>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<Selector>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date_equals = Some(date);
        self
    }

    pub fn with_stock_band(mut self, band: StockBandFilter) -> Self {
        self.stock_band = band;
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_search_fields(mut self, fields: impl Into<Vec<SearchField>>) -> Self {
        self.search_fields = fields.into();
        self
    }

    /// True when no criterion is enabled.
    pub fn is_empty(&self) -> bool {
        self.status.is_all()
            && self.kind.is_all()
            && self.category.is_all()
            && self.date_equals.is_none()
            && self.stock_band == StockBandFilter::All
            && self.search_text.trim().is_empty()
    }

    /// Tests one record against every enabled criterion.
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.status.matches(record.status_label())
            && self.kind.matches(record.kind_label())
            && self.category.matches(record.category())
            && self.matches_date(record)
            && self.stock_band.matches(record.stock())
            && self.matches_search(record)
    }

    fn matches_date<T: Filterable>(&self, record: &T) -> bool {
        match self.date_equals {
            Some(wanted) => record.date() == Some(wanted),
            None => true,
        }
    }

    fn matches_search<T: Filterable>(&self, record: &T) -> bool {
        let needle = self.search_text.trim();
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();

        let fields: &[SearchField] = if self.search_fields.is_empty() {
            T::DEFAULT_SEARCH_FIELDS
        } else {
            &self.search_fields
        };

        fields
            .iter()
            .filter_map(|field| record.text(*field))
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// Returns the records matching `criteria`, in input order.
///
/// The result borrows the original elements; nothing is cloned or cached.
pub fn filter_records<'a, T: Filterable>(records: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    records.iter().filter(|r| criteria.matches(*r)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
