//! # Report Assembly
//!
//! Turns a company snapshot into the figures and lists the back-office
//! pages show.
//!
//! ## Sections
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products   ProductSummary + categories + priced, filtered listing     │
//! │  invoices   InvoiceSummary + filtered listing with client names        │
//! │  ledger     LedgerTotals   + filtered listing                          │
//! │  people     clients and accountants, filtered by search                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Summaries always cover every record. Filters only narrow the listings.
//! Summary amounts are raw minor units; listing amounts are formatted.

use ledgerdesk_core::aggregate::{
    categories, client_name, invoice_total, ledger_totals, stock_status, InvoiceSummary,
    LedgerTotals, ProductCatalog, ProductSummary, StockStatus,
};
use ledgerdesk_core::filter::{filter_records, FilterCriteria, Selector};
use ledgerdesk_core::pricing::{profit_percent, TaxTable};
use ledgerdesk_core::types::{Accountant, Client, EntryKind, EntryStatus, InvoiceStatus};
use ledgerdesk_core::validation::validate_search_text;
use ledgerdesk_data::coerce;
use ledgerdesk_data::CompanySnapshot;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ConfigError, ReportConfig};
use crate::error::ReportResult;
use crate::format::CurrencyFormat;

// =============================================================================
// Filters
// =============================================================================

/// Listing filters taken from the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub search: String,
    pub category: Selector,
    pub invoice_status: Selector,
}

impl ReportFilters {
    pub fn from_config(config: &ReportConfig) -> ReportResult<Self> {
        let search = match &config.search {
            Some(text) => validate_search_text(text)?,
            None => String::new(),
        };

        let category = config
            .category
            .as_deref()
            .map(Selector::parse)
            .unwrap_or_default();

        // Portuguese or English labels, normalized to the core's
        let invoice_status = match config.status.as_deref().map(Selector::parse) {
            Some(Selector::Only(label)) => {
                let status = coerce::invoice_status("LEDGERDESK_STATUS", &label)
                    .map_err(|_| ConfigError::InvalidValue("LEDGERDESK_STATUS".to_string()))?;
                Selector::only(status.as_str())
            }
            _ => Selector::All,
        };

        Ok(ReportFilters {
            search,
            category,
            invoice_status,
        })
    }

    fn products(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_category(self.category.clone())
            .with_search(self.search.clone())
    }

    fn invoices(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_status(self.invoice_status.clone())
            .with_search(self.search.clone())
    }

    fn ledger(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_category(self.category.clone())
            .with_search(self.search.clone())
    }

    fn people(&self) -> FilterCriteria {
        FilterCriteria::new().with_search(self.search.clone())
    }
}

// =============================================================================
// Report Shape
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub company: String,
    pub currency: String,
    pub products: ProductSection,
    pub invoices: InvoiceSection,
    pub ledger: LedgerSection,
    pub people: PeopleSection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSection {
    pub summary: ProductSummary,
    pub stock_value: String,
    pub categories: Vec<String>,
    pub listed: Vec<ProductLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub id: String,
    pub name: String,
    pub category: String,
    pub sell_price: String,
    pub price_with_tax: String,
    pub margin: String,
    pub quantity_on_hand: i64,
    pub stock: StockStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSection {
    pub summary: InvoiceSummary,
    pub total_value: String,
    pub listed: Vec<InvoiceLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub id: String,
    pub number: String,
    pub client: Option<String>,
    pub date: String,
    pub status: InvoiceStatus,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSection {
    pub totals: LedgerTotals,
    pub balance: String,
    pub listed: Vec<EntryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryLine {
    pub id: String,
    pub date: String,
    pub description: String,
    pub kind: EntryKind,
    pub category: String,
    pub amount: String,
    pub status: EntryStatus,
}

/// Contacts of the company. Listed as stored; only search applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleSection {
    pub clients: Vec<Client>,
    pub accountants: Vec<Accountant>,
}

// =============================================================================
// Assembly
// =============================================================================

impl Report {
    pub fn build(
        snapshot: &CompanySnapshot,
        filters: &ReportFilters,
        currency: &CurrencyFormat,
    ) -> Self {
        let catalog = ProductCatalog::new(&snapshot.products);
        let taxes = TaxTable::new(&snapshot.taxes);

        check_references(snapshot, &catalog, &taxes);

        let product_summary = ProductSummary::from_products(&snapshot.products);
        let products = ProductSection {
            summary: product_summary,
            stock_value: currency.format(product_summary.stock_value),
            categories: categories(&snapshot.products)
                .into_iter()
                .map(str::to_string)
                .collect(),
            listed: filter_records(&snapshot.products, &filters.products())
                .into_iter()
                .map(|p| ProductLine {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    category: p.category.clone(),
                    sell_price: currency.format(p.sell_price),
                    price_with_tax: currency.format(taxes.price_with_tax_for(p)),
                    margin: profit_percent(p.sell_price, p.cost_price).to_string(),
                    quantity_on_hand: p.quantity_on_hand,
                    stock: stock_status(p.quantity_on_hand, p.min_quantity),
                })
                .collect(),
        };

        let invoice_summary = InvoiceSummary::from_invoices(&snapshot.invoices, &catalog);
        let invoices = InvoiceSection {
            summary: invoice_summary,
            total_value: currency.format(invoice_summary.total_value),
            listed: filter_records(&snapshot.invoices, &filters.invoices())
                .into_iter()
                .map(|inv| InvoiceLine {
                    id: inv.id.clone(),
                    number: inv.number.clone(),
                    client: client_name(&snapshot.clients, &inv.client_id).map(str::to_string),
                    date: inv.date.to_string(),
                    status: inv.status,
                    total: currency.format(invoice_total(inv, &catalog)),
                })
                .collect(),
        };

        let totals = ledger_totals(&snapshot.ledger_entries);
        let ledger = LedgerSection {
            totals,
            balance: currency.format(totals.balance),
            listed: filter_records(&snapshot.ledger_entries, &filters.ledger())
                .into_iter()
                .map(|e| EntryLine {
                    id: e.id.clone(),
                    date: e.date.to_string(),
                    description: e.description.clone(),
                    kind: e.kind,
                    category: e.category.clone(),
                    amount: currency.format(e.amount),
                    status: e.status,
                })
                .collect(),
        };

        let people_filter = filters.people();
        let people = PeopleSection {
            clients: filter_records(&snapshot.clients, &people_filter)
                .into_iter()
                .cloned()
                .collect(),
            accountants: filter_records(&snapshot.accountants, &people_filter)
                .into_iter()
                .cloned()
                .collect(),
        };

        Report {
            company: snapshot.company.to_string(),
            currency: currency.code.clone(),
            products,
            invoices,
            ledger,
            people,
        }
    }
}

/// Logs references that point at records the company does not have.
///
/// Missing products price at zero and missing taxes leave prices
/// untaxed, so these never fail the report.
fn check_references(snapshot: &CompanySnapshot, catalog: &ProductCatalog<'_>, taxes: &TaxTable<'_>) {
    for invoice in snapshot.invoices.iter().filter(|inv| inv.value.is_none()) {
        for item in &invoice.items {
            if let Err(e) = catalog.require(&item.product_id) {
                warn!(invoice = %invoice.id, error = %e, "Invoice item priced at zero");
            }
        }
    }

    for product in &snapshot.products {
        if let Some(tax_id) = product.tax_id.as_deref() {
            if taxes.find(tax_id).is_none() {
                warn!(product = %product.id, tax_id, "Product references unknown tax");
            }
        }
    }

    for invoice in &snapshot.invoices {
        if client_name(&snapshot.clients, &invoice.client_id).is_none() {
            debug!(invoice = %invoice.id, client_id = %invoice.client_id, "Invoice client not found");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerdesk_core::types::{
        ActiveStatus, CompanyId, Invoice, InvoiceItem, LedgerEntry, Product, Tax, TaxRate,
    };
    use ledgerdesk_core::Money;
    use std::path::PathBuf;

    fn product(id: &str, name: &str, category: &str, sell: i64, cost: i64, qty: i64, min: i64, tax: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            sell_price: Money::from_cents(sell),
            cost_price: Some(Money::from_cents(cost)),
            quantity_on_hand: qty,
            min_quantity: min,
            category: category.to_string(),
            tax_id: Some(tax.to_string()),
            barcode: None,
            supplier: None,
            status: ActiveStatus::Active,
        }
    }

    fn entry(id: &str, description: &str, kind: EntryKind, cents: i64, category: &str) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            description: description.to_string(),
            kind,
            amount: Money::from_cents(cents),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: category.to_string(),
            payment_method: "Transferência".to_string(),
            status: EntryStatus::Completed,
            notes: None,
        }
    }

    fn snapshot() -> CompanySnapshot {
        CompanySnapshot {
            company: CompanyId::new("42"),
            products: vec![
                product("1", "Laptop Dell Inspiron", "Eletrónicos", 1_250_000, 980_000, 15, 5, "1"),
                product("5", "Software Office 365", "Software", 80_000, 60_000, 100, 10, "3"),
            ],
            taxes: vec![
                Tax { id: "1".into(), label: "IVA Padrão".into(), rate: TaxRate::from_percent(17) },
                Tax { id: "3".into(), label: "Isento".into(), rate: TaxRate::zero() },
            ],
            invoices: vec![
                Invoice {
                    id: "1".into(),
                    number: "FT-001".into(),
                    client_id: "1".into(),
                    date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                    status: InvoiceStatus::Paid,
                    items: vec![InvoiceItem { product_id: "1".into(), quantity: 2 }],
                    value: None,
                },
                Invoice {
                    id: "2".into(),
                    number: "FT-002".into(),
                    client_id: "9".into(),
                    date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
                    status: InvoiceStatus::Pending,
                    items: vec![],
                    value: Some(Money::from_cents(50_000)),
                },
            ],
            ledger_entries: vec![
                entry("1", "Venda de Produtos", EntryKind::Inflow, 250_000, "Vendas"),
                entry("2", "Pagamento Fornecedor", EntryKind::Outflow, 120_000, "Fornecedores"),
                entry("3", "Conta de Luz", EntryKind::Outflow, 45_000, "Utilidades"),
            ],
            clients: vec![Client {
                id: "1".into(),
                name: "Maputo Tech".into(),
                email: "geral@maputotech.co.mz".into(),
                phone: String::new(),
            }],
            accountants: vec![Accountant {
                id: "1".into(),
                name: "Ana Machava".into(),
                email: "ana@contas.co.mz".into(),
                phone: String::new(),
                tax_number: "400123456".into(),
                specialty: "Fiscalidade".into(),
                status: ActiveStatus::Active,
            }],
        }
    }

    fn config() -> ReportConfig {
        ReportConfig {
            data_dir: PathBuf::from("./data"),
            company: CompanyId::new("42"),
            currency: "MZN".to_string(),
            currency_decimals: 2,
            search: None,
            category: None,
            status: None,
            strict: false,
        }
    }

    fn mzn() -> CurrencyFormat {
        CurrencyFormat::new("MZN", 2)
    }

    #[test]
    fn test_unfiltered_report() {
        let report = Report::build(&snapshot(), &ReportFilters::default(), &mzn());

        assert_eq!(report.company, "42");
        assert_eq!(report.products.summary.stock_value, Money::from_cents(20_700_000));
        assert_eq!(report.products.stock_value, "MZN 207.000,00");
        assert_eq!(report.products.categories, vec!["Eletrónicos", "Software"]);

        let laptop = &report.products.listed[0];
        assert_eq!(laptop.price_with_tax, "MZN 14.625,00");
        assert_eq!(laptop.margin, "27.6%");
        assert_eq!(laptop.stock, StockStatus::Available);

        assert_eq!(report.invoices.summary.total_value, Money::from_cents(2_550_000));
        assert_eq!(report.invoices.listed[0].client.as_deref(), Some("Maputo Tech"));
        assert_eq!(report.invoices.listed[1].client, None);
        assert_eq!(report.invoices.listed[1].total, "MZN 500,00");

        assert_eq!(report.ledger.totals.balance, Money::from_cents(85_000));
        assert_eq!(report.ledger.balance, "MZN 850,00");
        assert_eq!(report.ledger.listed.len(), 3);

        assert_eq!(report.people.clients.len(), 1);
        assert_eq!(report.people.accountants[0].tax_number, "400123456");
    }

    #[test]
    fn test_people_filtered_by_search() {
        let filters = ReportFilters {
            search: "contas.co".to_string(),
            ..ReportFilters::default()
        };
        let report = Report::build(&snapshot(), &filters, &mzn());

        assert!(report.people.clients.is_empty());
        let names: Vec<&str> = report.people.accountants.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Machava"]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["people"]["accountants"][0]["taxNumber"], "400123456");
    }

    #[test]
    fn test_filters_narrow_listings_not_summaries() {
        let filters = ReportFilters {
            search: "office".to_string(),
            ..ReportFilters::default()
        };
        let report = Report::build(&snapshot(), &filters, &mzn());

        assert_eq!(report.products.summary.total, 2);
        let ids: Vec<&str> = report.products.listed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);
        assert!(report.ledger.listed.is_empty());
    }

    #[test]
    fn test_filters_from_config() {
        let narrowed = ReportConfig {
            search: Some("  luz ".to_string()),
            category: Some("Utilidades".to_string()),
            status: Some("Pendente".to_string()),
            ..config()
        };
        let filters = ReportFilters::from_config(&narrowed).unwrap();

        assert_eq!(filters.search, "luz");
        assert_eq!(filters.category, Selector::only("Utilidades"));
        assert_eq!(filters.invoice_status, Selector::only("pending"));

        let report = Report::build(&snapshot(), &filters, &mzn());
        let ids: Vec<&str> = report.ledger.listed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
        assert!(report.invoices.listed.is_empty());
    }

    #[test]
    fn test_status_sentinels_disable_filter() {
        for all in ["all", "todos"] {
            let unfiltered = ReportConfig {
                status: Some(all.to_string()),
                ..config()
            };
            let filters = ReportFilters::from_config(&unfiltered).unwrap();
            assert!(filters.invoice_status.is_all());
        }
    }

    #[test]
    fn test_bad_filters_rejected() {
        let bad_status = ReportConfig {
            status: Some("Arquivada".to_string()),
            ..config()
        };
        assert!(ReportFilters::from_config(&bad_status).is_err());

        let long_search = ReportConfig {
            search: Some("x".repeat(101)),
            ..config()
        };
        assert!(ReportFilters::from_config(&long_search).is_err());
    }
}
