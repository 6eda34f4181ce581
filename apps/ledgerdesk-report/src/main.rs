//! # LedgerDesk Report
//!
//! Prints one company's back-office figures as JSON.
//!
//! ## Usage
//! ```text
//! LEDGERDESK_DATA_DIR=./data ledgerdesk-report 42
//! LEDGERDESK_COMPANY_ID=42 LEDGERDESK_SEARCH=dell ledgerdesk-report
//! ```
//!
//! The report goes to stdout; logs go to stderr, filtered by
//! `LEDGERDESK_LOG` (or `RUST_LOG`), default `info`.

mod config;
mod error;
mod format;
mod report;

use std::io::{self, Write};
use std::process::ExitCode;

use ledgerdesk_data::{CompanySnapshot, JsonDirSource};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::format::CurrencyFormat;
use crate::report::{Report, ReportFilters};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("LEDGERDESK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Report failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> ReportResult<()> {
    let config = ReportConfig::load()?;
    info!(
        company = %config.company,
        data_dir = %config.data_dir.display(),
        currency = %config.currency,
        strict = config.strict,
        "Configuration loaded"
    );

    let filters = ReportFilters::from_config(&config)?;
    let source = JsonDirSource::new(&config.data_dir).with_mode(config.validation_mode());
    let snapshot = CompanySnapshot::load(&source, &config.company)?;

    let currency = CurrencyFormat::new(config.currency.clone(), config.currency_decimals);
    let report = Report::build(&snapshot, &filters, &currency);

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;

    info!(
        products = report.products.listed.len(),
        invoices = report.invoices.listed.len(),
        ledger_entries = report.ledger.listed.len(),
        clients = report.people.clients.len(),
        accountants = report.people.accountants.len(),
        "Report written"
    );
    Ok(())
}
