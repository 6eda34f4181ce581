//! Report configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! The company id may also be given as the first command-line argument.

use std::env;
use std::path::PathBuf;

use ledgerdesk_core::CompanyId;
use ledgerdesk_data::ValidationMode;

/// Report configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Root directory holding one sub-directory per company
    pub data_dir: PathBuf,

    /// Company whose records are reported
    pub company: CompanyId,

    /// Currency code shown next to amounts
    pub currency: String,

    /// Decimal places shown for amounts (0 to 2)
    pub currency_decimals: u32,

    /// Free-text search applied to the listed records
    pub search: Option<String>,

    /// Category filter for products and ledger entries
    pub category: Option<String>,

    /// Status filter for invoices
    pub status: Option<String>,

    /// Fail on the first record that breaks a business rule
    pub strict: bool,
}

impl ReportConfig {
    /// Load configuration from the process environment and arguments.
    pub fn load() -> Result<Self, ConfigError> {
        let company_arg = env::args().nth(1);
        Self::from_lookup(|key| env::var(key).ok(), company_arg)
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(
        var: impl Fn(&str) -> Option<String>,
        company_arg: Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let company = company_arg
            .filter(|c| !c.trim().is_empty())
            .or_else(|| non_blank("LEDGERDESK_COMPANY_ID"))
            .ok_or_else(|| ConfigError::MissingRequired("LEDGERDESK_COMPANY_ID".to_string()))?;

        let config = ReportConfig {
            data_dir: non_blank("LEDGERDESK_DATA_DIR")
                .unwrap_or_else(|| "./data".to_string())
                .into(),

            company: CompanyId::new(company.trim()),

            currency: non_blank("LEDGERDESK_CURRENCY").unwrap_or_else(|| "MZN".to_string()),

            currency_decimals: non_blank("LEDGERDESK_CURRENCY_DECIMALS")
                .unwrap_or_else(|| "2".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LEDGERDESK_CURRENCY_DECIMALS".to_string()))?,

            search: non_blank("LEDGERDESK_SEARCH"),

            category: non_blank("LEDGERDESK_CATEGORY"),

            status: non_blank("LEDGERDESK_STATUS"),

            strict: non_blank("LEDGERDESK_STRICT")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        if config.currency_decimals > 2 {
            return Err(ConfigError::InvalidValue(
                "LEDGERDESK_CURRENCY_DECIMALS".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn validation_mode(&self) -> ValidationMode {
        if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
