//! # Field Coercion
//!
//! The back end is inconsistent about field types: prices arrive as
//! `12500`, `12500.0`, `"12500.00"` or `"12 500,00"`, ids as `1` or `"1"`,
//! labels in Portuguese or English. Everything is normalized here, once,
//! so the core only ever sees typed values.
//!
//! ## Decimal Parsing
//! ```text
//! "12 500,00"  ──► strip spaces ──► "12500,00" ──► "," is decimal ──► 1250000
//! "1.234,5"    ──► "." thousands, "," decimal  ──────────────────► 123450
//! 0.125 (num)  ──► shortest repr "0.125" ──► half-even ──────────► 12
//! 1e21 (num)   ──► "1e21" ──► Decimal ──► past i64 ──────────────► error
//! ```
//! Numbers are parsed from their shortest decimal representation into a
//! `rust_decimal::Decimal`, so a float like `0.1` becomes exactly 10 cents
//! and no amount ever goes through `f64`.

use chrono::NaiveDate;
use ledgerdesk_core::types::{ActiveStatus, EntryKind, EntryStatus, InvoiceStatus, TaxRate};
use ledgerdesk_core::Money;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::str::FromStr;

use crate::error::{DataError, DataResult};

// =============================================================================
// Wire Values
// =============================================================================

/// A JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Number(serde_json::Number),
    Text(String),
}

/// A JSON id: integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
}

impl WireId {
    /// The id as a string, `None` when it is a blank string.
    pub fn into_string(self) -> Option<String> {
        match self {
            WireId::Int(n) => Some(n.to_string()),
            WireId::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
        }
    }
}

// =============================================================================
// Decimal Parsing
// =============================================================================

/// Parses a decimal string into an integer scaled by `10^scale`, rounding
/// half to even on the digits past `scale`.
///
/// Accepts an optional sign, spaces (including no-break spaces) as
/// thousands separators, either `.` or `,` as the decimal mark, and an
/// `e`/`E` exponent. When both marks appear, the last one is the decimal
/// mark; a mark that appears more than once is a thousands separator.
/// Returns `None` for anything else, including an empty string and values
/// past the `i64` range.
///
/// ```rust
/// use ledgerdesk_data::coerce::parse_scaled;
///
/// assert_eq!(parse_scaled("12 500,00", 2), Some(1_250_000));
/// assert_eq!(parse_scaled("0.125", 2), Some(12));
/// assert_eq!(parse_scaled("1e5", 2), Some(10_000_000));
/// ```
pub fn parse_scaled(input: &str, scale: u32) -> Option<i64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();

    let (mantissa, exponent) = match cleaned.find(|c: char| c == 'e' || c == 'E') {
        Some(at) => (&cleaned[..at], Some(&cleaned[at + 1..])),
        None => (cleaned.as_str(), None),
    };

    let canonical = canonical_decimal(mantissa)?;
    let value = match exponent {
        Some(exp) => Decimal::from_scientific(&format!("{canonical}e{exp}")).ok()?,
        None => Decimal::from_str(&canonical).ok()?,
    };

    let factor = Decimal::from(10i64.checked_pow(scale)?);
    value
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven)
        .checked_mul(factor)?
        .to_i64()
}

/// Rewrites a locale-formatted number as `[-]digits[.digits]`.
fn canonical_decimal(text: &str) -> Option<String> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };

    // a separator that repeats only groups thousands
    let decimal_mark = match (body.rfind('.'), body.rfind(',')) {
        (Some(dot), Some(comma)) => Some(dot.max(comma)),
        (Some(dot), None) if body.matches('.').count() == 1 => Some(dot),
        (None, Some(comma)) if body.matches(',').count() == 1 => Some(comma),
        _ => None,
    };

    let (int_part, frac_part) = match decimal_mark {
        Some(at) => (&body[..at], &body[at + 1..]),
        None => (body, ""),
    };

    // thousands separators are only allowed in the integer part
    let int_digits: String = int_part.chars().filter(|c| *c != '.' && *c != ',').collect();
    if int_digits.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_digits.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let int_digits = if int_digits.is_empty() { "0" } else { int_digits.as_str() };
    Some(if frac_part.is_empty() {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{frac_part}")
    })
}

impl WireNumber {
    /// Scaled integer value; `None` for a blank string.
    pub fn to_scaled(&self, field: &str, scale: u32) -> DataResult<Option<i64>> {
        let text = match self {
            WireNumber::Number(n) => n.to_string(),
            WireNumber::Text(s) if s.trim().is_empty() => return Ok(None),
            WireNumber::Text(s) => s.clone(),
        };

        match parse_scaled(&text, scale) {
            Some(value) => Ok(Some(value)),
            None => Err(DataError::invalid_amount(field, text)),
        }
    }
}

// =============================================================================
// Field Helpers
// =============================================================================

/// Money in minor units. Missing, null or blank is zero.
pub fn amount(field: &str, value: Option<&WireNumber>) -> DataResult<Money> {
    Ok(optional_amount(field, value)?.unwrap_or_default())
}

/// Money in minor units. Missing, null or blank is `None`.
pub fn optional_amount(field: &str, value: Option<&WireNumber>) -> DataResult<Option<Money>> {
    match value {
        Some(v) => Ok(v.to_scaled(field, 2)?.map(Money::from_cents)),
        None => Ok(None),
    }
}

/// Whole quantity. Missing, null or blank is `default`.
pub fn quantity(field: &str, value: Option<&WireNumber>, default: i64) -> DataResult<i64> {
    match value {
        Some(v) => Ok(v.to_scaled(field, 0)?.unwrap_or(default)),
        None => Ok(default),
    }
}

/// A tax rate given as a percentage (`17`, `"7.5"`). Missing is zero.
pub fn rate(field: &str, value: Option<&WireNumber>) -> DataResult<TaxRate> {
    let bps = match value {
        Some(v) => v.to_scaled(field, 2)?.unwrap_or(0),
        None => 0,
    };

    u32::try_from(bps)
        .map(TaxRate::from_bps)
        .map_err(|_| DataError::invalid_amount(field, bps.to_string()))
}

/// An ISO date. A trailing time part (`2024-03-15T10:00:00Z`) is ignored.
pub fn date(field: &str, value: Option<&str>) -> DataResult<NaiveDate> {
    let raw = value.map(str::trim).filter(|s| !s.is_empty());
    let raw = raw.ok_or_else(|| DataError::missing(field))?;

    let day = raw.get(..10).unwrap_or(raw);
    let tail_ok = match raw.as_bytes().get(10) {
        None => true,
        Some(b) => *b == b'T' || *b == b' ',
    };

    if tail_ok {
        if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Ok(date);
        }
    }

    Err(DataError::InvalidDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// A required id.
pub fn required_id(field: &str, value: Option<WireId>) -> DataResult<String> {
    value
        .and_then(WireId::into_string)
        .ok_or_else(|| DataError::missing(field))
}

/// An optional id; blank strings read as absent.
pub fn optional_id(value: Option<WireId>) -> Option<String> {
    value.and_then(WireId::into_string)
}

/// Trimmed optional text; blank reads as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// =============================================================================
// Labels
// =============================================================================

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

pub fn invoice_status(field: &str, label: &str) -> DataResult<InvoiceStatus> {
    match normalize_label(label).as_str() {
        "paga" | "pago" | "paid" => Ok(InvoiceStatus::Paid),
        "pendente" | "pending" => Ok(InvoiceStatus::Pending),
        "cancelada" | "cancelado" | "anulada" | "cancelled" | "canceled" => {
            Ok(InvoiceStatus::Cancelled)
        }
        _ => Err(DataError::unknown_label(field, label)),
    }
}

pub fn entry_kind(field: &str, label: &str) -> DataResult<EntryKind> {
    match normalize_label(label).as_str() {
        "entrada" | "receita" | "inflow" => Ok(EntryKind::Inflow),
        "saida" | "despesa" | "outflow" => Ok(EntryKind::Outflow),
        _ => Err(DataError::unknown_label(field, label)),
    }
}

pub fn entry_status(field: &str, label: &str) -> DataResult<EntryStatus> {
    match normalize_label(label).as_str() {
        "concluido" | "concluida" | "completed" => Ok(EntryStatus::Completed),
        "pendente" | "pending" => Ok(EntryStatus::Pending),
        "cancelado" | "cancelada" | "cancelled" | "canceled" => Ok(EntryStatus::Cancelled),
        _ => Err(DataError::unknown_label(field, label)),
    }
}

pub fn active_status(field: &str, label: &str) -> DataResult<ActiveStatus> {
    match normalize_label(label).as_str() {
        "ativo" | "ativa" | "active" => Ok(ActiveStatus::Active),
        "inativo" | "inativa" | "inactive" => Ok(ActiveStatus::Inactive),
        _ => Err(DataError::unknown_label(field, label)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
