//! Display formatting for amounts.
//!
//! Amounts are shown the way the back office shows them: currency code
//! first, `.` between thousands and `,` before the decimals
//! (`MZN 125.640,00`).

use ledgerdesk_core::Money;

/// How amounts are rendered in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: String,
    /// Decimal places shown, 0 to 2.
    pub decimals: u32,
}

impl CurrencyFormat {
    pub fn new(code: impl Into<String>, decimals: u32) -> Self {
        CurrencyFormat {
            code: code.into(),
            decimals: decimals.min(2),
        }
    }

    pub fn format(&self, amount: Money) -> String {
        format_money(amount, self)
    }
}

/// Formats an amount for display, rounding half to even when fewer than
/// two decimals are shown.
pub fn format_money(amount: Money, format: &CurrencyFormat) -> String {
    let rounded = amount.round_to_decimals(format.decimals);
    let sign = if rounded.is_negative() { "-" } else { "" };
    let rounded = rounded.abs();

    let major = group_thousands(rounded.major());

    let number = match format.decimals {
        0 => major,
        1 => format!("{major},{}", rounded.minor_part() / 10),
        _ => format!("{major},{:02}", rounded.minor_part()),
    };

    format!("{} {sign}{number}", format.code)
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped
}
