//! QIF keeps amounts as text (`T-1,234.56`, `$50.00`).  These helpers turn that text into
//! numbers for callers that need them; the parser itself never interprets amounts.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::transaction::{Split, Transaction};

/// Converts QIF amount text into a [`Decimal`], dropping `,` thousands separators.
///
/// Returns `None` for an empty amount.
pub fn parse_amount(raw: &str) -> Option<Result<Decimal, rust_decimal::Error>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(Decimal::from_str(&raw.replace(',', "")))
}

impl<'a> Transaction<'a> {
    /// The `T` amount as a number.
    pub fn amount(&self) -> Option<Result<Decimal, rust_decimal::Error>> {
        parse_amount(&self.amount_t_code)
    }
}

impl<'a> Split<'a> {
    /// The `$` amount as a number.
    pub fn amount(&self) -> Option<Result<Decimal, rust_decimal::Error>> {
        parse_amount(&self.amount)
    }
}
