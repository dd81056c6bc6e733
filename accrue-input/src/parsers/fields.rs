//! Single-field parsers: dates, months, kinds, amounts, rates, accounts.

use accrue_core::{DATE_FORMAT, TxnKind, YearMonth};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{InputError, Result};

/// Compiled field patterns. Build once and reuse for every line.
#[derive(Debug, Clone)]
pub struct FieldParser {
    date_re: Regex,
    month_re: Regex,
    amount_re: Regex,
    rate_re: Regex,
    account_re: Regex,
}

impl FieldParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            date_re: Regex::new(r"^\d{8}$")?,
            month_re: Regex::new(r"^(?P<year>\d{4})(?P<month>\d{2})$")?,
            amount_re: Regex::new(r"^\d+(\.\d{1,2})?$")?,
            rate_re: Regex::new(r"^\d+(\.\d+)?$")?,
            account_re: Regex::new(r"^[A-Za-z0-9_-]+$")?,
        })
    }

    /// `YYYYMMDD`
    pub fn date(&self, s: &str) -> Result<NaiveDate> {
        if !self.date_re.is_match(s) {
            return Err(InputError::Date(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| InputError::Date(s.to_string()))
    }

    /// `YYYYMM`
    pub fn month(&self, s: &str) -> Result<YearMonth> {
        let caps = self
            .month_re
            .captures(s)
            .ok_or_else(|| InputError::Month(s.to_string()))?;

        let year: i32 = caps["year"].parse().map_err(|_| InputError::Month(s.to_string()))?;
        let month: u32 = caps["month"].parse().map_err(|_| InputError::Month(s.to_string()))?;
        YearMonth::new(year, month).ok_or_else(|| InputError::Month(s.to_string()))
    }

    /// `D` or `W`, case-insensitive
    pub fn kind(&self, s: &str) -> Result<TxnKind> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => TxnKind::from_code(c).ok_or_else(|| InputError::Kind(s.to_string())),
            _ => Err(InputError::Kind(s.to_string())),
        }
    }

    /// Positive decimal with at most 2 decimal places
    pub fn amount(&self, s: &str) -> Result<Decimal> {
        if !self.amount_re.is_match(s) {
            return Err(InputError::Amount(s.to_string()));
        }
        let amount = Decimal::from_str(s).map_err(|_| InputError::Amount(s.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(InputError::Amount(s.to_string()));
        }
        Ok(amount)
    }

    /// Percentage in (0, 100]
    pub fn rate(&self, s: &str) -> Result<Decimal> {
        if !self.rate_re.is_match(s) {
            return Err(InputError::Rate(s.to_string()));
        }
        let rate = Decimal::from_str(s).map_err(|_| InputError::Rate(s.to_string()))?;
        if rate <= Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(InputError::Rate(s.to_string()));
        }
        Ok(rate)
    }

    pub fn account(&self, s: &str) -> Result<String> {
        if !self.account_re.is_match(s) {
            return Err(InputError::Account(s.to_string()));
        }
        Ok(s.to_string())
    }
}
