//! Whole-line parsers for the three console prompts.
//!
//! Fields are whitespace separated; any run of spaces or tabs counts as one
//! separator.

use tracing::debug;

use crate::error::{InputError, Result};
use crate::parsers::fields::FieldParser;
use crate::types::{RuleRequest, StatementRequest, TransactionRequest};

pub const TRANSACTION_USAGE: &str = "<Date> <Account> <Type> <Amount>";
pub const RULE_USAGE: &str = "<Date> <RuleId> <Rate in %>";
pub const STATEMENT_USAGE: &str = "<Account> <Year><Month>";

#[derive(Debug, Clone)]
pub struct LineParser {
    fields: FieldParser,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fields: FieldParser::new()?,
        })
    }

    pub fn fields(&self) -> &FieldParser {
        &self.fields
    }

    /// `20230626 AC001 W 100.00`
    pub fn transaction(&self, line: &str) -> Result<TransactionRequest> {
        let [date, account, kind, amount] = split::<4>(line, TRANSACTION_USAGE)?;
        let req = TransactionRequest {
            date: self.fields.date(date)?,
            account: self.fields.account(account)?,
            kind: self.fields.kind(kind)?,
            amount: self.fields.amount(amount)?,
        };
        debug!(?req, "parsed transaction line");
        Ok(req)
    }

    /// `20230615 RULE03 2.20`
    pub fn rule(&self, line: &str) -> Result<RuleRequest> {
        let [date, rule_id, rate] = split::<3>(line, RULE_USAGE)?;
        let req = RuleRequest {
            date: self.fields.date(date)?,
            rule_id: rule_id.to_string(),
            rate: self.fields.rate(rate)?,
        };
        debug!(?req, "parsed rule line");
        Ok(req)
    }

    /// `AC001 202306`
    pub fn statement(&self, line: &str) -> Result<StatementRequest> {
        let [account, month] = split::<2>(line, STATEMENT_USAGE)?;
        Ok(StatementRequest {
            account: self.fields.account(account)?,
            month: self.fields.month(month)?,
        })
    }
}

fn split<'a, const N: usize>(line: &'a str, usage: &'static str) -> Result<[&'a str; N]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let found = parts.len();
    parts
        .try_into()
        .map_err(|_| InputError::FieldCount { usage, found })
}
