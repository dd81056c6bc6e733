//! Monthly statements: ordering and console rendering.
//!
//! Purely presentational. The numbers come from `crate::accrual`; this module
//! only puts them in `(date, id)` order with the interest line last and turns
//! them into text.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::balance::BalanceEvent;
use crate::rules::InterestRule;
use crate::time::{DATE_FORMAT, YearMonth};
use crate::transaction::{Transaction, TransactionId};

/// The synthetic month-end interest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestLine {
    pub account: String,
    /// Last calendar day of the month
    pub date: NaiveDate,
    pub amount: Decimal,
    pub running_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementLine {
    Transaction(BalanceEvent),
    Interest(InterestLine),
}

impl StatementLine {
    pub fn date(&self) -> NaiveDate {
        match self {
            StatementLine::Transaction(e) => e.date,
            StatementLine::Interest(i) => i.date,
        }
    }

    /// None for the interest line
    pub fn txn_id(&self) -> Option<TransactionId> {
        match self {
            StatementLine::Transaction(e) => Some(e.id),
            StatementLine::Interest(_) => None,
        }
    }

    /// `D`, `W` or `I`
    pub fn code(&self) -> char {
        match self {
            StatementLine::Transaction(e) => e.kind.code(),
            StatementLine::Interest(_) => 'I',
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            StatementLine::Transaction(e) => e.amount,
            StatementLine::Interest(i) => i.amount,
        }
    }

    pub fn balance(&self) -> Decimal {
        match self {
            StatementLine::Transaction(e) => e.running_balance,
            StatementLine::Interest(i) => i.running_balance,
        }
    }
}

/// Flat, display-ready form of a statement line (also the JSON shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: String,
    pub txn_id: String,
    #[serde(rename = "type")]
    pub kind: char,
    pub amount: String,
    pub balance: String,
}

impl From<&StatementLine> for StatementRow {
    fn from(line: &StatementLine) -> Self {
        Self {
            date: line.date().format(DATE_FORMAT).to_string(),
            txn_id: line.txn_id().map(|id| id.to_string()).unwrap_or_default(),
            kind: line.code(),
            amount: money(line.amount()),
            balance: money(line.balance()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub account: String,
    pub month: YearMonth,
    pub lines: Vec<StatementLine>,
}

impl Statement {
    pub fn interest(&self) -> Option<&InterestLine> {
        self.lines.iter().rev().find_map(|l| match l {
            StatementLine::Interest(i) => Some(i),
            StatementLine::Transaction(_) => None,
        })
    }

    pub fn rows(&self) -> Vec<StatementRow> {
        self.lines.iter().map(StatementRow::from).collect()
    }
}

pub struct StatementBuilder;

impl StatementBuilder {
    /// Order the month's events by `(date, id)` and append the interest line.
    pub fn build(
        account: &str,
        month: YearMonth,
        mut events: Vec<BalanceEvent>,
        interest: InterestLine,
    ) -> Statement {
        events.sort_by_key(|e| (e.date, e.id));

        let mut lines: Vec<StatementLine> =
            events.into_iter().map(StatementLine::Transaction).collect();
        lines.push(StatementLine::Interest(interest));

        Statement {
            account: account.to_string(),
            month,
            lines,
        }
    }
}

/// Two-decimal money formatting, half-up.
pub fn money(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn render_statement(statement: &Statement) -> String {
    let mut s = String::new();
    s.push_str(&format!("Account: {}\n", statement.account));
    s.push_str("| Date     | Txn Id      | Type | Amount | Balance |\n");
    for row in statement.rows() {
        s.push_str(&format!(
            "| {} | {:<11} | {:<4} | {:>6} | {:>7} |\n",
            row.date, row.txn_id, row.kind, row.amount, row.balance
        ));
    }
    s
}

/// Transaction listing shown after each recorded entry (no balance column).
pub fn render_transactions(account: &str, transactions: &[&Transaction]) -> String {
    let mut s = String::new();
    s.push_str(&format!("Account: {}\n", account));
    s.push_str("| Date     | Txn Id      | Type | Amount |\n");
    for t in transactions {
        s.push_str(&format!(
            "| {} | {:<11} | {:<4} | {:>6} |\n",
            t.date.format(DATE_FORMAT),
            t.id.to_string(),
            t.kind.code(),
            money(t.amount)
        ));
    }
    s
}

pub fn render_rules<'a>(rules: impl IntoIterator<Item = &'a InterestRule>) -> String {
    let mut s = String::new();
    s.push_str("Interest rules:\n");
    s.push_str("| Date     | RuleId | Rate (%) |\n");
    for r in rules {
        s.push_str(&format!(
            "| {} | {:<6} | {:>8} |\n",
            r.effective_date.format(DATE_FORMAT),
            r.id,
            money(r.rate_percent)
        ));
    }
    s
}
