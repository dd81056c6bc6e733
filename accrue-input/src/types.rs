use accrue_core::{InterestRule, TxnKind, YearMonth};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Main-menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RecordTransaction,
    DefineRule,
    PrintStatement,
    Quit,
}

impl MenuChoice {
    /// `T`, `I`, `P` or `Q`, case-insensitive, surrounding whitespace ignored
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "T" => Some(MenuChoice::RecordTransaction),
            "I" => Some(MenuChoice::DefineRule),
            "P" => Some(MenuChoice::PrintStatement),
            "Q" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// `<Date> <Account> <Type> <Amount>`
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub date: NaiveDate,
    pub account: String,
    pub kind: TxnKind,
    pub amount: Decimal,
}

/// `<Date> <RuleId> <Rate in %>`
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRequest {
    pub date: NaiveDate,
    pub rule_id: String,
    pub rate: Decimal,
}

impl RuleRequest {
    pub fn into_rule(self) -> InterestRule {
        InterestRule::new(self.date, self.rule_id, self.rate)
    }
}

/// `<Account> <Year><Month>`
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRequest {
    pub account: String,
    pub month: YearMonth,
}
