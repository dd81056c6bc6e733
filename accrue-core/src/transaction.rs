//! Transaction types recorded by the ledger

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::DATE_FORMAT;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnKind {
    #[serde(rename = "D")]
    Deposit,
    #[serde(rename = "W")]
    Withdraw,
}

impl TxnKind {
    /// Single-letter code used in statements and input (`D` / `W`)
    pub fn code(&self) -> char {
        match self {
            TxnKind::Deposit => 'D',
            TxnKind::Withdraw => 'W',
        }
    }

    /// Parse a kind code, case-insensitive
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'D' => Some(TxnKind::Deposit),
            'W' => Some(TxnKind::Withdraw),
            _ => None,
        }
    }

    /// Apply the direction to an unsigned amount
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TxnKind::Deposit => amount,
            TxnKind::Withdraw => -amount,
        }
    }
}

/// Ledger-assigned transaction id: the booking date plus a per-day counter.
///
/// Ordered by `(date, sequence)`, so `20230601-100` sorts after `20230601-99`
/// even though the string form would not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    date: NaiveDate,
    sequence: u32,
}

impl TransactionId {
    pub fn new(date: NaiveDate, sequence: u32) -> Self {
        Self { date, sequence }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.date.format(DATE_FORMAT), self.sequence)
    }
}

/// A recorded deposit or withdrawal. Only the ledger creates these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub account: String,
    pub date: NaiveDate,
    pub kind: TxnKind,
    /// Always strictly positive; direction comes from `kind`
    pub amount: Decimal,
}

impl Transaction {
    /// Positive for deposits, negative for withdrawals
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TxnKind::Withdraw
    }
}
