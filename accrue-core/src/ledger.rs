//! Ledger: the authoritative store of recorded transactions.
//!
//! Transactions for every account live in a single vector kept sorted by
//! transaction id, i.e. by `(date, per-day sequence)`. Per-account views are
//! filtered out of it on demand.
//!
//! Validation on append:
//! - amount must be strictly positive
//! - a withdrawal cannot be the first transaction of an account
//! - a withdrawal cannot push the account's running balance below zero at any
//!   point of its history, including back-dated entries that land before
//!   later transactions
//! - no running balance of the account may leave `Decimal`'s range

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use tracing::info;

use crate::error::{Error, Result};
use crate::transaction::{Transaction, TransactionId, TxnKind};

/// Read access to one account's transactions, ordered by `(date, id)`.
pub trait TransactionSource {
    fn transactions_for(&self, account: &str) -> Vec<&Transaction>;
}

#[derive(Debug, Default, Clone)]
pub struct Ledger {
    // sorted by id
    transactions: Vec<Transaction>,

    // Per-day id counter, shared by all accounts.
    daily_sequence: HashMap<NaiveDate, u32>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Validate and record a transaction, returning the stored copy.
    ///
    /// On error nothing changes, including the per-day id counter.
    pub fn append(
        &mut self,
        account: &str,
        date: NaiveDate,
        kind: TxnKind,
        amount: Decimal,
    ) -> Result<Transaction> {
        if amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(amount));
        }

        let sequence = self.daily_sequence.get(&date).copied().unwrap_or(0) + 1;
        let id = TransactionId::new(date, sequence);

        if kind == TxnKind::Withdraw && !self.has_account(account) {
            return Err(Error::FirstTransactionWithdrawal {
                account: account.to_string(),
            });
        }

        let available = self.withdrawable_at(account, id, kind.signed(amount))?;
        if kind == TxnKind::Withdraw && amount > available {
            return Err(Error::InsufficientFunds {
                account: account.to_string(),
                available,
            });
        }

        let txn = Transaction {
            id,
            account: account.to_string(),
            date,
            kind,
            amount,
        };

        let at = self.transactions.partition_point(|t| t.id < id);
        self.transactions.insert(at, txn.clone());
        self.daily_sequence.insert(date, sequence);

        info!(account, id = %txn.id, kind = ?kind, %amount, "transaction recorded");
        Ok(txn)
    }

    /// All-time signed balance of `account`.
    pub fn balance(&self, account: &str) -> Result<Decimal> {
        self.transactions
            .iter()
            .filter(|t| t.account == account)
            .try_fold(Decimal::ZERO, |acc, t| {
                acc.checked_add(t.signed_amount())
                    .ok_or_else(|| Error::AmountOverflow {
                        account: account.to_string(),
                    })
            })
    }

    /// Accounts with at least one transaction, sorted.
    pub fn accounts(&self) -> Vec<&str> {
        self.transactions
            .iter()
            .map(|t| t.account.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn has_account(&self, account: &str) -> bool {
        self.transactions.iter().any(|t| t.account == account)
    }

    /// Largest amount that can be withdrawn at `id` without any running
    /// balance of the account going negative.
    ///
    /// Also replays the history with `signed` booked at `id` and fails when
    /// any running balance would overflow.
    fn withdrawable_at(
        &self,
        account: &str,
        id: TransactionId,
        signed: Decimal,
    ) -> Result<Decimal> {
        let overflow = || Error::AmountOverflow {
            account: account.to_string(),
        };
        let mut running = Decimal::ZERO;
        let mut available: Option<Decimal> = None;

        for t in self.transactions.iter().filter(|t| t.account == account) {
            if t.id > id && available.is_none() {
                running.checked_add(signed).ok_or_else(overflow)?;
                available = Some(running);
            }
            running = running.checked_add(t.signed_amount()).ok_or_else(overflow)?;
            if let Some(a) = available.as_mut() {
                running.checked_add(signed).ok_or_else(overflow)?;
                *a = (*a).min(running);
            }
        }

        match available {
            Some(a) => Ok(a),
            None => {
                running.checked_add(signed).ok_or_else(overflow)?;
                Ok(running)
            }
        }
    }
}

impl TransactionSource for Ledger {
    fn transactions_for(&self, account: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.account == account)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn assigns_per_day_sequence_ids_across_accounts() {
        let mut ledger = Ledger::new();
        let a = ledger.append("AC001", d(2023, 6, 1), TxnKind::Deposit, dec!(100)).unwrap();
        let b = ledger.append("AC002", d(2023, 6, 1), TxnKind::Deposit, dec!(50)).unwrap();
        let c = ledger.append("AC001", d(2023, 6, 2), TxnKind::Deposit, dec!(10)).unwrap();

        assert_eq!(a.id.to_string(), "20230601-01");
        // counter is shared by every account booking on the same day
        assert_eq!(b.id.to_string(), "20230601-02");
        assert_eq!(c.id.to_string(), "20230602-01");
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let mut ledger = Ledger::new();
        let err = ledger.append("AC001", d(2023, 6, 1), TxnKind::Deposit, dec!(0)).unwrap_err();
        assert_eq!(err, Error::NonPositiveAmount(dec!(0)));
        assert!(ledger.append("AC001", d(2023, 6, 1), TxnKind::Deposit, dec!(-5)).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn rejects_withdrawal_as_first_transaction_of_account() {
        let mut ledger = Ledger::new();
        ledger.append("AC001", d(2023, 6, 1), TxnKind::Deposit, dec!(100)).unwrap();

        let err = ledger.append("AC002", d(2023, 6, 2), TxnKind::Withdraw, dec!(10)).unwrap_err();
        assert_eq!(
            err,
            Error::FirstTransactionWithdrawal {
                account: "AC002".to_string()
            }
        );
    }

    #[test]
    fn rejects_withdrawal_above_all_time_balance() {
        let mut ledger = Ledger::new();
        ledger.append("AC001", d(2023, 5, 5), TxnKind::Deposit, dec!(100)).unwrap();
        ledger.append("AC001", d(2023, 6, 1), TxnKind::Withdraw, dec!(30)).unwrap();

        let err = ledger
            .append("AC001", d(2023, 6, 2), TxnKind::Withdraw, dec!(70.01))
            .unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientFunds {
                account: "AC001".to_string(),
                available: dec!(70)
            }
        );

        ledger.append("AC001", d(2023, 6, 2), TxnKind::Withdraw, dec!(70)).unwrap();
        assert_eq!(ledger.balance("AC001").unwrap(), dec!(0));
    }

    #[test]
    fn rejection_leaves_counter_untouched() {
        let mut ledger = Ledger::new();
        ledger.append("AC001", d(2023, 6, 1), TxnKind::Deposit, dec!(10)).unwrap();
        assert!(ledger.append("AC001", d(2023, 6, 1), TxnKind::Withdraw, dec!(11)).is_err());

        let next = ledger.append("AC001", d(2023, 6, 1), TxnKind::Withdraw, dec!(5)).unwrap();
        assert_eq!(next.id.to_string(), "20230601-02");
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn back_dated_withdrawal_cannot_overdraw_history() {
        let mut ledger = Ledger::new();
        ledger.append("AC001", d(2023, 6, 1), TxnKind::Deposit, dec!(100)).unwrap();
        ledger.append("AC001", d(2023, 6, 20), TxnKind::Deposit, dec!(500)).unwrap();

        // Total is 600 but only 100 existed on 2023-06-10.
        let err = ledger
            .append("AC001", d(2023, 6, 10), TxnKind::Withdraw, dec!(150))
            .unwrap_err();
        assert!(
            matches!(err, Error::InsufficientFunds { available, .. } if available == dec!(100))
        );

        // Before any deposit there is nothing to withdraw.
        let err = ledger.append("AC001", d(2023, 5, 1), TxnKind::Withdraw, dec!(1)).unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { available, .. } if available == dec!(0)));
    }

    #[test]
    fn transactions_for_are_ordered_by_date_then_id() {
        let mut ledger = Ledger::new();
        ledger.append("AC001", d(2023, 6, 20), TxnKind::Deposit, dec!(1)).unwrap();
        ledger.append("AC002", d(2023, 6, 5), TxnKind::Deposit, dec!(2)).unwrap();
        ledger.append("AC001", d(2023, 6, 5), TxnKind::Deposit, dec!(3)).unwrap();
        ledger.append("AC001", d(2023, 6, 5), TxnKind::Deposit, dec!(4)).unwrap();

        let ids: Vec<String> = ledger
            .transactions_for("AC001")
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec!["20230605-02", "20230605-03", "20230620-01"]);
        assert_eq!(ledger.accounts(), vec!["AC001", "AC002"]);
        assert_eq!(ledger.balance("AC001").unwrap(), dec!(8));
    }

    #[test]
    fn rejects_entries_that_overflow_a_running_balance() {
        let mut ledger = Ledger::new();
        let near_max = Decimal::MAX - dec!(10);
        ledger.append("AC001", d(2023, 6, 10), TxnKind::Deposit, near_max).unwrap();

        let err = ledger.append("AC001", d(2023, 6, 11), TxnKind::Deposit, dec!(11)).unwrap_err();
        assert_eq!(
            err,
            Error::AmountOverflow {
                account: "AC001".to_string()
            }
        );
        assert!(err.is_validation());

        // Back-dated: fits on its own date but overflows the later balance.
        assert!(matches!(
            ledger.append("AC001", d(2023, 6, 1), TxnKind::Deposit, dec!(11)),
            Err(Error::AmountOverflow { .. })
        ));
        assert_eq!(ledger.len(), 1);

        // The ledger keeps working afterwards.
        ledger.append("AC001", d(2023, 6, 12), TxnKind::Withdraw, dec!(1)).unwrap();
        ledger.append("AC001", d(2023, 6, 12), TxnKind::Deposit, dec!(11)).unwrap();
        assert_eq!(ledger.balance("AC001").unwrap(), Decimal::MAX);
    }
}
