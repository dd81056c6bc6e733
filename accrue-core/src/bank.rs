//! Bank: the owned context bundling one ledger, one rule timeline and the
//! accrual engine. Writers take `&mut self`, statements take `&self`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accrual::{InterestAccrualEngine, MonthlyAccrual};
use crate::error::Result;
use crate::ledger::{Ledger, TransactionSource};
use crate::rules::{InterestRule, RuleTimeline};
use crate::statement::{Statement, StatementBuilder};
use crate::time::YearMonth;
use crate::transaction::{Transaction, TxnKind};

#[derive(Debug, Default, Clone)]
pub struct Bank {
    ledger: Ledger,
    rules: RuleTimeline,
    engine: InterestAccrualEngine,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: InterestAccrualEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn rules(&self) -> &RuleTimeline {
        &self.rules
    }

    pub fn record_transaction(
        &mut self,
        account: &str,
        date: NaiveDate,
        kind: TxnKind,
        amount: Decimal,
    ) -> Result<Transaction> {
        self.ledger.append(account, date, kind, amount)
    }

    pub fn define_rule(&mut self, rule: InterestRule) -> Result<Option<InterestRule>> {
        self.rules.upsert(rule)
    }

    /// All transactions of `account`, ordered by `(date, id)`.
    pub fn transactions_for(&self, account: &str) -> Vec<&Transaction> {
        self.ledger.transactions_for(account)
    }

    pub fn accrual(&self, account: &str, month: YearMonth) -> Result<MonthlyAccrual> {
        self.engine
            .compute_monthly_accrual(account, month, &self.ledger, &self.rules)
    }

    pub fn statement(&self, account: &str, month: YearMonth) -> Result<Statement> {
        let accrual = self.accrual(account, month)?;
        Ok(StatementBuilder::build(
            account,
            month,
            accrual.events,
            accrual.line,
        ))
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
    fn statement_reads_are_idempotent() {
        let mut bank = Bank::new();
        bank.define_rule(InterestRule::new(d(2023, 1, 1), "RULE01", dec!(2)))
            .unwrap();
        bank.record_transaction("AC001", d(2023, 6, 5), TxnKind::Deposit, dec!(500))
            .unwrap();

        let month = YearMonth::new(2023, 6).unwrap();
        let first = bank.statement("AC001", month).unwrap();
        let second = bank.statement("AC001", month).unwrap();
        assert_eq!(first, second);
        assert_eq!(bank.ledger().len(), 1);
    }

    #[test]
    fn rejected_entries_leave_state_unchanged() {
        let mut bank = Bank::new();
        assert!(bank
            .record_transaction("AC001", d(2023, 6, 5), TxnKind::Withdraw, dec!(5))
            .is_err());
        assert!(bank
            .define_rule(InterestRule::new(d(2023, 1, 1), "RULE01", dec!(0)))
            .is_err());
        assert!(bank.ledger().is_empty());
        assert!(bank.rules().is_empty());
    }
}
