//! accrue-core: ledger, interest-rule timeline and the monthly interest accrual engine

pub mod accrual;
pub mod balance;
pub mod bank;
pub mod error;
pub mod ledger;
pub mod rules;
pub mod statement;
pub mod time;
pub mod transaction;

pub use accrual::{
    DEFAULT_DAY_COUNT_BASIS, InterestAccrualEngine, MonthlyAccrual, calculate_interest_amount,
};
pub use balance::{BalanceEvent, running_balances};
pub use bank::Bank;
pub use error::{Error, Result};
pub use ledger::{Ledger, TransactionSource};
pub use rules::{InterestRule, RuleSource, RuleTimeline};
pub use statement::{
    InterestLine, Statement, StatementBuilder, StatementLine, StatementRow, render_rules,
    render_statement, render_transactions,
};
pub use time::{DATE_FORMAT, YearMonth};
pub use transaction::{Transaction, TransactionId, TxnKind};
