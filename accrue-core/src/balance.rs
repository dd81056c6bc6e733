//! Balance events: transactions annotated with the running balance after them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::time::YearMonth;
use crate::transaction::{Transaction, TransactionId, TxnKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEvent {
    pub account: String,
    pub date: NaiveDate,
    pub id: TransactionId,
    pub kind: TxnKind,
    pub amount: Decimal,
    /// Cumulative signed sum of the account's transactions up to and including this one
    pub running_balance: Decimal,
}

/// Annotate one account's full history with running balances.
///
/// `transactions` must belong to `account` and be ordered by `(date, id)`;
/// anything else is reported as an invariant violation. A running balance
/// outside `Decimal`'s range is reported as `Error::AmountOverflow`.
pub fn running_balances(
    account: &str,
    transactions: &[&Transaction],
) -> Result<Vec<BalanceEvent>> {
    let mut running = Decimal::ZERO;
    let mut out = Vec::with_capacity(transactions.len());
    let mut last: Option<TransactionId> = None;

    for t in transactions {
        if t.account != account {
            return Err(Error::InvariantViolation(format!(
                "transaction {} belongs to account {}, expected {}",
                t.id, t.account, account
            )));
        }
        if last.is_some_and(|prev| prev >= t.id) {
            return Err(Error::InvariantViolation(format!(
                "transaction {} is out of (date, id) order",
                t.id
            )));
        }
        last = Some(t.id);

        running = running
            .checked_add(t.signed_amount())
            .ok_or_else(|| Error::AmountOverflow {
                account: account.to_string(),
            })?;
        out.push(BalanceEvent {
            account: t.account.clone(),
            date: t.date,
            id: t.id,
            kind: t.kind,
            amount: t.amount,
            running_balance: running,
        });
    }

    Ok(out)
}

/// Keep the events dated inside `month`. Balances are already carried from
/// earlier months because they were computed over the full history.
pub fn in_month(events: Vec<BalanceEvent>, month: YearMonth) -> Vec<BalanceEvent> {
    events.into_iter().filter(|e| month.contains(e.date)).collect()
}
