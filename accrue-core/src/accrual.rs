//! Interest accrual engine.
//!
//! Given one account's history and the rule timeline, compute the interest a
//! calendar month earns and the synthetic month-end line carrying it.
//!
//! The month is cut into day-segments at every balance event and at a rate
//! change falling between two events:
//! - between consecutive events the previous event's balance holds; if the
//!   rule active at the later event took effect after the earlier event the
//!   gap is split at its effective date, the first part priced at the rule
//!   preceding it
//! - after the last event its balance holds through month end, inclusive,
//!   at the rule active on that event's date
//! - nothing is charged before the month's first event
//!
//! Each segment charges `balance * rate * days / 100`; the month's sum is
//! divided by the day-count basis and rounded half-up to cents.
//!
//! A segment with no applicable rule contributes zero. Arithmetic is checked;
//! a month whose interest leaves `Decimal`'s range is an
//! `Error::InterestOverflow`.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::balance::{BalanceEvent, in_month, running_balances};
use crate::error::{Error, Result};
use crate::ledger::TransactionSource;
use crate::rules::{InterestRule, RuleSource};
use crate::statement::InterestLine;
use crate::time::{YearMonth, days_between};

/// Days per year used to turn summed day-charges into interest.
pub const DEFAULT_DAY_COUNT_BASIS: u32 = 365;

/// Un-annualised charge for `days` at `rate` percent: `rate * days * balance / 100`.
///
/// `None` on overflow.
pub fn calculate_interest_amount(balance: Decimal, rate: Decimal, days: i64) -> Option<Decimal> {
    rate.checked_mul(Decimal::from(days))?
        .checked_mul(balance)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Result of one month's accrual.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAccrual {
    /// Rounded to 2 decimal places
    pub interest: Decimal,
    /// The month's balance events, carried-forward balances included
    pub events: Vec<BalanceEvent>,
    pub line: InterestLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestAccrualEngine {
    day_count_basis: u32,
}

impl Default for InterestAccrualEngine {
    fn default() -> Self {
        Self {
            day_count_basis: DEFAULT_DAY_COUNT_BASIS,
        }
    }
}

impl InterestAccrualEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day_count_basis(mut self, days: u32) -> Self {
        self.day_count_basis = days.max(1);
        self
    }

    pub fn day_count_basis(&self) -> u32 {
        self.day_count_basis
    }

    /// Compute `month`'s interest for `account`.
    ///
    /// Reads only. Errors when `transactions` breaks its ordering contract or
    /// the interest overflows.
    pub fn compute_monthly_accrual<T, R>(
        &self,
        account: &str,
        month: YearMonth,
        transactions: &T,
        rules: &R,
    ) -> Result<MonthlyAccrual>
    where
        T: TransactionSource + ?Sized,
        R: RuleSource + ?Sized,
    {
        let history = transactions.transactions_for(account);
        let events = in_month(running_balances(account, &history)?, month);

        let overflow = || Error::InterestOverflow {
            account: account.to_string(),
            month,
        };

        let charges = self.day_charges(&events, month, rules).ok_or_else(overflow)?;
        let interest = charges
            .checked_div(Decimal::from(self.day_count_basis))
            .ok_or_else(overflow)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let closing = events
            .last()
            .map(|e| e.running_balance)
            .unwrap_or(Decimal::ZERO);
        let running_balance = closing.checked_add(interest).ok_or_else(overflow)?;

        debug!(account, %month, events = events.len(), %charges, %interest, "monthly accrual");

        let line = InterestLine {
            account: account.to_string(),
            date: month.last_day(),
            amount: interest,
            running_balance,
        };

        Ok(MonthlyAccrual {
            interest,
            events,
            line,
        })
    }

    /// Sum of un-annualised segment charges for the month's events, `None` on
    /// overflow.
    fn day_charges<R: RuleSource + ?Sized>(
        &self,
        events: &[BalanceEvent],
        month: YearMonth,
        rules: &R,
    ) -> Option<Decimal> {
        let mut total = Decimal::ZERO;

        for pair in events.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);

            let Some(rule) = rules.active_at(current.date) else {
                warn!(
                    account = %current.account,
                    date = %current.date,
                    "no interest rule active; segment earns nothing"
                );
                continue;
            };

            if prev.date < rule.effective_date {
                // Rate changed inside the gap: price the part before the change
                // at the preceding rule.
                match rules.preceding_rule_of(rule) {
                    Some(before) => {
                        let part = charge(prev, before, prev.date, rule.effective_date)?;
                        total = total.checked_add(part)?;
                    }
                    None => {
                        warn!(
                            account = %prev.account,
                            from = %prev.date,
                            to = %rule.effective_date,
                            "no interest rule before {}; segment earns nothing",
                            rule.id
                        );
                    }
                }
                let part = charge(prev, rule, rule.effective_date, current.date)?;
                total = total.checked_add(part)?;
            } else {
                total = total.checked_add(charge(prev, rule, prev.date, current.date)?)?;
            }
        }

        if let Some(last) = events.last() {
            match rules.active_at(last.date) {
                Some(rule) => {
                    let end = month.last_day().succ_opt().unwrap_or(NaiveDate::MAX);
                    total = total.checked_add(charge(last, rule, last.date, end)?)?;
                }
                None => {
                    warn!(
                        account = %last.account,
                        date = %last.date,
                        "no interest rule active; month tail earns nothing"
                    );
                }
            }
        }

        Some(total)
    }
}

/// Charge `event`'s balance at `rule` for the days in `[from, to)`.
fn charge(
    event: &BalanceEvent,
    rule: &InterestRule,
    from: NaiveDate,
    to: NaiveDate,
) -> Option<Decimal> {
    let days = days_between(from, to);
    let balance = event.running_balance;
    let Some(amount) = calculate_interest_amount(balance, rule.rate_percent, days) else {
        warn!(
            %balance,
            rule = %rule.id,
            days,
            "day-segment charge overflowed"
        );
        return None;
    };
    debug!(
        from = %from,
        to = %to,
        days,
        %balance,
        rule = %rule.id,
        rate = %rule.rate_percent,
        %amount,
        "day-segment"
    );
    Some(amount)
}
