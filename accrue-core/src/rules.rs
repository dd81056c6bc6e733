//! RuleTimeline: interest-rate rules keyed by effective date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::error::{Error, Result};

/// An interest rate that applies from `effective_date` until the next rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRule {
    pub effective_date: NaiveDate,
    pub id: String,
    /// Annual rate in percent, within (0, 100]
    pub rate_percent: Decimal,
}

impl InterestRule {
    pub fn new(effective_date: NaiveDate, id: impl Into<String>, rate_percent: Decimal) -> Self {
        Self {
            effective_date,
            id: id.into(),
            rate_percent,
        }
    }
}

/// Rate lookups needed by the accrual engine.
pub trait RuleSource {
    /// The rule with the greatest effective date `<= date`.
    fn active_at(&self, date: NaiveDate) -> Option<&InterestRule>;

    /// The rule immediately before `rule` in effective-date order.
    fn preceding_rule_of(&self, rule: &InterestRule) -> Option<&InterestRule>;
}

#[derive(Debug, Default, Clone)]
pub struct RuleTimeline {
    rules: BTreeMap<NaiveDate, InterestRule>,
}

impl RuleTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Insert a rule, replacing any rule with the same effective date.
    /// Returns the replaced rule, if any.
    pub fn upsert(&mut self, rule: InterestRule) -> Result<Option<InterestRule>> {
        if rule.rate_percent <= Decimal::ZERO || rule.rate_percent > Decimal::ONE_HUNDRED {
            return Err(Error::RateOutOfRange(rule.rate_percent));
        }

        info!(
            rule_id = %rule.id,
            effective = %rule.effective_date,
            rate = %rule.rate_percent,
            "interest rule defined"
        );
        Ok(self.rules.insert(rule.effective_date, rule))
    }

    /// Rules in effective-date order.
    pub fn iter(&self) -> impl Iterator<Item = &InterestRule> {
        self.rules.values()
    }
}

impl RuleSource for RuleTimeline {
    fn active_at(&self, date: NaiveDate) -> Option<&InterestRule> {
        self.rules.range(..=date).next_back().map(|(_, r)| r)
    }

    fn preceding_rule_of(&self, rule: &InterestRule) -> Option<&InterestRule> {
        self.rules
            .range(..rule.effective_date)
            .next_back()
            .map(|(_, r)| r)
    }
}
