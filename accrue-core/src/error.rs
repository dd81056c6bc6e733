//! Error types for the ledger, the rule timeline and the accrual engine

use rust_decimal::Decimal;
use thiserror::Error;

use crate::statement::money;
use crate::time::YearMonth;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors.
///
/// Everything except `InvariantViolation` is a validation failure: the
/// rejected entry leaves the ledger and the timeline untouched and the caller
/// may simply ask again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Deposit or withdrawal of zero or less
    #[error("Invalid amount {0}: amount must be greater than zero")]
    NonPositiveAmount(Decimal),

    /// Withdrawal attempted on an account with no history
    #[error("The first transaction on account {account} cannot be a withdrawal")]
    FirstTransactionWithdrawal { account: String },

    /// Withdrawal larger than the account's all-time balance
    #[error(
        "Insufficient funds on account {account}: you can withdraw up to {}",
        cents(.available)
    )]
    InsufficientFunds { account: String, available: Decimal },

    /// A running balance of the account would leave `Decimal`'s range
    #[error("Amount rejected on account {account}: the balance would exceed the supported range")]
    AmountOverflow { account: String },

    /// The month's interest cannot be represented
    #[error("Interest for account {account} in {month} exceeds the supported range")]
    InterestOverflow { account: String, month: YearMonth },

    /// Interest rate outside (0, 100]
    #[error("Interest rate {0} should be greater than 0 and less than or equal to 100")]
    RateOutOfRange(Decimal),

    /// A collaborator broke an ordering or ownership contract
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// True for errors the caller can recover from by re-prompting.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::InvariantViolation(_))
    }
}

fn cents(amount: &Decimal) -> String {
    money(*amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn available_amount_is_rounded_half_up() {
        let err = |available| Error::InsufficientFunds {
            account: "AC001".to_string(),
            available,
        };
        assert!(err(dec!(50)).to_string().ends_with("you can withdraw up to 50.00"));
        assert!(err(dec!(70.005)).to_string().ends_with("you can withdraw up to 70.01"));
    }

    #[test]
    fn overflow_errors_are_recoverable() {
        let month = YearMonth::new(2023, 6).unwrap();
        let err = Error::InterestOverflow {
            account: "AC001".to_string(),
            month,
        };
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Interest for account AC001 in 202306 exceeds the supported range"
        );
        assert!(Error::AmountOverflow { account: "AC001".to_string() }.is_validation());
    }
}
