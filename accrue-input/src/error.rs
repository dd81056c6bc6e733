use thiserror::Error;

pub type Result<T> = std::result::Result<T, InputError>;

/// Raw-text input rejected before it reaches the ledger.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid format! Please enter in {usage} format.")]
    FieldCount { usage: &'static str, found: usize },

    #[error("Invalid date '{0}'! Use YYYYMMDD.")]
    Date(String),

    #[error("Invalid month '{0}'! Use YYYYMM.")]
    Month(String),

    #[error("Invalid transaction type '{0}'! Use 'D' for deposit or 'W' for withdrawal.")]
    Kind(String),

    #[error("Invalid amount '{0}'! Please enter a positive number with at most 2 decimal places.")]
    Amount(String),

    #[error("Interest rate '{0}' should be greater than 0 and less than or equal to 100.")]
    Rate(String),

    #[error("Invalid account '{0}'! Use letters, digits, '-' or '_'.")]
    Account(String),

    #[error("Invalid input pattern: {0}")]
    Pattern(#[from] regex::Error),
}
