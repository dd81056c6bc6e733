//! accrue-input: raw console text into typed, validated requests for the ledger.

pub mod error;
pub mod parsers;
pub mod types;

pub use error::{InputError, Result};
pub use parsers::{FieldParser, LineParser, RULE_USAGE, STATEMENT_USAGE, TRANSACTION_USAGE};
pub use types::{MenuChoice, RuleRequest, StatementRequest, TransactionRequest};
