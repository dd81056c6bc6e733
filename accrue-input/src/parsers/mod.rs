pub mod fields;
pub mod lines;

pub use fields::FieldParser;
pub use lines::{LineParser, RULE_USAGE, STATEMENT_USAGE, TRANSACTION_USAGE};
