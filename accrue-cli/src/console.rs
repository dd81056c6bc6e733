//! Interactive console: main menu plus the three entry screens.
//!
//! Generic over reader/writer so a whole session can be driven from memory.
//! Input and validation errors are printed and the prompt repeats; only
//! invariant violations and I/O failures end the session.

use accrue_core::{
    Bank, InterestAccrualEngine, Statement, render_rules, render_statement, render_transactions,
};
use accrue_input::{
    LineParser, MenuChoice, RULE_USAGE, STATEMENT_USAGE, TRANSACTION_USAGE, TransactionRequest,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, error};

use crate::config::{Config, StatementFormat};

pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn say(&mut self, msg: impl AsRef<str>) -> Result<()> {
        writeln!(self.out, "{}", msg.as_ref())?;
        Ok(())
    }

    /// Print `> `, read one line. `None` at end of input.
    fn prompt(&mut self) -> Result<Option<String>> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        let mut s = String::new();
        let n = self.input.read_line(&mut s).context("read input")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }

    /// Prompt for a detail line; `None` when the user leaves it blank or input ends.
    fn prompt_entry(&mut self, header: &str) -> Result<Option<String>> {
        self.say("")?;
        self.say(header)?;
        self.say("(or enter blank to go back to main menu):")?;
        Ok(self.prompt()?.filter(|s| !s.is_empty()))
    }
}

/// One interactive session over a fresh, in-memory bank.
pub struct Session {
    bank: Bank,
    parser: LineParser,
    bank_name: String,
    format: StatementFormat,
}

#[derive(Serialize)]
struct JsonStatement<'a> {
    account: &'a str,
    month: String,
    lines: Vec<accrue_core::StatementRow>,
}

impl Session {
    pub fn new(cfg: &Config) -> Result<Self> {
        let engine =
            InterestAccrualEngine::new().with_day_count_basis(cfg.interest.day_count_basis);
        Ok(Self {
            bank: Bank::with_engine(engine),
            parser: LineParser::new()?,
            bank_name: cfg.bank.name.clone(),
            format: cfg.statement.format,
        })
    }

    pub fn with_format(mut self, format: StatementFormat) -> Self {
        self.format = format;
        self
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let mut greeting = format!("Welcome to {}! What would you like to do?", self.bank_name);

        loop {
            console.say(&greeting)?;
            console.say("[T] Input transactions")?;
            console.say("[I] Define interest rules")?;
            console.say("[P] Print statement")?;
            console.say("[Q] Quit")?;

            let Some(line) = console.prompt()? else {
                debug!("input closed at main menu");
                return self.goodbye(console);
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::RecordTransaction) => self.record_transactions(console)?,
                Some(MenuChoice::DefineRule) => self.define_rules(console)?,
                Some(MenuChoice::PrintStatement) => self.print_statements(console)?,
                Some(MenuChoice::Quit) => return self.goodbye(console),
                None => console.say("Invalid choice! Please enter T, I, P or Q.")?,
            }

            greeting = "\nIs there anything else you'd like to do?".to_string();
        }
    }

    fn goodbye<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.say("")?;
        console.say(format!("Thank you for banking with {}.", self.bank_name))?;
        console.say("Have a nice day!")
    }

    fn record_transactions<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        let header = format!("Please enter transaction details in {TRANSACTION_USAGE} format");
        while let Some(line) = console.prompt_entry(&header)? {
            let req = match self.parser.transaction(&line) {
                Ok(req) => req,
                Err(e) => {
                    console.say(e.to_string())?;
                    continue;
                }
            };

            let TransactionRequest {
                date,
                account,
                kind,
                amount,
            } = req;
            match self.bank.record_transaction(&account, date, kind, amount) {
                Ok(_) => {
                    let history = self.bank.transactions_for(&account);
                    console.say(render_transactions(&account, &history).trim_end())?;
                }
                Err(e) if e.is_validation() => console.say(e.to_string())?,
                Err(e) => {
                    error!(error = %e, "ledger invariant broken");
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    fn define_rules<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let header = format!("Please enter interest rules details in {RULE_USAGE} format");
        while let Some(line) = console.prompt_entry(&header)? {
            let rule = match self.parser.rule(&line) {
                Ok(req) => req.into_rule(),
                Err(e) => {
                    console.say(e.to_string())?;
                    continue;
                }
            };

            match self.bank.define_rule(rule) {
                Ok(_) => console.say(render_rules(self.bank.rules().iter()).trim_end())?,
                Err(e) => console.say(e.to_string())?,
            }
        }
        Ok(())
    }

    fn print_statements<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        let header =
            format!("Please enter account and month to generate the statement {STATEMENT_USAGE}");
        while let Some(line) = console.prompt_entry(&header)? {
            let req = match self.parser.statement(&line) {
                Ok(req) => req,
                Err(e) => {
                    console.say(e.to_string())?;
                    continue;
                }
            };

            if !self.bank.ledger().has_account(&req.account) {
                console.say(format!("No transactions found for account {}.", req.account))?;
                continue;
            }

            match self.bank.statement(&req.account, req.month) {
                Ok(statement) => console.say(self.render(&statement)?.trim_end())?,
                Err(e) if e.is_validation() => console.say(e.to_string())?,
                Err(e) => {
                    error!(error = %e, "statement generation failed");
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    fn render(&self, statement: &Statement) -> Result<String> {
        match self.format {
            StatementFormat::Table => Ok(render_statement(statement)),
            StatementFormat::Json => {
                let doc = JsonStatement {
                    account: &statement.account,
                    month: statement.month.to_string(),
                    lines: statement.rows(),
                };
                serde_json::to_string_pretty(&doc).context("serialize statement")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::YearMonth;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn run_script(script: &str, cfg: &Config) -> (Session, String) {
        let mut session = Session::new(cfg).unwrap();
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());
        session.run(&mut console).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        (session, out)
    }

    const JUNE_SCRIPT: &str = "\
I
20230520 RULE02 1.90
20230615 RULE03 2.20

T
20230601 AC001 D 250.00
20230626 AC001 W 120.00

P
AC001 202306

Q
";

    #[test]
    fn full_session_prints_statement_with_interest() {
        let (session, out) = run_script(JUNE_SCRIPT, &Config::default());

        assert!(out.starts_with("Welcome to AwesomeGIC Bank! What would you like to do?"));
        assert!(out.contains("| 20230615 | RULE03 |     2.20 |"));
        assert!(out.contains("| 20230626 | 20230626-01 | W    | 120.00 |"));
        assert!(out.contains("| 20230601 | 20230601-01 | D    | 250.00 |  250.00 |"));
        assert!(out.contains("| 20230630 |             | I    |   0.39 |  130.39 |"));
        assert!(out.contains("Is there anything else you'd like to do?"));
        assert!(out.trim_end().ends_with("Have a nice day!"));

        let month = YearMonth::new(2023, 6).unwrap();
        assert_eq!(session.bank().accrual("AC001", month).unwrap().interest, dec!(0.39));
    }

    #[test]
    fn invalid_entries_are_reported_and_reprompted() {
        let script = "\
X
T
20230626 AC001 W 100.00
20230601 AC001 D 0
20230601 AC001 D
20230601 AC001 D 100

Q
";
        let (session, out) = run_script(script, &Config::default());

        assert!(out.contains("Invalid choice! Please enter T, I, P or Q."));
        assert!(out.contains("The first transaction on account AC001 cannot be a withdrawal"));
        assert!(out.contains("Invalid amount '0'!"));
        assert!(out.contains(
            "Invalid format! Please enter in <Date> <Account> <Type> <Amount> format."
        ));
        assert_eq!(session.bank().ledger().len(), 1);
    }

    #[test]
    fn insufficient_funds_reports_available_balance() {
        let script = "T\n20230601 AC001 D 50\n20230602 AC001 W 80\n\nQ\n";
        let (_, out) = run_script(script, &Config::default());
        assert!(out.contains("you can withdraw up to 50.00"));
    }

    #[test]
    fn oversized_amounts_are_rejected_without_ending_session() {
        let script = "\
I
20230101 RULE01 5

T
20230601 AC001 D 60000000000000000000000000000
20230602 AC001 D 60000000000000000000000000000
20230601 AC002 D 1000000000000000000000000000

P
AC002 202306

T
20230603 AC001 W 1.00

Q
";
        let (session, out) = run_script(script, &Config::default());

        assert!(out.contains("Amount rejected on account AC001"));
        assert!(out.contains("Interest for account AC002 in 202306 exceeds the supported range"));
        assert!(out.contains("| 20230603 | 20230603-01 | W    |   1.00 |"));
        assert!(out.trim_end().ends_with("Have a nice day!"));
        assert_eq!(session.bank().ledger().len(), 3);
    }

    #[test]
    fn unknown_account_statement() {
        let (_, out) = run_script("P\nAC404 202306\n\nQ\n", &Config::default());
        assert!(out.contains("No transactions found for account AC404."));
    }

    #[test]
    fn end_of_input_ends_session() {
        let (_, out) = run_script("T\n20230601 AC001 D 50\n", &Config::default());
        assert!(out.contains("Have a nice day!"));
    }

    #[test]
    fn json_statement_format() {
        let mut cfg = Config::default();
        cfg.statement.format = StatementFormat::Json;
        cfg.bank.name = "Test Bank".to_string();
        let (_, out) = run_script(JUNE_SCRIPT, &cfg);

        assert!(out.starts_with("Welcome to Test Bank!"));
        assert!(out.contains("\"month\": \"202306\""));
        assert!(out.contains("\"balance\": \"130.39\""));
        assert!(out.contains("Thank you for banking with Test Bank."));
    }
}
