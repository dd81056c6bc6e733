use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

mod config;
mod console;
mod logging;
mod state;

use config::StatementFormat;
use console::{Console, Session};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ACCRUE_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "accrue",
    version = VERSION,
    about = "Interactive ledger with monthly interest statements"
)]
struct Cli {
    /// Config file (default: ~/.accrue/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `accrue_core=trace` (RUST_LOG wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start an interactive session (default)
    Run {
        /// Statement output format (overrides config)
        #[arg(long, value_enum)]
        format: Option<StatementFormat>,
    },

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if it does not exist
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg_path = cli.config.clone().or_else(state::default_config_path);
    let cfg = config::load_config(cfg_path.as_deref())?;

    logging::init(cli.log_level.as_deref().unwrap_or(&cfg.logging.filter));
    tracing::debug!(config = ?cfg_path, "configuration loaded");

    match cli.command.unwrap_or(Command::Run { format: None }) {
        Command::Run { format } => {
            let mut session = Session::new(&cfg)?;
            if let Some(format) = format {
                session = session.with_format(format);
            }
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            session.run(&mut console)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let path = cfg_path.context("HOME is not set; pass --config <path>")?;
                config::init_config(&path)?;
            }
            ConfigCommand::Show => {
                let s = toml::to_string_pretty(&cfg).context("serialize config")?;
                print!("{s}");
            }
        },
    }

    Ok(())
}
