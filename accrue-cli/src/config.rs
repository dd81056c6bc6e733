use accrue_core::DEFAULT_DAY_COUNT_BASIS;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::state::ensure_parent;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bank: BankSection,
    pub interest: InterestSection,
    pub statement: StatementSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankSection {
    /// Shown in the welcome and goodbye banners
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestSection {
    /// Days per year used to annualise daily charges
    pub day_count_basis: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementSection {
    pub format: StatementFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatementFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing EnvFilter directive; RUST_LOG overrides it
    pub filter: String,
}

impl Default for BankSection {
    fn default() -> Self {
        Self {
            name: "AwesomeGIC Bank".to_string(),
        }
    }
}

impl Default for InterestSection {
    fn default() -> Self {
        Self {
            day_count_basis: DEFAULT_DAY_COUNT_BASIS,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Load `path`, falling back to defaults when there is no file.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(p) = path.filter(|p| p.exists()) else {
        return Ok(Config::default());
    };
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    ensure_parent(path)?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg = parse_config("[bank]\nname = \"Test Bank\"\n").unwrap();
        assert_eq!(cfg.bank.name, "Test Bank");
        assert_eq!(cfg.interest.day_count_basis, 365);
        assert_eq!(cfg.statement.format, StatementFormat::Table);
        assert_eq!(cfg.logging.filter, "warn");
    }

    #[test]
    fn test_parse_full_config() {
        let cfg = parse_config(
            r#"
[bank]
name = "GIC"

[interest]
day_count_basis = 360

[statement]
format = "json"

[logging]
filter = "accrue_core=debug"
"#,
        )
        .unwrap();
        assert_eq!(cfg.interest.day_count_basis, 360);
        assert_eq!(cfg.statement.format, StatementFormat::Json);
        assert_eq!(cfg.logging.filter, "accrue_core=debug");
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn absent_file_means_defaults() {
        let cfg = load_config(Some(Path::new("/definitely/not/here/config.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(load_config(None).unwrap(), Config::default());
    }
}
