use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// `~/.accrue`, or `None` when HOME is not set.
pub fn accrue_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".accrue"))
}

pub fn default_config_path() -> Option<PathBuf> {
    accrue_home().map(|dir| dir.join("config.toml"))
}

/// Create the directory that will hold `path`.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    Ok(())
}
