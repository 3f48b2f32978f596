use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$GOFIN_HOME`, or `~/.gofin`.
pub fn gofin_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("GOFIN_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".gofin"))
}

pub fn ensure_gofin_home() -> Result<PathBuf> {
    let dir = gofin_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(gofin_home()?.join("config.toml"))
}

pub fn default_store_path() -> Result<PathBuf> {
    Ok(gofin_home()?.join("storage.json"))
}
