use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use gofin_core::{CategoryCatalog, CategoryDef, time::parse_timezone};
use gofin_finance::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::{default_config_path, default_store_path, ensure_gofin_home};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Whose transactions to read when `--user` is not given
    pub user_id: String,
    pub locale: Locale,
    /// IANA zone used to turn stored timestamps into calendar days
    pub timezone: String,
    /// Store file; defaults to `~/.gofin/storage.json`
    pub store_path: Option<PathBuf>,
    pub read_timeout_ms: u64,
    /// Overrides the built-in catalog when present
    pub categories: Option<Vec<CategoryDef>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: "default".to_string(),
            locale: Locale::PtBr,
            timezone: "America/Sao_Paulo".to_string(),
            store_path: None,
            read_timeout_ms: 2000,
            categories: None,
        }
    }
}

impl Config {
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone).ok_or_else(|| anyhow!("invalid timezone: {}", self.timezone))
    }

    pub fn catalog(&self) -> CategoryCatalog {
        match &self.categories {
            Some(entries) => CategoryCatalog::new(entries.clone()),
            None => CategoryCatalog::default(),
        }
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(p) => Ok(p.clone()),
            None => default_store_path(),
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Load the config at `path` (or the default location). A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !p.exists() {
        tracing::debug!(path = %p.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg = parse_config(&s).with_context(|| format!("parse {}", p.display()))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    // fail early rather than on first use
    cfg.tz()?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_gofin_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
