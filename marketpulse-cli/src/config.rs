//! TOML run configuration.
//!
//! A config file fills in whatever the command line leaves unset; explicit
//! flags always win.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub symbol: Option<String>,
    /// Strategy name: ma_crossover, rsi, combined, or all.
    pub strategy: Option<String>,
    #[serde(default)]
    pub data: DataSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSection {
    /// CSV bar file; when absent the synthetic walk is used.
    pub csv: Option<PathBuf>,
    pub bars: Option<usize>,
    pub seed: Option<u64>,
    pub start_price: Option<f64>,
    pub drift: Option<f64>,
    pub volatility: Option<f64>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}
