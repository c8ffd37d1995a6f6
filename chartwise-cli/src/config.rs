//! Serializable batch configuration.
//!
//! A batch file lists the series to analyze and where to put the reports:
//!
//! ```toml
//! [output]
//! dir = "reports"
//! pretty = true
//!
//! [[series]]
//! symbol = "BTC"
//! timeframe = "1d"
//! path = "data/btc.csv"
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub series: Vec<SeriesJob>,
}

/// Where and how reports are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub pretty: bool,
    /// Analyze series on the rayon pool instead of one after another.
    pub parallel: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("reports"),
            pretty: false,
            parallel: true,
        }
    }
}

/// One series to analyze.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesJob {
    pub symbol: String,
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    pub path: PathBuf,
}

fn default_timeframe() -> String {
    "1d".to_string()
}

impl SeriesJob {
    /// Report file name: `<symbol>_<timeframe>.json`, always a single path
    /// component inside the output directory (`BTC/USDT` -> `BTC-USDT_1d.json`).
    pub fn report_file_name(&self) -> String {
        format!(
            "{}_{}.json",
            file_component(&self.symbol),
            file_component(&self.timeframe)
        )
    }
}

/// Keep ASCII alphanumerics, `-`, `_` and `.`; everything else becomes `-`.
fn file_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl BatchConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("parsing batch config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk. Relative series paths resolve against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config = Self::from_toml_str(&raw)
            .with_context(|| format!("in config {}", path.display()))?;

        if let Some(base) = path.parent() {
            for job in &mut config.series {
                if job.path.is_relative() {
                    job.path = base.join(&job.path);
                }
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            bail!("batch config has no [[series]] entries");
        }
        let mut seen = HashSet::new();
        for job in &self.series {
            if job.symbol.trim().is_empty() {
                bail!("series entry for {} has an empty symbol", job.path.display());
            }
            let file_name = job.report_file_name();
            if !seen.insert(file_name.clone()) {
                bail!(
                    "duplicate series {} {} (report {file_name})",
                    job.symbol,
                    job.timeframe
                );
            }
        }
        Ok(())
    }
}
