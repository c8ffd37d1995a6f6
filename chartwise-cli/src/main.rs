//! Chartwise CLI: analyze, batch, and levels commands.
//!
//! Commands:
//! - `analyze`: full technical analysis of one CSV/JSON bar file, printed as JSON
//! - `batch`: analyze every series listed in a TOML config and write one report each
//! - `levels`: support/resistance only (accepts series too short for `analyze`)
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); stdout carries only JSON.

mod config;
mod loader;

use anyhow::{bail, Context, Result};
use chartwise_core::{
    analyze, analyze_batch, analyze_batch_sequential, find_levels, AnalysisReport, ReportMeta,
    Series,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::BatchConfig;
use crate::loader::load_series;

#[derive(Parser)]
#[command(
    name = "chartwise",
    about = "Chartwise CLI: technical indicators, signals, trend and levels for OHLCV series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one bar file and print the report as JSON.
    Analyze {
        /// Input file (.csv or .json) with timestamp,open,high,low,close,volume.
        #[arg(long)]
        input: PathBuf,

        /// Symbol echoed into the report. Defaults to the input file stem.
        #[arg(long)]
        symbol: Option<String>,

        /// Timeframe label echoed into the report.
        #[arg(long, default_value = "1d")]
        timeframe: String,

        /// Pretty-print the JSON.
        #[arg(long, default_value_t = false)]
        pretty: bool,

        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Analyze every series in a TOML batch config.
    Batch {
        /// Path to the batch config file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Print support and resistance levels only.
    Levels {
        /// Input file (.csv or .json).
        #[arg(long)]
        input: PathBuf,

        /// Pretty-print the JSON.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            symbol,
            timeframe,
            pretty,
            output,
        } => run_analyze(&input, symbol, timeframe, pretty, output.as_deref()),
        Commands::Batch { config } => run_batch(&config),
        Commands::Levels { input, pretty } => run_levels(&input, pretty),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(
    input: &Path,
    symbol: Option<String>,
    timeframe: String,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let series = load_series(input)?;
    let symbol = symbol.unwrap_or_else(|| symbol_from_path(input));
    let analysis = analyze(&series).with_context(|| format!("analyzing {}", input.display()))?;

    info!(
        %symbol,
        bars = series.len(),
        overall = ?analysis.signals.overall.signal,
        trend = ?analysis.trend.direction,
        "analysis complete"
    );

    let report = AnalysisReport::new(
        ReportMeta { symbol, timeframe },
        &series,
        analysis,
        Utc::now(),
    );
    match output {
        Some(path) => {
            write_json(path, &report, pretty)?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{}", to_json(&report, pretty)?),
    }
    Ok(())
}

fn run_batch(config_path: &Path) -> Result<()> {
    let config = BatchConfig::from_file(config_path)?;
    std::fs::create_dir_all(&config.output.dir)
        .with_context(|| format!("creating {}", config.output.dir.display()))?;

    // Every job runs; load, analysis and write failures are logged and counted.
    let mut failures = 0usize;
    let mut jobs = Vec::new();
    let mut batch: Vec<Series> = Vec::new();
    for job in &config.series {
        match load_series(&job.path) {
            Ok(series) => {
                jobs.push(job);
                batch.push(series);
            }
            Err(e) => {
                error!(symbol = %job.symbol, timeframe = %job.timeframe, "{e:#}");
                failures += 1;
            }
        }
    }

    info!(
        series = batch.len(),
        parallel = config.output.parallel,
        "running batch"
    );
    let results = if config.output.parallel {
        analyze_batch(&batch)
    } else {
        analyze_batch_sequential(&batch)
    };

    let generated_at = Utc::now();
    for ((job, series), result) in jobs.into_iter().zip(&batch).zip(results) {
        let analysis = match result {
            Ok(analysis) => analysis,
            Err(e) => {
                error!(symbol = %job.symbol, timeframe = %job.timeframe, "{e}");
                failures += 1;
                continue;
            }
        };
        let meta = ReportMeta {
            symbol: job.symbol.clone(),
            timeframe: job.timeframe.clone(),
        };
        let report = AnalysisReport::new(meta, series, analysis, generated_at);
        let path = config.output.dir.join(job.report_file_name());
        match write_json(&path, &report, config.output.pretty) {
            Ok(()) => info!(symbol = %job.symbol, path = %path.display(), "report written"),
            Err(e) => {
                error!(symbol = %job.symbol, timeframe = %job.timeframe, "{e:#}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} series failed", config.series.len());
    }
    Ok(())
}

fn run_levels(input: &Path, pretty: bool) -> Result<()> {
    let series = load_series(input)?;
    let levels = find_levels(&series);
    if levels.is_empty() {
        warn!(bars = series.len(), "no local extrema found");
    }
    println!("{}", to_json(&levels, pretty)?);
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    std::fs::write(path, to_json(value, pretty)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// `data/btc-usd.csv` → `BTC-USD`.
fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Daily bars from 2024-01-02 with open == close and a one-point range.
    fn write_csv(path: &Path, closes: &[f64]) {
        let mut csv = String::from("timestamp,open,high,low,close,volume\n");
        for (i, c) in closes.iter().enumerate() {
            let ts = 1_704_153_600 + i as i64 * 86_400;
            csv.push_str(&format!("{ts},{c},{},{},{c},1000\n", c + 1.0, c - 1.0));
        }
        std::fs::write(path, csv).unwrap();
    }

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    fn read_report(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn batch_runs_every_job_and_counts_failures() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        write_csv(&tmp.path().join("btc.csv"), &rising(30));
        write_csv(&tmp.path().join("eth.csv"), &rising(3));
        write_csv(&tmp.path().join("ada.csv"), &rising(30));
        write_csv(&tmp.path().join("dot.csv"), &rising(30));
        // A directory where ADA's report should go makes that write fail.
        std::fs::create_dir_all(out.join("ADA_1d.json")).unwrap();

        let config = format!(
            r#"
            [output]
            dir = '{}'

            [[series]]
            symbol = "BTC/USDT"
            path = "btc.csv"

            [[series]]
            symbol = "ETH"
            path = "eth.csv"

            [[series]]
            symbol = "SOL"
            path = "missing.csv"

            [[series]]
            symbol = "ADA"
            path = "ada.csv"

            [[series]]
            symbol = "DOT"
            timeframe = "4h"
            path = "dot.csv"
            "#,
            out.display()
        );
        let config_path = tmp.path().join("batch.toml");
        std::fs::write(&config_path, config).unwrap();

        let err = run_batch(&config_path).unwrap_err();
        assert_eq!(err.to_string(), "3 of 5 series failed");

        let btc = read_report(&out.join("BTC-USDT_1d.json"));
        assert_eq!(btc["symbol"], "BTC/USDT");
        assert_eq!(btc["bars"], 30);
        let dot = read_report(&out.join("DOT_4h.json"));
        assert_eq!(dot["timeframe"], "4h");
        assert!(!out.join("ETH_1d.json").exists());
        assert!(!out.join("SOL_1d.json").exists());
    }

    #[test]
    fn batch_succeeds_when_every_job_does() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("reports");
        write_csv(&tmp.path().join("btc.csv"), &rising(25));
        let config = format!(
            "[output]\ndir = '{}'\nparallel = false\n\n[[series]]\nsymbol = \"BTC\"\npath = \"btc.csv\"\n",
            out.display()
        );
        let config_path = tmp.path().join("batch.toml");
        std::fs::write(&config_path, config).unwrap();

        run_batch(&config_path).unwrap();
        assert_eq!(read_report(&out.join("BTC_1d.json"))["bars"], 25);
    }

    #[test]
    fn analyze_writes_report_to_output() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("btc.csv");
        let output = tmp.path().join("btc.json");
        write_csv(&input, &rising(40));

        run_analyze(&input, None, "1h".to_string(), true, Some(&output)).unwrap();

        let report = read_report(&output);
        assert_eq!(report["symbol"], "BTC");
        assert_eq!(report["timeframe"], "1h");
        assert_eq!(report["bars"], 40);
        assert!(report["signals"]["overall"]["signal"].is_string());
    }

    #[test]
    fn analyze_rejects_short_series() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("eth.csv");
        write_csv(&input, &rising(3));
        let err = run_analyze(&input, None, "1d".to_string(), false, None).unwrap_err();
        assert!(format!("{err:#}").contains("analyzing"));
    }

    #[test]
    fn levels_accepts_short_series() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("eth.csv");
        write_csv(&input, &rising(3));
        run_levels(&input, false).unwrap();
    }

    #[test]
    fn symbol_defaults_to_upper_file_stem() {
        assert_eq!(symbol_from_path(Path::new("data/btc-usd.csv")), "BTC-USD");
        assert_eq!(symbol_from_path(Path::new("/")), "UNKNOWN");
    }

    #[test]
    fn cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "chartwise",
            "analyze",
            "--input",
            "bars.csv",
            "--timeframe",
            "4h",
            "--pretty",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                input,
                symbol,
                timeframe,
                pretty,
                output,
            } => {
                assert_eq!(input, PathBuf::from("bars.csv"));
                assert_eq!(symbol, None);
                assert_eq!(timeframe, "4h");
                assert!(pretty);
                assert!(output.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn cli_requires_batch_config() {
        assert!(Cli::try_parse_from(["chartwise", "batch"]).is_err());
    }

    #[test]
    fn compact_and_pretty_json() {
        let levels = chartwise_core::Levels {
            support: vec![1.0],
            resistance: vec![],
        };
        assert_eq!(
            to_json(&levels, false).unwrap(),
            r#"{"support":[1.0],"resistance":[]}"#
        );
        assert!(to_json(&levels, true).unwrap().contains('\n'));
    }
}
