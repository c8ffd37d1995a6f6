//! Bar loading from CSV and JSON files.
//!
//! Rows are taken as-is: no sorting, no deduplication. `Series::new` rejects
//! anything out of order, which is the data provider's job to fix.

use anyhow::{anyhow, bail, Context, Result};
use chartwise_core::{Bar, Series};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// JSON accepts either an RFC 3339 string or integer Unix seconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Unix(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    timestamp: RawTimestamp,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Parse RFC 3339 (`2024-01-02T00:00:00Z`) or Unix seconds (`1704153600`).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<i64>() {
        return from_unix(secs);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("invalid timestamp '{raw}'"))
}

fn from_unix(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| anyhow!("unix timestamp {secs} out of range"))
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Bar>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();
    for (line, row) in rdr.deserialize::<CsvRow>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let row = row.with_context(|| format!("CSV row {}", line + 2))?;
        bars.push(Bar {
            timestamp: parse_timestamp(&row.timestamp)
                .with_context(|| format!("CSV row {}", line + 2))?,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }
    Ok(bars)
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<Bar>> {
    let rows: Vec<JsonRow> = serde_json::from_reader(reader).context("parsing JSON bars")?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let timestamp = match row.timestamp {
                RawTimestamp::Unix(secs) => from_unix(secs),
                RawTimestamp::Text(text) => parse_timestamp(&text),
            }
            .with_context(|| format!("JSON element {i}"))?;
            Ok(Bar {
                timestamp,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            })
        })
        .collect()
}

/// Load bars from `path`, choosing the format by extension (`.csv` or `.json`).
pub fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let read: fn(BufReader<File>) -> Result<Vec<Bar>> = match ext.as_deref() {
        Some("csv") => read_csv,
        Some("json") => read_json,
        _ => bail!(
            "unsupported input format for {} (expected .csv or .json)",
            path.display()
        ),
    };

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read(BufReader::new(file)).with_context(|| format!("reading {}", path.display()))
}

/// Load and validate a series.
pub fn load_series(path: &Path) -> Result<Series> {
    let bars = load_bars(path)?;
    tracing::debug!(path = %path.display(), bars = bars.len(), "loaded bars");
    Series::new(bars).with_context(|| format!("invalid series in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const CSV: &str = "\
timestamp,open,high,low,close,volume
2024-01-02T00:00:00Z,100,105,99,104,1500
1704240000,104,106,101,102,1200
";

    #[test]
    fn csv_with_mixed_timestamps() {
        let bars = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(
            bars[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            bars[1].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()
        );
        assert_eq!(bars[1].close, 102.0);
        assert_eq!(bars[0].volume, 1500.0);
    }

    #[test]
    fn csv_bad_number_names_the_row() {
        let data = "timestamp,open,high,low,close,volume\n2024-01-02T00:00:00Z,x,1,1,1,1\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 2"));
    }

    #[test]
    fn json_accepts_string_and_number_timestamps() {
        let data = r#"[
            {"timestamp": "2024-01-02T00:00:00+00:00", "open": 1, "high": 2, "low": 0.5, "close": 1.5, "volume": 10},
            {"timestamp": 1704240000, "open": 1.5, "high": 2, "low": 1, "close": 1.8, "volume": 12}
        ]"#;
        let bars = read_json(data.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars[1].timestamp > bars[0].timestamp);
    }

    #[test]
    fn rfc3339_offsets_are_normalized_to_utc() {
        let t = parse_timestamp("2024-01-02T03:00:00+03:00").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn unknown_extension_is_rejected_before_opening() {
        let err = load_bars(Path::new("does-not-exist.parquet")).unwrap_err();
        assert!(err.to_string().contains("unsupported input format"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_bars(Path::new("does-not-exist.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("does-not-exist.csv"));
    }
}
