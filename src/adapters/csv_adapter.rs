//! CSV price loader and processed-table exporter.

use crate::domain::error::QuantError;
use crate::domain::indicator::AnalyzedSeries;
use crate::domain::ohlcv::{DATE_COLUMN, PRICE_COLUMNS, PriceRecord, PriceSeries};
use crate::ports::data_port::PriceSource;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extra columns appended when extended metrics were computed.
pub const METRIC_COLUMNS: [&str; 2] = ["Sharpe_Ratio", "Volatility"];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub struct CsvPriceSource {
    base_path: PathBuf,
}

impl CsvPriceSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path
            .join(format!("{}_historical_data.csv", symbol))
    }
}

impl PriceSource for CsvPriceSource {
    fn load(&self, symbol: &str) -> Result<PriceSeries, QuantError> {
        let path = self.csv_path(symbol);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(QuantError::NotFound {
                    symbol: symbol.to_string(),
                    path,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(file);
        let headers = rdr
            .headers()
            .map_err(|e| malformed(symbol, format!("CSV header error: {}", e)))?
            .clone();

        let position = |name: &str| headers.iter().position(|h| h == name);
        let missing: Vec<String> = std::iter::once(DATE_COLUMN)
            .chain(PRICE_COLUMNS)
            .filter(|name| position(*name).is_none())
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(QuantError::Schema {
                symbol: symbol.to_string(),
                missing,
            });
        }

        // Both lookups succeeded above.
        let date_idx = position(DATE_COLUMN).unwrap_or_default();
        let price_idx = PRICE_COLUMNS.map(|name| position(name).unwrap_or_default());
        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record =
                result.map_err(|e| malformed(symbol, format!("CSV parse error: {}", e)))?;
            let line = row + 2;

            let raw_date = record.get(date_idx).unwrap_or_default();
            let timestamp = parse_timestamp(raw_date).ok_or_else(|| {
                malformed(symbol, format!("invalid date '{}' on line {}", raw_date, line))
            })?;

            let mut values = [0.0; 5];
            for (slot, (&idx, name)) in values.iter_mut().zip(price_idx.iter().zip(PRICE_COLUMNS)) {
                let raw = record.get(idx).unwrap_or_default().trim();
                *slot = raw.parse().map_err(|_| {
                    malformed(symbol, format!("invalid {} value '{}' on line {}", name, raw, line))
                })?;
            }
            let [open, high, low, close, volume] = values;

            let fields = record
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != date_idx)
                .map(|(_, f)| f.to_string())
                .collect();

            records.push(PriceRecord {
                timestamp,
                raw_date: raw_date.to_string(),
                open,
                high,
                low,
                close,
                volume,
                fields,
            });
        }

        records.sort_by_key(|r| r.timestamp);
        if let Some(pair) = records.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
            return Err(malformed(
                symbol,
                format!("duplicate date '{}' and '{}'", pair[0].raw_date, pair[1].raw_date),
            ));
        }

        debug!(symbol, rows = records.len(), path = %path.display(), "loaded price history");
        Ok(PriceSeries {
            symbol: symbol.to_string(),
            columns,
            records,
        })
    }
}

fn malformed(symbol: &str, reason: String) -> QuantError {
    QuantError::Malformed {
        symbol: symbol.to_string(),
        reason,
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time of day after a space
/// or `T`, with or without a UTC offset. Offset timestamps become UTC so that
/// rows from one file order by instant.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| ts.naive_utc())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        })
}

pub fn processed_path(processed_dir: &Path, symbol: &str) -> PathBuf {
    processed_dir.join(format!("{}_processed.csv", symbol))
}

/// Write the full table plus indicator columns, replacing any existing file.
pub fn export_processed(
    analyzed: &AnalyzedSeries,
    processed_dir: &Path,
) -> Result<PathBuf, QuantError> {
    fs::create_dir_all(processed_dir)?;
    let path = processed_path(processed_dir, analyzed.symbol());
    let columns = analyzed.indicators.columns();

    let mut header: Vec<String> = Vec::with_capacity(1 + analyzed.series.columns.len() + 7);
    header.push(DATE_COLUMN.to_string());
    header.extend(analyzed.series.columns.iter().cloned());
    header.extend(columns.iter().map(|(kind, _)| kind.to_string()));
    if analyzed.metrics.is_some() {
        header.extend(METRIC_COLUMNS.iter().map(|c| c.to_string()));
    }

    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(&header)?;

    for (i, record) in analyzed.series.records.iter().enumerate() {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        row.push(record.raw_date.clone());
        row.extend(record.fields.iter().cloned());
        row.extend(columns.iter().map(|(_, values)| format_value(values[i])));
        if let Some(metrics) = &analyzed.metrics {
            row.push(metrics.sharpe_ratio.to_string());
            row.push(metrics.volatility.to_string());
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    debug!(path = %path.display(), rows = analyzed.series.len(), "wrote processed table");
    Ok(path)
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
