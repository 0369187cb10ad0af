#![allow(dead_code)]

use chrono::NaiveDate;
use quantlens::domain::error::QuantError;
use quantlens::domain::indicator::AnalyzedSeries;
use quantlens::domain::pipeline::AnalysisConfig;
pub use quantlens::domain::ohlcv::{PriceRecord, PriceSeries};
use quantlens::ports::artifact_port::ArtifactSink;
use quantlens::ports::data_port::PriceSource;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "Date,Open,High,Low,Close,Adj Close,Volume,Dividends,Stock Splits";

pub struct MockPriceSource {
    pub data: HashMap<String, PriceSeries>,
    pub schema_errors: HashMap<String, Vec<String>>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            schema_errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.data.insert(series.symbol.clone(), series);
        self
    }

    pub fn with_schema_error(mut self, symbol: &str, missing: &[&str]) -> Self {
        self.schema_errors.insert(
            symbol.to_string(),
            missing.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

impl PriceSource for MockPriceSource {
    fn load(&self, symbol: &str) -> Result<PriceSeries, QuantError> {
        if let Some(missing) = self.schema_errors.get(symbol) {
            return Err(QuantError::Schema {
                symbol: symbol.to_string(),
                missing: missing.clone(),
            });
        }
        self.data
            .get(symbol)
            .cloned()
            .ok_or_else(|| QuantError::NotFound {
                symbol: symbol.to_string(),
                path: PathBuf::from(format!("mock/{}_historical_data.csv", symbol)),
            })
    }
}

/// Records what it was asked to write without touching the filesystem.
/// Charts for symbols in `failing_charts` fail with a chart error.
pub struct RecordingSink {
    pub charts: RefCell<Vec<String>>,
    pub tables: RefCell<Vec<(String, usize, bool)>>,
    pub failing_charts: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            charts: RefCell::new(Vec::new()),
            tables: RefCell::new(Vec::new()),
            failing_charts: Vec::new(),
        }
    }

    pub fn failing_chart_for(mut self, symbol: &str) -> Self {
        self.failing_charts.push(symbol.to_string());
        self
    }
}

impl ArtifactSink for RecordingSink {
    fn write_chart(&self, analyzed: &AnalyzedSeries) -> Result<PathBuf, QuantError> {
        let path = PathBuf::from(format!("mock/{}.png", analyzed.symbol()));
        if self.failing_charts.iter().any(|s| s == analyzed.symbol()) {
            return Err(QuantError::Chart {
                path,
                reason: "backend unavailable".into(),
            });
        }
        self.charts.borrow_mut().push(analyzed.symbol().to_string());
        Ok(path)
    }

    fn write_table(&self, analyzed: &AnalyzedSeries) -> Result<PathBuf, QuantError> {
        self.tables.borrow_mut().push((
            analyzed.symbol().to_string(),
            analyzed.series.len(),
            analyzed.metrics.is_some(),
        ));
        Ok(PathBuf::from(format!("mock/{}.csv", analyzed.symbol())))
    }
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

/// Deterministic wavy uptrend, always positive.
pub fn generate_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            100.0 + t * 0.25 + (t * 0.3).sin() * 4.0 + (t * 0.07).cos() * 2.0
        })
        .collect()
}

pub fn make_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries {
        symbol: symbol.to_string(),
        columns: vec![
            "Open".into(),
            "High".into(),
            "Low".into(),
            "Close".into(),
            "Volume".into(),
        ],
        records: closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let date = start_date() + chrono::Duration::days(i as i64);
                PriceRecord {
                    timestamp: date.and_hms_opt(0, 0, 0).unwrap(),
                    raw_date: date.to_string(),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1_000_000.0,
                    fields: vec![
                        format!("{}", close - 0.5),
                        format!("{}", close + 1.0),
                        format!("{}", close - 1.0),
                        format!("{}", close),
                        "1000000".into(),
                    ],
                }
            })
            .collect(),
    }
}

/// Write `<dir>/<SYMBOL>_historical_data.csv` with the full yfinance-style
/// header. Rows are written newest first so loading has to sort them.
pub fn write_price_csv(dir: &Path, symbol: &str, closes: &[f64]) -> PathBuf {
    let mut content = String::from(CSV_HEADER);
    content.push('\n');
    for (i, close) in closes.iter().enumerate().rev() {
        let date = start_date() + chrono::Duration::days(i as i64);
        content.push_str(&format!(
            "{},{:.4},{:.4},{:.4},{:.4},{:.4},{},0.0,0.0\n",
            date.format("%Y-%m-%d"),
            close - 0.5,
            close + 1.0,
            close - 1.0,
            close,
            close * 0.99,
            1_000_000 + i * 10,
        ));
    }
    write_raw_csv(dir, symbol, &content)
}

pub fn write_raw_csv(dir: &Path, symbol: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("{}_historical_data.csv", symbol));
    fs::write(&path, content).unwrap();
    path
}

/// Config rooted in a temporary directory.
pub fn test_config(root: &Path, symbols: &[&str]) -> AnalysisConfig {
    AnalysisConfig {
        data_dir: root.join("data"),
        plots_dir: root.join("plots"),
        processed_dir: root.join("processed"),
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        ..AnalysisConfig::default()
    }
}

/// Header and rows of an exported CSV.
pub fn read_export(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let header = rdr.headers().unwrap().iter().map(String::from).collect();
    let rows = rdr
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}
