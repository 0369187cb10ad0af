//! Indicator pipeline: configuration, per-symbol processing and outcomes.
//!
//! Each configured symbol runs load, indicators, optional metrics, chart and
//! export in that order. A failure at any stage is recorded for that symbol
//! and the run moves on to the next one.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::domain::error::QuantError;
use crate::domain::indicator::{IndicatorParams, compute_indicators};
use crate::ports::artifact_port::ArtifactSink;
use crate::ports::data_port::PriceSource;
use crate::ports::metrics_port::{ExtendedMetrics, MetricsProvider, available_provider};

pub const DEFAULT_SYMBOLS: [&str; 7] = ["AAPL", "AMZN", "GOOG", "META", "MSFT", "NVDA", "TSLA"];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub plots_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub symbols: Vec<String>,
    pub params: IndicatorParams,
    pub extended_metrics: bool,
    pub risk_free_rate: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/yfinance_data"),
            plots_dir: PathBuf::from("plots"),
            processed_dir: PathBuf::from("data/processed"),
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            params: IndicatorParams::default(),
            extended_metrics: false,
            risk_free_rate: 0.0,
        }
    }
}

impl AnalysisConfig {
    /// Reject lookbacks the indicator math cannot honor.
    pub fn validate(&self) -> Result<(), QuantError> {
        let p = &self.params;
        let periods = [
            ("sma_period", p.sma_period),
            ("ema_period", p.ema_period),
            ("rsi_period", p.rsi_period),
            ("macd_fast", p.macd_fast),
            ("macd_slow", p.macd_slow),
            ("macd_signal", p.macd_signal),
        ];
        for (key, value) in periods {
            if value == 0 {
                return Err(invalid(key, "must be positive"));
            }
        }
        if p.macd_fast >= p.macd_slow {
            return Err(invalid("macd_fast", "must be smaller than macd_slow"));
        }
        if let Some(bad) = self.symbols.iter().find(|s| s.contains(['/', '\\'])) {
            return Err(invalid("symbols", &format!("'{}' is not a plain symbol", bad)));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> QuantError {
    QuantError::ConfigInvalid {
        section: "analysis".into(),
        key: key.into(),
        reason: reason.into(),
    }
}

/// Files written for one successfully processed symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolArtifacts {
    pub rows: usize,
    pub chart_path: PathBuf,
    pub export_path: PathBuf,
    pub metrics: Option<ExtendedMetrics>,
}

#[derive(Debug)]
pub struct SymbolOutcome {
    pub symbol: String,
    pub result: Result<SymbolArtifacts, QuantError>,
}

/// Every configured symbol mapped to what happened to it, in processing order.
#[derive(Debug, Default)]
pub struct AnalysisRun {
    pub outcomes: Vec<SymbolOutcome>,
}

impl AnalysisRun {
    pub fn record(&mut self, symbol: impl Into<String>, result: Result<SymbolArtifacts, QuantError>) {
        self.outcomes.push(SymbolOutcome {
            symbol: symbol.into(),
            result,
        });
    }

    pub fn get(&self, symbol: &str) -> Option<&Result<SymbolArtifacts, QuantError>> {
        self.outcomes
            .iter()
            .find(|o| o.symbol == symbol)
            .map(|o| &o.result)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &SymbolArtifacts)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|a| (o.symbol.as_str(), a)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &QuantError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.symbol.as_str(), e)))
    }

    /// True when symbols were configured and none of them made it through.
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.succeeded().next().is_none()
    }
}

/// Run every configured symbol through the pipeline.
///
/// Extended metrics are computed only when the config asks for them and the
/// capability is compiled in.
pub fn run_analysis(
    source: &dyn PriceSource,
    config: &AnalysisConfig,
    sink: &dyn ArtifactSink,
) -> AnalysisRun {
    let provider = if config.extended_metrics {
        let provider = available_provider(config.risk_free_rate);
        if provider.is_none() {
            warn!("extended metrics not available, skipping");
        }
        provider
    } else {
        None
    };
    run_analysis_with(source, config, sink, provider.as_deref())
}

/// [`run_analysis`] with an explicit metrics provider.
pub fn run_analysis_with(
    source: &dyn PriceSource,
    config: &AnalysisConfig,
    sink: &dyn ArtifactSink,
    metrics: Option<&dyn MetricsProvider>,
) -> AnalysisRun {
    let mut run = AnalysisRun::default();

    for symbol in &config.symbols {
        info!(symbol = %symbol, "processing");
        let result = process_symbol(source, config, sink, metrics, symbol);
        match &result {
            Ok(artifacts) => info!(symbol = %symbol, rows = artifacts.rows, "processed"),
            Err(QuantError::NotFound { path, .. }) => {
                warn!(symbol = %symbol, path = %path.display(), "data file not found, skipping")
            }
            Err(e) if e.is_input_error() => {
                warn!(symbol = %symbol, error = %e, "unusable input, skipping")
            }
            Err(e) => error!(symbol = %symbol, error = %e, "processing failed, skipping"),
        }
        run.record(symbol.as_str(), result);
    }

    info!(
        succeeded = run.succeeded().count(),
        failed = run.failed().count(),
        "analysis complete"
    );
    run
}

fn process_symbol(
    source: &dyn PriceSource,
    config: &AnalysisConfig,
    sink: &dyn ArtifactSink,
    metrics: Option<&dyn MetricsProvider>,
    symbol: &str,
) -> Result<SymbolArtifacts, QuantError> {
    let mut analyzed = compute_indicators(source.load(symbol), &config.params)?;
    let rows = analyzed.series.len();

    analyzed.metrics = metrics.map(|provider| provider.compute(&analyzed.series));

    let chart_path = sink.write_chart(&analyzed)?;
    let export_path = sink.write_table(&analyzed)?;

    Ok(SymbolArtifacts {
        rows,
        chart_path,
        export_path,
        metrics: analyzed.metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifacts(rows: usize) -> SymbolArtifacts {
        SymbolArtifacts {
            rows,
            chart_path: PathBuf::from("plots/X_technical_indicators.png"),
            export_path: PathBuf::from("data/processed/X_processed.csv"),
            metrics: None,
        }
    }

    #[test]
    fn default_config_layout() {
        let config = AnalysisConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data/yfinance_data"));
        assert_eq!(config.plots_dir, PathBuf::from("plots"));
        assert_eq!(config.processed_dir, PathBuf::from("data/processed"));
        assert_eq!(config.symbols.len(), 7);
        assert_eq!(config.symbols[0], "AAPL");
        assert!(!config.extended_metrics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_period() {
        let mut config = AnalysisConfig::default();
        config.params.rsi_period = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, QuantError::ConfigInvalid { key, .. } if key == "rsi_period"));
    }

    #[test]
    fn validate_rejects_inverted_macd() {
        let mut config = AnalysisConfig::default();
        config.params.macd_fast = 30;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, QuantError::ConfigInvalid { key, .. } if key == "macd_fast"));
    }

    #[test]
    fn validate_rejects_path_like_symbol() {
        let mut config = AnalysisConfig::default();
        config.symbols.push("../etc".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn run_keeps_order_and_separates_failures() {
        let mut run = AnalysisRun::default();
        run.record("AAPL", Ok(artifacts(10)));
        run.record(
            "META",
            Err(QuantError::Schema {
                symbol: "META".into(),
                missing: vec!["Volume".into()],
            }),
        );
        run.record("TSLA", Ok(artifacts(5)));

        let ok: Vec<&str> = run.succeeded().map(|(s, _)| s).collect();
        assert_eq!(ok, vec!["AAPL", "TSLA"]);
        let failed: Vec<&str> = run.failed().map(|(s, _)| s).collect();
        assert_eq!(failed, vec!["META"]);
        assert!(matches!(run.get("META"), Some(Err(QuantError::Schema { .. }))));
        assert!(run.get("GOOG").is_none());
        assert!(!run.all_failed());
    }

    #[test]
    fn all_failed_requires_outcomes() {
        let mut run = AnalysisRun::default();
        assert!(!run.all_failed());
        run.record(
            "GOOG",
            Err(QuantError::NotFound {
                symbol: "GOOG".into(),
                path: PathBuf::from("missing.csv"),
            }),
        );
        assert!(run.all_failed());
    }
}
