//! Technical indicator columns derived from close prices.
//!
//! Every indicator is a `Vec<Option<f64>>` aligned with the price records.
//! `None` marks a row without enough trailing history; warm-up rows are never
//! filled with placeholder values.
//!
//! - `IndicatorKind`: indicator identity + parameters, doubles as column name
//! - `IndicatorParams`: lookback configuration
//! - `IndicatorSet`: the five computed columns
//! - `AnalyzedSeries`: a price table with its indicators attached

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;

use std::fmt;

use crate::domain::error::QuantError;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::metrics_port::ExtendedMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd,
    MacdSignal,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(period) => write!(f, "SMA_{}", period),
            IndicatorKind::Ema(period) => write!(f, "EMA_{}", period),
            IndicatorKind::Rsi(period) => write!(f, "RSI_{}", period),
            IndicatorKind::Macd => write!(f, "MACD"),
            IndicatorKind::MacdSignal => write!(f, "MACD_Signal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorParams {
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_period: 50,
            ema_period: 20,
            rsi_period: 14,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
        }
    }
}

impl IndicatorParams {
    /// Columns in export order.
    pub fn kinds(&self) -> [IndicatorKind; 5] {
        [
            IndicatorKind::Sma(self.sma_period),
            IndicatorKind::Ema(self.ema_period),
            IndicatorKind::Rsi(self.rsi_period),
            IndicatorKind::Macd,
            IndicatorKind::MacdSignal,
        ]
    }

    /// Number of leading rows left empty for each column, in `kinds()` order.
    pub fn warmups(&self) -> [usize; 5] {
        let macd_warmup = self.macd_slow.saturating_sub(1) + self.macd_signal.saturating_sub(1);
        [
            self.sma_period.saturating_sub(1),
            self.ema_period.saturating_sub(1),
            self.rsi_period,
            macd_warmup,
            macd_warmup,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub params: IndicatorParams,
    pub sma: Vec<Option<f64>>,
    pub ema: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
}

impl IndicatorSet {
    pub fn compute(closes: &[f64], params: &IndicatorParams) -> Self {
        let (macd, macd_signal) =
            calculate_macd(closes, params.macd_fast, params.macd_slow, params.macd_signal);
        Self {
            params: *params,
            sma: calculate_sma(closes, params.sma_period),
            ema: calculate_ema(closes, params.ema_period),
            rsi: calculate_rsi(closes, params.rsi_period),
            macd,
            macd_signal,
        }
    }

    /// `(kind, values)` pairs in export order.
    pub fn columns(&self) -> [(IndicatorKind, &[Option<f64>]); 5] {
        let kinds = self.params.kinds();
        [
            (kinds[0], self.sma.as_slice()),
            (kinds[1], self.ema.as_slice()),
            (kinds[2], self.rsi.as_slice()),
            (kinds[3], self.macd.as_slice()),
            (kinds[4], self.macd_signal.as_slice()),
        ]
    }
}

/// A loaded price table with its derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedSeries {
    pub series: PriceSeries,
    pub indicators: IndicatorSet,
    pub metrics: Option<ExtendedMetrics>,
}

impl AnalyzedSeries {
    pub fn new(series: PriceSeries, params: &IndicatorParams) -> Self {
        let indicators = IndicatorSet::compute(&series.closes(), params);
        Self {
            series,
            indicators,
            metrics: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.series.symbol
    }
}

/// Attach indicators to the outcome of a load. A failed load passes through
/// untouched, so nothing is computed for a symbol without data.
pub fn compute_indicators(
    loaded: Result<PriceSeries, QuantError>,
    params: &IndicatorParams,
) -> Result<AnalyzedSeries, QuantError> {
    loaded.map(|series| AnalyzedSeries::new(series, params))
}
