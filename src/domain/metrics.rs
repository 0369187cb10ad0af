//! Return-based risk metrics, available with the `extended-metrics` feature.

use statrs::statistics::Statistics;

use crate::domain::ohlcv::PriceSeries;
use crate::ports::metrics_port::{ExtendedMetrics, MetricsProvider};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Sharpe ratio and volatility from daily close-to-close returns.
#[derive(Debug, Clone, Copy)]
pub struct ReturnMetrics {
    risk_free_rate: f64,
}

impl ReturnMetrics {
    pub fn new(risk_free_rate: f64) -> Self {
        Self { risk_free_rate }
    }
}

impl MetricsProvider for ReturnMetrics {
    fn compute(&self, series: &PriceSeries) -> ExtendedMetrics {
        let returns = series.daily_returns();
        ExtendedMetrics {
            sharpe_ratio: sharpe_ratio(&returns, self.risk_free_rate),
            volatility: annualized_volatility(&returns),
        }
    }
}

/// Annualized Sharpe ratio. 0.0 with fewer than two returns or zero deviation.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.iter().copied().mean();
    let std_dev = returns.iter().copied().std_dev();
    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }

    let daily_rf = risk_free_rate / TRADING_DAYS_PER_YEAR;
    (mean - daily_rf) / std_dev * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Sample standard deviation of daily returns scaled to a year.
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    returns.iter().copied().std_dev() * TRADING_DAYS_PER_YEAR.sqrt()
}
