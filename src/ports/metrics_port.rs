//! Optional extended-metrics capability.
//!
//! The provider only exists when the crate is built with the
//! `extended-metrics` feature. Callers ask [`available_provider`] and carry on
//! unchanged when it returns `None`.

use crate::domain::ohlcv::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedMetrics {
    /// Annualized Sharpe ratio of daily close-to-close returns.
    pub sharpe_ratio: f64,
    /// Annualized standard deviation of daily returns.
    pub volatility: f64,
}

pub trait MetricsProvider {
    fn compute(&self, series: &PriceSeries) -> ExtendedMetrics;
}

#[cfg(feature = "extended-metrics")]
pub fn available_provider(risk_free_rate: f64) -> Option<Box<dyn MetricsProvider>> {
    Some(Box::new(crate::domain::metrics::ReturnMetrics::new(
        risk_free_rate,
    )))
}

#[cfg(not(feature = "extended-metrics"))]
pub fn available_provider(_risk_free_rate: f64) -> Option<Box<dyn MetricsProvider>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_tracks_feature() {
        assert_eq!(
            available_provider(0.0).is_some(),
            cfg!(feature = "extended-metrics")
        );
    }
}
