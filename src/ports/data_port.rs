//! Price data access port trait.

use crate::domain::error::QuantError;
use crate::domain::ohlcv::PriceSeries;

pub trait PriceSource {
    /// Load one symbol's full history, sorted by date.
    ///
    /// Fails with `NotFound` when the symbol has no data and `Schema` when a
    /// required column is missing.
    fn load(&self, symbol: &str) -> Result<PriceSeries, QuantError>;
}
