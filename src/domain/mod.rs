//! Core domain types and logic.

pub mod error;
pub mod indicator;
#[cfg(feature = "extended-metrics")]
pub mod metrics;
pub mod ohlcv;
pub mod pipeline;
pub mod report;
