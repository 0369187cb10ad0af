//! Per-symbol output port trait.

use std::path::PathBuf;

use crate::domain::error::QuantError;
use crate::domain::indicator::AnalyzedSeries;

/// Receives each analyzed symbol and persists its chart and processed table.
pub trait ArtifactSink {
    /// Returns the path of the written chart.
    fn write_chart(&self, analyzed: &AnalyzedSeries) -> Result<PathBuf, QuantError>;

    /// Returns the path of the written table.
    fn write_table(&self, analyzed: &AnalyzedSeries) -> Result<PathBuf, QuantError>;
}
