//! Filesystem artifact sink: PNG charts and processed CSV tables.

use std::path::PathBuf;

use crate::adapters::chart_png;
use crate::adapters::csv_adapter;
use crate::domain::error::QuantError;
use crate::domain::indicator::AnalyzedSeries;
use crate::domain::pipeline::AnalysisConfig;
use crate::ports::artifact_port::ArtifactSink;

pub struct FileArtifactSink {
    plots_dir: PathBuf,
    processed_dir: PathBuf,
}

impl FileArtifactSink {
    pub fn new(plots_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            plots_dir: plots_dir.into(),
            processed_dir: processed_dir.into(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(&config.plots_dir, &config.processed_dir)
    }
}

impl ArtifactSink for FileArtifactSink {
    fn write_chart(&self, analyzed: &AnalyzedSeries) -> Result<PathBuf, QuantError> {
        chart_png::render_indicator_chart(analyzed, &self.plots_dir)
    }

    fn write_table(&self, analyzed: &AnalyzedSeries) -> Result<PathBuf, QuantError> {
        csv_adapter::export_processed(analyzed, &self.processed_dir)
    }
}
