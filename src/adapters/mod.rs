//! Concrete adapter implementations for ports.

pub mod artifact_sink;
pub mod chart_png;
pub mod converter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod typst_report;
