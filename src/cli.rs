//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::artifact_sink::FileArtifactSink;
use crate::adapters::converter::CommandConverter;
use crate::adapters::csv_adapter::CsvPriceSource;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::typst_report;
use crate::domain::error::QuantError;
use crate::domain::indicator::IndicatorParams;
use crate::domain::pipeline::{self, AnalysisConfig};
use crate::domain::report::ReportConfig;
use crate::ports::config_port::ConfigPort;

const ANALYSIS_SECTION: &str = "analysis";
const REPORT_SECTION: &str = "report";

#[derive(Parser, Debug)]
#[command(
    name = "quantlens",
    about = "Technical indicator analysis and interim reporting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute indicators, charts and processed tables for each symbol
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the interim report and convert it to PDF
    Report {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze { config } => run_analyze(config.as_deref()),
        Command::Report { config } => run_report(config.as_deref()),
    }
}

/// Load the INI file when one was given.
pub fn load_config(path: Option<&Path>) -> Result<Option<FileConfigAdapter>, QuantError> {
    path.map(|path| {
        info!(path = %path.display(), "loading config");
        FileConfigAdapter::from_file(path)
    })
    .transpose()
}

fn fail(err: &QuantError) -> ExitCode {
    error!("{err}");
    err.into()
}

fn run_analyze(config_path: Option<&Path>) -> ExitCode {
    let config = match load_config(config_path).and_then(|adapter| match adapter {
        Some(adapter) => build_analysis_config(&adapter),
        None => Ok(AnalysisConfig::default()),
    }) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    let source = CsvPriceSource::new(&config.data_dir);
    let sink = FileArtifactSink::from_config(&config);
    let run = pipeline::run_analysis(&source, &config, &sink);

    // Per-symbol failures are logged and skipped; they never change the status.
    if run.all_failed() {
        warn!("no symbol could be processed");
    }
    ExitCode::SUCCESS
}

fn run_report(config_path: Option<&Path>) -> ExitCode {
    let config = match load_config(config_path).and_then(|adapter| match adapter {
        Some(adapter) => build_report_config(&adapter),
        None => Ok(ReportConfig::default()),
    }) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    let converter = CommandConverter::from_config(&config);
    match typst_report::build_report(&config, &converter) {
        Ok(outputs) => {
            info!(pdf = %outputs.pdf.display(), "report complete");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Defaults overridden by the `[analysis]` section.
pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, QuantError> {
    let defaults = AnalysisConfig::default();
    let p = defaults.params;

    let analysis = AnalysisConfig {
        data_dir: path_or(config, ANALYSIS_SECTION, "data_dir", defaults.data_dir),
        plots_dir: path_or(config, ANALYSIS_SECTION, "plots_dir", defaults.plots_dir),
        processed_dir: path_or(config, ANALYSIS_SECTION, "processed_dir", defaults.processed_dir),
        symbols: config
            .get_list(ANALYSIS_SECTION, "symbols")
            .unwrap_or(defaults.symbols),
        params: IndicatorParams {
            sma_period: period(config, "sma_period", p.sma_period)?,
            ema_period: period(config, "ema_period", p.ema_period)?,
            rsi_period: period(config, "rsi_period", p.rsi_period)?,
            macd_fast: period(config, "macd_fast", p.macd_fast)?,
            macd_slow: period(config, "macd_slow", p.macd_slow)?,
            macd_signal: period(config, "macd_signal", p.macd_signal)?,
        },
        extended_metrics: config.get_bool(
            ANALYSIS_SECTION,
            "extended_metrics",
            defaults.extended_metrics,
        ),
        risk_free_rate: config.get_double(
            ANALYSIS_SECTION,
            "risk_free_rate",
            defaults.risk_free_rate,
        ),
    };

    analysis.validate()?;
    Ok(analysis)
}

/// Defaults overridden by the `[report]` section.
pub fn build_report_config(config: &dyn ConfigPort) -> Result<ReportConfig, QuantError> {
    let defaults = ReportConfig::default();

    let converter_program = match config.get_string(REPORT_SECTION, "converter") {
        Some(program) if program.trim().is_empty() => {
            return Err(QuantError::ConfigInvalid {
                section: REPORT_SECTION.into(),
                key: "converter".into(),
                reason: "must not be empty".into(),
            });
        }
        Some(program) => program.trim().to_string(),
        None => defaults.converter_program,
    };

    let converter_args = config
        .get_string(REPORT_SECTION, "converter_args")
        .map(|raw| raw.split_whitespace().map(String::from).collect())
        .unwrap_or(defaults.converter_args);

    Ok(ReportConfig {
        output_dir: path_or(config, REPORT_SECTION, "output_dir", defaults.output_dir),
        converter_program,
        converter_args,
        ..defaults
    })
}

fn path_or(config: &dyn ConfigPort, section: &str, key: &str, default: PathBuf) -> PathBuf {
    config
        .get_string(section, key)
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or(default)
}

fn period(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, QuantError> {
    let value = config.get_int(ANALYSIS_SECTION, key, default as i64);
    usize::try_from(value).map_err(|_| QuantError::ConfigInvalid {
        section: ANALYSIS_SECTION.into(),
        key: key.into(),
        reason: format!("must be positive, got {}", value),
    })
}
