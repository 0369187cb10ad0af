//! Domain error types.

use std::path::PathBuf;

/// Top-level error type for quantlens.
#[derive(Debug, thiserror::Error)]
pub enum QuantError {
    #[error("file not found for {symbol}: {}", .path.display())]
    NotFound { symbol: String, path: PathBuf },

    #[error("missing columns in {symbol} data: {}", .missing.join(", "))]
    Schema {
        symbol: String,
        missing: Vec<String>,
    },

    #[error("malformed data for {symbol}: {reason}")]
    Malformed { symbol: String, reason: String },

    #[error("failed to render chart {}: {reason}", .path.display())]
    Chart { path: PathBuf, reason: String },

    #[error("{program} exited with {}", describe_status(.status))]
    ExternalTool {
        program: String,
        status: Option<i32>,
    },

    #[error("failed to run {program}: {reason}")]
    ToolUnavailable { program: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuantError {
    /// True for failures caused by a symbol's input file rather than the
    /// environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QuantError::NotFound { .. } | QuantError::Schema { .. } | QuantError::Malformed { .. }
        )
    }

    /// Process exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            QuantError::Io(_) => 1,
            QuantError::ConfigParse { .. } | QuantError::ConfigInvalid { .. } => 2,
            QuantError::NotFound { .. }
            | QuantError::Schema { .. }
            | QuantError::Malformed { .. }
            | QuantError::Csv(_) => 5,
            QuantError::Chart { .. } => 6,
            QuantError::ExternalTool { status, .. } => status
                .and_then(|c| u8::try_from(c).ok())
                .filter(|c| *c != 0)
                .unwrap_or(1),
            QuantError::ToolUnavailable { .. } => 127,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status".to_string(),
    }
}

impl From<&QuantError> for std::process::ExitCode {
    fn from(err: &QuantError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
