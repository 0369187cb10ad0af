//! External document converter invoked as a child process.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::domain::error::QuantError;
use crate::domain::report::ReportConfig;
use crate::ports::report_port::DocumentConverter;

const INPUT_PLACEHOLDER: &str = "{input}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(&config.converter_program, config.converter_args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Argument list with placeholders filled in.
    pub fn resolve_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }
}

impl DocumentConverter for CommandConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), QuantError> {
        let args = self.resolve_args(input, output);
        debug!(program = %self.program, ?args, "running converter");

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| QuantError::ToolUnavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(QuantError::ExternalTool {
                program: self.program.clone(),
                status: status.code(),
            });
        }

        info!(output = %output.display(), "converted report");
        Ok(())
    }
}
