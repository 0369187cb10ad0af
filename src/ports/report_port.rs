//! Document conversion port trait.

use std::path::Path;

use crate::domain::error::QuantError;

/// Converts a written report document into a secondary format.
pub trait DocumentConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), QuantError>;
}
