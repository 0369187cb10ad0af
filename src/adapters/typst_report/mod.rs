//! Typst rendering of report documents.
//!
//! A [`ReportDocument`] becomes a self-contained `.typ` file: page setup, the
//! title as a level-1 heading, then each section's heading, escaped body and
//! optional figure. Image paths are written as given, so they resolve relative
//! to the `.typ` file.

pub mod markup;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapters::chart_png;
use crate::domain::error::QuantError;
use crate::domain::report::{
    EmbeddedImage, PUBLICATION_FREQUENCY, ReportBuilder, ReportConfig, ReportDocument, Section,
};
use crate::ports::report_port::DocumentConverter;

const PREAMBLE: &str = "#set page(paper: \"a4\", margin: 2.5cm)\n\
                        #set text(size: 11pt)\n\
                        #set par(justify: true)\n\n";

pub fn render(doc: &ReportDocument) -> String {
    let mut output = String::from(PREAMBLE);
    output.push_str(&format!("= {}\n\n", markup::escape_inline(&doc.title)));

    for section in &doc.sections {
        output.push_str(&render_section(section));
    }

    output
}

fn render_section(section: &Section) -> String {
    let level = usize::from(section.level.max(1));
    let mut output = format!(
        "{} {}\n\n",
        "=".repeat(level),
        markup::escape_inline(&section.heading)
    );

    for paragraph in &section.paragraphs {
        output.push_str(&markup::escape_body(paragraph));
        output.push_str("\n\n");
    }

    if let Some(image) = &section.image {
        output.push_str(&render_figure(image));
    }

    output
}

fn render_figure(image: &EmbeddedImage) -> String {
    let source = image.path.to_string_lossy().replace('\\', "/");
    let mut output = format!(
        "#figure(\n  image({}, width: {}in),\n",
        markup::string_literal(&source),
        image.width_in
    );
    if let Some(caption) = &image.caption {
        output.push_str(&format!("  caption: [{}],\n", markup::escape_inline(caption)));
    }
    output.push_str(")\n\n");
    output
}

/// Render and write the document, creating parent directories as needed.
pub fn write_document(doc: &ReportDocument, path: &Path) -> Result<(), QuantError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = render(doc);
    fs::write(path, &content)?;
    debug!(path = %path.display(), bytes = content.len(), "wrote report document");
    Ok(())
}

/// Files produced by [`build_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutputs {
    pub document: PathBuf,
    pub chart: PathBuf,
    pub pdf: PathBuf,
}

/// Regenerate the placeholder chart, write the interim report, then convert it.
///
/// The document stays on disk when conversion fails.
pub fn build_report(
    config: &ReportConfig,
    converter: &dyn DocumentConverter,
) -> Result<ReportOutputs, QuantError> {
    let outputs = ReportOutputs {
        document: config.document_path(),
        chart: config.chart_path(),
        pdf: config.pdf_path(),
    };

    fs::create_dir_all(&config.output_dir)?;
    chart_png::render_line_chart(PUBLICATION_FREQUENCY.points, &outputs.chart)?;

    let doc = ReportBuilder::interim(&config.chart_name);
    write_document(&doc, &outputs.document)?;
    info!(path = %outputs.document.display(), "report document written");

    converter.convert(&outputs.document, &outputs.pdf)?;
    Ok(outputs)
}
