//! Interim progress report: document model, fixed content, output layout.

use std::path::PathBuf;

/// An image placed after a section's body, path relative to the document.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub path: PathBuf,
    pub width_in: f64,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    pub level: u8,
    pub paragraphs: Vec<String>,
    pub image: Option<EmbeddedImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<Section>,
}

/// Line chart regenerated from literal data each time the report is built.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderChart {
    pub title: &'static str,
    pub points: &'static [(f64, f64)],
    pub width_in: f64,
}

pub const PUBLICATION_FREQUENCY: PlaceholderChart = PlaceholderChart {
    title: "Sample Plot: Publication Frequency Over Time",
    points: &[(1.0, 4.0), (2.0, 5.0), (3.0, 6.0)],
    width_in: 5.0,
};

/// Appends sections in call order. `image` attaches to the last section.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    doc: ReportDocument,
}

impl ReportBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            doc: ReportDocument {
                title: title.into(),
                sections: Vec::new(),
            },
        }
    }

    pub fn section(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        self.doc.sections.push(Section {
            heading: heading.into(),
            level: 2,
            paragraphs: vec![body.into()],
            image: None,
        });
        self
    }

    pub fn image(mut self, image: EmbeddedImage) -> Self {
        if let Some(last) = self.doc.sections.last_mut() {
            last.image = Some(image);
        }
        self
    }

    pub fn build(self) -> ReportDocument {
        self.doc
    }

    /// The week-one interim report. `chart_file` is the placeholder chart,
    /// relative to where the document is written.
    pub fn interim(chart_file: impl Into<PathBuf>) -> ReportDocument {
        ReportBuilder::new("Interim Report - Week 1 Challenge")
            .section(
                "Progress Summary",
                "This interim report covers the progress made on Task 1 (Git and GitHub) and \
                 partial progress on Task 2 (Quantitative Analysis). Below are the key findings \
                 and methodologies employed so far.",
            )
            .section(
                "Task 1: Git and GitHub",
                "- Repository setup completed with the required folder structure.\n\
                 - Exploratory Data Analysis (EDA) performed on the dataset, including:\n  \
                 - Descriptive statistics for headline lengths.\n  \
                 - Analysis of publication frequency over time.\n  \
                 - Publisher contribution analysis.",
            )
            .image(EmbeddedImage {
                path: chart_file.into(),
                width_in: PUBLICATION_FREQUENCY.width_in,
                caption: Some(PUBLICATION_FREQUENCY.title.to_string()),
            })
            .section(
                "Task 2: Quantitative Analysis",
                "- Stock price data loaded and prepared for analysis.\n\
                 - Technical indicators (e.g., Moving Averages, RSI) calculated using TA-Lib.\n\
                 - Preliminary visualizations created to explore trends.",
            )
            .section(
                "Challenges Encountered",
                "- Data alignment issues between news and stock datasets.\n\
                 - Sentiment analysis accuracy needs further refinement.",
            )
            .build()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub document_name: String,
    pub pdf_name: String,
    pub chart_name: String,
    pub converter_program: String,
    /// `{input}` and `{output}` are replaced with the document and PDF paths.
    pub converter_args: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            document_name: "interim_report.typ".into(),
            pdf_name: "interim_report.pdf".into(),
            chart_name: "publication_frequency.png".into(),
            converter_program: "typst".into(),
            converter_args: vec!["compile".into(), "{input}".into(), "{output}".into()],
        }
    }
}

impl ReportConfig {
    pub fn document_path(&self) -> PathBuf {
        self.output_dir.join(&self.document_name)
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.output_dir.join(&self.pdf_name)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interim_report_has_fixed_sections() {
        let doc = ReportBuilder::interim("chart.png");
        assert_eq!(doc.title, "Interim Report - Week 1 Challenge");

        let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "Progress Summary",
                "Task 1: Git and GitHub",
                "Task 2: Quantitative Analysis",
                "Challenges Encountered",
            ]
        );
        assert!(doc.sections.iter().all(|s| s.level == 2));
    }

    #[test]
    fn interim_report_embeds_one_image_under_task_one() {
        let doc = ReportBuilder::interim("chart.png");
        let with_images: Vec<&Section> = doc.sections.iter().filter(|s| s.image.is_some()).collect();
        assert_eq!(with_images.len(), 1);
        assert_eq!(with_images[0].heading, "Task 1: Git and GitHub");

        let image = with_images[0].image.as_ref().unwrap();
        assert_eq!(image.path, PathBuf::from("chart.png"));
        assert_eq!(image.width_in, 5.0);
    }

    #[test]
    fn task_one_body_keeps_nested_items() {
        let doc = ReportBuilder::interim("chart.png");
        let body = &doc.sections[1].paragraphs[0];
        assert!(body.starts_with("- Repository setup"));
        assert!(body.contains("\n  - Descriptive statistics for headline lengths."));
    }

    #[test]
    fn image_before_any_section_is_dropped() {
        let doc = ReportBuilder::new("Empty")
            .image(EmbeddedImage {
                path: PathBuf::from("x.png"),
                width_in: 1.0,
                caption: None,
            })
            .build();
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn default_report_paths() {
        let config = ReportConfig::default();
        assert_eq!(config.document_path(), PathBuf::from("reports/interim_report.typ"));
        assert_eq!(config.pdf_path(), PathBuf::from("reports/interim_report.pdf"));
        assert_eq!(config.chart_path(), PathBuf::from("reports/publication_frequency.png"));
        assert_eq!(config.converter_program, "typst");
    }
}
