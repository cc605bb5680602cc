//! Standalone report renderers
//!
//! A report is a single self-contained file a user can open or share. The
//! [`ReportRenderer`] trait keeps the format pluggable; HTML is the only
//! format shipped today.

use crate::contract::normalize_results;
use crate::error::Result;
use crate::figure::ChartingLibrary;
use crate::output::write_file_atomic;
use crate::types::{PayloadValue, ResultItem};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod html;

pub use html::HtmlReportRenderer;

/// Title used when the caller does not provide one
pub const DEFAULT_REPORT_TITLE: &str = "Workflow Report";

/// Trait for rendering result items into a report document
pub trait ReportRenderer {
    /// Render result items to a complete report document
    fn render_report(&self, items: &[ResultItem], metadata: &ReportMetadata) -> String;

    /// Get the file extension this renderer supports
    fn supported_extension(&self) -> &'static str;

    /// Get the MIME type for this format
    fn mime_type(&self) -> &'static str;
}

/// Metadata for report generation
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    pub title: String,
    /// When the report was generated
    pub timestamp: DateTime<Local>,
    /// Charting library referenced by plot sections
    pub library: ChartingLibrary,
}

impl ReportMetadata {
    /// Create report metadata stamped with the current time
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            timestamp: Local::now(),
            library: ChartingLibrary::default(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_library(mut self, library: ChartingLibrary) -> Self {
        self.library = library;
        self
    }
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_TITLE)
    }
}

/// Render `items` with `renderer` and write the result to `output_path`
///
/// Parent directories are created and an existing file is replaced.
pub fn write_report<P: AsRef<Path>>(
    renderer: &dyn ReportRenderer,
    items: &[ResultItem],
    metadata: &ReportMetadata,
    output_path: P,
) -> Result<PathBuf> {
    let path = output_path.as_ref();
    let document = renderer.render_report(items, metadata);
    write_file_atomic(path, document)?;
    info!(path = %path.display(), items = items.len(), "report written");
    Ok(path.to_path_buf())
}

/// Validate and normalize `payload`, then write it as an HTML report
pub fn render_results_to_html<P: AsRef<Path>>(
    payload: &PayloadValue,
    output_path: P,
    title: &str,
) -> Result<PathBuf> {
    let items = normalize_results(payload)?;
    write_report(
        &HtmlReportRenderer::new(),
        &items,
        &ReportMetadata::new(title),
        output_path,
    )
}
