//! HTML report renderer

use super::{ReportMetadata, ReportRenderer};
use crate::types::ResultItem;

mod components;
mod templates;

pub use components::{html_escape, HtmlComponents};
pub use templates::HtmlTemplate;

/// Renders a self-contained HTML document with one section per result item
///
/// Plot sections load the charting library from its CDN.
#[derive(Debug, Clone)]
pub struct HtmlReportRenderer {
    /// Include the "Generated on" line under the title
    pub show_timestamp: bool,
}

impl HtmlReportRenderer {
    pub fn new() -> Self {
        Self {
            show_timestamp: true,
        }
    }

    /// Omit the generation timestamp, making output fully deterministic
    pub fn without_timestamp() -> Self {
        Self {
            show_timestamp: false,
        }
    }
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for HtmlReportRenderer {
    fn render_report(&self, items: &[ResultItem], metadata: &ReportMetadata) -> String {
        HtmlTemplate::new().render(items, metadata, self.show_timestamp)
    }

    fn supported_extension(&self) -> &'static str {
        "html"
    }

    fn mime_type(&self) -> &'static str {
        "text/html"
    }
}
