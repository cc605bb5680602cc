//! Result renderers for different output targets
//!
//! Every renderer consumes normalized [`ResultItem`]s, so the contract is
//! checked once by the caller and presentation stays separate from it.

use crate::types::ResultItem;

/// Render normalized result items to a string in a specific format
pub trait OutputRenderer {
    fn render(&self, items: &[ResultItem]) -> String;
}

pub mod cli;
pub mod json;
pub mod report;

pub use cli::{ResultTable, TableStyle, TerminalRenderer};
pub use json::JsonRenderer;
pub use report::{render_results_to_html, HtmlReportRenderer, ReportMetadata, ReportRenderer};
