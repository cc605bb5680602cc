//! Renderflow - result contracts and rendering for provider workflows
//!
//! Workflows return a payload describing text, tables, plots and code. This
//! crate validates that payload, normalizes it into typed [`ResultItem`]s and
//! renders the items to the terminal, JSON, a standalone HTML report or
//! per-figure export files. Providers, their parameters and a runner that
//! executes them live here too, so any front end can drive a workflow.

// Core modules
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Result handling
pub mod contract;
pub mod decode;
pub mod export;
pub mod figure;
pub mod output;
pub mod renderers;

// Providers and execution
pub mod progress;
pub mod provider;
pub mod runner;
pub mod workflow;

pub mod testing;

pub use config::RenderflowConfig;
pub use contract::{normalize_results, validate_results_contract};
pub use decode::{decode_numeric_payload, encode_fragment, DType};
pub use error::{ContractError, RenderflowError, Result};
pub use export::{normalize_formats, save_figures, FigureExporter, FigureFormat};
pub use figure::{ChartFigure, ChartingLibrary};
pub use progress::{emit_progress, run_timed_step, ProgressCallback, ProgressEvent, ProgressStatus};
pub use provider::{AppSpec, InitializerSpec, ParamKind, ParamSpec, ProviderRegistry, WorkflowSpec};
pub use renderers::{
    render_results_to_html, HtmlReportRenderer, JsonRenderer, OutputRenderer, ReportMetadata,
    ReportRenderer, TerminalRenderer,
};
pub use runner::{WorkflowRun, WorkflowRunner};
pub use traits::{Figure, HtmlExportOptions, ImageFormat};
pub use types::{FigureRef, PayloadMap, PayloadValue, PlotItem, ResultItem, TableData};
pub use workflow::Workflow;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_imports() {
        let payload = Workflow::new("t", "").add_text(["hi"]).build();
        let items = normalize_results(&payload).unwrap();
        assert_eq!(TerminalRenderer::new().render(&items), "hi");
        assert_eq!(JsonRenderer::compact().render(&items), r#"[{"type":"text","content":["hi"]}]"#);
        assert_eq!(decode_numeric_payload(json!([1])), json!([1]));
    }
}
