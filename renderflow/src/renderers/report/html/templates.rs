//! Document shell with embedded CSS

use super::super::ReportMetadata;
use super::components::{html_escape, HtmlComponents};
use crate::types::ResultItem;

const STYLES: &str = r#"        body { font-family: system-ui, sans-serif; max-width: 1200px; margin: 0 auto; padding: 1.5rem; }
        .section { margin: 1rem 0; padding: 1rem; border: 1px solid #ddd; border-radius: 6px; }
        .section h2 { margin-top: 0; }
        table { width: 100%; border-collapse: collapse; }
        th, td { border-bottom: 1px solid #ddd; text-align: left; padding: 0.45rem; }
        pre { background: #f6f8fa; padding: 0.75rem; border-radius: 6px; overflow-x: auto; }"#;

/// HTML template generator for result reports
pub struct HtmlTemplate;

impl HtmlTemplate {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete document
    pub fn render(&self, items: &[ResultItem], metadata: &ReportMetadata, show_timestamp: bool) -> String {
        let title = html_escape(&metadata.title);
        let mut parts = vec![
            "<!DOCTYPE html>".to_string(),
            "<html>".to_string(),
            "<head>".to_string(),
            format!("    <title>{}</title>", title),
            "    <meta charset='utf-8'>".to_string(),
            format!("    <script src='{}'></script>", metadata.library.script_url()),
            "    <style>".to_string(),
            STYLES.to_string(),
            "    </style>".to_string(),
            "</head>".to_string(),
            "<body>".to_string(),
            format!("    <h1>{}</h1>", title),
        ];
        if show_timestamp {
            parts.push(format!(
                "    <p>Generated on {}</p>",
                metadata.timestamp.format("%Y-%m-%d %H:%M:%S")
            ));
        }

        let mut plot_counter = 0;
        for item in items {
            let section = match item {
                ResultItem::Text(text) => Some(HtmlComponents::text_section(text)),
                ResultItem::Table(table) => Some(HtmlComponents::table_section(table)),
                ResultItem::Code(code) => Some(HtmlComponents::code_section(code)),
                ResultItem::Plot(plot) => plot.figure.as_ref().map(|figure| {
                    plot_counter += 1;
                    HtmlComponents::plot_section(
                        figure.as_ref(),
                        plot.title.as_deref(),
                        &format!("plot-{}", plot_counter),
                    )
                }),
            };
            parts.extend(section);
        }

        parts.push("</body>".to_string());
        parts.push("</html>".to_string());
        parts.join("\n")
    }
}

impl Default for HtmlTemplate {
    fn default() -> Self {
        Self::new()
    }
}
