//! Terminal renderer for plain-text output

use super::table::{ResultTable, TableStyle};
use crate::renderers::OutputRenderer;
use crate::types::{CodeItem, PlotItem, ResultItem, TableItem};

/// Renders result items as human-readable terminal text
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    table_style: TableStyle,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific table style
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.table_style = style;
        self
    }

    fn render_table(&self, table: &TableItem) -> String {
        let mut out = format!("{}\n", table.title);
        if table.data.is_empty() {
            out.push_str("(empty table)");
            return out;
        }

        out.push_str(&ResultTable::new(self.table_style).render(&table.data));
        out
    }

    fn render_code(code: &CodeItem) -> String {
        let mut out = format!("Code ({})", code.language);
        for line in &code.content {
            out.push_str("\n    ");
            out.push_str(line);
        }
        out
    }

    fn render_plot(plot: &PlotItem, position: usize) -> String {
        let name = [plot.title.as_deref(), plot.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .map_or_else(|| format!("figure_{}", position), str::to_string);
        if plot.figure.is_none() {
            return format!("[plot] {} (no figure attached)", name);
        }
        format!(
            "[plot] {} (use --html or --save-figures-dir to view)",
            name
        )
    }
}

impl OutputRenderer for TerminalRenderer {
    fn render(&self, items: &[ResultItem]) -> String {
        if items.is_empty() {
            return "No results returned.".to_string();
        }

        let mut plots = 0;
        let blocks: Vec<String> = items
            .iter()
            .map(|item| match item {
                ResultItem::Text(text) => text.content.join("\n"),
                ResultItem::Table(table) => self.render_table(table),
                ResultItem::Code(code) => Self::render_code(code),
                ResultItem::Plot(plot) => {
                    plots += 1;
                    Self::render_plot(plot, plots)
                }
            })
            .collect();

        blocks.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::ChartFigure;
    use crate::types::TableData;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_empty_results() {
        assert_eq!(TerminalRenderer::new().render(&[]), "No results returned.");
    }

    #[test]
    fn test_renders_every_item_kind() {
        let figure = Arc::new(ChartFigure::new(json!({"data": []})));
        let items = vec![
            ResultItem::text(["Hello", "World"]),
            ResultItem::table(
                "Scores",
                TableData::new()
                    .with_column("name", ["a", "b"])
                    .with_column("score", [1]),
            ),
            ResultItem::code(["let x = 1;", "x + 1"], "rust"),
            ResultItem::Plot(PlotItem::new(figure).with_title("Trend")),
        ];

        let output = TerminalRenderer::new()
            .with_table_style(TableStyle::Ascii)
            .render(&items);

        assert!(output.starts_with("Hello\nWorld\n\nScores\n"));
        assert!(output.contains("| name | score |"));
        assert!(output.contains("| b    |       |"));
        assert!(output.contains("Code (rust)\n    let x = 1;\n    x + 1"));
        assert!(output.ends_with("[plot] Trend (use --html or --save-figures-dir to view)"));
    }

    #[test]
    fn test_plot_placeholder_fallback_name() {
        let mut plot = PlotItem::new(Arc::new(ChartFigure::new(json!({}))));
        plot.figure = None;
        let output = TerminalRenderer::new().render(&[ResultItem::Plot(plot)]);
        assert_eq!(output, "[plot] figure_1 (no figure attached)");
    }
}
