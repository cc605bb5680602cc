//! JSON renderer for structured output

use super::OutputRenderer;
use crate::decode::decode_numeric_payload;
use crate::types::ResultItem;
use serde_json::Value;

/// Renders result items as a JSON array
///
/// Figures are replaced by their decoded exchange tree.
pub struct JsonRenderer {
    /// Whether to pretty-print the JSON output
    pub pretty: bool,
}

impl JsonRenderer {
    /// Create a new JSON renderer with pretty printing
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a JSON renderer with compact output
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Plain JSON value for the given items
    pub fn to_value(items: &[ResultItem]) -> Value {
        let items = items
            .iter()
            .map(|item| decode_numeric_payload(item.to_payload().to_json()))
            .collect();
        Value::Array(items)
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputRenderer for JsonRenderer {
    fn render(&self, items: &[ResultItem]) -> String {
        let value = Self::to_value(items);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        rendered.unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{encode_fragment, DType};
    use crate::figure::ChartFigure;
    use crate::types::{PlotItem, TableData};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_json_renderer_compact() {
        let items = vec![
            ResultItem::text(["hi"]),
            ResultItem::table("T", TableData::new().with_column("a", [1, 2])),
        ];
        let output = JsonRenderer::compact().render(&items);
        assert_eq!(
            output,
            r#"[{"type":"text","content":["hi"]},{"type":"table","title":"T","data":{"a":[1,2]}}]"#
        );
    }

    #[test]
    fn test_figures_are_decoded() {
        let figure = ChartFigure::from_parts(
            vec![json!({"y": encode_fragment(&[1.0, 2.0], DType::Int16, None)})],
            json!({}),
        );
        let items = vec![ResultItem::Plot(PlotItem::new(Arc::new(figure)).with_id("f"))];

        let value = JsonRenderer::to_value(&items);
        assert_eq!(value[0]["figure"]["data"][0]["y"], json!([1, 2]));
        assert_eq!(value[0]["id"], json!("f"));

        let pretty = JsonRenderer::new().render(&items);
        assert!(pretty.starts_with("[\n"));
    }
}
