//! Built-in figure backed by a charting-library exchange tree

use crate::error::{RenderflowError, Result};
use crate::traits::{Figure, HtmlExportOptions, ImageFormat, LibrarySource};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// plotly.js release referenced by generated documents
pub const PLOTLY_JS_VERSION: &str = "2.35.2";

/// Default CDN serving plotly.js bundles
pub const PLOTLY_CDN_BASE: &str = "https://cdn.plot.ly";

/// The charting library loaded by HTML output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartingLibrary {
    pub version: String,
    pub cdn_base: String,
}

impl Default for ChartingLibrary {
    fn default() -> Self {
        Self {
            version: PLOTLY_JS_VERSION.to_string(),
            cdn_base: PLOTLY_CDN_BASE.to_string(),
        }
    }
}

impl ChartingLibrary {
    /// CDN URL of the minified bundle pinned to `version`
    pub fn script_url(&self) -> String {
        format!(
            "{}/plotly-{}.min.js",
            self.cdn_base.trim_end_matches('/'),
            self.version
        )
    }
}

/// Figure holding a `{data, layout}` exchange tree
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFigure {
    spec: Value,
}

impl ChartFigure {
    pub fn new(spec: Value) -> Self {
        Self { spec }
    }

    /// Build a figure from its traces and layout
    pub fn from_parts(data: Vec<Value>, layout: Value) -> Self {
        Self::new(json!({ "data": data, "layout": layout }))
    }

    fn data(&self) -> Value {
        self.spec.get("data").cloned().unwrap_or_else(|| json!([]))
    }

    fn layout(&self) -> Value {
        self.spec.get("layout").cloned().unwrap_or_else(|| json!({}))
    }

    fn html_fragment(&self, div_id: &str, library: &LibrarySource) -> String {
        let script_tag = match library {
            LibrarySource::Cdn(url) => format!(
                "        <script charset=\"utf-8\" src=\"{}\"></script>\n",
                url
            ),
            LibrarySource::External => String::new(),
        };
        format!(
            r#"    <div>
{script_tag}        <div id="{div_id}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
        <script type="text/javascript">
            Plotly.newPlot("{div_id}", {data}, {layout}, {{"responsive": true}});
        </script>
    </div>"#,
            script_tag = script_tag,
            div_id = div_id,
            data = script_safe_json(&self.data()),
            layout = script_safe_json(&self.layout()),
        )
    }
}

impl Figure for ChartFigure {
    fn to_exchange_json(&self) -> Value {
        self.spec.clone()
    }

    fn write_image(&self, _path: &Path, format: ImageFormat) -> Result<()> {
        Err(RenderflowError::ImageExportUnavailable {
            format: format.to_string(),
        })
    }

    fn write_html(&self, path: &Path, options: &HtmlExportOptions) -> Result<()> {
        let fragment = self.html_fragment("renderflow-figure", &options.library);
        let content = if options.full_html {
            format!(
                "<html>\n<head><meta charset=\"utf-8\" /></head>\n<body>\n{}\n</body>\n</html>\n",
                fragment
            )
        } else {
            fragment
        };
        fs::write(path, content)
            .map_err(|e| RenderflowError::figure_export(path, e.to_string()))
    }
}

/// Serialize JSON for inclusion inside a `<script>` element
pub(crate) fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_script_url_is_pinned() {
        let library = ChartingLibrary {
            version: "2.0.0".to_string(),
            cdn_base: "https://cdn.example.com/".to_string(),
        };
        assert_eq!(
            library.script_url(),
            "https://cdn.example.com/plotly-2.0.0.min.js"
        );
        assert!(ChartingLibrary::default()
            .script_url()
            .ends_with(&format!("plotly-{}.min.js", PLOTLY_JS_VERSION)));
    }

    #[test]
    fn test_write_html_full_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fig.html");
        let figure = ChartFigure::from_parts(
            vec![json!({"type": "bar", "y": [1, 2]})],
            json!({"title": {"text": "</script>"}}),
        );

        let options = HtmlExportOptions::cdn_document(ChartingLibrary::default().script_url());
        figure.write_html(&path, &options).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<html>"));
        assert!(html.contains("cdn.plot.ly/plotly-"));
        assert!(html.contains("Plotly.newPlot(\"renderflow-figure\""));
        assert!(html.contains("<\\/script>"));
    }

    #[test]
    fn test_write_image_is_unavailable() {
        let figure = ChartFigure::new(json!({"data": []}));
        let err = figure
            .write_image(Path::new("unused.png"), ImageFormat::Png)
            .unwrap_err();
        assert!(matches!(err, RenderflowError::ImageExportUnavailable { ref format } if format == "png"));
    }

    #[test]
    fn test_missing_parts_default() {
        let figure = ChartFigure::new(json!({}));
        assert_eq!(figure.data(), json!([]));
        assert_eq!(figure.layout(), json!({}));
    }
}
