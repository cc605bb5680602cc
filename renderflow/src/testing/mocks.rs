use crate::error::{RenderflowError, Result};
use crate::traits::{Figure, HtmlExportOptions, ImageFormat};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Figure double that writes placeholder files and records every call
#[derive(Debug)]
pub struct MockFigure {
    pub spec: Value,
    pub image_failure: Option<String>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl MockFigure {
    pub fn new() -> Self {
        Self::with_spec(json!({"data": [], "layout": {}}))
    }

    pub fn with_spec(spec: Value) -> Self {
        Self {
            spec,
            image_failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every image export fail with `message`
    pub fn with_image_failure<S: Into<String>>(mut self, message: S) -> Self {
        self.image_failure = Some(message.into());
        self
    }

    /// `(call, path)` pairs in call order; `call` is `html` or the image format
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: &str, path: &Path) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((call.to_string(), path.to_path_buf()));
        }
    }
}

impl Default for MockFigure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure for MockFigure {
    fn to_exchange_json(&self) -> Value {
        self.spec.clone()
    }

    fn write_image(&self, path: &Path, format: ImageFormat) -> Result<()> {
        self.record(format.as_str(), path);
        if let Some(message) = &self.image_failure {
            return Err(RenderflowError::figure_export(path, message.clone()));
        }
        fs::write(path, b"image-bytes")?;
        Ok(())
    }

    fn write_html(&self, path: &Path, _options: &HtmlExportOptions) -> Result<()> {
        self.record("html", path);
        fs::write(path, "<html></html>")?;
        Ok(())
    }
}

pub mod test_helpers {
    use super::*;
    use crate::types::{FigureRef, PayloadMap, PayloadValue};
    use std::sync::Arc;

    pub fn mock_figure() -> Arc<MockFigure> {
        Arc::new(MockFigure::new())
    }

    /// `{"type": "plot", "figure": F, ...extra}` item mapping
    pub fn plot_entry(figure: FigureRef, extra: &[(&str, PayloadValue)]) -> PayloadValue {
        let mut entry = PayloadMap::new();
        entry.insert("type".to_string(), "plot".into());
        entry.insert("figure".to_string(), figure.into());
        for (key, value) in extra {
            entry.insert(key.to_string(), value.clone());
        }
        PayloadValue::Map(entry)
    }

    /// `{"results": [...]}` payload from raw item mappings
    pub fn results_payload(entries: Vec<PayloadValue>) -> PayloadValue {
        PayloadValue::map([("results", PayloadValue::List(entries))])
    }
}
