use crate::figure::ChartingLibrary;
use crate::renderers::report::DEFAULT_REPORT_TITLE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of `renderflow.toml`
///
/// Every section is optional; missing values take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderflowConfig {
    pub report: ReportSettings,
    pub figures: FigureSettings,
    pub charting: ChartingLibrary,
}

/// `[report]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Title used when `--title` is not given
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

/// `[figures]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSettings {
    /// Formats used when `--figure-format` is not given
    pub formats: Vec<String>,
    /// Export directory used when `--save-figures-dir` is not given
    pub output_dir: Option<PathBuf>,
}

impl Default for FigureSettings {
    fn default() -> Self {
        Self {
            formats: vec!["html".to_string()],
            output_dir: None,
        }
    }
}
