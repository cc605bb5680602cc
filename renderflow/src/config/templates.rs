use crate::error::{RenderflowError, Result};
use std::fs;
use std::path::Path;

/// Generate a commented default `renderflow.toml`
pub fn generate_default_config_template() -> String {
    r#"# Renderflow Configuration
# Every setting is optional; command-line flags take precedence.

[report]
# Title of HTML reports written with --html
title = "Workflow Report"

[figures]
# Formats written with --save-figures-dir: html, json, png, jpg, jpeg, svg, pdf
# png/jpg/svg/pdf need a figure type that can render images
formats = ["html"]
# Default export directory (uncomment to always export figures)
# output_dir = "figures"

[charting]
# plotly.js build loaded by HTML reports and HTML figure exports
version = "2.35.2"
cdn_base = "https://cdn.plot.ly"
"#
    .to_string()
}

/// Write the default template unless a file already exists
///
/// With `force` an existing file is replaced. Returns whether a file was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(path: P, force: bool) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Ok(false);
    }

    fs::write(path, generate_default_config_template()).map_err(RenderflowError::Io)?;
    Ok(true)
}
