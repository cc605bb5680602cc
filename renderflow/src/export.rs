//! Figure export engine
//!
//! Writes one file per `(plot item, format)` pair into an output directory.
//! Exports are best-effort: a failure aborts the remaining writes but leaves
//! files already written in place.

use crate::contract::normalize_results;
use crate::decode::decode_numeric_payload;
use crate::error::{RenderflowError, Result};
use crate::figure::ChartingLibrary;
use crate::output::{ensure_directory, write_file_atomic};
use crate::traits::{HtmlExportOptions, ImageFormat};
use crate::types::{PayloadValue, PlotItem, ResultItem};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// File formats a figure can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureFormat {
    Html,
    Json,
    Png,
    Jpg,
    Jpeg,
    Svg,
    Pdf,
}

impl FigureFormat {
    /// Every accepted format, in the order they are listed to users
    pub const ALL: [FigureFormat; 7] = [
        Self::Html,
        Self::Json,
        Self::Png,
        Self::Jpg,
        Self::Jpeg,
        Self::Svg,
        Self::Pdf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// File extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            other => other.as_str(),
        }
    }

    /// The figure image call this format delegates to, if any
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            Self::Png => Some(ImageFormat::Png),
            Self::Jpg | Self::Jpeg => Some(ImageFormat::Jpg),
            Self::Svg => Some(ImageFormat::Svg),
            Self::Pdf => Some(ImageFormat::Pdf),
            Self::Html | Self::Json => None,
        }
    }

    /// Comma-separated list of accepted tokens
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|format| format.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FigureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FigureFormat {
    type Err = RenderflowError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == value)
            .ok_or_else(|| RenderflowError::InvalidFigureFormat {
                value,
                allowed: Self::allowed(),
            })
    }
}

/// Normalize user-supplied format tokens
///
/// Each token may itself be a comma-separated list. Tokens are trimmed and
/// case-folded, empty ones ignored, and duplicates dropped keeping the first
/// occurrence. No tokens at all means `["html"]`.
pub fn normalize_formats<I, S>(tokens: I) -> Result<Vec<FigureFormat>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = Vec::new();
    for token in tokens {
        for piece in token.as_ref().split(',') {
            if piece.trim().is_empty() {
                continue;
            }
            let format: FigureFormat = piece.parse()?;
            if !normalized.contains(&format) {
                normalized.push(format);
            }
        }
    }

    if normalized.is_empty() {
        normalized.push(FigureFormat::Html);
    }
    Ok(normalized)
}

/// Replace anything but alphanumerics, `-` and `_` with `_`, then trim `_`
pub fn sanitize_figure_name(raw: &str) -> String {
    let safe: String = raw
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    safe.trim_matches('_').to_string()
}

/// File stem for a plot: its id, else its title, else `figure_{position}`
pub fn figure_name(plot: &PlotItem, position: usize) -> String {
    let fallback = || format!("figure_{}", position);
    let raw = [plot.id.as_deref(), plot.title.as_deref()]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
        .map_or_else(fallback, str::to_string);

    let safe = sanitize_figure_name(&raw);
    if safe.is_empty() {
        fallback()
    } else {
        safe
    }
}

/// Exports plot items to files
#[derive(Debug, Clone, Default)]
pub struct FigureExporter {
    library: ChartingLibrary,
}

impl FigureExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific charting library build for HTML exports
    pub fn with_library(mut self, library: ChartingLibrary) -> Self {
        self.library = library;
        self
    }

    /// Validate and normalize `payload`, then export its plots
    ///
    /// Contract and format errors are raised before anything is written.
    pub fn export<P, I, S>(&self, payload: &PayloadValue, output_dir: P, formats: I) -> Result<Vec<PathBuf>>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = normalize_results(payload)?;
        let formats = normalize_formats(formats)?;
        self.export_items(&items, output_dir, &formats)
    }

    /// Export already-normalized items
    ///
    /// Paths are returned in write order: items outer, formats inner.
    pub fn export_items<P: AsRef<Path>>(
        &self,
        items: &[ResultItem],
        output_dir: P,
        formats: &[FigureFormat],
    ) -> Result<Vec<PathBuf>> {
        let out = output_dir.as_ref();
        ensure_directory(out)?;

        let html_options = HtmlExportOptions::cdn_document(self.library.script_url());
        let mut saved = Vec::new();
        let mut position = 0;

        for item in items {
            let ResultItem::Plot(plot) = item else {
                continue;
            };
            if !plot.save {
                continue;
            }
            let Some(figure) = &plot.figure else {
                continue;
            };

            position += 1;
            let name = figure_name(plot, position);
            for format in formats {
                let path = out.join(format!("{}.{}", name, format.extension()));
                match format.image_format() {
                    Some(image_format) => figure.write_image(&path, image_format)?,
                    None if *format == FigureFormat::Json => {
                        let payload = decode_numeric_payload(figure.to_exchange_json());
                        write_file_atomic(&path, serde_json::to_string(&payload)?)?;
                    }
                    None => figure.write_html(&path, &html_options)?,
                }
                debug!(path = %path.display(), format = %format, "exported figure");
                saved.push(path);
            }
        }

        info!(count = saved.len(), dir = %out.display(), "figure export finished");
        Ok(saved)
    }
}

/// Export every saveable plot in `payload` with the default exporter
pub fn save_figures<P, I, S>(payload: &PayloadValue, output_dir: P, formats: I) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FigureExporter::new().export(payload, output_dir, formats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::ChartFigure;
    use serde_json::json;
    use std::sync::Arc;

    fn plot(id: Option<&str>, title: Option<&str>) -> PlotItem {
        let mut item = PlotItem::new(Arc::new(ChartFigure::new(json!({}))));
        item.id = id.map(str::to_string);
        item.title = title.map(str::to_string);
        item
    }

    #[test]
    fn test_normalize_formats_dedup_and_case() {
        assert_eq!(
            normalize_formats(["HTML", "html", "json"]).unwrap(),
            vec![FigureFormat::Html, FigureFormat::Json]
        );
        assert_eq!(
            normalize_formats(["png,svg"]).unwrap(),
            vec![FigureFormat::Png, FigureFormat::Svg]
        );
        assert_eq!(
            normalize_formats([" pdf , ,PNG", "pdf"]).unwrap(),
            vec![FigureFormat::Pdf, FigureFormat::Png]
        );
    }

    #[test]
    fn test_normalize_formats_defaults_to_html() {
        assert_eq!(
            normalize_formats(Vec::<String>::new()).unwrap(),
            vec![FigureFormat::Html]
        );
        assert_eq!(normalize_formats([" , "]).unwrap(), vec![FigureFormat::Html]);
    }

    #[test]
    fn test_normalize_formats_is_idempotent() {
        let once = normalize_formats(["SVG,jpeg", "json", "svg"]).unwrap();
        let twice = normalize_formats(once.iter().map(|f| f.as_str())).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_format_names_allowed_set() {
        let err = normalize_formats(["html", "bogus"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid figure format 'bogus'. Allowed: html, json, png, jpg, jpeg, svg, pdf"
        );
    }

    #[test]
    fn test_jpeg_maps_to_jpg_extension() {
        assert_eq!(FigureFormat::Jpeg.extension(), "jpg");
        assert_eq!(FigureFormat::Jpeg.image_format(), Some(ImageFormat::Jpg));
        assert_eq!(FigureFormat::Json.image_format(), None);
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_figure_name("My Plot #1!"), "My_Plot__1");
        assert_eq!(sanitize_figure_name("__ok-name__"), "ok-name");
        assert_eq!(sanitize_figure_name("!!!"), "");
    }

    #[test]
    fn test_figure_name_preference() {
        assert_eq!(figure_name(&plot(Some("fig1"), Some("Title")), 3), "fig1");
        assert_eq!(figure_name(&plot(None, Some("Sales / Q1")), 3), "Sales___Q1");
        assert_eq!(figure_name(&plot(Some(""), None), 2), "figure_2");
        assert_eq!(figure_name(&plot(Some("???"), None), 5), "figure_5");
    }
}
