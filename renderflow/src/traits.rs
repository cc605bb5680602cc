use crate::error::Result;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Capability interface for figure objects produced by a charting library
///
/// Workflows hand these to the result model opaquely; the export engine and
/// the HTML report only ever talk to a figure through this trait.
pub trait Figure: Send + Sync + fmt::Debug {
    /// Return the figure's `{data, layout}` exchange tree
    ///
    /// The tree may contain compact numeric fragments; callers that need
    /// plain JSON run it through [`crate::decode::decode_numeric_payload`].
    fn to_exchange_json(&self) -> Value;

    /// Write the figure as an image file in the given format
    fn write_image(&self, path: &Path, format: ImageFormat) -> Result<()>;

    /// Write the figure as an HTML file
    fn write_html(&self, path: &Path, options: &HtmlExportOptions) -> Result<()>;
}

/// Image formats a figure can be asked to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ImageFormat {
    /// Format token, which doubles as the file extension
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the charting library script is made available to an HTML export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    /// Reference the library by URL
    Cdn(String),
    /// Assume the host page already loaded the library
    External,
}

/// Options for [`Figure::write_html`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlExportOptions {
    pub library: LibrarySource,
    /// Produce a complete document instead of an embeddable fragment
    pub full_html: bool,
}

impl HtmlExportOptions {
    /// Full document loading the library from the given CDN URL
    pub fn cdn_document<S: Into<String>>(script_url: S) -> Self {
        Self {
            library: LibrarySource::Cdn(script_url.into()),
            full_html: true,
        }
    }
}

/// Trait for configuration validation
pub trait ConfigValidator: Send + Sync {
    type Config;

    /// Validate configuration
    fn validate(&self, config: &Self::Config) -> Result<()>;
}
