use crate::config::types::RenderflowConfig;
use crate::error::{RenderflowError, Result};
use crate::export::normalize_formats;
use crate::traits::ConfigValidator;
use std::path::Path;

/// Configuration validator implementation
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = RenderflowConfig;

    fn validate(&self, config: &RenderflowConfig) -> Result<()> {
        self.validate_with_context(config, "configuration")
    }
}

impl ConfigValidatorImpl {
    pub fn new() -> Self {
        Self
    }

    /// Validation naming `config_path` in error messages
    pub fn validate_with_context<P: AsRef<Path>>(
        &self,
        config: &RenderflowConfig,
        config_path: P,
    ) -> Result<()> {
        let config_path_str = config_path.as_ref().to_string_lossy();

        if config.report.title.trim().is_empty() {
            return Err(RenderflowError::invalid_config(format!(
                "Empty [report] title in {}",
                config_path_str
            )));
        }

        normalize_formats(&config.figures.formats).map_err(|e| {
            RenderflowError::invalid_config(format!("[figures] formats in {}: {}", config_path_str, e))
        })?;

        if config.charting.version.trim().is_empty() {
            return Err(RenderflowError::invalid_config(format!(
                "Empty [charting] version in {}",
                config_path_str
            )));
        }

        let cdn_base = &config.charting.cdn_base;
        if !cdn_base.starts_with("https://") && !cdn_base.starts_with("http://") {
            return Err(RenderflowError::invalid_config(format!(
                "Invalid [charting] cdn_base '{}' in {}. Must start with http:// or https://",
                cdn_base, config_path_str
            )));
        }

        Ok(())
    }
}

impl Default for ConfigValidatorImpl {
    fn default() -> Self {
        Self::new()
    }
}
