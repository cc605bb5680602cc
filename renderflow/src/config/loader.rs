use crate::config::types::RenderflowConfig;
use crate::config::validator::ConfigValidatorImpl;
use crate::error::{RenderflowError, Result};
use std::path::Path;
use tracing::debug;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "renderflow.toml";

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderflowConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<RenderflowConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a TOML file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderflowConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| RenderflowError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let config: RenderflowConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load and validate configuration, naming the file in any error
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<RenderflowConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(RenderflowError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(RenderflowError::Io)?;

        let config: RenderflowConfig = toml::from_str(&content).map_err(|e| {
            RenderflowError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        ConfigValidatorImpl::new().validate_with_context(&config, path_ref)?;
        Ok(config)
    }
}

impl RenderflowConfig {
    /// Load an explicit config file, or `renderflow.toml` from the working
    /// directory when present, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => DefaultConfigLoader::load_with_validation(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                DefaultConfigLoader::load_with_validation(DEFAULT_CONFIG_FILE)
            }
            None => {
                debug!("no {} found, using default configuration", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_with_validation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"
[report]
title = "Nightly"

[figures]
formats = ["html", "JSON"]
"#,
        )
        .unwrap();

        let config = DefaultConfigLoader::load_with_validation(&path).unwrap();
        assert_eq!(config.report.title, "Nightly");
        assert_eq!(config.figures.formats, vec!["html", "JSON"]);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");
        let err = RenderflowConfig::load_or_default(Some(&path)).unwrap_err();
        assert!(matches!(err, RenderflowError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_invalid_toml_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[report\ntitle = 1").unwrap();

        let err = DefaultConfigLoader::load_with_validation(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_load_from_file_skips_validation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("raw.toml");
        fs::write(&path, "[figures]\nformats = [\"gif\"]\n").unwrap();

        let config = DefaultConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.figures.formats, vec!["gif"]);
        assert!(DefaultConfigLoader::load_with_validation(&path).is_err());
    }
}
