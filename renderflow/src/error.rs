use thiserror::Error;
use std::path::PathBuf;

/// Result type alias for renderflow operations
pub type Result<T> = std::result::Result<T, RenderflowError>;

/// Violations of the workflow result contract.
///
/// These are programmer errors in a workflow implementation: they are reported
/// immediately and never retried. Item indices are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("Workflow returned None; expected a dict result payload.")]
    MissingPayload,

    #[error("Workflow must return a dict result payload, got {found}.")]
    WrongPayloadType { found: String },

    #[error(
        "Workflow result dict must contain 'results' or legacy keys ('text', 'tables', 'plots'). Received keys: {}",
        keys.join(", ")
    )]
    UnrecognizedShape { keys: Vec<String> },

    #[error("'results' must be a list of result items, got {found}.")]
    ResultsNotAList { found: String },

    #[error("Result item #{index} must be a dict, got {found}.")]
    ItemNotADict { index: usize, found: String },

    #[error("Result item #{index} has invalid type {found}. Allowed: {allowed}")]
    InvalidItemType {
        index: usize,
        found: String,
        allowed: String,
    },

    #[error("Result item #{index} has type 'plot' but is missing required key 'figure'.")]
    PlotMissingFigure { index: usize },
}

/// Comprehensive error types for renderflow operations
#[derive(Debug, Error)]
pub enum RenderflowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid workflow result payload: {0}")]
    Contract(#[from] ContractError),

    #[error("Invalid figure format '{value}'. Allowed: {allowed}")]
    InvalidFigureFormat { value: String, allowed: String },

    #[error("Image export to '{format}' is not available for this figure; export as html or json instead")]
    ImageExportUnavailable { format: String },

    #[error("Failed to export figure to {}: {message}", path.display())]
    FigureExport { path: PathBuf, message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Provider '{name}' not found. Available providers: {available}")]
    ProviderNotFound { name: String, available: String },

    #[error("Workflow '{workflow}' not found. Available workflows: {available}")]
    WorkflowNotFound { workflow: String, available: String },

    #[error("Invalid parameter '{key}': {message}")]
    InvalidParam { key: String, message: String },

    #[error("Initializer '{initializer}' failed: {message}")]
    InitializerFailed {
        initializer: String,
        message: String,
    },

    #[error("Workflow '{workflow}' failed: {message}")]
    WorkflowFailed { workflow: String, message: String },

    #[error("General error: {message}")]
    General { message: String },
}

impl RenderflowError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new invalid parameter error
    pub fn invalid_param<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::InvalidParam {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a new figure export error
    pub fn figure_export<P: Into<PathBuf>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FigureExport {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Whether this error is a violation of the workflow result contract
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}
