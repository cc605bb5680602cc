pub mod loader;
pub mod templates;
pub mod types;
pub mod validator;

pub use loader::{ConfigLoader, DefaultConfigLoader, DEFAULT_CONFIG_FILE};
pub use templates::{ensure_config_file_exists, generate_default_config_template};
pub use types::{FigureSettings, RenderflowConfig, ReportSettings};
pub use validator::ConfigValidatorImpl;
