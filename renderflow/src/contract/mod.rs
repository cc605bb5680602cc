pub mod validator;
pub mod normalizer;

pub use validator::{validate_results_contract, LEGACY_KEYS};
pub use normalizer::normalize_results;
