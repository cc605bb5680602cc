use super::{minimal, AppSpec};
use crate::error::{RenderflowError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type ProviderFactory = Arc<dyn Fn() -> AppSpec + Send + Sync>;

/// Named provider factories
///
/// Providers are registered up front; `load` builds a fresh [`AppSpec`] each
/// time it is called.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the providers bundled with this crate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(minimal::PROVIDER_NAME, minimal::app_spec);
        registry
    }

    /// Register `factory` under `name`, replacing any previous entry
    pub fn register<S, F>(&mut self, name: S, factory: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn() -> AppSpec + Send + Sync + 'static,
    {
        self.providers.insert(name.into(), Arc::new(factory));
        self
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn load(&self, name: &str) -> Result<AppSpec> {
        let factory = self
            .providers
            .get(name)
            .ok_or_else(|| RenderflowError::ProviderNotFound {
                name: name.to_string(),
                available: if self.providers.is_empty() {
                    "(none)".to_string()
                } else {
                    self.names().join(", ")
                },
            })?;
        Ok(factory())
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
