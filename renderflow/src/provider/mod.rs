//! Provider contracts
//!
//! A provider describes an application as an [`AppSpec`]: initializers that
//! build a shared context, and workflows that turn the context plus their own
//! parameters into a result payload. The declarative [`ParamSpec`]s drive both
//! command-line parsing and any interactive front end.

use crate::error::{RenderflowError, Result};
use crate::types::{PayloadMap, PayloadValue};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub mod minimal;
pub mod params;
pub mod registry;

pub use params::{
    coerce_params, normalize_dropdown_options, parse_assignment, parse_assignments,
    resolve_dropdown_options, RawParams, NO_OPTIONS_LABEL,
};
pub use registry::ProviderRegistry;

/// Builds context entries from coerced initializer parameters
pub type InitializeFn = Arc<dyn Fn(&PayloadMap) -> anyhow::Result<PayloadMap> + Send + Sync>;

/// Runs a workflow against `(context, params)`
pub type WorkflowFn =
    Arc<dyn Fn(&PayloadMap, &PayloadMap) -> anyhow::Result<PayloadValue> + Send + Sync>;

/// Computes dropdown options from the current parameter values
pub type OptionsResolver = Arc<dyn Fn(&PayloadMap, &ParamSpec) -> Vec<PayloadValue> + Send + Sync>;

/// Input widget kind of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamKind {
    #[default]
    Text,
    Number,
    Checkbox,
    Dropdown,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKind {
    type Err = RenderflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "checkbox" => Ok(Self::Checkbox),
            "dropdown" => Ok(Self::Dropdown),
            other => Err(RenderflowError::general(format!(
                "Unknown parameter type '{}'. Allowed: text, number, checkbox, dropdown",
                other
            ))),
        }
    }
}

/// One selectable dropdown entry
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption {
    pub label: String,
    pub value: PayloadValue,
}

impl DropdownOption {
    pub fn new<L: Into<String>, V: Into<PayloadValue>>(label: L, value: V) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Static or computed dropdown options
#[derive(Clone, Default)]
pub enum ParamOptions {
    #[default]
    None,
    Static(Vec<PayloadValue>),
    Dynamic(OptionsResolver),
}

impl fmt::Debug for ParamOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Static(options) => f.debug_tuple("Static").field(options).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<resolver>)"),
        }
    }
}

/// Declarative parameter definition
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub key: String,
    pub label: String,
    pub kind: ParamKind,
    pub default: PayloadValue,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub options: ParamOptions,
    pub help: String,
}

impl ParamSpec {
    pub fn new<K: Into<String>, L: Into<String>>(key: K, label: L, kind: ParamKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            default: PayloadValue::Null,
            min: None,
            max: None,
            step: None,
            options: ParamOptions::None,
            help: String::new(),
        }
    }

    pub fn text<K: Into<String>, L: Into<String>>(key: K, label: L) -> Self {
        Self::new(key, label, ParamKind::Text)
    }

    pub fn number<K: Into<String>, L: Into<String>>(key: K, label: L) -> Self {
        Self::new(key, label, ParamKind::Number)
    }

    pub fn checkbox<K: Into<String>, L: Into<String>>(key: K, label: L) -> Self {
        Self::new(key, label, ParamKind::Checkbox)
    }

    pub fn dropdown<K: Into<String>, L: Into<String>>(key: K, label: L) -> Self {
        Self::new(key, label, ParamKind::Dropdown)
    }

    pub fn with_default<V: Into<PayloadValue>>(mut self, default: V) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Static options; bare values or `{label, value}` mappings
    pub fn with_options<I, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PayloadValue>,
    {
        self.options = ParamOptions::Static(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_dynamic_options<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&PayloadMap, &ParamSpec) -> Vec<PayloadValue> + Send + Sync + 'static,
    {
        self.options = ParamOptions::Dynamic(Arc::new(resolver));
        self
    }

    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = help.into();
        self
    }

    /// One-line summary: `key: kind | default=... | help`
    pub fn summary(&self) -> String {
        let mut line = format!("{}: {} | default={}", self.key, self.kind, self.default.repr());
        if !self.help.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.help);
        }
        line
    }
}

/// Context initialization step of a provider
#[derive(Clone)]
pub struct InitializerSpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    pub initialize: InitializeFn,
}

impl InitializerSpec {
    pub fn new<I, N, F>(id: I, name: N, initialize: F) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        F: Fn(&PayloadMap) -> anyhow::Result<PayloadMap> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
            initialize: Arc::new(initialize),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }
}

impl fmt::Debug for InitializerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitializerSpec")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A runnable workflow with its parameters
#[derive(Clone)]
pub struct WorkflowSpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    pub run: WorkflowFn,
}

impl WorkflowSpec {
    pub fn new<I, N, F>(id: I, name: N, run: F) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        F: Fn(&PayloadMap, &PayloadMap) -> anyhow::Result<PayloadValue> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
            run: Arc::new(run),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }
}

impl fmt::Debug for WorkflowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowSpec")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Full provider definition
#[derive(Debug, Clone)]
pub struct AppSpec {
    pub app_name: String,
    pub initializers: Vec<InitializerSpec>,
    pub workflows: Vec<WorkflowSpec>,
}

impl AppSpec {
    pub fn new<S: Into<String>>(app_name: S) -> Self {
        Self {
            app_name: app_name.into(),
            initializers: Vec::new(),
            workflows: Vec::new(),
        }
    }

    pub fn with_initializer(mut self, initializer: InitializerSpec) -> Self {
        self.initializers.push(initializer);
        self
    }

    pub fn with_workflow(mut self, workflow: WorkflowSpec) -> Self {
        self.workflows.push(workflow);
        self
    }

    pub fn initializer(&self, id: &str) -> Option<&InitializerSpec> {
        self.initializers.iter().find(|init| init.id == id)
    }

    /// Look up a workflow, listing the available ids when it is missing
    pub fn workflow(&self, id: &str) -> Result<&WorkflowSpec> {
        self.workflows
            .iter()
            .find(|workflow| workflow.id == id)
            .ok_or_else(|| RenderflowError::WorkflowNotFound {
                workflow: id.to_string(),
                available: self
                    .workflows
                    .iter()
                    .map(|workflow| workflow.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Plain-text description of initializers, workflows and their parameters
    pub fn describe(&self) -> String {
        let mut lines = vec![self.app_name.clone()];

        if !self.initializers.is_empty() {
            lines.push(String::new());
            lines.push("Initializers:".to_string());
            for init in &self.initializers {
                push_entry(&mut lines, &init.id, &init.name, &init.description, &init.params);
            }
        }

        lines.push(String::new());
        lines.push("Workflows and parameters:".to_string());
        for workflow in &self.workflows {
            push_entry(
                &mut lines,
                &workflow.id,
                &workflow.name,
                &workflow.description,
                &workflow.params,
            );
        }

        lines.join("\n")
    }
}

fn push_entry(lines: &mut Vec<String>, id: &str, name: &str, description: &str, params: &[ParamSpec]) {
    lines.push(format!("- {}: {}", id, name));
    if !description.is_empty() {
        lines.push(format!("  {}", description));
    }
    lines.extend(params.iter().map(|param| format!("    {}", param.summary())));
}
