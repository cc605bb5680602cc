//! Parameter parsing, dropdown resolution and coercion

use super::{DropdownOption, ParamKind, ParamOptions, ParamSpec};
use crate::error::{RenderflowError, Result};
use crate::types::{PayloadMap, PayloadValue};
use indexmap::IndexMap;

/// Raw `key=value` assignments in command-line order
pub type RawParams = IndexMap<String, String>;

/// Label of the placeholder entry shown when a dropdown has no options
pub const NO_OPTIONS_LABEL: &str = "(no options)";

/// Split a `key=value` assignment
///
/// The key is trimmed and must be non-empty; the value is kept as written
/// and may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(RenderflowError::invalid_param(
            raw,
            "expected KEY=VALUE",
        ));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(RenderflowError::invalid_param(raw, "parameter name is empty"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse many assignments; a repeated key keeps its last value
pub fn parse_assignments<I, S>(raws: I) -> Result<RawParams>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut params = RawParams::new();
    for raw in raws {
        let (key, value) = parse_assignment(raw.as_ref())?;
        params.insert(key, value);
    }
    Ok(params)
}

/// Turn raw option entries into `{label, value}` pairs
///
/// Mapping entries keep their `value` and use `label` when present; any other
/// entry is both label and value.
pub fn normalize_dropdown_options(raw: &[PayloadValue]) -> Vec<DropdownOption> {
    raw.iter()
        .map(|option| match option {
            PayloadValue::Map(map) => {
                let value = map.get("value").cloned().unwrap_or(PayloadValue::Null);
                let label = map
                    .get("label")
                    .map_or_else(|| value.to_string(), ToString::to_string);
                DropdownOption { label, value }
            }
            other => DropdownOption {
                label: other.to_string(),
                value: other.clone(),
            },
        })
        .collect()
}

/// Resolve a parameter's options against the current values
///
/// Never empty: with no options the single entry `(no options)` with an
/// empty value is returned.
pub fn resolve_dropdown_options(spec: &ParamSpec, values: &PayloadMap) -> Vec<DropdownOption> {
    let raw = match &spec.options {
        ParamOptions::None => Vec::new(),
        ParamOptions::Static(options) => options.clone(),
        ParamOptions::Dynamic(resolver) => resolver(values, spec),
    };

    let normalized = normalize_dropdown_options(&raw);
    if normalized.is_empty() {
        return vec![DropdownOption::new(NO_OPTIONS_LABEL, "")];
    }
    normalized
}

/// Coerce raw assignments against parameter specs
///
/// Declared parameters are filled from `raw` or their default, in declaration
/// order; undeclared keys follow as strings.
pub fn coerce_params(specs: &[ParamSpec], raw: &RawParams) -> Result<PayloadMap> {
    let mut values = PayloadMap::new();

    for spec in specs {
        let value = match raw.get(&spec.key) {
            Some(text) => coerce_value(spec, text, &values)?,
            None => spec.default.clone(),
        };
        values.insert(spec.key.clone(), value);
    }

    for (key, text) in raw {
        if !values.contains_key(key) {
            values.insert(key.clone(), PayloadValue::from(text.as_str()));
        }
    }

    Ok(values)
}

fn coerce_value(spec: &ParamSpec, text: &str, current: &PayloadMap) -> Result<PayloadValue> {
    match spec.kind {
        ParamKind::Text => Ok(PayloadValue::from(text)),
        ParamKind::Number => coerce_number(spec, text),
        ParamKind::Checkbox => coerce_checkbox(spec, text),
        ParamKind::Dropdown => coerce_dropdown(spec, text, current),
    }
}

fn coerce_number(spec: &ParamSpec, text: &str) -> Result<PayloadValue> {
    let trimmed = text.trim();
    let (value, number) = match trimmed.parse::<i64>() {
        Ok(int) => (int as f64, PayloadValue::from(int)),
        Err(_) => {
            let float = trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .ok_or_else(|| {
                    RenderflowError::invalid_param(&spec.key, format!("'{}' is not a number", text))
                })?;
            (float, PayloadValue::from(float))
        }
    };

    if let Some(min) = spec.min.filter(|min| value < *min) {
        return Err(RenderflowError::invalid_param(
            &spec.key,
            format!("{} is below the minimum of {}", trimmed, min),
        ));
    }
    if let Some(max) = spec.max.filter(|max| value > *max) {
        return Err(RenderflowError::invalid_param(
            &spec.key,
            format!("{} is above the maximum of {}", trimmed, max),
        ));
    }
    Ok(number)
}

fn coerce_checkbox(spec: &ParamSpec, text: &str) -> Result<PayloadValue> {
    match text.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(PayloadValue::Bool(true)),
        "false" | "0" | "no" | "off" => Ok(PayloadValue::Bool(false)),
        _ => Err(RenderflowError::invalid_param(
            &spec.key,
            format!("'{}' is not a boolean (use true/false, yes/no, on/off, 1/0)", text),
        )),
    }
}

fn coerce_dropdown(spec: &ParamSpec, text: &str, current: &PayloadMap) -> Result<PayloadValue> {
    if matches!(spec.options, ParamOptions::None) {
        return Ok(PayloadValue::from(text));
    }

    let options = resolve_dropdown_options(spec, current);
    let placeholder_only = options.len() == 1 && options[0].label == NO_OPTIONS_LABEL;
    if placeholder_only {
        return Ok(PayloadValue::from(text));
    }

    options
        .iter()
        .find(|option| option.value.to_string() == text)
        .map(|option| option.value.clone())
        .ok_or_else(|| {
            let allowed = options
                .iter()
                .map(|option| option.value.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            RenderflowError::invalid_param(
                &spec.key,
                format!("'{}' is not one of: {}", text, allowed),
            )
        })
}
