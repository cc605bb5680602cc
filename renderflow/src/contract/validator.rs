use crate::error::ContractError;
use crate::types::{PayloadValue, RESULT_TYPES};

/// Keys of the legacy `{text, tables, plots}` payload shape
pub const LEGACY_KEYS: [&str; 3] = ["text", "tables", "plots"];

/// Check a workflow payload against the accepted result shapes
///
/// Accepts an empty mapping, a mapping with a `results` list (or `None`), or a
/// mapping using any of the legacy keys. Legacy entries are not inspected
/// here; the normalizer tolerates whatever they contain.
pub fn validate_results_contract(payload: &PayloadValue) -> Result<(), ContractError> {
    let map = match payload {
        PayloadValue::Null => return Err(ContractError::MissingPayload),
        PayloadValue::Map(map) => map,
        other => {
            return Err(ContractError::WrongPayloadType {
                found: other.type_name().to_string(),
            })
        }
    };

    let has_modern = map.contains_key("results");
    let has_legacy = LEGACY_KEYS.iter().any(|key| map.contains_key(*key));
    if !has_modern && !has_legacy && !map.is_empty() {
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        return Err(ContractError::UnrecognizedShape { keys });
    }

    if !has_modern {
        return Ok(());
    }

    let items = match map.get("results") {
        None | Some(PayloadValue::Null) => return Ok(()),
        Some(PayloadValue::List(items)) => items,
        Some(other) => {
            return Err(ContractError::ResultsNotAList {
                found: other.type_name().to_string(),
            })
        }
    };

    for (idx, item) in items.iter().enumerate() {
        let index = idx + 1;
        let PayloadValue::Map(item) = item else {
            return Err(ContractError::ItemNotADict {
                index,
                found: item.type_name().to_string(),
            });
        };

        let item_type = item.get("type");
        let valid = item_type
            .and_then(PayloadValue::as_str)
            .filter(|name| RESULT_TYPES.contains(name));
        let Some(item_type) = valid else {
            return Err(ContractError::InvalidItemType {
                index,
                found: item_type.map_or_else(|| "None".to_string(), PayloadValue::repr),
                allowed: RESULT_TYPES.join(", "),
            });
        };

        if item_type == "plot" && !item.contains_key("figure") {
            return Err(ContractError::PlotMissingFigure { index });
        }
    }

    Ok(())
}
