use super::validator::validate_results_contract;
use crate::error::ContractError;
use crate::types::{PayloadMap, PayloadValue, ResultItem};

/// Convert a workflow payload into its canonical ordered list of result items
///
/// The modern shape keeps the caller's order exactly. The legacy shape yields
/// all text items, then all tables, then all plots, with plot ids numbered
/// `figure_1, figure_2, ...` per call.
pub fn normalize_results(payload: &PayloadValue) -> Result<Vec<ResultItem>, ContractError> {
    validate_results_contract(payload)?;

    let Some(map) = payload.as_map() else {
        return Ok(Vec::new());
    };
    if map.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(results) = map.get("results") {
        return results
            .as_list()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                PayloadValue::Map(item) => ResultItem::from_map(idx + 1, item),
                other => Err(ContractError::ItemNotADict {
                    index: idx + 1,
                    found: other.type_name().to_string(),
                }),
            })
            .collect();
    }

    normalize_legacy(map)
}

fn normalize_legacy(map: &PayloadMap) -> Result<Vec<ResultItem>, ContractError> {
    let mut items = Vec::new();
    let mut index = 0;
    let mut push = |entry: PayloadMap, items: &mut Vec<ResultItem>| -> Result<(), ContractError> {
        index += 1;
        items.push(ResultItem::from_map(index, &entry)?);
        Ok(())
    };

    for text in legacy_entries(map, "text") {
        push(item_map("text", [("content", text.clone())]), &mut items)?;
    }

    for table in legacy_entries(map, "tables") {
        let title = table
            .get("title")
            .cloned()
            .unwrap_or_else(|| "Table".into());
        let data = table
            .get("data")
            .cloned()
            .unwrap_or_else(|| PayloadValue::Map(PayloadMap::new()));
        push(item_map("table", [("title", title), ("data", data)]), &mut items)?;
    }

    for (idx, figure) in legacy_entries(map, "plots").iter().enumerate() {
        let id = PayloadValue::from(format!("figure_{}", idx + 1));
        push(item_map("plot", [("figure", figure.clone()), ("id", id)]), &mut items)?;
    }

    Ok(items)
}

fn legacy_entries<'a>(map: &'a PayloadMap, key: &str) -> &'a [PayloadValue] {
    map.get(key)
        .and_then(PayloadValue::as_list)
        .unwrap_or_default()
}

fn item_map<const N: usize>(item_type: &str, fields: [(&str, PayloadValue); N]) -> PayloadMap {
    let mut entry = PayloadMap::new();
    entry.insert("type".to_string(), item_type.into());
    for (key, value) in fields {
        entry.insert(key.to_string(), value);
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::ChartFigure;
    use crate::types::{FigureRef, PlotItem, TableData};
    use serde_json::json;
    use std::sync::Arc;

    fn figure() -> FigureRef {
        Arc::new(ChartFigure::new(json!({"data": [], "layout": {}})))
    }

    #[test]
    fn test_empty_payloads() {
        assert!(normalize_results(&PayloadValue::from(json!({}))).unwrap().is_empty());
        assert!(normalize_results(&PayloadValue::from(json!({"results": null})))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_modern_shape_is_identity() {
        let items = vec![
            ResultItem::code(["print(1)"], "python"),
            ResultItem::text(["first"]),
            ResultItem::Plot(PlotItem::new(figure()).with_title("Trend")),
            ResultItem::text(["first"]),
        ];
        let payload = PayloadValue::results(items.clone());
        assert_eq!(normalize_results(&payload).unwrap(), items);
    }

    #[test]
    fn test_legacy_shape_fixed_order() {
        let first = figure();
        let second = figure();
        let mut map = PayloadMap::new();
        map.insert(
            "plots".to_string(),
            PayloadValue::List(vec![first.clone().into(), second.clone().into()]),
        );
        map.insert(
            "tables".to_string(),
            PayloadValue::from(json!([{"title": "T", "data": {"a": [1]}}, {"data": {}}])),
        );
        map.insert("text".to_string(), PayloadValue::from(json!(["hello", ["x", "y"]])));

        let items = normalize_results(&PayloadValue::Map(map)).unwrap();
        let types: Vec<&str> = items.iter().map(ResultItem::type_name).collect();
        assert_eq!(types, ["text", "text", "table", "table", "plot", "plot"]);

        assert_eq!(items[1], ResultItem::text(["x", "y"]));
        assert_eq!(
            items[2],
            ResultItem::table("T", TableData::new().with_column("a", [1]))
        );
        assert_eq!(items[3], ResultItem::table("Table", TableData::new()));
        assert_eq!(items[4], ResultItem::Plot(PlotItem::new(first).with_id("figure_1")));
        assert_eq!(items[5], ResultItem::Plot(PlotItem::new(second).with_id("figure_2")));
    }

    #[test]
    fn test_validation_errors_propagate() {
        let err = normalize_results(&PayloadValue::from(json!({"bad": "shape"}))).unwrap_err();
        assert!(matches!(err, ContractError::UnrecognizedShape { .. }));
    }
}
