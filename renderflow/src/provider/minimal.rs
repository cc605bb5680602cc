//! Bundled demonstration provider
//!
//! One initializer (`name`, `base_value`) and two workflows: `greeting`
//! emits text, a table and a code listing; `series` emits a plot whose data
//! uses compact numeric fragments.

use super::{AppSpec, InitializerSpec, ParamSpec, WorkflowSpec};
use crate::decode::{encode_fragment, DType};
use crate::figure::ChartFigure;
use crate::types::{PayloadMap, PayloadValue, PlotItem, TableData};
use crate::workflow::Workflow;
use serde_json::json;
use std::sync::Arc;

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "minimal";

pub fn app_spec() -> AppSpec {
    AppSpec::new("Minimal Provider")
        .with_initializer(
            InitializerSpec::new("setup", "Setup", initialize)
                .with_description("Shared values used by every workflow.")
                .with_params(vec![
                    ParamSpec::text("name", "Name")
                        .with_default("World")
                        .with_help("Name used by workflows."),
                    ParamSpec::number("base_value", "Base Value")
                        .with_default(10)
                        .with_help("Default numeric value for workflows."),
                ]),
        )
        .with_workflow(
            WorkflowSpec::new("greeting", "Greeting", greeting)
                .with_description("Greets the configured name.")
                .with_params(vec![
                    ParamSpec::text("greeting", "Greeting").with_default("Hello"),
                    ParamSpec::number("repeat", "Repeat")
                        .with_default(1)
                        .with_range(Some(1.0), Some(10.0))
                        .with_step(1.0),
                    ParamSpec::checkbox("shout", "Shout").with_default(false),
                ]),
        )
        .with_workflow(
            WorkflowSpec::new("series", "Series", series)
                .with_description("Plots a scaled sine series.")
                .with_params(vec![
                    ParamSpec::number("points", "Points")
                        .with_default(20)
                        .with_range(Some(2.0), Some(1000.0))
                        .with_step(1.0),
                    ParamSpec::dropdown("kind", "Chart Kind")
                        .with_default("line")
                        .with_options(["line", "bar", "markers"]),
                ]),
        )
}

fn initialize(params: &PayloadMap) -> anyhow::Result<PayloadMap> {
    let mut context = PayloadMap::new();
    context.insert(
        "name".to_string(),
        params.get("name").cloned().unwrap_or_else(|| "World".into()),
    );
    context.insert(
        "base_value".to_string(),
        params.get("base_value").cloned().unwrap_or_else(|| 10.into()),
    );
    Ok(context)
}

fn number(map: &PayloadMap, key: &str, fallback: f64) -> f64 {
    map.get(key).and_then(PayloadValue::as_f64).unwrap_or(fallback)
}

fn greeting(context: &PayloadMap, params: &PayloadMap) -> anyhow::Result<PayloadValue> {
    let name = context.get("name").map_or_else(|| "World".to_string(), ToString::to_string);
    let greeting = params
        .get("greeting")
        .map_or_else(|| "Hello".to_string(), ToString::to_string);
    let repeat = number(params, "repeat", 1.0).max(1.0) as usize;
    let shout = params.get("shout").and_then(PayloadValue::as_bool).unwrap_or(false);
    let base = number(context, "base_value", 10.0);

    let mut line = format!("{}, {}!", greeting, name);
    if shout {
        line = line.to_uppercase();
    }

    let multipliers: Vec<i64> = (1..=3).collect();
    let mut workflow = Workflow::new("Greeting", "Greets the configured name.");
    workflow
        .add_text(std::iter::repeat(line).take(repeat))
        .add_table(
            "Base Value Multiples",
            TableData::new()
                .with_column("multiplier", multipliers.clone())
                .with_column(
                    "value",
                    multipliers.iter().map(|m| base * *m as f64).collect::<Vec<_>>(),
                ),
        )
        .add_code(
            [
                format!("greeting = {:?}", greeting),
                format!("repeat = {}", repeat),
            ],
            "python",
        );
    Ok(workflow.build())
}

fn series(context: &PayloadMap, params: &PayloadMap) -> anyhow::Result<PayloadValue> {
    let points = number(params, "points", 20.0) as usize;
    if points < 2 {
        anyhow::bail!("series needs at least 2 points, got {}", points);
    }
    let base = number(context, "base_value", 10.0);
    let kind = params
        .get("kind")
        .and_then(PayloadValue::as_str)
        .unwrap_or("line");

    let xs: Vec<f64> = (0..points).map(|i| i as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| base * (x / 4.0).sin()).collect();

    let mut trace = match kind {
        "bar" => json!({"type": "bar"}),
        "markers" => json!({"type": "scatter", "mode": "markers"}),
        _ => json!({"type": "scatter", "mode": "lines"}),
    };
    trace["name"] = json!("base * sin(x / 4)");
    trace["x"] = encode_fragment(&xs, DType::Int32, None);
    trace["y"] = encode_fragment(&ys, DType::Float64, None);

    let figure = ChartFigure::from_parts(
        vec![trace],
        json!({"title": {"text": format!("Series of {} points", points)}}),
    );

    let mean = ys.iter().sum::<f64>() / points as f64;
    let (min, max) = ys
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(*y), hi.max(*y)));

    let mut workflow = Workflow::new("Series", "Plots a scaled sine series.");
    workflow
        .add_plot_item(
            PlotItem::new(Arc::new(figure))
                .with_id("series")
                .with_title("Scaled Sine Series"),
        )
        .add_table(
            "Summary",
            TableData::new()
                .with_column("statistic", ["min", "max", "mean"])
                .with_column("value", [min, max, mean]),
        );
    Ok(workflow.build())
}
