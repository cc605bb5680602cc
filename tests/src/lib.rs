//! Fixtures shared by the end-to-end tests

use renderflow::testing::MockFigure;
use renderflow::{
    AppSpec, FigureRef, InitializerSpec, ParamSpec, PayloadValue, ProviderRegistry, WorkflowSpec,
};
use std::sync::Arc;

/// Name of the fixture provider registered by [`registry`]
pub const FIXTURE_PROVIDER: &str = "fixture";

/// Built-in providers plus the fixture provider
pub fn registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::builtin();
    registry.register(FIXTURE_PROVIDER, fixture_app);
    registry
}

/// Provider whose workflows return legacy, mock-figure and broken payloads
pub fn fixture_app() -> AppSpec {
    AppSpec::new("Fixture Provider")
        .with_initializer(
            InitializerSpec::new("session", "Session", |params| Ok(params.clone()))
                .with_params(vec![ParamSpec::text("user", "User").with_default("tester")]),
        )
        .with_workflow(
            WorkflowSpec::new("legacy", "Legacy Output", |context, _| {
                let user = context.get("user").map(ToString::to_string).unwrap_or_default();
                Ok(PayloadValue::from(serde_json::json!({
                    "plots": [{"data": [], "layout": {"title": {"text": "legacy"}}}],
                    "tables": [{"title": "Users", "data": {"user": [user]}}],
                    "text": ["legacy run"],
                })))
            }),
        )
        .with_workflow(
            WorkflowSpec::new("mocked", "Mocked Figures", |_, params| {
                let count = params.get("count").and_then(PayloadValue::as_f64).unwrap_or(1.0) as usize;
                let entries = (0..count)
                    .map(|idx| {
                        let figure: FigureRef = Arc::new(MockFigure::new());
                        PayloadValue::map([
                            ("type", PayloadValue::from("plot")),
                            ("figure", figure.into()),
                            ("title", PayloadValue::from(format!("Mock #{}", idx + 1))),
                        ])
                    })
                    .collect::<Vec<_>>();
                Ok(PayloadValue::map([("results", PayloadValue::List(entries))]))
            })
            .with_params(vec![ParamSpec::number("count", "Count")
                .with_default(2)
                .with_range(Some(0.0), Some(5.0))]),
        )
        .with_workflow(WorkflowSpec::new("empty", "Nothing", |_, _| Ok(PayloadValue::Null)))
        .with_workflow(WorkflowSpec::new("crash", "Crash", |_, _| {
            anyhow::bail!("disk on fire")
        }))
}
