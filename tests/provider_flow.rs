//! End-to-end provider flows: run, normalize, render, export

use renderflow::provider::parse_assignments;
use renderflow::{
    normalize_results, render_results_to_html, save_figures, JsonRenderer, OutputRenderer,
    RenderflowError, ResultItem, TerminalRenderer, WorkflowRunner,
};
use renderflow_tests::{registry, FIXTURE_PROVIDER};
use std::fs;
use tempfile::TempDir;

fn run(provider: &str, workflow: &str, params: &[&str]) -> renderflow::Result<renderflow::WorkflowRun> {
    let app = registry().load(provider)?;
    let params = parse_assignments(params)?;
    WorkflowRunner::new().run(&app, workflow, &params)
}

#[test]
fn test_minimal_series_through_every_output() {
    let temp_dir = TempDir::new().unwrap();
    let run = run("minimal", "series", &["points=8", "kind=bar", "base_value=2"]).unwrap();

    let items = normalize_results(&run.payload).unwrap();
    let kinds: Vec<&str> = items.iter().map(ResultItem::type_name).collect();
    assert_eq!(kinds, ["plot", "table"]);

    let terminal = TerminalRenderer::new().render(&items);
    assert!(terminal.contains("[plot] Scaled Sine Series"));
    assert!(terminal.contains("Summary"));

    let json = JsonRenderer::to_value(&items);
    assert_eq!(json[0]["figure"]["data"][0]["type"], "bar");
    assert_eq!(json[0]["figure"]["data"][0]["x"].as_array().map(Vec::len), Some(8));

    let report = render_results_to_html(&run.payload, temp_dir.path().join("series.html"), "Series").unwrap();
    let html = fs::read_to_string(report).unwrap();
    assert!(html.contains("<div id='plot-1'></div>"));
    assert!(html.contains("\"x\":[0,1,2,3,4,5,6,7]"));

    let saved = save_figures(&run.payload, temp_dir.path().join("figures"), ["json"]).unwrap();
    assert_eq!(saved, vec![temp_dir.path().join("figures").join("series.json")]);
}

#[test]
fn test_legacy_payload_uses_fixed_order() {
    let run = run(FIXTURE_PROVIDER, "legacy", &["user=ada"]).unwrap();
    assert_eq!(run.context["user"], renderflow::PayloadValue::from("ada"));

    let items = normalize_results(&run.payload).unwrap();
    let kinds: Vec<&str> = items.iter().map(ResultItem::type_name).collect();
    assert_eq!(kinds, ["text", "table", "plot"]);

    let temp_dir = TempDir::new().unwrap();
    let saved = save_figures(&run.payload, temp_dir.path(), ["html"]).unwrap();
    assert_eq!(saved, vec![temp_dir.path().join("figure_1.html")]);
}

#[test]
fn test_mock_figures_export_by_title() {
    let temp_dir = TempDir::new().unwrap();
    let run = run(FIXTURE_PROVIDER, "mocked", &["count=3"]).unwrap();

    let saved = save_figures(&run.payload, temp_dir.path(), ["png", "html"]).unwrap();
    let names: Vec<String> = saved
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "Mock__1.png",
            "Mock__1.html",
            "Mock__2.png",
            "Mock__2.html",
            "Mock__3.png",
            "Mock__3.html",
        ]
    );
}

#[test]
fn test_out_of_range_param_is_rejected() {
    let err = run(FIXTURE_PROVIDER, "mocked", &["count=9"]).unwrap_err();
    assert!(matches!(err, RenderflowError::InvalidParam { ref key, .. } if key == "count"));
}

#[test]
fn test_none_payload_violates_contract() {
    let run = run(FIXTURE_PROVIDER, "empty", &[]).unwrap();
    let err = normalize_results(&run.payload).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Workflow returned None; expected a dict result payload."
    );

    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("empty.html");
    assert!(render_results_to_html(&run.payload, &report, "Empty").is_err());
    assert!(!report.exists());
}

#[test]
fn test_workflow_failure_carries_step_label() {
    let err = run(FIXTURE_PROVIDER, "crash", &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Workflow 'crash' failed: ERROR in workflow:crash: disk on fire"
    );
}
