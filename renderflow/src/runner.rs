//! Provider workflow execution

use crate::error::{RenderflowError, Result};
use crate::progress::{run_timed_step, ProgressCallback};
use crate::provider::{coerce_params, AppSpec, RawParams};
use crate::types::{PayloadMap, PayloadValue};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

/// Output of one workflow execution
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub workflow: String,
    /// Context built by the initializers
    pub context: PayloadMap,
    /// Unvalidated payload returned by the workflow
    pub payload: PayloadValue,
    pub elapsed: Duration,
}

/// Runs a provider's initializers and one of its workflows
#[derive(Clone, Default)]
pub struct WorkflowRunner {
    progress: Option<ProgressCallback>,
}

impl WorkflowRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report step progress to `callback`
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Execute `workflow_id` with command-line style parameters
    ///
    /// Every initializer receives the parameters it declares and its output is
    /// merged into the context, later initializers overriding earlier ones.
    /// The workflow receives its own declared parameters plus any key no
    /// initializer claimed. The payload is returned as produced; callers
    /// validate it when rendering or exporting.
    pub fn run(&self, app: &AppSpec, workflow_id: &str, params: &RawParams) -> Result<WorkflowRun> {
        let workflow = app.workflow(workflow_id)?;
        let progress = self.progress.as_ref();

        let mut context = PayloadMap::new();
        let mut claimed = HashSet::new();
        for init in &app.initializers {
            let declared: RawParams = params
                .iter()
                .filter(|(key, _)| init.params.iter().any(|p| &p.key == *key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            claimed.extend(init.params.iter().map(|p| p.key.as_str()));

            let init_params = coerce_params(&init.params, &declared)?;
            let label = format!("initialize:{}", init.id);
            let step = run_timed_step(progress, &label, &init.name, || (init.initialize)(&init_params));
            let output = step.output.map_err(|message| RenderflowError::InitializerFailed {
                initializer: init.id.clone(),
                message,
            })?;
            debug!(initializer = %init.id, elapsed_ms = step.elapsed.as_millis() as u64, "initializer finished");
            context.extend(output);
        }

        let own: HashSet<&str> = workflow.params.iter().map(|p| p.key.as_str()).collect();
        let workflow_raw: RawParams = params
            .iter()
            .filter(|(key, _)| own.contains(key.as_str()) || !claimed.contains(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let workflow_params = coerce_params(&workflow.params, &workflow_raw)?;

        let label = format!("workflow:{}", workflow.id);
        let step = run_timed_step(progress, &label, &workflow.name, || {
            (workflow.run)(&context, &workflow_params)
        });
        let elapsed = step.elapsed;
        let payload = step.output.map_err(|message| RenderflowError::WorkflowFailed {
            workflow: workflow.id.clone(),
            message,
        })?;

        info!(workflow = %workflow.id, elapsed_ms = elapsed.as_millis() as u64, "workflow finished");
        Ok(WorkflowRun {
            workflow: workflow.id.clone(),
            context,
            payload,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ProgressEvent, ProgressStatus};
    use crate::provider::{parse_assignments, InitializerSpec, ParamSpec, WorkflowSpec};
    use std::sync::{Arc, Mutex};

    fn echo_app() -> AppSpec {
        AppSpec::new("echo")
            .with_initializer(
                InitializerSpec::new("setup", "Setup", |params| Ok(params.clone()))
                    .with_params(vec![ParamSpec::text("name", "Name").with_default("World")]),
            )
            .with_workflow(
                WorkflowSpec::new("echo", "Echo", |context, params| {
                    Ok(PayloadValue::map([
                        ("context", PayloadValue::Map(context.clone())),
                        ("params", PayloadValue::Map(params.clone())),
                    ]))
                })
                .with_params(vec![ParamSpec::number("count", "Count").with_default(1)]),
            )
            .with_workflow(WorkflowSpec::new("boom", "Boom", |_, _| {
                Err(anyhow::anyhow!("exploded"))
            }))
    }

    #[test]
    fn test_params_are_routed() {
        let params = parse_assignments(["name=Ada", "count=3", "extra=x"]).unwrap();
        let run = WorkflowRunner::new().run(&echo_app(), "echo", &params).unwrap();

        assert_eq!(run.workflow, "echo");
        assert_eq!(run.context["name"], PayloadValue::from("Ada"));

        let seen = run.payload.get("params").unwrap();
        assert_eq!(seen.get("count"), Some(&PayloadValue::from(3)));
        assert_eq!(seen.get("extra"), Some(&PayloadValue::from("x")));
        assert_eq!(seen.get("name"), None);
    }

    #[test]
    fn test_defaults_without_params() {
        let run = WorkflowRunner::new()
            .run(&echo_app(), "echo", &RawParams::new())
            .unwrap();
        assert_eq!(run.context["name"], PayloadValue::from("World"));
        assert_eq!(
            run.payload.get("params").and_then(|p| p.get("count")),
            Some(&PayloadValue::from(1))
        );
    }

    #[test]
    fn test_workflow_failure_and_progress() {
        let events = Arc::new(Mutex::new(Vec::<ProgressEvent>::new()));
        let sink = Arc::clone(&events);
        let runner = WorkflowRunner::new().with_progress(Arc::new(move |event: &ProgressEvent| {
            sink.lock().unwrap().push(event.clone());
        }));

        let err = runner.run(&echo_app(), "boom", &RawParams::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Workflow 'boom' failed: ERROR in workflow:boom: exploded"
        );

        let events = events.lock().unwrap();
        let steps: Vec<(&str, ProgressStatus)> =
            events.iter().map(|e| (e.step.as_str(), e.status)).collect();
        assert_eq!(
            steps,
            [
                ("initialize:setup", ProgressStatus::Running),
                ("initialize:setup", ProgressStatus::Done),
                ("workflow:boom", ProgressStatus::Running),
                ("workflow:boom", ProgressStatus::Failed),
            ]
        );
    }

    #[test]
    fn test_unknown_workflow() {
        let err = WorkflowRunner::new()
            .run(&echo_app(), "nope", &RawParams::new())
            .unwrap_err();
        assert!(matches!(err, RenderflowError::WorkflowNotFound { .. }));
    }

    #[test]
    fn test_invalid_param_fails_before_running() {
        let params = parse_assignments(["count=abc"]).unwrap();
        let err = WorkflowRunner::new().run(&echo_app(), "echo", &params).unwrap_err();
        assert!(matches!(err, RenderflowError::InvalidParam { .. }));
    }
}
