//! Progress events and timed execution steps

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// State of a step when an event is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Running,
    Done,
    Failed,
}

impl ProgressStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub step: String,
    pub status: ProgressStatus,
    pub detail: String,
}

/// Receives progress events; shared between the runner and its caller
pub type ProgressCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Send an event to `callback` if there is one
pub fn emit_progress(callback: Option<&ProgressCallback>, step: &str, status: ProgressStatus, detail: &str) {
    if let Some(callback) = callback {
        callback(&ProgressEvent {
            step: step.to_string(),
            status,
            detail: detail.to_string(),
        });
    }
}

/// Outcome of [`run_timed_step`]
#[derive(Debug)]
pub struct TimedStep<T> {
    /// The step's value, or `ERROR in {label}: {cause}` when it failed
    pub output: Result<T, String>,
    pub elapsed: Duration,
}

impl<T> TimedStep<T> {
    pub fn failed(&self) -> bool {
        self.output.is_err()
    }
}

/// Run `step`, emitting `running` then `done` or `failed`
///
/// Failures are captured in the returned [`TimedStep`] rather than propagated.
pub fn run_timed_step<T, F>(
    callback: Option<&ProgressCallback>,
    label: &str,
    description: &str,
    step: F,
) -> TimedStep<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    emit_progress(callback, label, ProgressStatus::Running, description);
    let start = Instant::now();
    let output = step();
    let elapsed = start.elapsed();

    match output {
        Ok(value) => {
            emit_progress(callback, label, ProgressStatus::Done, description);
            TimedStep {
                output: Ok(value),
                elapsed,
            }
        }
        Err(e) => {
            emit_progress(callback, label, ProgressStatus::Failed, description);
            TimedStep {
                output: Err(format!("ERROR in {}: {:#}", label, e)),
                elapsed,
            }
        }
    }
}
