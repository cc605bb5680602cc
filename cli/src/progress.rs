use crate::ui::{self, Tone};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use renderflow::{ProgressCallback, ProgressEvent, ProgressStatus};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Spinner that follows a workflow run's progress events
pub struct ProgressTracker {
    operation_name: String,
    start_time: Instant,
    spinner: ProgressBar,
}

impl ProgressTracker {
    /// Create a new progress tracker with the given operation name
    pub fn new(operation_name: &str) -> Self {
        eprintln!("\n{}", format!("==== {operation_name} ====").cyan().bold());
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self {
            operation_name: operation_name.to_string(),
            start_time: Instant::now(),
            spinner,
        }
    }

    /// Callback for the workflow runner
    pub fn callback(&self) -> ProgressCallback {
        let spinner = self.spinner.clone();
        Arc::new(move |event: &ProgressEvent| {
            let label = if event.detail.is_empty() {
                event.step.clone()
            } else {
                format!("{} ({})", event.detail, event.step)
            };
            match event.status {
                ProgressStatus::Running => spinner.set_message(label),
                ProgressStatus::Done => spinner.println(Tone::Success.line(&label)),
                ProgressStatus::Failed => spinner.println(Tone::Failure.line(&label)),
            }
        })
    }

    /// Stop the spinner and report how the operation ended
    pub fn finish(&self, succeeded: bool) {
        self.spinner.finish_and_clear();
        let elapsed = Self::format_duration(self.start_time.elapsed());
        if succeeded {
            ui::print(Tone::Success, &format!("{} completed in {}", self.operation_name, elapsed));
        } else {
            ui::print(Tone::Failure, &format!("{} failed after {}", self.operation_name, elapsed));
        }
    }

    /// Format a duration in a human-readable way
    fn format_duration(duration: Duration) -> String {
        let millis = duration.as_millis();
        let seconds = duration.as_secs();
        if seconds == 0 {
            format!("{millis} ms")
        } else if seconds < 60 {
            format!("{seconds} seconds")
        } else if seconds < 3600 {
            format!(
                "{} minutes {seconds_remainder} seconds",
                seconds / 60,
                seconds_remainder = seconds % 60
            )
        } else {
            format!(
                "{hours} hours {minutes} minutes",
                hours = seconds / 3600,
                minutes = (seconds % 3600) / 60
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(ProgressTracker::format_duration(Duration::from_millis(250)), "250 ms");
        assert_eq!(ProgressTracker::format_duration(Duration::from_secs(42)), "42 seconds");
        assert_eq!(
            ProgressTracker::format_duration(Duration::from_secs(125)),
            "2 minutes 5 seconds"
        );
        assert_eq!(
            ProgressTracker::format_duration(Duration::from_secs(7260)),
            "2 hours 1 minutes"
        );
    }
}
