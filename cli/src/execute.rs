use crate::cli::{ExecuteArgs, OutputMode};
use crate::error::{CliError, Result, ResultExt};
use crate::progress::ProgressTracker;
use crate::ui::{self, Tone};
use renderflow::provider::parse_assignments;
use renderflow::renderers::report::write_report;
use renderflow::{
    normalize_formats, normalize_results, FigureExporter, FigureFormat, HtmlReportRenderer,
    JsonRenderer, OutputRenderer, ProviderRegistry, ReportMetadata, RenderflowConfig,
    TerminalRenderer, WorkflowRunner,
};
use std::path::PathBuf;
use tracing::debug;

/// What an execution produced besides its console output
#[derive(Debug, Default)]
pub struct ExecuteOutcome {
    /// Rendered results for stdout, absent with `--output none`
    pub rendered: Option<String>,
    pub report: Option<PathBuf>,
    pub figures: Vec<PathBuf>,
}

pub fn execute(args: ExecuteArgs) -> Result<()> {
    let registry = ProviderRegistry::builtin();
    let outcome = run(&args, &registry, true)?;

    if let Some(rendered) = &outcome.rendered {
        println!("{rendered}");
    }
    if let Some(report) = &outcome.report {
        ui::print(Tone::Success, &format!("HTML report written to {}", report.display()));
    }
    if !outcome.figures.is_empty() {
        ui::print(Tone::Success, &format!("Exported {} figure file(s)", outcome.figures.len()));
        for (idx, path) in outcome.figures.iter().enumerate() {
            ui::numbered(idx + 1, &path.display().to_string());
        }
    }
    Ok(())
}

/// Run the workflow and write the requested outputs
///
/// Parameters, configuration and figure formats are checked before the
/// workflow starts. The payload is normalized once and every output is
/// rendered from the same items.
pub fn run(args: &ExecuteArgs, registry: &ProviderRegistry, show_progress: bool) -> Result<ExecuteOutcome> {
    let config = RenderflowConfig::load_or_default(args.config.as_deref())
        .with_context(|| "Failed to load configuration")?;

    let formats = figure_formats(args, &config)?;
    let figures_dir = args
        .save_figures_dir
        .clone()
        .or_else(|| config.figures.output_dir.clone());

    if !args.init_params.is_empty() {
        ui::print(Tone::Warning, "--init is deprecated; use --param instead");
    }
    let params = parse_assignments(args.init_params.iter().chain(args.params.iter()))?;

    let app = registry.load(&args.provider)?;
    debug!(provider = %args.provider, workflow = %args.workflow, params = params.len(), "executing workflow");

    let mut runner = WorkflowRunner::new();
    let tracker = show_progress.then(|| ProgressTracker::new(&format!("{}: {}", app.app_name, args.workflow)));
    if let Some(tracker) = &tracker {
        runner = runner.with_progress(tracker.callback());
    }
    let run = runner.run(&app, &args.workflow, &params);
    if let Some(tracker) = &tracker {
        tracker.finish(run.is_ok());
    }
    let run = run?;

    let items = normalize_results(&run.payload).map_err(renderflow::RenderflowError::from)?;

    let mut outcome = ExecuteOutcome {
        rendered: match args.output {
            OutputMode::Terminal => Some(TerminalRenderer::new().render(&items)),
            OutputMode::Json => Some(JsonRenderer::new().render(&items)),
            OutputMode::None => None,
        },
        ..ExecuteOutcome::default()
    };

    if let Some(path) = &args.html {
        let title = args.title.clone().unwrap_or_else(|| config.report.title.clone());
        let metadata = ReportMetadata::new(title).with_library(config.charting.clone());
        let written = write_report(&HtmlReportRenderer::new(), &items, &metadata, path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        outcome.report = Some(written);
    }

    if let Some(dir) = &figures_dir {
        outcome.figures = FigureExporter::new()
            .with_library(config.charting.clone())
            .export_items(&items, dir, &formats)
            .with_context(|| format!("Failed to export figures to {}", dir.display()))?;
    }

    Ok(outcome)
}

/// Formats from the command line, else from the configuration file
fn figure_formats(args: &ExecuteArgs, config: &RenderflowConfig) -> Result<Vec<FigureFormat>> {
    let formats = if args.figure_formats.is_empty() {
        normalize_formats(&config.figures.formats)
    } else {
        normalize_formats(&args.figure_formats)
    };
    formats.map_err(CliError::from)
}
