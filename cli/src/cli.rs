use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "renderflow")]
#[command(
    author,
    version,
    about = "Run provider workflows and render their results"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered providers, one per line
    ListProviders,

    /// Show a provider's initializers, workflows and their parameters
    Describe {
        /// Provider name
        #[clap(short, long)]
        provider: String,
    },

    /// Execute a workflow and render its results
    Execute(ExecuteArgs),

    /// Write a commented renderflow.toml
    InitConfig {
        /// Where to write the configuration file
        #[clap(long, default_value = "renderflow.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[clap(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(clap::Args, Clone, Debug)]
pub struct ExecuteArgs {
    /// Provider name
    #[clap(long)]
    pub provider: String,

    /// Workflow id within the provider
    #[clap(short, long)]
    pub workflow: String,

    /// Parameter assignment (key=value), may be repeated
    #[clap(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Deprecated alias for --param
    #[clap(long = "init", value_name = "KEY=VALUE", hide = true)]
    pub init_params: Vec<String>,

    /// Write an HTML report to this path
    #[clap(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Report title (defaults to the configured title)
    #[clap(long)]
    pub title: Option<String>,

    /// Export figures into this directory
    #[clap(long, value_name = "DIR")]
    pub save_figures_dir: Option<PathBuf>,

    /// Figure format (html, json, png, jpg, jpeg, svg, pdf); repeatable or comma separated
    #[clap(long = "figure-format", value_name = "FORMAT")]
    pub figure_formats: Vec<String>,

    /// How to print results on stdout
    #[clap(short, long, value_enum, default_value_t = OutputMode::Terminal)]
    pub output: OutputMode,

    /// Configuration file (defaults to ./renderflow.toml when present)
    #[clap(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Text, tables and code for the terminal
    Terminal,

    /// Result items as pretty-printed JSON
    Json,

    /// Print nothing; only write files
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_arguments() {
        let cli = Cli::try_parse_from([
            "renderflow",
            "execute",
            "--provider",
            "minimal",
            "-w",
            "greeting",
            "-p",
            "repeat=2",
            "--init",
            "name=Ada",
            "--figure-format",
            "png,svg",
            "--output",
            "json",
        ])
        .unwrap();

        let Commands::Execute(args) = cli.command else {
            panic!("expected execute");
        };
        assert_eq!(args.params, ["repeat=2"]);
        assert_eq!(args.init_params, ["name=Ada"]);
        assert_eq!(args.figure_formats, ["png,svg"]);
        assert_eq!(args.output, OutputMode::Json);
        assert!(args.html.is_none());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["renderflow", "list-providers", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
