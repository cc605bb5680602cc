mod cli;
mod error;
mod execute;
mod init_config;
mod progress;
mod providers;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::ListProviders => providers::execute_list(),
        Commands::Describe { provider } => providers::execute_describe(&provider),
        Commands::Execute(args) => execute::execute(args),
        Commands::InitConfig { path, force } => init_config::execute(&path, force),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "renderflow=debug" } else { "renderflow=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
