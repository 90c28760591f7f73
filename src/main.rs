mod cli;
mod config;
mod error;
mod gateway;
mod handlers;
mod prompt;
mod registry;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use cli::CliArgs;
use crossterm::style::Stylize;
use gateway::CommandLineGateway;
use prompt::StdConsole;
use registry::CommandRegistry;
use session::{Session, SessionOutcome};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    if let Err(error) = init_tracing(&args.log_filter) {
        eprintln!("{}", format!("Error: {error:#}").red());
        return ExitCode::FAILURE;
    }

    if args.list {
        print_command_categories();
        return ExitCode::SUCCESS;
    }

    // clap enforces the path unless --list was given.
    let Some(config_path) = args.config else {
        eprintln!("{}", "Error: a configuration file path is required".red());
        return ExitCode::FAILURE;
    };

    let gateway = CommandLineGateway;
    let mut console = StdConsole;
    let registry = CommandRegistry::new(args.command_set);
    let mut session = Session::new(registry, &gateway, &mut console);

    match session.run(&config_path) {
        Ok(SessionOutcome::Completed | SessionOutcome::Cancelled) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", format!("Error: {error}").red());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level_filter)
        .or_else(|_| EnvFilter::try_new("info"))
        .context("failed to initialize tracing filter")?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}

fn print_command_categories() {
    println!("Available command categories:");
    println!("  gke - Manage Google Kubernetes Engine clusters");
}
