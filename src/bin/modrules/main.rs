//! modrules CLI - resolve build rules of the networking plugin

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modrules::util::diagnostic::emit;
use modrules::ResolveError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<ResolveError>() {
            Some(resolve_err) => emit(&resolve_err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("modrules=debug")
    } else {
        EnvFilter::new("modrules=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = commands::load_config(cli.config.as_deref(), color)?;

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &config),
        Commands::Flags(args) => commands::flags::execute(args, &config),
        Commands::Matrix(args) => commands::matrix::execute(args, &config),
        Commands::Platforms => commands::platforms::execute(),
        Commands::Targets => commands::targets::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
