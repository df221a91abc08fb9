mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    init, outline, parse, validate, InitArgs, OutlineArgs, ParseArgs, ValidateArgs,
};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Reportcraft CLI - outline tooling for AI-assisted reports
#[derive(Parser, Debug)]
#[command(name = "reportcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug logging and info-level diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default reportcraft.config.json
    Init(InitArgs),

    /// Parse an indented text outline into sections
    Parse(ParseArgs),

    /// Validate a generated candidate outline (JSON)
    Validate(ValidateArgs),

    /// Print the numbered outline of a project file
    Outline(OutlineArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()
        .context("Cannot get current directory")?
        .display()
        .to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Parse(args) => parse(args, &Config::load(&cwd)?),
        Command::Validate(args) => validate(args, &Config::load(&cwd)?, cli.verbose),
        Command::Outline(args) => outline(args, &Config::load(&cwd)?, cli.verbose),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
