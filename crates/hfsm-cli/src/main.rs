//! # hfsm CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hfsm_cli::check::{run_check, CheckArgs};
use hfsm_cli::inspect::{run_inspect, InspectArgs};
use hfsm_cli::run::{run_run, RunArgs};
use hfsm_core::IdentifierGrammar;

/// HFSM behavior toolchain.
///
/// Compiles hierarchical state machine behaviors written in YAML or JSON,
/// prints their compiled tables, and drives them through message sequences.
#[derive(Parser, Debug)]
#[command(name = "hfsm", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Identifier grammar for state names, overriding the document's own.
    #[arg(long, global = true, value_name = "GRAMMAR")]
    grammar: Option<IdentifierGrammar>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a behavior document and report errors.
    Check(CheckArgs),

    /// Print the compiled state and decomposition tables.
    Inspect(InspectArgs),

    /// Run messages through a fresh instance and print each step.
    Run(RunArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => run_check(&args, cli.grammar),
        Commands::Inspect(args) => run_inspect(&args, cli.grammar),
        Commands::Run(args) => run_run(&args, cli.grammar),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
