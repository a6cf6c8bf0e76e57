//! # Run Subcommand
//!
//! Binds a fresh instance to a compiled behavior, enters the initial state,
//! then feeds message kinds one at a time. Every step is reported with the
//! reply and the hooks, logs, and state changes it caused.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hfsm_core::{DispatchError, IdentifierGrammar, StatePath};
use hfsm_machine::CompiledSpec;

use crate::script::{state_label, NamedMessage, ScriptBehavior, ScriptHost};

/// Arguments for the `hfsm run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Behavior document (YAML, or JSON with a `.json` extension).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// State to enter before the first message.
    #[arg(long, value_name = "STATE")]
    pub initial: String,

    /// Message kinds to process, in order.
    #[arg(value_name = "MESSAGE")]
    pub messages: Vec<String>,

    /// Exit with status 1 if any message is unhandled or rejected.
    #[arg(long)]
    pub strict: bool,
}

/// What happened to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The handler returned a reply.
    Replied(String),
    /// The handler ran and returned nothing.
    Silent,
    /// The message was unhandled, or the transition it staged was refused.
    Rejected(DispatchError),
}

/// One processed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub message: String,
    pub outcome: Outcome,
    pub trace: Vec<String>,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub init_trace: Vec<String>,
    pub steps: Vec<Step>,
    pub final_state: StatePath,
}

impl Transcript {
    /// Number of messages that were not processed cleanly.
    pub fn rejected(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, Outcome::Rejected(_)))
            .count()
    }
}

/// Drive a fresh instance of `spec` from `initial` through `messages`.
///
/// Failing to enter the initial state is an error. Per-message failures are
/// recorded in the transcript and the run continues.
pub fn simulate(
    spec: &CompiledSpec<ScriptBehavior>,
    initial: &str,
    messages: &[String],
) -> Result<Transcript> {
    let mut host = ScriptHost::default();
    spec.init(&mut host, initial)
        .with_context(|| format!("failed to enter initial state '{initial}'"))?;
    let init_trace = host.drain_trace();

    let steps = messages
        .iter()
        .map(|kind| {
            let outcome = match spec.try_process_message(&mut host, &NamedMessage::new(kind.as_str())) {
                Ok(Some(reply)) => Outcome::Replied(reply),
                Ok(None) => Outcome::Silent,
                Err(err) => {
                    tracing::warn!(message = %kind, %err, "message rejected");
                    Outcome::Rejected(err)
                }
            };
            Step {
                message: kind.clone(),
                outcome,
                trace: host.drain_trace(),
            }
        })
        .collect();

    Ok(Transcript {
        init_trace,
        steps,
        final_state: spec.current_state(&host).clone(),
    })
}

/// Execute the run subcommand.
pub fn run_run(args: &RunArgs, grammar: Option<IdentifierGrammar>) -> Result<u8> {
    let spec = crate::load_spec(&args.file, grammar)?;
    let transcript = simulate(&spec, &args.initial, &args.messages)?;

    println!("init {}", args.initial);
    print_trace(&transcript.init_trace);
    for step in &transcript.steps {
        match &step.outcome {
            Outcome::Replied(reply) => println!("{} -> {reply}", step.message),
            Outcome::Silent => println!("{} -> (no reply)", step.message),
            Outcome::Rejected(err) => println!("{} -> REJECTED: {err}", step.message),
        }
        print_trace(&step.trace);
    }
    println!("final state: {}", state_label(&transcript.final_state));

    let rejected = transcript.rejected();
    if args.strict && rejected > 0 {
        println!("\n{rejected} message(s) rejected.");
        return Ok(1);
    }
    Ok(0)
}

fn print_trace(trace: &[String]) {
    for line in trace {
        println!("  {line}");
    }
}
