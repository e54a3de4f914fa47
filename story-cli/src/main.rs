//! # story-sync CLI Entry Point
//!
//! Reads the action inputs, runs the story upsert, and reports the resulting
//! issue key. Any error ends the process with a non-zero exit code.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use story_cli::cli::Cli;
use story_cli::config::Config;
use story_cli::output::{emit_issue_key, print_error, print_success};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
  let cmd = Cli::parse();

  // Set up tracing based on verbosity level
  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  // Logs go to stderr; stdout carries only the issue key
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  match sync(&cmd) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      debug!(error = ?err, "Story sync failed");
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}

fn sync(cmd: &Cli) -> Result<()> {
  let inputs = cmd.resolve_inputs();
  debug!(inputs = ?inputs.names().collect::<Vec<_>>(), "Resolved inputs");
  let config = Config::from_inputs(&inputs)?;

  let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let outcome = runtime.block_on(story_cli::run(&config))?;

  print_success(&format!("Story {} {}", outcome.issue_key, outcome.action));
  emit_issue_key(&outcome.issue_key)
}
