//! # github-settings CLI Entry Point
//!
//! Reconciles a GitHub repository with the settings declared in a YAML file.

use clap::Parser;
use settings_cli::cli::{self, handle_cli};
use settings_core::output::{format_error_chain, print_error};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
  let cmd = cli::Cli::parse();

  // Set up tracing based on verbosity level
  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: every write
    2 => tracing::Level::DEBUG, // -vv: reads and HTTP status
    _ => tracing::Level::TRACE, // -vvv or more: URLs and payloads
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  if let Err(err) = handle_cli(cmd) {
    print_error(&format_error_chain(&err));
    std::process::exit(1);
  }
}
