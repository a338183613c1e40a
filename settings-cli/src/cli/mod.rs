//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to command handlers.

pub mod apply;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Top-level CLI command
#[derive(Parser)]
#[command(name = "github-settings")]
#[command(about = "Declarative GitHub repository settings")]
#[command(
  long_about = "Keeps a GitHub repository in line with a YAML settings file.\n\n\
        Repository metadata, labels, branch protection, webhooks and topics are read\n\
        from GitHub, compared with the file, and only the differences are written back."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show every write sent to GitHub\n\
             -vv: Show reads and response statuses\n\
             -vvv: Show request URLs"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(long, value_enum, ignore_case = true, global = true, default_value_t = ColorMode::Auto)]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// When to color terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Commands {
  /// Reconcile the repository with a settings file
  #[command(long_about = "Reconcile the repository named in the settings file.\n\n\
            Resources are processed in a fixed order: repository settings, labels,\n\
            branch protection, webhooks, topics. Branches listed in the file but missing\n\
            on GitHub are created from the default branch head. The run stops at the\n\
            first failed write; earlier writes are kept.")]
  Apply(apply::ApplyArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  match cli.colors {
    ColorMode::Always => owo_colors::set_override(true),
    ColorMode::Never => owo_colors::set_override(false),
    ColorMode::Auto => {}
  }

  match cli.command {
    Commands::Apply(args) => apply::handle_apply_command(args),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
  }

  #[test]
  fn test_verbose_counts() {
    let cli = Cli::try_parse_from(["github-settings", "-vv", "apply"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.colors, ColorMode::Auto);
  }

  #[test]
  fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["github-settings"]).is_err());
  }
}
