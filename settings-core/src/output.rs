//! # Output Formatting
//!
//! User-facing status lines. Diagnostic detail goes through `tracing`; these
//! helpers only print the final outcome of a command.

use owo_colors::OwoColorize;

/// Print a success message
pub fn print_success(message: &str) {
  println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  println!("{} {}", "ℹ".blue().bold(), message);
}

/// Render an error and its chain of causes, one per line.
pub fn format_error_chain(error: &anyhow::Error) -> String {
  let mut rendered = error.to_string();
  for cause in error.chain().skip(1) {
    rendered.push_str(&format!("\n  caused by: {cause}"));
  }
  rendered
}

/// Format a repository name
pub fn format_repo_name(name: &str) -> String {
  name.bright_cyan().bold().to_string()
}
