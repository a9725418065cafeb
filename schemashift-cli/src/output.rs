//! Styled terminal output utilities.
//!
//! Status output goes to stderr so rendered migrations on stdout can be piped.

use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Print a header/title
pub fn header(text: &str) {
    eprintln!();
    eprintln!("{}", text.bold().cyan());
    eprintln!("{}", "─".repeat(text.chars().count()).dimmed());
    eprintln!();
}

/// Print a section header
pub fn section(text: &str) {
    eprintln!("{}", text.bold().white());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    eprintln!("  {}: {}", key.dimmed(), value);
}

/// Print a success message
pub fn success(text: &str) {
    eprintln!("{} {}", "✔".green().bold(), text.green());
}

/// Print an info message
pub fn info(text: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), text);
}

/// Print a warning message
pub fn warn(text: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), text.yellow());
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Print a list item
pub fn list_item(text: &str) {
    eprintln!("  {} {}", "•".dimmed(), text);
}

/// Print a newline
pub fn newline() {
    eprintln!();
}

/// Print dimmed text
pub fn dim(text: &str) {
    eprintln!("{}", text.dimmed());
}
