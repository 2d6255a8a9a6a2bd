//! sportrend library
//!
//! Keeps a client-side view of trending tracks and popular artists per
//! language fresh against the Spotify Web API, which has no trending endpoint
//! of its own. Trending is approximated by fanning out keyword searches per
//! language and merging the results deterministically.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - Typed errors for auth, catalog calls and aggregation
//! - `language` - Supported locales and their trending keyword tables
//! - `management` - Stateful core: credentials, aggregation, scheduling, search
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sportrend::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> sportrend::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod language;
pub mod management;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias used at the command-line boundary.
///
/// Library code returns the typed errors from [`errors`]; the CLI layer
/// folds them into a boxed error that stays `Send + Sync` across tasks.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line prefixed with a blue `o`.
///
/// ```
/// info!("Refreshing trending tracks for {}...", language);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for the CLI layer, where nothing can be recovered anymore:
///
/// ```
/// error!("Cannot load configuration. Err: {}", e);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line prefixed with a yellow `!` and carries on.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
