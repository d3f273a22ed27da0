//! NAFA HR client library
//!
//! Typed access to the NAFA human-resources REST API: sign-in and session
//! lifecycle, role-scoped operations for managers and employees, and the
//! shift management workflow. The `rhcli` binary is a thin command-line
//! front-end over this library.
//!
//! # Modules
//!
//! - `api` - role-scoped façades (auth, manager, employee)
//! - `cli` - command-line interface implementations
//! - `config` - configuration from environment variables and `.env`
//! - `endpoints` - endpoint registry and query-string helpers
//! - `error` - the [`ApiError`](error::ApiError) taxonomy
//! - `http` - transport stack with bearer injection and 401 handling
//! - `navigation` - role-based navigation table
//! - `session` - session token and cached profile persistence
//! - `shifts` - shift naming rules and the shift board
//! - `types` - data structures shared across modules
//! - `utils` - small CLI helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rhcli::{api::ManagerApi, config, http::{ApiClient, NoopNavigator}, session::Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rhcli::error::ApiError> {
//!     let session = Session::in_memory();
//!     let client = ApiClient::new(config::api_base_url()?, session, Arc::new(NoopNavigator))?;
//!     let shifts = ManagerApi::new(client).shifts().await?;
//!     println!("{}", shifts.body);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod navigation;
pub mod session;
pub mod shifts;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Writes one line to stdout, prefixed with a blue `o`. Used for neutral
/// progress and profile details in the commands.
///
/// # Arguments
///
/// Same arguments as `println!`: a format string and its values.
///
/// # Example
///
/// ```
/// info!("Fetching shifts...");
/// info!("Found {} shifts", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used once a command's remote call has gone through, for example after a
/// shift is saved or a leave approved.
///
/// # Arguments
///
/// Same arguments as `println!`.
///
/// # Example
///
/// ```
/// success!("Shift created");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures the command cannot recover from; the process exits
/// with code 1 right after printing. The expansion diverges, so it can stand
/// in any `match` arm or `let ... else` block.
///
/// # Arguments
///
/// Same arguments as `println!`.
///
/// # Example
///
/// ```
/// error!("RH_API_BASE_URL must be set");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// For conditions the user should know about while the command carries on,
/// such as an expired session or a shift that ends before it starts.
///
/// # Arguments
///
/// Same arguments as `println!`.
///
/// # Example
///
/// ```
/// warning!("End time is before start time");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
