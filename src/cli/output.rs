//! CLI output: error mapping and the user-facing status line.

use crate::error::ApiError;

/// Map domain errors to a string for CLI output.
/// Keeps route handlers thin; extend with stable categories if needed.
pub fn map_error(e: &ApiError) -> String {
    e.to_string()
}

/// Print a status line to stderr, never stdout.
pub fn log_status(message: &str) {
    eprintln!("envmeld: {message}");
}
