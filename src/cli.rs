//! CLI domain: parse, route, and output only.
//! No domain logic; a single route table dispatches to the library.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::{apply_dump, export_unload, revert, RunContext};
