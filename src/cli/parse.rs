//! CLI parse: clap types for envmeld. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Envmeld CLI - Deterministic shell environment state management
#[derive(Parser)]
#[command(name = "envmeld")]
#[command(about = "Deterministic shell environment state management")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suppress all diagnostics
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the snippet that installs the prompt hook for SHELL
    Hook {
        /// Target shell, by name or argv[0]
        shell: String,
    },
    /// Print the diff that reconciles the live environment, as SHELL code
    Export {
        /// Target shell, by name or argv[0]
        shell: String,
        /// Captured alias-listing file (used when alias export is enabled)
        alias_list: Option<PathBuf>,
    },
    /// Apply a previously captured environment dump and print the diff
    ApplyDump {
        /// Target shell, by name or argv[0]
        shell: String,
        /// Wire-encoded dump file, as produced by `envmeld dump`
        file: PathBuf,
    },
    /// Serialize the current environment
    Dump {
        /// Target dialect (default: the wire codec)
        #[arg(default_value = "wire")]
        shell: String,
    },
}
