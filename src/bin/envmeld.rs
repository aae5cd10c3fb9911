//! Envmeld CLI Binary
//!
//! Command-line interface for the envmeld environment state manager. Stdout
//! carries exactly one block of shell source; everything else goes to stderr.

use anyhow::Context;
use clap::Parser;
use envmeld::cli::{map_error, Cli, RunContext};
use envmeld::config::ConfigLoader;
use envmeld::logging::{init_logging, LoggingConfig};
use std::io::Write;
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("envmeld: {}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, config.logging.clone());
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("envmeld: failed to initialize logging: {}", map_error(&e));
        process::exit(1);
    }

    debug!("envmeld starting");

    let context = RunContext::with_config(config);
    match context.execute(&cli.command) {
        Ok(payload) => {
            if let Err(e) = write_payload(&payload) {
                error!("writing output failed: {e:#}");
                process::exit(1);
            }
        }
        Err(e) => {
            error!("command failed: {e}");
            eprintln!("envmeld: {}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Write the protocol payload as-is: no trailing newline, nothing else.
fn write_payload(payload: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(payload.as_bytes())
        .context("writing to stdout")?;
    stdout.flush().context("flushing stdout")?;
    Ok(())
}

/// Resolve logging configuration. Precedence: CLI flags over config file
/// over defaults.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.level = "off".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
