//! CLI route: single route table and run context. Dispatches to the
//! snapshot/diff/export pipeline and owns the invocation flows.

use crate::cli::output::log_status;
use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, EnvmeldConfig};
use crate::diff::EnvDiff;
use crate::env::{Env, BOOKKEEPING_VARS, ENVMELD_DIFF, ENVMELD_DUMP_FILE_PATH};
use crate::error::{ApiError, ShellError};
use crate::export::ShellExport;
use crate::shell::{Shell, SELF_PLACEHOLDER};
use std::path::Path;
use tracing::debug;

/// Runtime context for CLI execution.
pub struct RunContext {
    config: EnvmeldConfig,
}

impl RunContext {
    /// Create a run context, loading configuration from the given path or
    /// the global file.
    pub fn new(config_path: Option<&Path>) -> Result<Self, ApiError> {
        Ok(Self {
            config: ConfigLoader::load(config_path)?,
        })
    }

    /// Create a run context around an already-loaded configuration.
    pub fn with_config(config: EnvmeldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnvmeldConfig {
        &self.config
    }

    /// Execute a command, returning the stdout payload. Status lines and
    /// diagnostics go to stderr inside the handlers.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Hook { shell } => hook_script(shell),
            Commands::Export { shell, alias_list } => {
                let shell = Shell::detect(shell)?;
                let mut current = Env::capture();
                if self.config.enable_alias_export {
                    if let Some(path) = alias_list {
                        let raw =
                            std::fs::read(path).map_err(ShellError::AliasListRead)?;
                        current.aliases = shell.parse_aliases(&raw)?;
                    }
                }
                if current.vars.contains_key(ENVMELD_DIFF) {
                    log_status("unloading");
                }
                export_unload(shell, &current)
            }
            Commands::ApplyDump { shell, file } => {
                let shell = Shell::detect(shell)?;
                let raw = std::fs::read_to_string(file).map_err(|e| {
                    ApiError::Environment(format!("Reading dump file failed: {e}"))
                })?;
                let next = Env::deserialize(&raw)?;
                apply_dump(shell, &Env::capture(), next, file)
            }
            Commands::Dump { shell } => {
                let shell = Shell::detect(shell)?;
                Ok(shell.dump(&Env::capture()))
            }
        }
    }
}

/// Render the hook snippet for `target` with the binary path substituted.
fn hook_script(target: &str) -> Result<String, ApiError> {
    let shell = Shell::detect(target)?;
    let template = shell.hook()?;
    let self_path = std::env::current_exe()
        .map_err(|e| ApiError::Environment(format!("Cannot determine own path: {e}")))?;
    Ok(template.replace(SELF_PLACEHOLDER, &self_path.display().to_string()))
}

/// Recover the snapshot that was live before the recorded diff was applied.
///
/// No recorded diff means nothing is applied: the previous snapshot equals
/// the current one. A recorded diff that fails to decode is fatal; without a
/// trustworthy previous snapshot no safe diff can be computed.
pub fn revert(current: &Env) -> Result<Env, ApiError> {
    match current.vars.get(ENVMELD_DIFF) {
        None => Ok(current.clone()),
        Some(raw) if raw.is_empty() => Ok(current.clone()),
        Some(raw) => Ok(EnvDiff::deserialize(raw)?.reverse().patch(current)),
    }
}

/// Unload flow: revert the recorded diff, drop bookkeeping, and render the
/// difference the live shell must evaluate to get back to the unloaded state.
///
/// Bookkeeping variables are policy-excluded from diffs, so their removal is
/// added to the export explicitly.
pub fn export_unload(shell: Shell, current: &Env) -> Result<String, ApiError> {
    let previous = revert(current)?;
    let mut next = previous.clone();
    next.clean_bookkeeping();

    let diff = current.diff(&next);
    debug!(any = diff.any(), "computed unload diff");

    let mut export = ShellExport::from_diff(&diff);
    for key in BOOKKEEPING_VARS {
        if current.vars.contains_key(key) {
            export.unset_var(key);
        }
    }
    Ok(shell.export(&export))
}

/// Load flow: take a wire-encoded snapshot as the new target environment,
/// record the diff that reaches it from the reverted previous snapshot, and
/// render the difference from the live environment.
pub fn apply_dump(
    shell: Shell,
    current: &Env,
    mut next: Env,
    path: &Path,
) -> Result<String, ApiError> {
    // A dump taken while a configuration was loaded carries that invocation's
    // bookkeeping; it must not leak into the new target.
    next.clean_bookkeeping();

    let previous = revert(current)?;
    let recorded = previous.diff(&next);

    let (var_stat, alias_stat) = recorded.summary();
    if !var_stat.is_empty() {
        log_status(&format!("export {var_stat}"));
    }
    if !alias_stat.is_empty() {
        log_status(&format!("alias {alias_stat}"));
    }

    let mut export = ShellExport::from_diff(&current.diff(&next));
    export.set_var(ENVMELD_DIFF, &recorded.serialize());
    export.set_var(ENVMELD_DUMP_FILE_PATH, &path.display().to_string());
    Ok(shell.export(&export))
}
