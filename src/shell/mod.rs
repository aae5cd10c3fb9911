//! Shell dialects: rendering and escaping rules for each supported target.
//!
//! The dialect set is fixed and known at build time, so [`Shell`] is a closed
//! enum dispatched by `match` rather than a runtime-selected interface.
//! Dialects without a capability (hooking, aliases) surface that as an
//! explicit [`ShellError`] variant, never by silently returning empty data.

mod bash;
mod escape;
mod fish;
mod json;
mod tcsh;
mod wire;
mod zsh;

use crate::env::Env;
use crate::error::ShellError;
use crate::export::ShellExport;
use std::collections::BTreeMap;
use std::path::Path;

pub use escape::bash_escape;

/// Placeholder in hook templates for the path to the envmeld binary.
pub const SELF_PLACEHOLDER: &str = "{{envmeld}}";

/// A supported target dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Tcsh,
    /// Pseudo-dialect: structured, human-diffable JSON for editors and tools.
    Json,
    /// Pseudo-dialect: the wire codec, for inter-process embedding.
    Wire,
}

impl Shell {
    /// Resolve a dialect from the invoking shell's `argv[0]`.
    ///
    /// Matches on the basename, after stripping the single leading `-` that
    /// login shells carry.
    pub fn detect(target: &str) -> Result<Shell, ShellError> {
        let base = Path::new(target)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(target);
        let name = base.strip_prefix('-').unwrap_or(base);
        match name {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            "tcsh" => Ok(Shell::Tcsh),
            "json" => Ok(Shell::Json),
            "wire" => Ok(Shell::Wire),
            other => Err(ShellError::UnknownShell(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::Tcsh => "tcsh",
            Shell::Json => "json",
            Shell::Wire => "wire",
        }
    }

    /// The snippet that installs the prompt/directory-change trigger.
    ///
    /// Templates contain [`SELF_PLACEHOLDER`] where the caller substitutes
    /// the binary path. Pseudo-dialects don't hook.
    pub fn hook(&self) -> Result<&'static str, ShellError> {
        match self {
            Shell::Bash => Ok(bash::HOOK),
            Shell::Zsh => Ok(zsh::HOOK),
            Shell::Fish => Ok(fish::HOOK),
            Shell::Tcsh => Ok(tcsh::HOOK),
            Shell::Json | Shell::Wire => Err(ShellError::HookUnsupported(self.name())),
        }
    }

    /// Render an export representation as an evaluatable string.
    ///
    /// Dialects without alias support ignore alias entries; alias export is
    /// best-effort and must never cost variable exports.
    pub fn export(&self, export: &ShellExport) -> String {
        match self {
            Shell::Bash => bash::export(export),
            Shell::Zsh => zsh::export(export),
            Shell::Fish => fish::export(export),
            Shell::Tcsh => tcsh::export(export),
            Shell::Json => json::export(export),
            Shell::Wire => wire::export(export),
        }
    }

    /// Render every variable of a snapshot as a set statement.
    pub fn dump(&self, env: &Env) -> String {
        match self {
            Shell::Bash => bash::dump(env),
            Shell::Zsh => zsh::dump(env),
            Shell::Fish => fish::dump(env),
            Shell::Tcsh => tcsh::dump(env),
            Shell::Json => json::dump(env),
            Shell::Wire => wire::dump(env),
        }
    }

    /// Parse the dialect's captured alias-listing output.
    pub fn parse_aliases(&self, raw: &[u8]) -> Result<BTreeMap<String, String>, ShellError> {
        match self {
            // zsh `alias` prints `name='value'`
            Shell::Zsh => parse_alias_lines(raw, 0, '=', '\''),
            // bash `alias` prints `alias name='value'`
            Shell::Bash => parse_alias_lines(raw, "alias ".len(), '=', '\''),
            Shell::Fish | Shell::Tcsh | Shell::Json | Shell::Wire => {
                Err(ShellError::AliasesUnsupported(self.name()))
            }
        }
    }
}

/// Generic line-based alias parser.
///
/// Each non-empty line must contain `separator` once past the prefix; text
/// before it (after `prefix_len` bytes) is the name, text after is the value,
/// both trimmed of `enclosure`.
fn parse_alias_lines(
    raw: &[u8],
    prefix_len: usize,
    separator: char,
    enclosure: char,
) -> Result<BTreeMap<String, String>, ShellError> {
    let text = String::from_utf8_lossy(raw);
    let mut aliases = BTreeMap::new();
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        let Some(sep_idx) = line.find(separator) else {
            return Err(ShellError::AliasParse {
                separator,
                line: line.to_string(),
            });
        };
        let start = prefix_len.min(sep_idx);
        let name = line.get(start..sep_idx).unwrap_or("").trim_matches(enclosure);
        let value = line
            .get(sep_idx + separator.len_utf8()..)
            .unwrap_or("")
            .trim_matches(enclosure);
        aliases.insert(name.to_string(), value.to_string());
    }
    Ok(aliases)
}
