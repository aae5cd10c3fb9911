//! Environment snapshots.
//!
//! An [`Env`] is a map representation of a shell context: environment
//! variables and aliases. A name present with an empty value is *set*, which
//! is distinct from the name being absent; presence, not truthiness, carries
//! meaning throughout.

use crate::codec;
use crate::diff::EnvDiff;
use crate::error::CodecError;
use crate::export::ShellExport;
use crate::shell::Shell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Holds the serialized diff that was last applied, so the next invocation
/// can reverse it before computing a new one. Absent means "nothing applied".
pub const ENVMELD_DIFF: &str = "ENVMELD_DIFF";

/// Directory whose configuration is currently loaded.
pub const ENVMELD_DIR: &str = "ENVMELD_DIR";

/// Path to an environment dump consumed by external collaborators.
pub const ENVMELD_DUMP_FILE_PATH: &str = "ENVMELD_DUMP_FILE_PATH";

/// Serialized watch list consumed by external collaborators.
pub const ENVMELD_WATCHES: &str = "ENVMELD_WATCHES";

/// The bookkeeping variables stripped by [`Env::clean_bookkeeping`].
pub const BOOKKEEPING_VARS: [&str; 4] = [
    ENVMELD_DIFF,
    ENVMELD_DIR,
    ENVMELD_DUMP_FILE_PATH,
    ENVMELD_WATCHES,
];

/// A captured set of named variables and named aliases at one point in time.
///
/// Sorted maps keep every rendering path deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Env {
    #[serde(default)]
    pub vars: BTreeMap<String, String>,

    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Env {
    pub fn new() -> Self {
        Env::default()
    }

    /// Snapshot the live process environment.
    ///
    /// Duplicate names are not supported (POSIX allows them, nobody uses
    /// them). Entries that are not valid UTF-8 are skipped with a warning.
    pub fn capture() -> Env {
        let mut env = Env::new();
        for (key, value) in std::env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    env.vars.insert(key, value);
                }
                (key, _) => {
                    warn!(key = ?key, "skipping non-UTF-8 environment entry");
                }
            }
        }
        env
    }

    /// Remove the envmeld bookkeeping variables.
    ///
    /// Call this whenever reverting to a "no configuration active" state,
    /// otherwise the tool retains stale memory of an environment that no
    /// longer applies.
    pub fn clean_bookkeeping(&mut self) {
        for key in BOOKKEEPING_VARS {
            self.vars.remove(key);
        }
    }

    /// Value for `key`, or `default` if the variable is absent.
    ///
    /// An explicitly-set empty variable is returned as-is, never substituted.
    pub fn fetch<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.vars.get(key).map(String::as_str).unwrap_or(default)
    }

    /// Diff from this snapshot toward `other`.
    pub fn diff(&self, other: &Env) -> EnvDiff {
        EnvDiff::build(self, other)
    }

    /// Render every variable as a set statement for the target shell.
    pub fn to_shell(&self, shell: Shell) -> String {
        shell.export(&ShellExport::from_env(self))
    }

    /// Marshal into the wire format.
    pub fn serialize(&self) -> String {
        codec::encode(self)
    }

    /// Unmarshal from the wire format.
    pub fn deserialize(input: &str) -> Result<Env, CodecError> {
        codec::decode(input)
    }
}
