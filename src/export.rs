//! Shell-agnostic export representation.
//!
//! Three states per name: untouched (absent from the map), set, or unset.
//! Set and Unset are explicit cases of [`ExportValue`] rather than an
//! optional value, so "remove this name" can never be conflated with
//! "uninitialized".

use crate::diff::EnvDiff;
use crate::env::Env;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instruction for a single name on the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportValue {
    Set(String),
    Unset,
}

// On the wire an ExportValue is the value string or null, matching the
// human-diffable JSON form external tools consume.
impl Serialize for ExportValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExportValue::Set(value) => serializer.serialize_str(value),
            ExportValue::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ExportValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(value) => ExportValue::Set(value),
            None => ExportValue::Unset,
        })
    }
}

/// Variables and aliases to add or remove on the host shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellExport {
    #[serde(default)]
    pub vars: BTreeMap<String, ExportValue>,

    #[serde(default)]
    pub aliases: BTreeMap<String, ExportValue>,
}

impl ShellExport {
    pub fn new() -> Self {
        ShellExport::default()
    }

    /// Build from a diff: `prev`-only names become Unset, every `next` name
    /// becomes Set. A changed name appears on both sides of the diff and
    /// yields only the Set.
    pub fn from_diff(diff: &EnvDiff) -> ShellExport {
        let mut export = ShellExport::new();
        for key in diff.prev_vars.keys() {
            if !diff.next_vars.contains_key(key) {
                export.unset_var(key);
            }
        }
        for (key, value) in &diff.next_vars {
            export.set_var(key, value);
        }
        for key in diff.prev_aliases.keys() {
            if !diff.next_aliases.contains_key(key) {
                export.unset_alias(key);
            }
        }
        for (key, value) in &diff.next_aliases {
            export.set_alias(key, value);
        }
        export
    }

    /// Build from a full snapshot: every entry is a Set, no Unsets.
    pub fn from_env(env: &Env) -> ShellExport {
        let mut export = ShellExport::new();
        for (key, value) in &env.vars {
            export.set_var(key, value);
        }
        for (key, value) in &env.aliases {
            export.set_alias(key, value);
        }
        export
    }

    pub fn set_var(&mut self, key: &str, value: &str) {
        self.vars
            .insert(key.to_string(), ExportValue::Set(value.to_string()));
    }

    pub fn unset_var(&mut self, key: &str) {
        self.vars.insert(key.to_string(), ExportValue::Unset);
    }

    pub fn set_alias(&mut self, key: &str, value: &str) {
        self.aliases
            .insert(key.to_string(), ExportValue::Set(value.to_string()));
    }

    pub fn unset_alias(&mut self, key: &str) {
        self.aliases.insert(key.to_string(), ExportValue::Unset);
    }
}
