//! Diff engine: minimal, invertible deltas between two environment snapshots.

use crate::codec;
use crate::env::Env;
use crate::error::CodecError;
use crate::export::ShellExport;
use crate::ignore::{IgnorePolicy, ALIAS_POLICY, VAR_POLICY};
use crate::shell::Shell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The difference between two environments.
///
/// A name appears on the `prev` side only if it was removed or its value
/// changed, and on the `next` side only if it was added or its value changed.
/// An unchanged name appears nowhere, so the diff's size is proportional to
/// actual change, not environment size. The short serde names are the wire
/// field names; recorded diffs must decode across versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvDiff {
    #[serde(rename = "pe", default)]
    pub prev_vars: BTreeMap<String, String>,

    #[serde(rename = "ne", default)]
    pub next_vars: BTreeMap<String, String>,

    #[serde(rename = "pa", default)]
    pub prev_aliases: BTreeMap<String, String>,

    #[serde(rename = "na", default)]
    pub next_aliases: BTreeMap<String, String>,
}

impl EnvDiff {
    pub fn new() -> Self {
        EnvDiff::default()
    }

    /// Diff `prev` toward `next` under the default exclusion policies.
    pub fn build(prev: &Env, next: &Env) -> EnvDiff {
        Self::build_with_policy(prev, next, &VAR_POLICY, &ALIAS_POLICY)
    }

    /// Diff `prev` toward `next` under explicit exclusion policies.
    pub fn build_with_policy(
        prev: &Env,
        next: &Env,
        var_policy: &IgnorePolicy,
        alias_policy: &IgnorePolicy,
    ) -> EnvDiff {
        let mut diff = EnvDiff::new();
        diff_maps(
            &prev.vars,
            &next.vars,
            var_policy,
            &mut diff.prev_vars,
            &mut diff.next_vars,
        );
        diff_maps(
            &prev.aliases,
            &next.aliases,
            alias_policy,
            &mut diff.prev_aliases,
            &mut diff.next_aliases,
        );
        diff
    }

    /// True iff the diff contains any change.
    pub fn any(&self) -> bool {
        !self.prev_vars.is_empty()
            || !self.next_vars.is_empty()
            || !self.prev_aliases.is_empty()
            || !self.next_aliases.is_empty()
    }

    /// Apply the diff to `env`, producing the environment it was computed
    /// toward. Deletion happens before insertion, so a name that is both
    /// removed and re-added ends up set to the new value.
    pub fn patch(&self, env: &Env) -> Env {
        let mut patched = env.clone();
        for key in self.prev_vars.keys() {
            patched.vars.remove(key);
        }
        for (key, value) in &self.next_vars {
            patched.vars.insert(key.clone(), value.clone());
        }
        for key in self.prev_aliases.keys() {
            patched.aliases.remove(key);
        }
        for (key, value) in &self.next_aliases {
            patched.aliases.insert(key.clone(), value.clone());
        }
        patched
    }

    /// Flip the diff so that patching applies the other way around.
    pub fn reverse(&self) -> EnvDiff {
        EnvDiff {
            prev_vars: self.next_vars.clone(),
            next_vars: self.prev_vars.clone(),
            prev_aliases: self.next_aliases.clone(),
            next_aliases: self.prev_aliases.clone(),
        }
    }

    /// Render the diff as an evaluatable string for the target shell.
    pub fn to_shell(&self, shell: Shell) -> String {
        shell.export(&ShellExport::from_diff(self))
    }

    /// Sorted `+name`/`~name`/`-name` indicator strings for variables and
    /// aliases, for the user-facing status line.
    pub fn summary(&self) -> (String, String) {
        let mut var_out = Vec::new();
        let mut alias_out = Vec::new();
        if self.any() {
            for key in self.prev_vars.keys() {
                if !self.next_vars.contains_key(key) {
                    var_out.push(format!("-{key}"));
                }
            }
            for key in self.next_vars.keys() {
                if self.prev_vars.contains_key(key) {
                    var_out.push(format!("~{key}"));
                } else {
                    var_out.push(format!("+{key}"));
                }
            }
            for key in self.prev_aliases.keys() {
                if !self.next_aliases.contains_key(key) {
                    alias_out.push(format!("-{key}"));
                }
            }
            for key in self.next_aliases.keys() {
                if self.prev_aliases.contains_key(key) {
                    alias_out.push(format!("~{key}"));
                } else {
                    alias_out.push(format!("+{key}"));
                }
            }
            var_out.sort();
            alias_out.sort();
        }
        (var_out.join(" "), alias_out.join(" "))
    }

    /// Marshal into the wire format.
    pub fn serialize(&self) -> String {
        codec::encode(self)
    }

    /// Unmarshal from the wire format.
    pub fn deserialize(input: &str) -> Result<EnvDiff, CodecError> {
        codec::decode(input)
    }
}

fn diff_maps(
    prev: &BTreeMap<String, String>,
    next: &BTreeMap<String, String>,
    policy: &IgnorePolicy,
    out_prev: &mut BTreeMap<String, String>,
    out_next: &mut BTreeMap<String, String>,
) {
    for (key, value) in prev {
        if policy.ignores(key) {
            continue;
        }
        if next.get(key) != Some(value) {
            out_prev.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in next {
        if policy.ignores(key) {
            continue;
        }
        if prev.get(key) != Some(value) {
            out_next.insert(key.clone(), value.clone());
        }
    }
}
