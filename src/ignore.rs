//! Static exclusion tables for environment diffing.
//!
//! Names listed here never appear in a diff regardless of how their values
//! change between snapshots. The tables are process-wide constants handed to
//! the diff engine by reference, never mutable globals.

/// A set of exact names plus name prefixes that a diff must never touch.
pub struct IgnorePolicy {
    names: &'static [&'static str],
    prefixes: &'static [&'static str],
}

impl IgnorePolicy {
    pub const fn new(names: &'static [&'static str], prefixes: &'static [&'static str]) -> Self {
        IgnorePolicy { names, prefixes }
    }

    /// True if `key` is excluded from diffing by this policy.
    pub fn ignores(&self, key: &str) -> bool {
        self.names.contains(&key) || self.prefixes.iter().any(|p| key.starts_with(p))
    }
}

/// Exclusion policy for environment variables.
pub static VAR_POLICY: IgnorePolicy = IgnorePolicy::new(
    &[
        // envmeld bookkeeping, maintained explicitly by the export flow
        crate::env::ENVMELD_DIFF,
        crate::env::ENVMELD_DIR,
        crate::env::ENVMELD_DUMP_FILE_PATH,
        crate::env::ENVMELD_WATCHES,
        // envmeld configuration
        "ENVMELD_CONFIG",
        "ENVMELD_BASH",
        // should only be visible inside the configuration script
        "ENVMELD_IN_ENVRC",
        "COMP_WORDBREAKS", // avoids segfaults in bash
        "PS1",             // PS1 should not be exported, fixes problem in bash
        // variables that change freely
        "OLDPWD",
        "PWD",
        "SHELL",
        "SHELLOPTS",
        "SHLVL",
        "_",
    ],
    &["__fish", "BASH_FUNC_"],
);

/// Exclusion policy for aliases.
pub static ALIAS_POLICY: IgnorePolicy = IgnorePolicy::new(
    &[
        // special alias
        "-",
    ],
    &[],
);
