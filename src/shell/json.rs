//! Not really a shell: structured, human-diffable output for editors and
//! other external tools that understand JSON.

use crate::env::Env;
use crate::export::ShellExport;

pub fn export(e: &ShellExport) -> String {
    // Should never fail: the representation is maps of strings.
    serde_json::to_string_pretty(e).expect("export serializes to JSON")
}

pub fn dump(env: &Env) -> String {
    serde_json::to_string_pretty(env).expect("env serializes to JSON")
}
