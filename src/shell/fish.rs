//! The friendly interactive shell.
//!
//! Fish has no `$'...'` syntax; values are wrapped in single quotes, inside
//! which only `\'` and `\\` are special and raw bytes (newlines included)
//! survive verbatim. Alias export entries are ignored: fish aliases are
//! functions, and rewriting functions from a diff is not worth the risk.

use crate::env::Env;
use crate::export::{ExportValue, ShellExport};

pub const HOOK: &str = r#"function __envmeld_export_eval --on-event fish_prompt;
  "{{envmeld}}" export fish | source;
end
"#;

pub fn export(e: &ShellExport) -> String {
    let mut out = String::new();
    for (key, value) in &e.vars {
        match value {
            ExportValue::Set(value) => out.push_str(&set_var(key, value)),
            ExportValue::Unset => out.push_str(&erase_var(key)),
        }
    }
    out
}

pub fn dump(env: &Env) -> String {
    let mut out = String::new();
    for (key, value) in &env.vars {
        out.push_str(&set_var(key, value));
    }
    out
}

fn set_var(key: &str, value: &str) -> String {
    format!("set -x -g {} {};", escape(key), escape(value))
}

fn erase_var(key: &str) -> String {
    format!("set -e -g {};", escape(key))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}
