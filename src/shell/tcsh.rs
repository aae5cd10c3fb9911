//! The TENEX C shell. Alias export entries are ignored.

use super::escape::bash_escape;
use crate::env::Env;
use crate::export::{ExportValue, ShellExport};

pub const HOOK: &str = r#"alias precmd 'eval `"{{envmeld}}" export tcsh`';
"#;

pub fn export(e: &ShellExport) -> String {
    let mut out = String::new();
    for (key, value) in &e.vars {
        match value {
            ExportValue::Set(value) => out.push_str(&setenv(key, value)),
            ExportValue::Unset => out.push_str(&unsetenv(key)),
        }
    }
    out
}

pub fn dump(env: &Env) -> String {
    let mut out = String::new();
    for (key, value) in &env.vars {
        out.push_str(&setenv(key, value));
    }
    out
}

fn setenv(key: &str, value: &str) -> String {
    format!("setenv {} {} ;", bash_escape(key), bash_escape(value))
}

fn unsetenv(key: &str) -> String {
    format!("unsetenv {} ;", bash_escape(key))
}
