//! The venerable Z shell.

use super::escape::bash_escape;
use crate::env::Env;
use crate::export::{ExportValue, ShellExport};

pub const HOOK: &str = r#"_envmeld_hook() {
  local alias_list=$(mktemp)
  trap -- "rm -f $alias_list" SIGINT;
  alias >> "$alias_list"
  eval "$("{{envmeld}}" export zsh "$alias_list")";
  trap - SIGINT;
  rm -f "$alias_list"
}
typeset -ag precmd_functions;
if [[ -z ${precmd_functions[(r)_envmeld_hook]} ]]; then
  precmd_functions=( _envmeld_hook ${precmd_functions[@]} )
fi
typeset -ag chpwd_functions;
if [[ -z ${chpwd_functions[(r)_envmeld_hook]} ]]; then
  chpwd_functions=( _envmeld_hook ${chpwd_functions[@]} )
fi
"#;

pub fn export(e: &ShellExport) -> String {
    let mut out = String::new();
    for (key, value) in &e.vars {
        match value {
            ExportValue::Set(value) => out.push_str(&export_var(key, value)),
            ExportValue::Unset => out.push_str(&unset_var(key)),
        }
    }
    for (key, value) in &e.aliases {
        match value {
            ExportValue::Set(value) => out.push_str(&alias(key, value)),
            ExportValue::Unset => out.push_str(&unalias(key)),
        }
    }
    out
}

pub fn dump(env: &Env) -> String {
    let mut out = String::new();
    for (key, value) in &env.vars {
        out.push_str(&export_var(key, value));
    }
    out
}

fn export_var(key: &str, value: &str) -> String {
    format!("export {}={};", bash_escape(key), bash_escape(value))
}

fn unset_var(key: &str) -> String {
    format!("unset {};", bash_escape(key))
}

fn alias(key: &str, value: &str) -> String {
    format!("alias {}={};", bash_escape(key), bash_escape(value))
}

fn unalias(key: &str) -> String {
    format!("unalias {};", bash_escape(key))
}
