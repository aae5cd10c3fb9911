//! Full-protocol tests: load via apply-dump, unload via export, with shell
//! evaluation simulated by applying the decoded export representation.

use super::test_utils::{apply_export, env_with};
use envmeld::cli::{apply_dump, export_unload, revert};
use envmeld::codec;
use envmeld::env::{ENVMELD_DIFF, ENVMELD_DIR, ENVMELD_DUMP_FILE_PATH};
use envmeld::export::{ExportValue, ShellExport};
use envmeld::shell::Shell;
use std::path::Path;

#[test]
fn test_load_then_unload_restores_base_environment() {
    let base = env_with(&[("HOME", "/home/u"), ("PATH", "/bin"), ("EMPTY", "")], &[]);

    // The directory's target environment, as a dump would record it.
    let mut target = base.clone();
    target.vars.insert("FOO".to_string(), "1".to_string());
    target
        .vars
        .insert("PATH".to_string(), "/project/bin:/bin".to_string());
    target.vars.remove("EMPTY");

    // Load: diff from base toward target, with bookkeeping threaded in.
    let encoded = apply_dump(
        Shell::Wire,
        &base,
        target.clone(),
        Path::new("/tmp/dump"),
    )
    .unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    let loaded = apply_export(&base, &export);

    assert_eq!(loaded.fetch("FOO", ""), "1");
    assert_eq!(loaded.fetch("PATH", ""), "/project/bin:/bin");
    assert!(!loaded.vars.contains_key("EMPTY"));
    assert!(loaded.vars.contains_key(ENVMELD_DIFF));
    assert_eq!(loaded.fetch(ENVMELD_DUMP_FILE_PATH, ""), "/tmp/dump");

    // Unload: the emitted export must take the loaded environment back to
    // base, bookkeeping included.
    let encoded = export_unload(Shell::Wire, &loaded).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    let unloaded = apply_export(&loaded, &export);

    assert_eq!(unloaded, base);
}

#[test]
fn test_unload_emits_bookkeeping_unsets() {
    let base = env_with(&[("KEEP", "1")], &[]);
    let mut target = base.clone();
    target.vars.insert("FOO".to_string(), "loaded".to_string());

    let recorded = base.diff(&target);
    let mut loaded = target.clone();
    loaded
        .vars
        .insert(ENVMELD_DIFF.to_string(), recorded.serialize());
    loaded.vars.insert(ENVMELD_DIR.to_string(), "/x".to_string());

    let encoded = export_unload(Shell::Wire, &loaded).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();

    assert_eq!(export.vars.get("FOO"), Some(&ExportValue::Unset));
    assert_eq!(export.vars.get(ENVMELD_DIFF), Some(&ExportValue::Unset));
    assert_eq!(export.vars.get(ENVMELD_DIR), Some(&ExportValue::Unset));
    assert!(!export.vars.contains_key("KEEP"));
}

#[test]
fn test_unload_restores_shadowed_value() {
    // Loading changed an existing variable; unloading must restore the old
    // value, not merely unset the name.
    let base = env_with(&[("EDITOR", "vi")], &[]);
    let mut target = base.clone();
    target.vars.insert("EDITOR".to_string(), "nvim".to_string());

    let recorded = base.diff(&target);
    let mut loaded = target.clone();
    loaded
        .vars
        .insert(ENVMELD_DIFF.to_string(), recorded.serialize());

    let encoded = export_unload(Shell::Wire, &loaded).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    assert_eq!(
        export.vars.get("EDITOR"),
        Some(&ExportValue::Set("vi".to_string()))
    );
}

#[test]
fn test_revert_without_recorded_diff_is_identity() {
    let current = env_with(&[("A", "1")], &[]);
    assert_eq!(revert(&current).unwrap(), current);

    let mut with_empty = current.clone();
    with_empty.vars.insert(ENVMELD_DIFF.to_string(), String::new());
    assert_eq!(revert(&with_empty).unwrap(), with_empty);
}

#[test]
fn test_revert_with_corrupt_recorded_diff_is_fatal() {
    let mut current = env_with(&[("A", "1")], &[]);
    current
        .vars
        .insert(ENVMELD_DIFF.to_string(), "*** corrupt ***".to_string());
    assert!(revert(&current).is_err());
}

#[test]
fn test_reload_is_idempotent() {
    // Applying the same dump twice produces no second-round changes beyond
    // refreshed bookkeeping.
    let base = env_with(&[("PATH", "/bin")], &[]);
    let mut target = base.clone();
    target.vars.insert("FOO".to_string(), "1".to_string());

    let encoded = apply_dump(Shell::Wire, &base, target.clone(), Path::new("/d")).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    let loaded = apply_export(&base, &export);

    let encoded = apply_dump(Shell::Wire, &loaded, target.clone(), Path::new("/d")).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    let reloaded = apply_export(&loaded, &export);

    assert_eq!(reloaded, loaded);
}

#[test]
fn test_aliases_flow_through_load_and_unload() {
    let base = env_with(&[], &[("g", "git")]);
    let mut target = base.clone();
    target
        .aliases
        .insert("ll".to_string(), "ls -la".to_string());
    target.aliases.insert("g".to_string(), "git status".to_string());

    let encoded = apply_dump(Shell::Wire, &base, target.clone(), Path::new("/d")).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    let loaded = apply_export(&base, &export);
    assert_eq!(loaded.aliases.get("ll").map(String::as_str), Some("ls -la"));
    assert_eq!(
        loaded.aliases.get("g").map(String::as_str),
        Some("git status")
    );

    let encoded = export_unload(Shell::Wire, &loaded).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    let unloaded = apply_export(&loaded, &export);
    assert_eq!(unloaded.aliases, base.aliases);
}

#[test]
fn test_volatile_variables_survive_the_cycle_untouched() {
    let base = env_with(&[("PWD", "/old"), ("SHLVL", "1")], &[]);
    let mut target = base.clone();
    target.vars.insert("FOO".to_string(), "1".to_string());

    let encoded = apply_dump(Shell::Wire, &base, target, Path::new("/d")).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    assert!(!export.vars.contains_key("PWD"));
    assert!(!export.vars.contains_key("SHLVL"));

    // Even if the shell moved directories since, unload leaves PWD alone.
    let mut loaded = apply_export(&base, &export);
    loaded.vars.insert("PWD".to_string(), "/new".to_string());
    let encoded = export_unload(Shell::Wire, &loaded).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    assert!(!export.vars.contains_key("PWD"));

    let unloaded = apply_export(&loaded, &export);
    assert_eq!(unloaded.fetch("PWD", ""), "/new");
}

#[test]
fn test_recorded_diff_decodes_back_to_the_computed_diff() {
    let base = env_with(&[("A", "1")], &[]);
    let mut target = base.clone();
    target.vars.insert("B".to_string(), "2".to_string());

    let encoded = apply_dump(Shell::Wire, &base, target.clone(), Path::new("/d")).unwrap();
    let export: ShellExport = codec::decode(&encoded).unwrap();
    let Some(ExportValue::Set(raw)) = export.vars.get(ENVMELD_DIFF) else {
        panic!("recorded diff missing from export");
    };
    let recorded = envmeld::diff::EnvDiff::deserialize(raw).unwrap();
    assert_eq!(recorded, base.diff(&target));
}
