//! Property-based tests for the diff engine's invertibility guarantees.

use envmeld::codec;
use envmeld::diff::EnvDiff;
use envmeld::env::Env;
use envmeld::ignore::{ALIAS_POLICY, VAR_POLICY};
use proptest::collection::btree_map;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn string_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    btree_map(".{1,12}", ".{0,24}", 0..8)
}

fn env_pair() -> impl Strategy<Value = (BTreeMap<String, String>, BTreeMap<String, String>)> {
    (string_map(), string_map())
}

fn make_env(vars: BTreeMap<String, String>, aliases: BTreeMap<String, String>) -> Env {
    let mut env = Env::new();
    env.vars = vars;
    env.aliases = aliases;
    env
}

/// Strip policy-excluded names; the diff contracts are stated over the rest.
fn filtered(env: &Env) -> Env {
    let mut out = Env::new();
    out.vars = env
        .vars
        .iter()
        .filter(|(k, _)| !VAR_POLICY.ignores(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    out.aliases = env
        .aliases
        .iter()
        .filter(|(k, _)| !ALIAS_POLICY.ignores(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    out
}

#[test]
fn test_codec_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&env_pair(), |(vars, aliases)| {
            let env = make_env(vars, aliases);
            let decoded = Env::deserialize(&env.serialize()).unwrap();
            assert_eq!(decoded, env);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_diff_of_identical_envs_is_empty_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&env_pair(), |(vars, aliases)| {
            let env = make_env(vars, aliases);
            let diff = EnvDiff::build(&env, &env);
            assert!(!diff.any());
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_patch_reaches_target_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(env_pair(), env_pair()), |((va, aa), (vb, ab))| {
            let a = make_env(va, aa);
            let b = make_env(vb, ab);
            let patched = EnvDiff::build(&a, &b).patch(&a);
            assert_eq!(filtered(&patched), filtered(&b));
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_reverse_restores_origin_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(env_pair(), env_pair()), |((va, aa), (vb, ab))| {
            let a = make_env(va, aa);
            let b = make_env(vb, ab);
            let diff = EnvDiff::build(&a, &b);
            let roundtripped = diff.reverse().patch(&diff.patch(&a));
            // Policy-excluded names are never touched by patch, so the round
            // trip restores the origin exactly.
            assert_eq!(roundtripped, a);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_diff_serialization_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(env_pair(), env_pair()), |((va, aa), (vb, ab))| {
            let a = make_env(va, aa);
            let b = make_env(vb, ab);
            let diff = EnvDiff::build(&a, &b);
            let decoded: EnvDiff = codec::decode(&diff.serialize()).unwrap();
            assert_eq!(decoded, diff);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_policy_excluded_names_never_diff_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(env_pair(), ".{0,24}", ".{0,24}"),
            |((va, _), old_value, new_value)| {
                let mut a = make_env(va.clone(), BTreeMap::new());
                let mut b = make_env(va, BTreeMap::new());
                for key in ["PWD", "ENVMELD_DIFF", "__fish_greeting", "BASH_FUNC_f%%"] {
                    a.vars.insert(key.to_string(), old_value.clone());
                    b.vars.insert(key.to_string(), new_value.clone());
                }
                a.aliases.insert("-".to_string(), old_value.clone());

                let diff = EnvDiff::build(&a, &b);
                for map in [
                    &diff.prev_vars,
                    &diff.next_vars,
                    &diff.prev_aliases,
                    &diff.next_aliases,
                ] {
                    for key in ["PWD", "ENVMELD_DIFF", "__fish_greeting", "BASH_FUNC_f%%", "-"] {
                        assert!(!map.contains_key(key));
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}
