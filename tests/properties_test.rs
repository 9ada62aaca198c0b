use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tempfile::TempDir;

use tidyrules::engine::{self, evaluate, RunOptions};
use tidyrules::rules::{glob, parse_text, Location, Predicate};

/// Fixed tree shared by every case; never modified
fn fixture() -> &'static TempDir {
    static TREE: OnceLock<TempDir> = OnceLock::new();
    TREE.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        for file in [
            "Cargo.toml",
            "target/debug/app",
            "web/package.json",
            "web/node_modules/lib/index.js",
            "web/src/app.tmp",
            "py/.venv/pyvenv.cfg",
            "py/pkg/__pycache__/m.pyc",
        ] {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "x").unwrap();
        }
        dir
    })
}

fn fixture_dirs() -> Vec<PathBuf> {
    let root = fixture().path();
    [
        "",
        "target",
        "target/debug",
        "web",
        "web/node_modules",
        "web/src",
        "py",
        "py/pkg",
        "py/pkg/__pycache__",
    ]
    .iter()
    .map(|d| root.join(d))
    .collect()
}

fn location() -> impl Strategy<Value = Location> {
    prop_oneof![
        Just(Location::Here),
        Just(Location::Parent),
        Just(Location::Parents),
        Just(Location::Child),
        Just(Location::Children),
        Just(Location::Sibling),
    ]
}

fn pattern() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Cargo.toml"),
        Just("package.json"),
        Just("*.tmp"),
        Just("*.pyc"),
        Just(".venv"),
        Just("node_modules"),
        Just("?????"),
        Just("missing"),
    ]
}

fn predicate() -> impl Strategy<Value = Predicate> {
    let leaf = (location(), pattern()).prop_map(|(l, p)| Predicate::exists(l, p));
    leaf.prop_recursive(3, 12, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(Predicate::negate),
            prop::collection::vec(inner, 2..4).prop_map(Predicate::And),
        ]
    })
}

/// Conditions the grammar can write: `and` only at the top, `not` over leaves
fn expressible() -> impl Strategy<Value = Predicate> {
    let leaf = || (location(), pattern()).prop_map(|(l, p)| Predicate::exists(l, p));
    let operand = prop_oneof![
        leaf(),
        leaf().prop_map(Predicate::negate),
        leaf().prop_map(Predicate::negate).prop_map(Predicate::negate),
    ]
    .boxed();
    prop_oneof![
        operand.clone(),
        prop::collection::vec(operand, 2..4).prop_map(Predicate::And),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn literal_pattern_matches_itself_only(p in "[A-Za-z0-9._-]{1,16}") {
        let longer = format!("{}x", p);
        prop_assert!(glob::matches(&p, &p));
        prop_assert!(!glob::matches(&longer, &p));
        prop_assert!(!glob::matches(&p, &longer));
    }

    #[test]
    fn not_inverts(c in predicate(), index in 0usize..9) {
        let dirs = fixture_dirs();
        let dir = &dirs[index];
        let negated = Predicate::negate(c.clone());
        prop_assert_eq!(negated.evaluate(dir), !c.evaluate(dir));
    }

    #[test]
    fn and_is_conjunction(ops in prop::collection::vec(predicate(), 1..4), index in 0usize..9) {
        let dirs = fixture_dirs();
        let dir = &dirs[index];
        let all = ops.iter().all(|c| evaluate(dir, Some(c)));
        prop_assert_eq!(Predicate::And(ops).evaluate(dir), all);
    }

    #[test]
    fn display_parses_back(c in expressible()) {
        let line = format!("delete x when {}", c);
        let rules = parse_text(&line).unwrap();
        prop_assert_eq!(rules[0].condition.as_ref(), Some(&c));
    }

    #[test]
    fn dry_run_is_repeatable(text in prop::sample::select(vec![
        "delete target when exists Cargo.toml",
        "delete node_modules when exists package.json",
        "delete **/*.tmp",
        "delete __pycache__ when parents exists .venv",
        "delete * when not child exists missing",
    ])) {
        let rules = parse_text(text).unwrap();
        let first = engine::run(fixture().path(), &rules, &RunOptions::dry_run());
        let second = engine::run(fixture().path(), &rules, &RunOptions::dry_run());
        prop_assert_eq!(first, second);
    }
}
