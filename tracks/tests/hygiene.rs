//! Hygiene: source-level standards for the tracks crate, checked at test time.
//!
//! Production files under `src/` (everything except `*_test.rs`) are scanned
//! for patterns with a fixed budget. Budgets are zero and stay zero.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    path: PathBuf,
    content: String,
}

struct Budget {
    pattern: &'static str,
    max: usize,
    reason: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, reason: "propagate with ? or handle the None/Err" },
    Budget { pattern: ".expect(", max: 0, reason: "propagate with ? or handle the None/Err" },
    Budget { pattern: "panic!(", max: 0, reason: "graph edits report errors, they never abort" },
    Budget { pattern: "unreachable!(", max: 0, reason: "encode the case in the types instead" },
    Budget { pattern: "todo!(", max: 0, reason: "no stubs in shipped code" },
    Budget { pattern: "unimplemented!(", max: 0, reason: "no stubs in shipped code" },
    Budget { pattern: "let _ =", max: 0, reason: "inspect or log discarded results" },
    Budget { pattern: ".ok()", max: 0, reason: "inspect or log discarded errors" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, reason: "delete unused code" },
    Budget { pattern: "println!(", max: 0, reason: "the library logs through tracing" },
    Budget { pattern: "eprintln!(", max: 0, reason: "the library logs through tracing" },
    Budget { pattern: "dbg!(", max: 0, reason: "leftover debugging" },
];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_rs || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn source_tree_is_found() {
    assert!(source_files().len() >= 10, "expected to scan the crate's src/ directory");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let places = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!(
                "{} budget exceeded: found {count}, max {} ({})\n{places}",
                budget.pattern, budget.max, budget.reason
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn sibling_test_files_are_wired() {
    // A `foo_test.rs` next to `foo.rs` only runs if `foo.rs` declares it.
    for file in source_files() {
        let Some(stem) = file.path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        let test_name = format!("{stem}_test.rs");
        let sibling = file.path.with_file_name(&test_name);
        if sibling.exists() {
            assert!(
                file.content.contains(&format!("#[path = \"{test_name}\"]")),
                "{} has {test_name} but never includes it",
                file.path.display()
            );
        }
    }
}
