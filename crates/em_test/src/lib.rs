//! Fixture discovery for the esmify golden-file tests.
//!
//! Each case is a directory under `tests/fixtures/` holding one input file,
//! whose name selects the rewrite rule, and an `expected.js` with the
//! rewritten output.

use std::path::{Path, PathBuf};

/// File name of the expected output inside a case directory.
pub const EXPECTED_FILE: &str = "expected.js";

/// One golden-file case.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Case name relative to the fixtures root, e.g. `sapl/basic`.
    pub name: String,
    pub input: PathBuf,
    pub expected: PathBuf,
}

pub fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR is crates/em_test/, so go up two levels to workspace root.
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("fixtures")
}

/// All cases below `root`, sorted by name.
pub fn collect_fixtures(root: &Path) -> Vec<Fixture> {
    let mut fixtures: Vec<Fixture> = walkdir(root)
        .into_iter()
        .filter(|path| {
            path.extension().is_some_and(|e| e == "js")
                && path.file_name().is_some_and(|n| n != EXPECTED_FILE)
        })
        .map(|input| {
            let dir = input.parent().unwrap_or(root);
            let name = dir
                .strip_prefix(root)
                .unwrap_or(dir)
                .display()
                .to_string();
            Fixture {
                name,
                expected: dir.join(EXPECTED_FILE),
                input,
            }
        })
        .collect();
    fixtures.sort_by(|a, b| a.name.cmp(&b.name));
    fixtures
}

fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut result = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                result.extend(walkdir(&path));
            } else {
                result.push(path);
            }
        }
    }
    result
}

/// Trim trailing whitespace on every line and around the whole text.
pub fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
