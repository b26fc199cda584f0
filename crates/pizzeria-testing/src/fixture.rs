//! JSON fixture loader.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Loads JSON fixtures relative to the workspace root.
///
/// ```no_run
/// use pizzeria_testing::fixture::Fixture;
/// let val = Fixture::load("services/shop/tests/fixtures/register_invalid.json");
/// ```
pub struct Fixture;

impl Fixture {
    /// Load and parse `workspace_root/relative_path`.
    ///
    /// Panics if the file is missing or not valid JSON.
    pub fn load(relative_path: &str) -> Value {
        let full_path = workspace_root().join(relative_path);
        let contents = std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid JSON in fixture {}: {}", relative_path, e))
    }
}

fn workspace_root() -> PathBuf {
    let start = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap());
    start
        .ancestors()
        .find(|dir| is_workspace_root(dir))
        .unwrap_or(start.as_path())
        .to_path_buf()
}

fn is_workspace_root(dir: &Path) -> bool {
    std::fs::read_to_string(dir.join("Cargo.toml"))
        .map(|manifest| manifest.contains("[workspace]"))
        .unwrap_or(false)
}
