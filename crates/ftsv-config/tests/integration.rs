//! Integration tests for ftsv-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use ftsv_config::{Config, ConfigError, ConfigWarning, PhraseMatch};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_root_config_only() {
    let env = TestEnv::new();
    env.create_file(
        ".ftsv.toml",
        r#"
root = true

[query]
max_length = 64
"#,
    );

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.query.max_length, 64);
    assert_eq!(config.query.max_wildcard_expansion, 10_000);
    assert_eq!(config.phrase.mode, PhraseMatch::Words);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn test_load_nested_configs_merging() {
    let env = TestEnv::new();
    let subdir = env.create_dir("project/subdir");

    env.create_file(
        ".ftsv.toml",
        r#"
root = true

[query]
max_length = 500
max_wildcard_expansion = 20

[phrase]
match = "substring"
"#,
    );

    env.create_file(
        "project/.ftsv.toml",
        r#"
[query]
max_wildcard_expansion = 5
"#,
    );

    let config = Config::load(&subdir).unwrap();

    // Closest file wins per field, the rest falls through to the root file
    assert_eq!(config.query.max_wildcard_expansion, 5);
    assert_eq!(config.query.max_length, 500);
    assert_eq!(config.phrase.mode, PhraseMatch::Substring);
    assert_eq!(config.config_root, Some(env.path().join("project")));
}

#[test]
fn test_load_invalid_toml_reports_path() {
    let env = TestEnv::new();
    let path = env.create_file(".ftsv.toml", "root = true\n[query\n");

    let err = Config::load(env.path()).unwrap_err();

    assert!(matches!(err, ConfigError::ParseToml { .. }), "{err:?}");
    assert_eq!(err.path(), path);
    assert!(err.to_string().starts_with("invalid settings in "));
}

#[test]
fn test_load_from_missing_file() {
    let env = TestEnv::new();
    let missing = env.path().join("nope.toml");

    let err = Config::load_from_files(&[missing]).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_load_and_validate_unlimited() {
    let env = TestEnv::new();
    env.create_file(
        ".ftsv.toml",
        r#"
root = true

[query]
max_length = 0
"#,
    );

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.validate(), vec![ConfigWarning::QueryLengthUnlimited]);
}

#[test]
fn test_to_toml_round_trips_through_disk() {
    let env = TestEnv::new();
    let mut config = Config::default();
    config.query.max_wildcard_expansion = 3;
    config.phrase.mode = PhraseMatch::Substring;

    let toml = config.to_toml().unwrap();
    let path = env.create_file(".ftsv.toml", &format!("root = true\n{toml}"));

    let loaded = Config::load_from_files(&[path]).unwrap();
    assert_eq!(loaded.query, config.query);
    assert_eq!(loaded.phrase, config.phrase);
}
