//! A scratch directory tree for exercising config discovery in unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory that `.ftsv.toml` files can be dropped into.
pub struct ConfigTree {
    /// Removed on drop.
    root: TempDir,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Returns the tree's root directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Ensures `rel` exists as a directory, returning its absolute path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.ftsv.toml` into `rel` with the given body.
    pub fn write(&self, rel: &str, body: &str) -> PathBuf {
        let config = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&config, body).unwrap();
        config
    }

    /// Writes a config that sets a query limit but does not stop discovery.
    pub fn limits(&self, rel: &str) -> PathBuf {
        self.write(rel, "[query]\nmax_length = 128\n")
    }

    /// Writes a config with `root = true`.
    pub fn root(&self, rel: &str) -> PathBuf {
        self.write(rel, "root = true\n")
    }
}
