//! Config loading errors.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use toml::de;

/// A `.ftsv.toml` file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists in the discovery chain but could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// The unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not valid TOML, or a setting has the wrong type or value.
    #[error("invalid settings in {path}: {source}")]
    ParseToml {
        /// The offending file.
        path: PathBuf,
        /// Underlying TOML error, with line and column.
        source: de::Error,
    },
}

impl ConfigError {
    /// Returns the config file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadFile { path, .. } | Self::ParseToml { path, .. } => path,
        }
    }
}
