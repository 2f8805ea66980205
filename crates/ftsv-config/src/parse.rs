//! Configuration file parsing.
//!
//! Parses individual `.ftsv.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{ConfigError, PhraseMatch};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore configs in parent directories.
    pub root: Option<bool>,
    /// Query limit settings section.
    pub query: Option<RawQuerySettings>,
    /// Phrase matching settings section.
    pub phrase: Option<RawPhraseSettings>,
}

/// Raw query limit settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawQuerySettings {
    /// Maximum query length in bytes (0 = unlimited).
    pub max_length: Option<usize>,
    /// Maximum index keys a single wildcard may expand to (0 = unlimited).
    pub max_wildcard_expansion: Option<usize>,
}

/// Raw phrase matching settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPhraseSettings {
    /// How phrases are confirmed against document text.
    #[serde(rename = "match")]
    pub mode: Option<PhraseMatch>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
