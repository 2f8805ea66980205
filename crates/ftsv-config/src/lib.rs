//! Configuration for the ftsv query validator.
//!
//! ftsv reads TOML configuration files named `.ftsv.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory and merging every file found, the
//! closest file taking precedence. A file with `root = true` stops the walk.
//!
//! ```toml
//! [query]
//! max_length = 1024              # bytes; 0 disables the limit
//! max_wildcard_expansion = 10000 # index keys per wildcard; 0 disables the limit
//!
//! [phrase]
//! match = "words"                # or "substring"
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawPhraseSettings, RawQuerySettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for ftsv.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Limits applied to queries before they are evaluated.
    pub query: QuerySettings,
    /// Phrase matching settings.
    pub phrase: PhraseSettings,
    /// Directory containing the most specific config file, if any was loaded.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.ftsv.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Builds configuration from a single TOML document.
    ///
    /// The `path` parameter is used for error reporting and as the config root.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config = parse_config_str(contents, path)?;
        Ok(merge_configs(&[ParsedConfig {
            path: path.to_path_buf(),
            config,
        }]))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.ftsv.toml` file.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let serializable = SerializableSettings {
            query: self.query.clone(),
            phrase: self.phrase.clone(),
        };
        toml::to_string_pretty(&serializable)
    }
}

/// Limits the validator applies before handing a query to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Maximum query length in bytes (0 = unlimited).
    pub max_length: usize,
    /// Maximum index keys a single wildcard may expand to (0 = unlimited).
    pub max_wildcard_expansion: usize,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            max_length: 1024,
            max_wildcard_expansion: 10_000,
        }
    }
}

/// Phrase matching settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhraseSettings {
    /// How phrase candidates are confirmed against document text.
    #[serde(rename = "match")]
    pub mode: PhraseMatch,
}

/// How a phrase is confirmed against a candidate document's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseMatch {
    /// The phrase words appear as a contiguous run of whole words.
    #[default]
    Words,
    /// The phrase words joined by single spaces appear as a substring of the text.
    Substring,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Query limits.
    query: QuerySettings,
    /// Phrase matching.
    phrase: PhraseSettings,
}
