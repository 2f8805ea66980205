//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules on top of the defaults.

use std::path::PathBuf;

use crate::{
    Config, PhraseSettings, QuerySettings,
    parse::{RawConfig, RawPhraseSettings, RawQuerySettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD).
/// For every field the first defined value wins; undefined fields keep their defaults.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref query) = parsed.config.query {
            apply_query_settings(&mut config.query, query);
        }
        if let Some(ref phrase) = parsed.config.phrase {
            apply_phrase_settings(&mut config.phrase, phrase);
        }
    }

    config.config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|p| p.to_path_buf());

    config
}

/// Applies raw query settings to result, overwriting any present values.
fn apply_query_settings(result: &mut QuerySettings, raw: &RawQuerySettings) {
    if let Some(v) = raw.max_length {
        result.max_length = v;
    }
    if let Some(v) = raw.max_wildcard_expansion {
        result.max_wildcard_expansion = v;
    }
}

/// Applies raw phrase settings to result, overwriting any present values.
fn apply_phrase_settings(result: &mut PhraseSettings, raw: &RawPhraseSettings) {
    if let Some(v) = raw.mode {
        result.mode = v;
    }
}
