//! Configuration validation.
//!
//! Reports non-fatal warnings for settings that disable the validator's safety limits.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `query.max_length = 0`: queries of any length are accepted.
    QueryLengthUnlimited,
    /// `query.max_wildcard_expansion = 0`: wildcards may expand to every index key.
    WildcardExpansionUnlimited,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryLengthUnlimited => {
                write!(f, "query.max_length is 0; query length is unlimited")
            }
            Self::WildcardExpansionUnlimited => {
                write!(
                    f,
                    "query.max_wildcard_expansion is 0; wildcard fan-out is unlimited"
                )
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.query.max_length == 0 {
        warnings.push(ConfigWarning::QueryLengthUnlimited);
    }
    if config.query.max_wildcard_expansion == 0 {
        warnings.push(ConfigWarning::WildcardExpansionUnlimited);
    }

    warnings
}
