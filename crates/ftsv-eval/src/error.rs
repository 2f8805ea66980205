//! Error types for query validation.

use ftsv_query::SyntaxError;
use thiserror::Error;

/// Why the validator rejected a query.
///
/// Evaluation itself cannot fail; every variant here is raised before the evaluator runs, so a
/// rejected query is never confused with one that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// The query does not parse.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The query is longer than `query.max_length`.
    #[error("query is {length} bytes, over the limit of {max}")]
    QueryTooLong {
        /// Query length in bytes.
        length: usize,
        /// Configured limit.
        max: usize,
    },

    /// A wildcard matches more index keys than `query.max_wildcard_expansion`.
    #[error("wildcard '{prefix}*' expands to {count} index keys, over the limit of {max}")]
    WildcardFanOut {
        /// The wildcard prefix.
        prefix: String,
        /// Number of index keys it matches.
        count: usize,
        /// Configured limit.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use ftsv_query::parse;

    use super::*;

    #[test]
    fn syntax_error_display_is_transparent() {
        let syntax = parse("(cat").unwrap_err();
        let err = ValidateError::from(syntax.clone());
        assert_eq!(err.to_string(), syntax.to_string());
    }

    #[test]
    fn limit_errors_name_the_limit() {
        let err = ValidateError::WildcardFanOut {
            prefix: "a".into(),
            count: 12,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "wildcard 'a*' expands to 12 index keys, over the limit of 10"
        );
    }
}
