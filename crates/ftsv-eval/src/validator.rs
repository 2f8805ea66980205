//! The validation harness surface.
//!
//! A [`Validator`] bundles an index, its documents and a [`Config`], and answers the question a
//! test asks: does query Q select exactly documents {D1, D3}?
//!
//! ```
//! use ftsv_eval::{MemoryDocuments, MemoryIndex, Validator};
//!
//! let docs: MemoryDocuments<u32> = [(1, "a cat"), (2, "a cat and a dog"), (3, "a dog")]
//!     .into_iter()
//!     .collect();
//! let index = MemoryIndex::from_documents(&docs);
//!
//! let verdict = Validator::new(&index, &docs).check("cat dog", [2]).unwrap();
//! assert!(verdict.passed());
//! ```

use std::{collections::BTreeSet, fmt};

use ftsv_config::Config;
use ftsv_query::{QueryExpr, parse};
use log::debug;

use crate::{
    error::ValidateError,
    evaluate::Evaluator,
    source::{DocumentCollection, Index},
};

/// Parses and evaluates queries against one index and document collection.
pub struct Validator<'a, I, D> {
    /// Term → document ids.
    index: &'a I,
    /// The documents the index was built from.
    documents: &'a D,
    /// Limits and phrase mode.
    config: Config,
}

impl<'a, I, D> Validator<'a, I, D>
where
    I: Index,
    D: DocumentCollection<Id = I::Id>,
{
    /// Creates a validator with default configuration.
    pub fn new(index: &'a I, documents: &'a D) -> Self {
        Self {
            index,
            documents,
            config: Config::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parses a query, enforcing the configured length and wildcard limits.
    pub fn parse(&self, query: &str) -> Result<QueryExpr, ValidateError> {
        let max_length = self.config.query.max_length;
        if max_length > 0 && query.len() > max_length {
            return Err(ValidateError::QueryTooLong {
                length: query.len(),
                max: max_length,
            });
        }

        let expr = parse(query)?;
        self.check_wildcard_fan_out(&expr)?;
        Ok(expr)
    }

    /// Returns the documents matching `query`.
    pub fn matches(&self, query: &str) -> Result<BTreeSet<I::Id>, ValidateError> {
        let expr = self.parse(query)?;
        Ok(Evaluator::new(self.index, self.documents)
            .with_phrase_match(self.config.phrase.mode)
            .evaluate(&expr))
    }

    /// Compares the documents matching `query` with the `expected` ids.
    pub fn check(
        &self,
        query: &str,
        expected: impl IntoIterator<Item = I::Id>,
    ) -> Result<Verdict<I::Id>, ValidateError> {
        let actual = self.matches(query)?;
        let verdict = Verdict::new(query, expected.into_iter().collect(), actual);
        debug!(
            "query {query:?}: {} (missing {}, unexpected {})",
            if verdict.passed() { "pass" } else { "fail" },
            verdict.missing.len(),
            verdict.unexpected.len()
        );
        Ok(verdict)
    }

    /// Rejects the query if any wildcard expands to more keys than allowed.
    fn check_wildcard_fan_out(&self, expr: &QueryExpr) -> Result<(), ValidateError> {
        let max = self.config.query.max_wildcard_expansion;
        if max == 0 {
            return Ok(());
        }

        for prefix in expr.wildcard_prefixes() {
            let count = self.index.keys_with_prefix(prefix).len();
            if count > max {
                return Err(ValidateError::WildcardFanOut {
                    prefix: prefix.to_string(),
                    count,
                    max,
                });
            }
        }

        Ok(())
    }
}

/// The outcome of comparing a query's matches with the expected documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict<Id: Ord> {
    /// The query that was evaluated.
    pub query: String,
    /// Documents the caller expected.
    pub expected: BTreeSet<Id>,
    /// Documents the query matched.
    pub actual: BTreeSet<Id>,
    /// Expected but not matched.
    pub missing: BTreeSet<Id>,
    /// Matched but not expected.
    pub unexpected: BTreeSet<Id>,
}

impl<Id: Ord + Clone> Verdict<Id> {
    /// Builds a verdict from the expected and actual sets.
    pub fn new(query: impl Into<String>, expected: BTreeSet<Id>, actual: BTreeSet<Id>) -> Self {
        let missing = expected.difference(&actual).cloned().collect();
        let unexpected = actual.difference(&expected).cloned().collect();
        Self {
            query: query.into(),
            expected,
            actual,
            missing,
            unexpected,
        }
    }

    /// Returns true if the query matched exactly the expected documents.
    pub fn passed(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl<Id: Ord + fmt::Debug> fmt::Display for Verdict<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.missing.is_empty() && self.unexpected.is_empty() {
            return write!(f, "PASS {:?} -> {:?}", self.query, self.actual);
        }

        write!(f, "FAIL {:?} -> {:?}", self.query, self.actual)?;
        if !self.missing.is_empty() {
            write!(f, "; missing {:?}", self.missing)?;
        }
        if !self.unexpected.is_empty() {
            write!(f, "; unexpected {:?}", self.unexpected)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ftsv_config::PhraseMatch;
    use ftsv_query::{MAX_NESTING, ParseErrorKind};

    use super::*;
    use crate::memory::{MemoryDocuments, MemoryIndex};

    fn fixture() -> (MemoryIndex<u32>, MemoryDocuments<u32>) {
        let docs: MemoryDocuments<u32> = [
            (1, "help wanted"),
            (2, "a helper arrives"),
            (3, "helping hands"),
            (4, "held up"),
        ]
        .into_iter()
        .collect();
        let index = MemoryIndex::from_documents(&docs);
        (index, docs)
    }

    #[test]
    fn check_reports_missing_and_unexpected() {
        let (index, docs) = fixture();
        let verdict = Validator::new(&index, &docs)
            .check("help*", [1, 4])
            .unwrap();

        assert!(!verdict.passed());
        assert_eq!(verdict.actual, BTreeSet::from([1, 2, 3]));
        assert_eq!(verdict.missing, BTreeSet::from([4]));
        assert_eq!(verdict.unexpected, BTreeSet::from([2, 3]));
        assert_eq!(
            verdict.to_string(),
            "FAIL \"help*\" -> {1, 2, 3}; missing {4}; unexpected {2, 3}"
        );
    }

    #[test]
    fn check_passes_on_exact_match() {
        let (index, docs) = fixture();
        let verdict = Validator::new(&index, &docs)
            .check("held or hands", [3, 4])
            .unwrap();
        assert!(verdict.passed());
        assert_eq!(verdict.to_string(), "PASS \"held or hands\" -> {3, 4}");
    }

    #[test]
    fn rejected_query_differs_from_empty_match() {
        let (index, docs) = fixture();
        let validator = Validator::new(&index, &docs);

        assert_eq!(validator.matches("nothing").unwrap(), BTreeSet::new());
        assert!(matches!(
            validator.matches("(nothing"),
            Err(ValidateError::Syntax(_))
        ));
    }

    #[test]
    fn query_length_limit() {
        let (index, docs) = fixture();
        let mut config = Config::default();
        config.query.max_length = 8;
        let validator = Validator::new(&index, &docs).with_config(config);

        assert!(validator.matches("help").is_ok());
        assert_eq!(
            validator.matches("help or held"),
            Err(ValidateError::QueryTooLong {
                length: 12,
                max: 8
            })
        );
    }

    #[test]
    fn wildcard_fan_out_limit() {
        let (index, docs) = fixture();
        let mut config = Config::default();
        config.query.max_wildcard_expansion = 2;
        let validator = Validator::new(&index, &docs).with_config(config);

        assert!(validator.matches("helper*").is_ok());
        assert_eq!(
            validator.matches("up or help*"),
            Err(ValidateError::WildcardFanOut {
                prefix: "help".into(),
                count: 3,
                max: 2
            })
        );
    }

    #[test]
    fn zero_limits_disable_checks() {
        let (index, docs) = fixture();
        let mut config = Config::default();
        config.query.max_length = 0;
        config.query.max_wildcard_expansion = 0;
        let validator = Validator::new(&index, &docs).with_config(config);

        let long = vec!["help*"; 500].join(" or ");
        assert_eq!(
            validator.matches(&long).unwrap(),
            BTreeSet::from([1, 2, 3])
        );
    }

    #[test]
    fn deep_query_is_a_syntax_error_without_length_limit() {
        let (index, docs) = fixture();
        let mut config = Config::default();
        config.query.max_length = 0;
        let validator = Validator::new(&index, &docs).with_config(config);

        let query = format!("{}help{}", "(".repeat(10_000), ")".repeat(10_000));
        let Err(ValidateError::Syntax(err)) = validator.matches(&query) else {
            panic!("expected a syntax error");
        };
        assert_eq!(
            err.parse_kind(),
            Some(&ParseErrorKind::TooDeep { limit: MAX_NESTING })
        );

        let chain = vec!["help"; 5_000].join(" or ");
        assert!(matches!(
            validator.matches(&chain),
            Err(ValidateError::Syntax(_))
        ));
    }

    #[test]
    fn phrase_mode_comes_from_config() {
        let docs: MemoryDocuments<u32> = [(1, "helpers help")].into_iter().collect();
        let index: MemoryIndex<u32> = [("help", 1)].into_iter().collect();
        let expr = "\"help\"";

        let words = Validator::new(&index, &docs);
        assert_eq!(words.matches(expr).unwrap(), BTreeSet::from([1]));

        let docs: MemoryDocuments<u32> = [(1, "helpers")].into_iter().collect();
        let words = Validator::new(&index, &docs);
        assert!(words.matches(expr).unwrap().is_empty());

        let mut config = Config::default();
        config.phrase.mode = PhraseMatch::Substring;
        let substring = Validator::new(&index, &docs).with_config(config);
        assert_eq!(substring.matches(expr).unwrap(), BTreeSet::from([1]));
    }
}
