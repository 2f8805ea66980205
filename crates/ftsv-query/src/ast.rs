//! Query abstract syntax tree.
//!
//! Represents parsed boolean query expressions before evaluation against an index.

use std::fmt;

/// A parsed query expression.
///
/// Leaves always hold case-folded, non-empty words. Combinators own their children, so a tree
/// has no sharing and no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryExpr {
    /// A single search term.
    Term(String),

    /// An exact phrase: words that must appear contiguously and in order.
    Phrase(Vec<String>),

    /// A prefix wildcard (`help*` holds the prefix `help`).
    Wildcard(String),

    /// Negation: documents that do NOT match the inner expression.
    Not(Box<Self>),

    /// Conjunction: both sides must match.
    And(Box<Self>, Box<Self>),

    /// Disjunction: at least one side must match.
    Or(Box<Self>, Box<Self>),
}

impl QueryExpr {
    /// Creates a term leaf.
    pub fn term(word: impl Into<String>) -> Self {
        Self::Term(word.into())
    }

    /// Creates a wildcard leaf from its prefix.
    pub fn wildcard(prefix: impl Into<String>) -> Self {
        Self::Wildcard(prefix.into())
    }

    /// Creates a phrase leaf from a sequence of words.
    pub fn phrase<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Phrase(words.into_iter().map(Into::into).collect())
    }

    /// Creates a conjunction of two expressions.
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Creates a disjunction of two expressions.
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Creates a negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Returns true if the tree contains a negation anywhere.
    ///
    /// Evaluation only needs the full document universe when this holds.
    pub fn contains_not(&self) -> bool {
        match self {
            Self::Term(_) | Self::Phrase(_) | Self::Wildcard(_) => false,
            Self::Not(_) => true,
            Self::And(left, right) | Self::Or(left, right) => {
                left.contains_not() || right.contains_not()
            }
        }
    }

    /// Returns the prefixes of every wildcard leaf, left to right.
    pub fn wildcard_prefixes(&self) -> Vec<&str> {
        let mut prefixes = Vec::new();
        self.collect_wildcards(&mut prefixes);
        prefixes
    }

    /// Pushes wildcard prefixes into `out` in left-to-right order.
    fn collect_wildcards<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Wildcard(prefix) => out.push(prefix),
            Self::Term(_) | Self::Phrase(_) => {}
            Self::Not(inner) => inner.collect_wildcards(out),
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_wildcards(out);
                right.collect_wildcards(out);
            }
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term(s) => writeln!(f, "{prefix}Term({s:?})"),
            Self::Phrase(words) => writeln!(f, "{prefix}Phrase({words:?})"),
            Self::Wildcard(p) => writeln!(f, "{prefix}Wildcard({p:?})"),
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::And(left, right) => {
                writeln!(f, "{prefix}And")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::Or(left, right) => {
                writeln!(f, "{prefix}Or")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
        }
    }

    /// Formats the expression as a query string.
    ///
    /// Every binary node is parenthesized, so the output parses back to an identical tree:
    /// `(cat and (dog or "hot dog"))`.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Term(s) => s.clone(),
            Self::Phrase(words) => format!("\"{}\"", words.join(" ")),
            Self::Wildcard(p) => format!("{p}*"),
            Self::Not(inner) => format!("not {}", inner.to_query_string()),
            Self::And(left, right) => {
                format!("({} and {})", left.to_query_string(), right.to_query_string())
            }
            Self::Or(left, right) => {
                format!("({} or {})", left.to_query_string(), right.to_query_string())
            }
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
