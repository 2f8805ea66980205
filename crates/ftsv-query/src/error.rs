//! Error types for query lexing and parsing.
//!
//! Every failure surfaces to callers as a [`SyntaxError`]; there is no partial recovery.

use std::{error, fmt};

use thiserror::Error;

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Error message.
    pub message: String,
    /// Byte position in input where error occurred.
    pub position: usize,
    /// The original input string.
    pub input: String,
}

impl LexError {
    /// Creates a new lexer error.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }

    /// Formats the error with a position indicator showing where the error occurred.
    pub fn format_with_context(&self) -> String {
        let mut result = String::new();
        result.push_str(&format!("query syntax error: {}\n", self.message));
        result.push_str(&format!("  {}\n", self.input));
        result.push_str(&format!(
            "  {}^",
            " ".repeat(caret_column(&self.input, self.position))
        ));
        result
    }
}

/// Returns the display column of byte offset `position` in `query`.
///
/// Offsets past the end clamp to the end; offsets inside a multi-byte character point at
/// that character.
fn caret_column(query: &str, position: usize) -> usize {
    let mut end = position.min(query.len());
    while !query.is_char_boundary(end) {
        end -= 1;
    }
    query[..end].chars().count()
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())
    }
}

impl error::Error for LexError {}

/// A binary or unary query operator, named in missing-operand errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// The AND keyword (or an implicit AND).
    And,
    /// The OR keyword.
    Or,
    /// The NOT keyword.
    Not,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        };
        f.write_str(name)
    }
}

/// What went wrong while parsing a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The query holds no operand at all (only whitespace or parentheses).
    #[error("empty query")]
    EmptyQuery,

    /// An operator is missing one of its operands.
    #[error("{0} is missing an operand")]
    MissingOperand(Operator),

    /// A `(` was never closed.
    #[error("expected closing parenthesis")]
    UnclosedParen,

    /// A `)` has no matching `(`.
    #[error("unexpected closing parenthesis")]
    UnexpectedCloseParen,

    /// The query ended in the middle of an expression.
    #[error("unexpected end of query")]
    UnexpectedEnd,

    /// A token appeared where it cannot be used.
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    /// Groups and negations nest, or operators chain, past the parser's limit.
    #[error("query nests more than {limit} levels deep")]
    TooDeep {
        /// The limit that was exceeded.
        limit: usize,
    },
}

/// Parse error with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of parse failure.
    pub kind: ParseErrorKind,
    /// Byte position in the input where the error occurred (if applicable).
    pub position: Option<usize>,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, position: Option<usize>) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.position {
            write!(f, "at byte {}: {}", pos, self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl error::Error for ParseError {}

/// A rejected query.
///
/// This type provides detailed error messages with context, including
/// the original query string and a position indicator where available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// The kind of error that occurred.
    pub kind: SyntaxErrorKind,
    /// The original query string (if available).
    pub query: Option<String>,
}

/// The specific kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Lexer error (tokenization failed).
    Lex {
        /// Error message.
        message: String,
        /// Byte position in input.
        position: usize,
    },
    /// Parser error (invalid structure).
    Parse {
        /// What went wrong.
        kind: ParseErrorKind,
        /// Byte position in input (if available).
        position: Option<usize>,
    },
}

impl SyntaxError {
    /// Creates a lex error.
    pub fn lex(message: impl Into<String>, position: usize, query: impl Into<String>) -> Self {
        Self {
            kind: SyntaxErrorKind::Lex {
                message: message.into(),
                position,
            },
            query: Some(query.into()),
        }
    }

    /// Creates a parse error.
    pub fn parse(kind: ParseErrorKind, position: Option<usize>, query: Option<String>) -> Self {
        Self {
            kind: SyntaxErrorKind::Parse { kind, position },
            query,
        }
    }

    /// Sets the query string for this error.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        match &self.kind {
            SyntaxErrorKind::Lex { message, .. } => message.clone(),
            SyntaxErrorKind::Parse { kind, .. } => kind.to_string(),
        }
    }

    /// Returns the byte position of the offending input, if known.
    pub fn position(&self) -> Option<usize> {
        match &self.kind {
            SyntaxErrorKind::Lex { position, .. } => Some(*position),
            SyntaxErrorKind::Parse { position, .. } => *position,
        }
    }

    /// Returns the parse error kind, or `None` for tokenization failures.
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match &self.kind {
            SyntaxErrorKind::Lex { .. } => None,
            SyntaxErrorKind::Parse { kind, .. } => Some(kind),
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            SyntaxErrorKind::Lex { message, .. } if message.contains("unclosed quote") => {
                Some("Add a closing quote (\") to complete the phrase")
            }
            SyntaxErrorKind::Lex { message, .. } if message.contains("wildcard") => {
                Some("Wildcards only work at the end of a word, e.g., 'help*'")
            }
            SyntaxErrorKind::Parse {
                kind: ParseErrorKind::UnclosedParen,
                ..
            } => Some("Add a closing parenthesis ) to match the opening one"),
            SyntaxErrorKind::Parse {
                kind: ParseErrorKind::MissingOperand(Operator::Not),
                ..
            } => Some("NOT needs something to negate, e.g., 'not deprecated'"),
            SyntaxErrorKind::Parse {
                kind: ParseErrorKind::MissingOperand(_),
                ..
            } => Some("AND and OR need expressions on both sides, e.g., 'cat or dog'"),
            SyntaxErrorKind::Parse {
                kind: ParseErrorKind::TooDeep { .. },
                ..
            } => Some("Remove redundant parentheses or repeated NOTs"),
            _ => None,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "query syntax error: {}", self.message())?;

        // If we have a query and position, show it with a pointer
        if let Some(query) = &self.query {
            writeln!(f, "  {}", query)?;
            if let Some(pos) = self.position() {
                writeln!(f, "  {}^", " ".repeat(caret_column(query, pos)))?;
            }
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {}", suggestion)?;
        }

        Ok(())
    }
}

impl error::Error for SyntaxError {}

impl From<LexError> for SyntaxError {
    fn from(err: LexError) -> Self {
        Self {
            kind: SyntaxErrorKind::Lex {
                message: err.message,
                position: err.position,
            },
            query: Some(err.input),
        }
    }
}

impl From<ParseError> for SyntaxError {
    fn from(err: ParseError) -> Self {
        Self {
            kind: SyntaxErrorKind::Parse {
                kind: err.kind,
                position: err.position,
            },
            query: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = SyntaxError::lex("unclosed quote", 0, "\"hello world");
        let display = err.to_string();
        assert!(display.contains("unclosed quote"));
        assert!(display.contains("\"hello world"));
        assert!(display.contains("^"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn parse_error_display_points_at_position() {
        let err = SyntaxError::parse(
            ParseErrorKind::UnclosedParen,
            Some(5),
            Some("(cat and".to_string()),
        );
        let display = err.to_string();
        assert!(display.contains("expected closing parenthesis"));
        assert!(display.contains("  (cat and\n       ^"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn position_is_clamped_to_query() {
        let err = SyntaxError::parse(ParseErrorKind::EmptyQuery, Some(99), Some("()".into()));
        assert!(err.to_string().contains("  ()\n    ^"));
    }

    #[test]
    fn caret_counts_characters_not_bytes() {
        let err = SyntaxError::parse(ParseErrorKind::UnclosedParen, Some(6), Some("été (".into()));
        assert!(err.to_string().contains("  été (\n      ^"), "{err}");

        let err = LexError::new("unclosed quote", 7, "naïve \"x");
        assert!(err.to_string().ends_with("  naïve \"x\n        ^"), "{err}");
    }

    #[test]
    fn caret_inside_multibyte_character_points_at_it() {
        assert_eq!(caret_column("é", 1), 0);
        assert_eq!(caret_column("aé", 2), 1);
        assert_eq!(caret_column("ab", 9), 2);
    }

    #[test]
    fn error_with_query() {
        let err = SyntaxError::parse(ParseErrorKind::EmptyQuery, None, None).with_query("  ");
        assert_eq!(err.query.as_deref(), Some("  "));
    }

    #[test]
    fn message_extraction() {
        let err = SyntaxError::lex("test message", 0, "query");
        assert_eq!(err.message(), "test message");

        let err = SyntaxError::parse(ParseErrorKind::MissingOperand(Operator::Or), None, None);
        assert_eq!(err.message(), "OR is missing an operand");
    }

    #[test]
    fn missing_operand_suggestions() {
        let not = SyntaxError::parse(ParseErrorKind::MissingOperand(Operator::Not), None, None);
        assert!(not.suggestion().unwrap().contains("negate"));

        let and = SyntaxError::parse(ParseErrorKind::MissingOperand(Operator::And), None, None);
        assert!(and.suggestion().unwrap().contains("both sides"));
    }

    #[test]
    fn lex_error_formats_caret() {
        let err = LexError::new("unclosed quote", 4, "cat \"dog");
        assert_eq!(
            err.to_string(),
            "query syntax error: unclosed quote\n  cat \"dog\n      ^"
        );
    }

    #[test]
    fn parse_error_converts_with_kind() {
        let err: SyntaxError = ParseError::new(ParseErrorKind::UnexpectedCloseParen, Some(3)).into();
        assert_eq!(err.parse_kind(), Some(&ParseErrorKind::UnexpectedCloseParen));
        assert_eq!(err.position(), Some(3));
    }
}
