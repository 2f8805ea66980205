//! Query lexer (tokenizer).
//!
//! Converts a query string into a stream of tokens for the parser. Words are case-folded here,
//! so every later stage sees normalized text.

use std::{fmt, iter::Peekable, str::Chars};

use crate::error::LexError;

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word (search term), case-folded.
    Word(String),

    /// A quoted phrase, split on whitespace and case-folded.
    Phrase(Vec<String>),

    /// A bare word that ended in `*`; holds the prefix with the star stripped.
    Wildcard(String),

    /// The AND keyword.
    And,

    /// The OR keyword.
    Or,

    /// The NOT keyword.
    Not,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,
}

impl Token {
    /// Returns true if this token can begin an operand.
    pub(crate) fn starts_operand(&self) -> bool {
        matches!(
            self,
            Self::Word(_) | Self::Phrase(_) | Self::Wildcard(_) | Self::Not | Self::LParen
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => write!(f, "{w}"),
            Self::Phrase(words) => write!(f, "\"{}\"", words.join(" ")),
            Self::Wildcard(p) => write!(f, "{p}*"),
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
            Self::Not => f.write_str("NOT"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// A token together with the byte offset where it starts in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
    /// The token itself.
    pub token: Token,
    /// Byte offset of the token's first character.
    pub position: usize,
}

/// The wildcard marker recognized at the end of a bare word.
const WILDCARD: char = '*';

/// Case-folds a query word.
///
/// Index keys and document text must be folded with the same rule.
pub fn fold_case(word: &str) -> String {
    word.to_lowercase()
}

/// Query tokenizer state.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> LexError {
        LexError::new(message, position, self.input)
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Spanned>, LexError> {
        self.skip_whitespace();

        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };

        let position = self.position;
        let token = match ch {
            '"' => self.read_phrase()?,
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            _ => self.read_word_or_keyword()?,
        };

        Ok(Some(Spanned { token, position }))
    }

    /// Reads a quoted phrase.
    fn read_phrase(&mut self) -> Result<Token, LexError> {
        let start_pos = self.position;
        self.advance(); // consume opening quote

        let mut content = String::new();

        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.advance(); // consume closing quote
                    break;
                }
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
                None => return Err(self.error_at("unclosed quote", start_pos)),
            }
        }

        let words: Vec<String> = content.split_whitespace().map(fold_case).collect();
        if words.is_empty() {
            return Err(self.error_at("empty phrase", start_pos));
        }

        Ok(Token::Phrase(words))
    }

    /// Reads a bare word and classifies it as a keyword, wildcard, or plain word.
    fn read_word_or_keyword(&mut self) -> Result<Token, LexError> {
        let start_pos = self.position;
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            word.push(ch);
            self.advance();
        }

        if word.eq_ignore_ascii_case("and") {
            return Ok(Token::And);
        }
        if word.eq_ignore_ascii_case("or") {
            return Ok(Token::Or);
        }
        if word.eq_ignore_ascii_case("not") {
            return Ok(Token::Not);
        }

        // Only the final star is a wildcard; any other star is a literal character.
        if let Some(prefix) = word.strip_suffix(WILDCARD) {
            if prefix.is_empty() {
                return Err(self.error_at("wildcard needs a prefix", start_pos));
            }
            return Ok(Token::Wildcard(fold_case(prefix)));
        }

        Ok(Token::Word(fold_case(&word)))
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Tokenizes a query string, keeping the byte offset of each token.
pub(crate) fn tokenize_spanned(input: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(input).tokenize()
}

/// Convenience function to tokenize a query string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_spanned(input)?
        .into_iter()
        .map(|spanned| spanned.token)
        .collect())
}
