//! Query parser.
//!
//! Parses a token stream into a query AST using recursive descent, one function per
//! precedence level.
//!
//! # Grammar
//!
//! ```text
//! query    → or_expr EOF
//! or_expr  → and_expr ("OR" and_expr)*
//! and_expr → not_expr ("AND"? not_expr)*
//! not_expr → "NOT" not_expr | atom
//! atom     → WORD | PHRASE | WILDCARD | "(" or_expr ")"
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. Negation: `NOT`
//! 3. AND (explicit keyword, or implicit between adjacent operands)
//! 4. OR (explicit keyword)
//!
//! Binary chains associate to the left: `a b c` is `(a AND b) AND c`.

use std::mem;

use crate::{
    ast::QueryExpr,
    error::{Operator, ParseError, ParseErrorKind, SyntaxError},
    lexer::{Spanned, Token, tokenize_spanned},
};

/// Deepest nesting of groups and negations the parser accepts.
pub const MAX_NESTING: usize = 256;

/// Tallest expression tree the parser builds; bounds operator chains such as `a b c ...`.
pub const MAX_HEIGHT: usize = 1024;

/// A parsed subtree.
struct Parsed {
    /// The expression.
    expr: QueryExpr,
    /// Nodes on the longest root-to-leaf path.
    height: usize,
}

/// Recursive descent parser for query expressions.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Spanned>,
    /// Current position in token stream.
    position: usize,
    /// Byte length of the input, reported for errors at end of input.
    input_len: usize,
    /// Groups and negations currently open.
    nesting: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Spanned>, input_len: usize) -> Self {
        Self {
            tokens,
            position: 0,
            input_len,
            nesting: 0,
        }
    }

    /// Parses the token stream into a query expression.
    fn parse(mut self) -> Result<QueryExpr, ParseError> {
        let has_operand = self
            .tokens
            .iter()
            .any(|t| !matches!(t.token, Token::LParen | Token::RParen));
        if !has_operand {
            return Err(ParseError::new(ParseErrorKind::EmptyQuery, Some(0)));
        }

        let parsed = self.parse_or_expr()?;

        if let Some(spanned) = self.tokens.get(self.position) {
            let kind = match &spanned.token {
                Token::RParen => ParseErrorKind::UnexpectedCloseParen,
                other => ParseErrorKind::UnexpectedToken(other.to_string()),
            };
            return Err(ParseError::new(kind, Some(spanned.position)));
        }

        Ok(parsed.expr)
    }

    /// Parses: or_expr → and_expr ("OR" and_expr)*
    fn parse_or_expr(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.parse_and_expr()?;

        while self.check(&Token::Or) {
            let op_pos = self.byte_position();
            self.advance(); // consume OR
            self.expect_operand(Operator::Or, op_pos)?;
            let right = self.parse_and_expr()?;
            left = join(QueryExpr::or, left, right, op_pos)?;
        }

        Ok(left)
    }

    /// Parses: and_expr → not_expr ("AND"? not_expr)*
    fn parse_and_expr(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.parse_not_expr()?;

        loop {
            let op_pos = self.byte_position();
            if self.check(&Token::And) {
                self.advance(); // consume AND
                self.expect_operand(Operator::And, op_pos)?;
            } else if !self.can_start_operand() {
                break;
            }

            let right = self.parse_not_expr()?;
            left = join(QueryExpr::and, left, right, op_pos)?;
        }

        Ok(left)
    }

    /// Parses: not_expr → "NOT" not_expr | atom
    fn parse_not_expr(&mut self) -> Result<Parsed, ParseError> {
        if self.check(&Token::Not) {
            let op_pos = self.byte_position();
            self.advance(); // consume NOT
            self.expect_operand(Operator::Not, op_pos)?;
            self.enter(op_pos)?;
            let inner = self.parse_not_expr()?;
            self.nesting -= 1;
            return Ok(Parsed {
                height: checked_height(inner.height + 1, op_pos)?,
                expr: QueryExpr::not(inner.expr),
            });
        }

        self.parse_atom()
    }

    /// Parses: atom → WORD | PHRASE | WILDCARD | "(" or_expr ")"
    fn parse_atom(&mut self) -> Result<Parsed, ParseError> {
        let position = self.byte_position();
        let expr = match self.peek().cloned() {
            Some(Token::Word(word)) => QueryExpr::Term(word),
            Some(Token::Phrase(words)) => QueryExpr::Phrase(words),
            Some(Token::Wildcard(prefix)) => QueryExpr::Wildcard(prefix),
            Some(Token::LParen) => return self.parse_group(),

            Some(Token::RParen) => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCloseParen,
                    Some(position),
                ));
            }

            // An operator where an operand should start: nothing precedes it.
            Some(Token::And) => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingOperand(Operator::And),
                    Some(position),
                ));
            }
            Some(Token::Or) => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingOperand(Operator::Or),
                    Some(position),
                ));
            }

            Some(Token::Not) => {
                // parse_not_expr consumes every NOT before reaching an atom
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken(Token::Not.to_string()),
                    Some(position),
                ));
            }

            None => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedEnd,
                    Some(position),
                ));
            }
        };

        self.advance();
        Ok(Parsed { expr, height: 1 })
    }

    /// Parses a parenthesized group, consuming the surrounding parentheses.
    fn parse_group(&mut self) -> Result<Parsed, ParseError> {
        let open_pos = self.byte_position();
        self.advance(); // consume (

        if self.peek().is_none() {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedParen,
                Some(open_pos),
            ));
        }

        self.enter(open_pos)?;
        let inner = self.parse_or_expr()?;
        self.nesting -= 1;

        if !self.check(&Token::RParen) {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedParen,
                Some(open_pos),
            ));
        }
        self.advance(); // consume )

        Ok(inner)
    }

    /// Opens a group or negation at byte `position`, failing past [`MAX_NESTING`].
    fn enter(&mut self, position: usize) -> Result<(), ParseError> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(ParseError::new(
                ParseErrorKind::TooDeep { limit: MAX_NESTING },
                Some(position),
            ));
        }
        Ok(())
    }

    /// Fails with a missing-operand error unless the next token can begin an operand.
    fn expect_operand(&self, operator: Operator, op_pos: usize) -> Result<(), ParseError> {
        if self.can_start_operand() {
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorKind::MissingOperand(operator),
                Some(op_pos),
            ))
        }
    }

    /// Checks if the current token can start an operand.
    fn can_start_operand(&self) -> bool {
        self.peek().is_some_and(Token::starts_operand)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|s| &s.token)
    }

    /// Byte offset of the current token, or the input length at end of input.
    fn byte_position(&self) -> usize {
        self.tokens
            .get(self.position)
            .map_or(self.input_len, |s| s.position)
    }

    /// Checks if the current token matches the given token.
    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| mem::discriminant(t) == mem::discriminant(token))
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Combines two subtrees under a binary operator found at byte `op_pos`.
fn join(
    op: fn(QueryExpr, QueryExpr) -> QueryExpr,
    left: Parsed,
    right: Parsed,
    op_pos: usize,
) -> Result<Parsed, ParseError> {
    Ok(Parsed {
        height: checked_height(left.height.max(right.height) + 1, op_pos)?,
        expr: op(left.expr, right.expr),
    })
}

/// Fails if a node of `height` would exceed [`MAX_HEIGHT`].
fn checked_height(height: usize, position: usize) -> Result<usize, ParseError> {
    if height > MAX_HEIGHT {
        return Err(ParseError::new(
            ParseErrorKind::TooDeep { limit: MAX_HEIGHT },
            Some(position),
        ));
    }
    Ok(height)
}

/// Parses a query string into an AST.
///
/// Returns the root expression, or a [`SyntaxError`] pointing at the offending input. Empty
/// queries are errors, so a rejected query never looks like one that matched nothing.
///
/// Nesting beyond [`MAX_NESTING`] groups or negations, or a tree taller than [`MAX_HEIGHT`],
/// is rejected with [`ParseErrorKind::TooDeep`], so the returned tree is always shallow enough
/// to evaluate, print and drop recursively.
pub fn parse(input: &str) -> Result<QueryExpr, SyntaxError> {
    let tokens = tokenize_spanned(input).map_err(SyntaxError::from)?;
    Parser::new(tokens, input.len())
        .parse()
        .map_err(|err| SyntaxError::from(err).with_query(input))
}
