//! Boolean query parsing and AST for ftsv.
//!
//! This crate provides the query language used to select documents from an inverted index:
//!
//! - **Terms**: `rust` - words that must appear
//! - **Phrases**: `"error handling"` - words that must appear contiguously, in order
//! - **Wildcards**: `help*` - any indexed word starting with `help`
//! - **AND**: `rust and async`, or simply `rust async`
//! - **OR**: `rust or golang` - alternatives
//! - **NOT**: `not deprecated` - complement
//! - **Grouping**: `(a b) or (c d)` - precedence control
//!
//! Keywords are case-insensitive, and every word is case-folded while tokenizing.
//!
//! # Example
//!
//! ```
//! use ftsv_query::{QueryExpr, parse};
//!
//! let expr = parse("cat dog").unwrap();
//! assert_eq!(
//!     expr,
//!     QueryExpr::and(QueryExpr::term("cat"), QueryExpr::term("dog"))
//! );
//! assert!(parse("(cat and").is_err());
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::QueryExpr;
pub use error::{LexError, Operator, ParseError, ParseErrorKind, SyntaxError, SyntaxErrorKind};
pub use lexer::{Token, fold_case, tokenize};
pub use parser::{MAX_HEIGHT, MAX_NESTING, parse};
