//! Query evaluation and validation for ftsv.
//!
//! This crate runs queries parsed by [`ftsv_query`] against an inverted index and the
//! documents it was built from:
//!
//! - [`Index`] and [`DocumentCollection`] are the two read-only collaborators. Plain
//!   `BTreeMap`s implement them, as do the normalizing [`MemoryIndex`] and [`MemoryDocuments`].
//! - [`Evaluator`] turns a [`QueryExpr`] into the ordered set of matching document ids.
//! - [`Validator`] is the harness surface: it enforces the configured limits, evaluates, and
//!   compares the result with the documents a test expected.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use ftsv_eval::{MemoryDocuments, MemoryIndex, evaluate};
//! use ftsv_query::parse;
//!
//! let docs: MemoryDocuments<u32> = [(1, "cat"), (2, "cat dog"), (3, "dog")]
//!     .into_iter()
//!     .collect();
//! let index = MemoryIndex::from_documents(&docs);
//!
//! let expr = parse("cat and not dog").unwrap();
//! assert_eq!(evaluate(&expr, &index, &docs), BTreeSet::from([1]));
//! ```

#![warn(missing_docs)]

mod error;
mod evaluate;
mod memory;
mod normalize;
mod source;
mod validator;

pub use error::ValidateError;
pub use evaluate::{Evaluator, evaluate};
pub use ftsv_config::{Config, PhraseMatch};
pub use ftsv_query::{QueryExpr, SyntaxError};
pub use memory::{MemoryDocuments, MemoryIndex};
pub use normalize::{contains_phrase, normalize_text, phrase_terms, words};
pub use source::{DocumentCollection, Index};
pub use validator::{Validator, Verdict};
