//! Algebraic properties of parsing and evaluation over generated corpora.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::collections::BTreeSet;

use ftsv_eval::{DocumentCollection, MemoryDocuments, MemoryIndex, evaluate};
use ftsv_query::{QueryExpr, parse};
use proptest::prelude::*;

/// Words the generated documents and queries draw from.
const VOCABULARY: &[&str] = &["ant", "bee", "cat", "cow", "dog", "eel"];

/// A small corpus whose index is built from its own documents.
#[derive(Debug)]
struct Corpus {
    /// Word index over `docs`.
    index: MemoryIndex<usize>,
    /// Documents keyed by position.
    docs: MemoryDocuments<usize>,
}

impl Corpus {
    /// Evaluates a parsed tree.
    fn eval(&self, expr: &QueryExpr) -> BTreeSet<usize> {
        evaluate(expr, &self.index, &self.docs)
    }

    /// Parses and evaluates query text.
    fn run(&self, query: &str) -> BTreeSet<usize> {
        self.eval(&parse(query).unwrap())
    }
}

/// Up to seven documents of up to seven words each.
fn corpus() -> impl Strategy<Value = Corpus> {
    let doc = prop::collection::vec(prop::sample::select(VOCABULARY), 0..8);
    prop::collection::vec(doc, 1..8).prop_map(|docs| {
        let docs: MemoryDocuments<usize> = docs
            .into_iter()
            .enumerate()
            .map(|(id, words)| (id, words.join(" ")))
            .collect();
        let index = MemoryIndex::from_documents(&docs);
        Corpus { index, docs }
    })
}

/// One vocabulary word.
fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VOCABULARY)
}

/// Query trees over the vocabulary, wildcards using one-letter prefixes.
fn query() -> impl Strategy<Value = QueryExpr> {
    let leaf = prop_oneof![
        word().prop_map(QueryExpr::term),
        word().prop_map(|w| QueryExpr::wildcard(&w[..1])),
        prop::collection::vec(word(), 1..3).prop_map(QueryExpr::phrase),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(QueryExpr::not),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| QueryExpr::and(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| QueryExpr::or(l, r)),
        ]
    })
}

proptest! {
    #[test]
    fn query_string_parses_back_to_same_tree(expr in query()) {
        prop_assert_eq!(parse(&expr.to_query_string()).unwrap(), expr);
    }

    #[test]
    fn results_stay_inside_universe(corpus in corpus(), expr in query()) {
        let universe = corpus.docs.all_ids();
        prop_assert!(corpus.eval(&expr).is_subset(&universe));
    }

    #[test]
    fn or_is_commutative(corpus in corpus(), a in query(), b in query()) {
        prop_assert_eq!(
            corpus.eval(&QueryExpr::or(a.clone(), b.clone())),
            corpus.eval(&QueryExpr::or(b, a))
        );
    }

    #[test]
    fn and_is_associative(corpus in corpus(), a in query(), b in query(), c in query()) {
        let left = QueryExpr::and(QueryExpr::and(a.clone(), b.clone()), c.clone());
        let right = QueryExpr::and(a, QueryExpr::and(b, c));
        prop_assert_eq!(corpus.eval(&left), corpus.eval(&right));
    }

    #[test]
    fn de_morgan(corpus in corpus(), a in query(), b in query()) {
        let negated_or = QueryExpr::not(QueryExpr::or(a.clone(), b.clone()));
        let and_of_negations = QueryExpr::and(QueryExpr::not(a), QueryExpr::not(b));
        prop_assert_eq!(corpus.eval(&negated_or), corpus.eval(&and_of_negations));
    }

    #[test]
    fn double_negation(corpus in corpus(), expr in query()) {
        prop_assert_eq!(
            corpus.eval(&QueryExpr::not(QueryExpr::not(expr.clone()))),
            corpus.eval(&expr)
        );
    }

    #[test]
    fn implicit_and_matches_explicit(corpus in corpus(), a in query(), b in query()) {
        let (a, b) = (a.to_query_string(), b.to_query_string());
        prop_assert_eq!(
            corpus.run(&format!("{a} {b}")),
            corpus.run(&format!("{a} and {b}"))
        );
    }

    #[test]
    fn phrase_is_narrower_than_its_words(
        corpus in corpus(),
        words in prop::collection::vec(word(), 1..4),
    ) {
        let phrase = corpus.run(&format!("\"{}\"", words.join(" ")));
        let conjunction = corpus.run(&words.join(" and "));
        prop_assert!(phrase.is_subset(&conjunction));
    }

    #[test]
    fn keyword_case_is_irrelevant(corpus in corpus(), a in word(), b in word()) {
        prop_assert_eq!(
            corpus.run(&format!("{a} AND NOT {b}")),
            corpus.run(&format!("{a} and not {b}"))
        );
    }
}
