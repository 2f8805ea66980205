//! Query evaluation.
//!
//! Walks a [`QueryExpr`] against an [`Index`] and a [`DocumentCollection`] and returns the
//! matching document ids. Evaluation is total: absent terms and prefixes produce empty sets,
//! and nothing is mutated.

use std::collections::BTreeSet;

use ftsv_config::PhraseMatch;
use ftsv_query::QueryExpr;
use log::{debug, trace};

use crate::{
    normalize::{contains_phrase, phrase_terms},
    source::{DocumentCollection, Index},
};

/// Evaluates query trees against a pair of collaborators.
///
/// The evaluator holds only shared references and a phrase mode; it keeps no state between
/// calls, so one evaluator can serve many queries.
pub struct Evaluator<'a, I, D> {
    /// Term → document ids.
    index: &'a I,
    /// Document universe and text for phrase confirmation.
    documents: &'a D,
    /// How phrase candidates are confirmed.
    phrase_match: PhraseMatch,
}

impl<'a, I, D> Evaluator<'a, I, D>
where
    I: Index,
    D: DocumentCollection<Id = I::Id>,
{
    /// Creates an evaluator with whole-word phrase matching.
    pub fn new(index: &'a I, documents: &'a D) -> Self {
        Self {
            index,
            documents,
            phrase_match: PhraseMatch::default(),
        }
    }

    /// Sets how phrases are confirmed against document text.
    pub fn with_phrase_match(mut self, phrase_match: PhraseMatch) -> Self {
        self.phrase_match = phrase_match;
        self
    }

    /// Returns the matching document ids, in ascending order.
    pub fn evaluate(&self, expr: &QueryExpr) -> BTreeSet<I::Id> {
        // The universe is only needed to complement a NOT.
        let universe = if expr.contains_not() {
            self.documents.all_ids()
        } else {
            BTreeSet::new()
        };

        let result = self.eval(expr, &universe);
        debug!(
            "evaluated {} -> {} documents",
            expr.to_query_string(),
            result.len()
        );
        result
    }

    /// Evaluates one node.
    fn eval(&self, expr: &QueryExpr, universe: &BTreeSet<I::Id>) -> BTreeSet<I::Id> {
        match expr {
            QueryExpr::Term(word) => self.index.lookup(word),
            QueryExpr::Wildcard(prefix) => self.eval_wildcard(prefix),
            QueryExpr::Phrase(words) => self.eval_phrase(words),
            QueryExpr::And(left, right) => {
                let left = self.eval(left, universe);
                if left.is_empty() {
                    return left;
                }
                let right = self.eval(right, universe);
                left.intersection(&right).cloned().collect()
            }
            QueryExpr::Or(left, right) => {
                let mut left = self.eval(left, universe);
                let mut right = self.eval(right, universe);
                left.append(&mut right);
                left
            }
            QueryExpr::Not(inner) => {
                let excluded = self.eval(inner, universe);
                universe.difference(&excluded).cloned().collect()
            }
        }
    }

    /// Unions the postings of every index key starting with `prefix`.
    fn eval_wildcard(&self, prefix: &str) -> BTreeSet<I::Id> {
        let keys = self.index.keys_with_prefix(prefix);
        trace!("wildcard {prefix}* expands to {} keys", keys.len());

        let mut result = BTreeSet::new();
        for key in &keys {
            result.append(&mut self.index.lookup(key));
        }
        result
    }

    /// Intersects the postings of each phrase word, then confirms word order in the text.
    ///
    /// Candidates come from looking up the phrase words exactly as a term would be looked up;
    /// only the confirmation step applies the phrase mode's word analysis.
    fn eval_phrase(&self, words: &[String]) -> BTreeSet<I::Id> {
        let Some((first, rest)) = words.split_first() else {
            return BTreeSet::new();
        };

        let mut candidates = self.index.lookup(first);
        for word in rest {
            if candidates.is_empty() {
                break;
            }
            let postings = self.index.lookup(word);
            candidates.retain(|id| postings.contains(id));
        }

        if candidates.is_empty() {
            trace!("phrase {words:?} has no candidates");
            return candidates;
        }

        let terms = phrase_terms(words, self.phrase_match);
        if terms.is_empty() {
            // Nothing alphanumeric to place in the text; the postings decide.
            return candidates;
        }

        let before = candidates.len();
        candidates.retain(|id| {
            contains_phrase(&self.documents.text_of(id), &terms, self.phrase_match)
        });
        trace!(
            "phrase {terms:?}: {} of {before} candidates confirmed",
            candidates.len()
        );
        candidates
    }
}

/// Evaluates `expr` with whole-word phrase matching.
///
/// Shorthand for [`Evaluator::new`] followed by [`Evaluator::evaluate`].
pub fn evaluate<I, D>(expr: &QueryExpr, index: &I, documents: &D) -> BTreeSet<I::Id>
where
    I: Index,
    D: DocumentCollection<Id = I::Id>,
{
    Evaluator::new(index, documents).evaluate(expr)
}
