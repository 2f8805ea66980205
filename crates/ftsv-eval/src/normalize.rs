//! Text normalization shared by the index adapters and phrase confirmation.
//!
//! Case folding is the same rule the query lexer applies, so query words, index keys and
//! document text all meet in one normalized space.

use ftsv_config::PhraseMatch;
use ftsv_query::fold_case;

/// Case-folds document text.
pub fn normalize_text(text: &str) -> String {
    fold_case(text)
}

/// Splits normalized text into words: maximal runs of alphanumeric characters.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Reduces phrase words to the terms confirmation looks for in document text.
///
/// In [`PhraseMatch::Words`] mode each query word is split the same way document text is, so
/// `"fox,"` becomes `fox`. Substring mode keeps the words verbatim.
pub fn phrase_terms(phrase: &[String], mode: PhraseMatch) -> Vec<String> {
    match mode {
        PhraseMatch::Words => phrase
            .iter()
            .flat_map(|word| words(word))
            .map(str::to_owned)
            .collect(),
        PhraseMatch::Substring => phrase.to_vec(),
    }
}

/// Returns true if normalized `text` contains `terms` contiguously and in order.
pub fn contains_phrase(text: &str, terms: &[String], mode: PhraseMatch) -> bool {
    if terms.is_empty() {
        return false;
    }

    match mode {
        PhraseMatch::Words => {
            let doc_words: Vec<&str> = words(text).collect();
            doc_words
                .windows(terms.len())
                .any(|window| window.iter().zip(terms).all(|(w, t)| *w == t.as_str()))
        }
        PhraseMatch::Substring => text.contains(&terms.join(" ")),
    }
}
