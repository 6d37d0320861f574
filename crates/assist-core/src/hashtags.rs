//! Built-in `#` filters. Resolved locally so typing a hashtag never hits the
//! network.

use crate::suggestion::{Suggestion, SuggestionKind};

pub const HASHTAGS: &[&str] = &[
    "#adverb",
    "#auxilary",
    "#conjungation",
    "#noun",
    "#prefix",
    "#suffix",
    "#particle",
    "#sfx",
    "#verb",
    "#adjective",
    "#counter",
    "#expression",
    "#interjection",
    "#pronoun",
    "#numeric",
    "#transitive",
    "#intransitive",
    "#unclassified",
    "#word",
    "#sentence",
    "#name",
    "#kanji",
];

/// Catalogue entries containing `token` (case-insensitive), in catalogue
/// order, at most `limit` of them.
pub fn lookup(token: &str, limit: usize) -> Vec<Suggestion> {
    let needle = token.to_lowercase();
    HASHTAGS
        .iter()
        .filter(|tag| tag.contains(needle.as_str()))
        .take(limit)
        .map(|tag| Suggestion::new(*tag, SuggestionKind::Hashtag))
        .collect()
}
