//! Input tokenisation: reduces the raw search-bar value to the fragment the
//! user is actively completing.

/// Canonical view of the search bar after an input event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputToken {
    /// The full input value, sent to the backend for free-text matching.
    pub raw: String,
    /// Last whitespace-delimited segment of `raw`.
    pub token: String,
    /// `token` contains `#`: completions come from the hashtag catalogue.
    pub is_hashtag_context: bool,
}

impl InputToken {
    /// Everything in `raw` before `token`, including the separating whitespace.
    pub fn prefix(&self) -> &str {
        &self.raw[..self.raw.len() - self.token.len()]
    }
}

/// Tokenise a raw input value. Pure; called on every keystroke.
pub fn watch(raw: &str) -> InputToken {
    let token = raw.rsplit(char::is_whitespace).next().unwrap_or("");
    InputToken {
        raw: raw.to_string(),
        token: token.to_string(),
        is_hashtag_context: token.contains('#'),
    }
}
