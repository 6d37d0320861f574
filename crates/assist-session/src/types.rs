use assist_core::radicals::{RadicalSearchRequest, RadicalsRequest};
use assist_core::{Suggestion, SuggestionRequest};

/// Identity of one suggestion fetch. Responses are matched by identity,
/// never by comparing their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// A suggestion fetch the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery {
    pub id: RequestId,
    pub request: SuggestionRequest,
}

/// A constraint query for the radical selection at the time it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadicalQuery {
    pub radicals: Vec<String>,
}

impl RadicalQuery {
    pub fn request(&self) -> RadicalsRequest {
        RadicalsRequest {
            radicals: self.radicals.clone(),
        }
    }
}

/// A radical text search the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadicalSearchQuery {
    pub id: RequestId,
    pub request: RadicalSearchRequest,
}

/// Navigation keys the search bar intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Tab,
    Enter,
    Escape,
}

/// Suggestion dropdown action, exactly one of three states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    /// Leave the dropdown as-is (e.g. while a fetch is in flight).
    Keep,
    Show {
        items: Vec<Suggestion>,
        /// 0 = nothing selected, otherwise the 1-based position.
        selected: usize,
    },
    Hide,
}

/// What the caller should do after an operation.
#[derive(Debug)]
pub struct AssistResponse {
    pub consumed: bool,
    /// New search-bar value to write back.
    pub input: Option<String>,
    pub suggestions: SuggestionAction,
    /// `Some("")` clears the shadow text.
    pub shadow_text: Option<String>,
    /// Abort the transport of any outstanding suggestion fetch.
    pub cancel_suggestions: bool,
    pub suggestion_query: Option<SuggestionQuery>,
    pub radical_query: Option<RadicalQuery>,
    /// Abort the transport of any outstanding radical search.
    pub cancel_radical_search: bool,
    pub radical_search: Option<RadicalSearchQuery>,
    /// Radical mask or result grid changed and must be redrawn.
    pub radicals_changed: bool,
    pub radical_backend_failed: bool,
    pub submit: bool,
}

impl AssistResponse {
    pub(crate) fn not_consumed() -> Self {
        Self {
            consumed: false,
            input: None,
            suggestions: SuggestionAction::Keep,
            shadow_text: None,
            cancel_suggestions: false,
            suggestion_query: None,
            radical_query: None,
            cancel_radical_search: false,
            radical_search: None,
            radicals_changed: false,
            radical_backend_failed: false,
            submit: false,
        }
    }

    pub(crate) fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::not_consumed()
        }
    }

    /// Keep flags and queries from self, take the suggestion display from `other`.
    pub(crate) fn with_suggestions_from(mut self, other: AssistResponse) -> AssistResponse {
        self.suggestions = other.suggestions;
        self.shadow_text = other.shadow_text;
        self.cancel_suggestions |= other.cancel_suggestions;
        self.suggestion_query = other.suggestion_query;
        self
    }
}

/// Position `delta` steps from `current` in a ring of `count` slots.
pub(crate) fn cyclic_index(current: usize, delta: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let n = count as i64;
    (current as i64 + delta as i64).rem_euclid(n) as usize
}
