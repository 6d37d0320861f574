//! Suggestion model and the `/api/suggestion` wire format.

use serde::{Deserialize, Serialize};

/// How a suggestion list should be interpreted on activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    #[default]
    Default,
    KanjiReading,
    Hashtag,
}

/// A single completion candidate.
///
/// `primary` is the headword as displayed (kanji where there is one),
/// `secondary` its reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub primary: String,
    pub secondary: Option<String>,
    pub kind: SuggestionKind,
}

impl Suggestion {
    pub fn new(primary: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            kind,
        }
    }

    pub fn with_reading(
        primary: impl Into<String>,
        reading: impl Into<String>,
        kind: SuggestionKind,
    ) -> Self {
        Self {
            primary: primary.into(),
            secondary: Some(reading.into()),
            kind,
        }
    }

    /// The backend sends the reading as `primary` and the kanji form as
    /// `secondary`; swap so the kanji form leads.
    pub fn from_wire(wire: WireSuggestion, kind: SuggestionKind) -> Self {
        match wire.secondary {
            Some(kanji) if !kanji.is_empty() => Self::with_reading(kanji, wire.primary, kind),
            _ => Self::new(wire.primary, kind),
        }
    }
}

/// Body of `POST /api/suggestion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    pub input: String,
    pub search_type: u8,
    pub lang: String,
    pub radicals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireSuggestion {
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
}

/// Response of `POST /api/suggestion`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<WireSuggestion>,
    #[serde(default)]
    pub suggestion_type: SuggestionKind,
}

impl SuggestionResponse {
    /// Convert into the display model, keeping at most `limit` entries.
    pub fn into_suggestions(self, limit: usize) -> Vec<Suggestion> {
        let kind = self.suggestion_type;
        self.suggestions
            .into_iter()
            .take(limit)
            .map(|w| Suggestion::from_wire(w, kind))
            .collect()
    }
}
