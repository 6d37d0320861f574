use assist_core::prefs::Preferences;
use assist_core::settings::SuggestionSettings;
use assist_core::shadow::shadow_text;
use assist_core::unicode::contains_kanji;
use assist_core::{hashtags, FetchError, InputToken, Suggestion, SuggestionKind};
use assist_core::{SuggestionRequest, SuggestionResponse};
use tracing::{debug, debug_span, warn};

use crate::types::{cyclic_index, RequestId, SuggestionQuery};

/// Tunables for a suggestion session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionConfig {
    pub max_results: usize,
    pub hashtag_limit: usize,
    /// Minimum input length (chars) before a zero-result response suppresses
    /// further fetches for inputs extending it.
    pub suppress_min_len: usize,
    pub lang: String,
    pub search_type: u8,
}

impl SuggestionConfig {
    pub fn new(settings: &SuggestionSettings, prefs: &Preferences) -> Self {
        Self {
            max_results: settings.max_results,
            hashtag_limit: settings.hashtag_limit,
            suppress_min_len: settings.suppress_min_len,
            lang: prefs.default_lang.clone(),
            search_type: prefs.search_type,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            hashtag_limit: 10,
            suppress_min_len: 0,
            lang: "en-US".to_string(),
            search_type: 0,
        }
    }
}

/// What `update` decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The caller must perform this fetch and hand the result to `receive`.
    Fetch(SuggestionQuery),
    /// Resolved locally from the hashtag catalogue.
    Resolved,
    /// Empty token: list cleared.
    Cleared,
    /// Input extends one that already returned nothing; list cleared, no fetch.
    Suppressed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub outcome: UpdateOutcome,
    /// Fetch superseded by this update; its transport should be aborted.
    pub cancelled: Option<RequestId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    Applied,
    /// Well-formed response without candidates.
    Empty,
    /// Backend failure: list cleared.
    Failed,
    /// Superseded or aborted response; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationMode {
    /// Replace the whole input.
    Replace,
    /// Append after the text preceding the token, separated by a space.
    Extend,
}

/// Text produced by activating the selected suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub text: String,
    pub mode: ActivationMode,
}

impl Activation {
    /// The new input value for `input`.
    pub fn apply(&self, input: &InputToken) -> String {
        match self.mode {
            ActivationMode::Replace => self.text.clone(),
            ActivationMode::Extend => {
                let base = input.prefix().trim_end();
                if base.is_empty() {
                    self.text.clone()
                } else {
                    format!("{base} {}", self.text)
                }
            }
        }
    }
}

struct InFlight {
    id: RequestId,
    input: String,
    radicals: Vec<String>,
}

/// Input that returned zero candidates under a given radical filter.
struct Suppression {
    input: String,
    radicals: Vec<String>,
}

impl Suppression {
    fn covers(&self, input: &str, radicals: &[String]) -> bool {
        self.radicals == radicals && input.starts_with(self.input.as_str())
    }
}

/// Ranked suggestion list, its selection cursor and the single outstanding
/// fetch.
pub struct SuggestionSession {
    config: SuggestionConfig,
    suggestions: Vec<Suggestion>,
    /// 0 = nothing selected, 1..=N = 1-based position.
    selected: usize,
    kind: SuggestionKind,
    input: InputToken,
    in_flight: Option<InFlight>,
    next_id: u64,
    suppression: Option<Suppression>,
}

impl SuggestionSession {
    pub fn new(config: SuggestionConfig) -> Self {
        Self {
            config,
            suggestions: Vec::new(),
            selected: 0,
            kind: SuggestionKind::Default,
            input: InputToken::default(),
            in_flight: None,
            next_id: 0,
            suppression: None,
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn kind(&self) -> SuggestionKind {
        self.kind
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|f| f.id)
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Recompute suggestions for `input`, optionally filtered by radicals.
    /// Always cancels the outstanding fetch first.
    pub fn update(&mut self, input: &InputToken, radicals: &[String]) -> Update {
        let _span = debug_span!("suggestion_update", token = %input.token).entered();
        let cancelled = self.cancel();
        self.input = input.clone();

        let outcome = if input.is_hashtag_context {
            let found = hashtags::lookup(&input.token, self.config.hashtag_limit);
            self.replace(found, SuggestionKind::Hashtag);
            UpdateOutcome::Resolved
        } else if input.token.is_empty() {
            self.clear();
            UpdateOutcome::Cleared
        } else if self.is_suppressed(&input.raw, radicals) {
            debug!(input = %input.raw, "fetch suppressed by earlier empty result");
            self.clear();
            UpdateOutcome::Suppressed
        } else {
            self.next_id += 1;
            let id = RequestId(self.next_id);
            self.in_flight = Some(InFlight {
                id,
                input: input.raw.clone(),
                radicals: radicals.to_vec(),
            });
            UpdateOutcome::Fetch(SuggestionQuery {
                id,
                request: SuggestionRequest {
                    input: input.raw.clone(),
                    search_type: self.config.search_type,
                    lang: self.config.lang.clone(),
                    radicals: radicals.to_vec(),
                },
            })
        };

        Update { outcome, cancelled }
    }

    /// Forget the outstanding fetch, if any. Its result will be ignored.
    pub fn cancel(&mut self) -> Option<RequestId> {
        self.in_flight.take().map(|f| f.id)
    }

    /// Lifts suppression once the input no longer extends the failing one.
    fn is_suppressed(&mut self, input: &str, radicals: &[String]) -> bool {
        match &self.suppression {
            Some(s) if s.covers(input, radicals) => true,
            Some(_) => {
                self.suppression = None;
                false
            }
            None => false,
        }
    }

    /// Apply the result of fetch `id`. Results of superseded fetches are
    /// ignored, errors included.
    pub fn receive(
        &mut self,
        id: RequestId,
        result: Result<SuggestionResponse, FetchError>,
    ) -> ReceiveOutcome {
        let current = match &self.in_flight {
            Some(f) if f.id == id => f,
            _ => {
                debug!(?id, "dropping stale suggestion response");
                return ReceiveOutcome::Ignored;
            }
        };

        match result {
            Err(FetchError::Aborted) => {
                self.in_flight = None;
                ReceiveOutcome::Ignored
            }
            Err(e) => {
                warn!(error = %e, "suggestion fetch failed");
                self.in_flight = None;
                self.clear();
                ReceiveOutcome::Failed
            }
            Ok(resp) if resp.suggestions.is_empty() => {
                if current.input.chars().count() >= self.config.suppress_min_len {
                    self.suppression = Some(Suppression {
                        input: current.input.clone(),
                        radicals: current.radicals.clone(),
                    });
                }
                self.in_flight = None;
                self.clear();
                ReceiveOutcome::Empty
            }
            Ok(resp) => {
                self.in_flight = None;
                let kind = resp.suggestion_type;
                let list = resp.into_suggestions(self.config.max_results);
                self.replace(list, kind);
                ReceiveOutcome::Applied
            }
        }
    }

    /// Step the cursor through the ring `0, 1, .., N` where 0 means "nothing
    /// selected".
    pub fn move_selection(&mut self, direction: i32) {
        self.selected = cyclic_index(self.selected, direction, self.suggestions.len() + 1);
    }

    /// Text of the selected suggestion the shadow is derived from: the reading
    /// until the user starts typing kanji, the headword afterwards.
    pub fn active_text(&self) -> Option<&str> {
        let s = self.selected_suggestion()?;
        match &s.secondary {
            Some(reading) if !contains_kanji(&self.input.token) => Some(reading),
            _ => Some(&s.primary),
        }
    }

    /// The typed input followed by the untyped remainder of the selected
    /// suggestion, or an empty string.
    pub fn current_shadow_text(&self) -> String {
        match self.active_text() {
            Some(candidate) => shadow_text(&self.input.raw, candidate),
            None => String::new(),
        }
    }

    /// Consume the selection. Clears the list.
    pub fn activate_selection(&mut self) -> Option<Activation> {
        let s = self.selected_suggestion()?;
        let activation = match (s.kind, &s.secondary) {
            (SuggestionKind::Hashtag, _) => Activation {
                text: s.primary.clone(),
                mode: ActivationMode::Extend,
            },
            (SuggestionKind::KanjiReading, Some(reading)) => Activation {
                text: format!("{} {}", s.primary, reading),
                mode: ActivationMode::Replace,
            },
            _ => Activation {
                text: s.primary.clone(),
                mode: ActivationMode::Replace,
            },
        };
        self.clear();
        Some(activation)
    }

    fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected
            .checked_sub(1)
            .and_then(|i| self.suggestions.get(i))
    }

    fn replace(&mut self, suggestions: Vec<Suggestion>, kind: SuggestionKind) {
        self.suggestions = suggestions;
        self.kind = kind;
        self.selected = 0;
    }

    fn clear(&mut self) {
        self.suggestions.clear();
        self.kind = SuggestionKind::Default;
        self.selected = 0;
    }
}
