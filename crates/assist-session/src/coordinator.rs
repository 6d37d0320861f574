use assist_core::radicals::{RadicalSearchResponse, RadicalsResponse};
use assist_core::{watch, FetchError, InputToken, SuggestionResponse};
use tracing::debug_span;

use crate::radicals::{ApplyOutcome, RadicalConstraintSet, SearchOutcome, ToggleOutcome};
use crate::suggestion::{ReceiveOutcome, SuggestionConfig, SuggestionSession, UpdateOutcome};
use crate::types::{AssistResponse, Key, RadicalQuery, RequestId, SuggestionAction};

/// Drives the suggestion session and the radical picker from the same input
/// events and keeps them consistent with each other.
pub struct AssistanceCoordinator {
    input: InputToken,
    suggestions: SuggestionSession,
    radicals: RadicalConstraintSet,
    picker_open: bool,
    /// Set on blur so that the next focus shows the kept list without
    /// refetching.
    keep_suggestions: bool,
}

impl AssistanceCoordinator {
    pub fn new(config: SuggestionConfig) -> Self {
        Self {
            input: InputToken::default(),
            suggestions: SuggestionSession::new(config),
            radicals: RadicalConstraintSet::new(),
            picker_open: false,
            keep_suggestions: false,
        }
    }

    pub fn input(&self) -> &InputToken {
        &self.input
    }

    pub fn suggestions(&self) -> &SuggestionSession {
        &self.suggestions
    }

    pub fn radicals(&self) -> &RadicalConstraintSet {
        &self.radicals
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// The search-bar value changed.
    pub fn handle_input(&mut self, raw: &str) -> AssistResponse {
        let _span = debug_span!("handle_input", raw).entered();
        if raw == self.input.raw {
            return AssistResponse::not_consumed();
        }
        self.input = watch(raw);
        self.refresh_suggestions()
    }

    pub fn focus(&mut self) -> AssistResponse {
        if std::mem::take(&mut self.keep_suggestions) {
            let mut resp = AssistResponse::consumed();
            resp.suggestions = self.suggestion_view();
            return resp;
        }
        self.refresh_suggestions()
    }

    /// Focus moved elsewhere: hide the dropdown but keep its contents.
    pub fn blur(&mut self) -> AssistResponse {
        self.keep_suggestions = true;
        let mut resp = AssistResponse::consumed();
        resp.suggestions = SuggestionAction::Hide;
        resp
    }

    pub fn handle_key(&mut self, key: Key) -> AssistResponse {
        let _span = debug_span!("handle_key", ?key).entered();
        match key {
            Key::Up => self.move_selection(-1),
            Key::Down => self.move_selection(1),
            Key::Tab => {
                if self.suggestions.selected_index() > 0 {
                    self.activate()
                } else {
                    self.move_selection(1)
                }
            }
            Key::Enter => {
                let mut resp = if self.suggestions.selected_index() > 0 {
                    self.activate()
                } else {
                    AssistResponse::consumed()
                };
                resp.submit = true;
                resp
            }
            Key::Escape => {
                let mut resp = AssistResponse::consumed();
                resp.suggestions = SuggestionAction::Hide;
                resp
            }
        }
    }

    pub fn toggle_radical(&mut self, glyph: &str) -> AssistResponse {
        let radical_query = match self.radicals.toggle(glyph) {
            ToggleOutcome::Ignored => return AssistResponse::not_consumed(),
            ToggleOutcome::Reset => None,
            ToggleOutcome::Query(q) => Some(q),
        };
        let mut resp = AssistResponse::consumed().with_suggestions_from(self.refresh_suggestions());
        resp.radical_query = radical_query;
        resp.radicals_changed = true;
        resp
    }

    pub fn reset_radicals(&mut self) -> AssistResponse {
        self.radicals.reset();
        let mut resp = AssistResponse::consumed().with_suggestions_from(self.refresh_suggestions());
        resp.radicals_changed = true;
        resp
    }

    pub fn open_picker(&mut self) -> AssistResponse {
        self.picker_open = true;
        let mut resp = AssistResponse::consumed().with_suggestions_from(self.refresh_suggestions());
        resp.radicals_changed = true;
        resp
    }

    /// Closing the picker drops the selection along with the filter.
    pub fn close_picker(&mut self) -> AssistResponse {
        self.picker_open = false;
        self.reset_radicals()
    }

    /// The picker's radical search field changed.
    pub fn search_radicals(&mut self, query: &str) -> AssistResponse {
        let mut resp = AssistResponse::consumed();
        resp.cancel_radical_search = self.radicals.cancel_search().is_some();
        match self.radicals.search(query) {
            SearchOutcome::Cleared => resp.radicals_changed = true,
            SearchOutcome::Query(q) => resp.radical_search = Some(q),
        }
        resp
    }

    /// Append a kanji picked from the radical result grid to the input.
    pub fn pick_kanji(&mut self, kanji: &str) -> AssistResponse {
        let raw = format!("{}{}", self.input.raw, kanji);
        let mut resp = self.handle_input(&raw);
        resp.consumed = true;
        resp.input = Some(raw);
        resp
    }

    /// Result of suggestion fetch `id`. `None` if it changed nothing.
    pub fn receive_suggestions(
        &mut self,
        id: RequestId,
        result: Result<SuggestionResponse, FetchError>,
    ) -> Option<AssistResponse> {
        match self.suggestions.receive(id, result) {
            ReceiveOutcome::Ignored => None,
            ReceiveOutcome::Applied | ReceiveOutcome::Empty | ReceiveOutcome::Failed => {
                Some(self.suggestion_response())
            }
        }
    }

    /// Result of a constraint query. `None` if it was stale.
    pub fn receive_radicals(
        &mut self,
        query: &RadicalQuery,
        result: Result<RadicalsResponse, FetchError>,
    ) -> Option<AssistResponse> {
        let mut resp = AssistResponse::consumed();
        match self.radicals.receive(query, result) {
            ApplyOutcome::Stale => return None,
            ApplyOutcome::Applied => resp.radicals_changed = true,
            ApplyOutcome::Failed => resp.radical_backend_failed = true,
        }
        Some(resp)
    }

    /// Result of radical search `id`. `None` if it was superseded.
    pub fn receive_radical_search(
        &mut self,
        id: RequestId,
        result: Result<RadicalSearchResponse, FetchError>,
    ) -> Option<AssistResponse> {
        match self.radicals.receive_search(id, result) {
            ApplyOutcome::Stale => None,
            ApplyOutcome::Applied | ApplyOutcome::Failed => {
                let mut resp = AssistResponse::consumed();
                resp.radicals_changed = true;
                Some(resp)
            }
        }
    }

    fn radical_filter(&self) -> Vec<String> {
        if self.picker_open {
            self.radicals.selected_glyphs()
        } else {
            Vec::new()
        }
    }

    fn refresh_suggestions(&mut self) -> AssistResponse {
        let filter = self.radical_filter();
        let update = self.suggestions.update(&self.input, &filter);
        let mut resp = AssistResponse::consumed();
        resp.cancel_suggestions = update.cancelled.is_some();
        match update.outcome {
            // Leave the current list up until the response arrives, but the
            // shadow must follow the literal input now.
            UpdateOutcome::Fetch(query) => {
                resp.suggestion_query = Some(query);
                resp.shadow_text = Some(self.suggestions.current_shadow_text());
            }
            UpdateOutcome::Resolved | UpdateOutcome::Cleared | UpdateOutcome::Suppressed => {
                resp.suggestions = self.suggestion_view();
                resp.shadow_text = Some(self.suggestions.current_shadow_text());
            }
        }
        resp
    }

    fn move_selection(&mut self, direction: i32) -> AssistResponse {
        self.suggestions.move_selection(direction);
        self.suggestion_response()
    }

    fn activate(&mut self) -> AssistResponse {
        let Some(activation) = self.suggestions.activate_selection() else {
            return AssistResponse::consumed();
        };
        let raw = activation.apply(&self.input);
        self.input = watch(&raw);
        let mut resp = self.suggestion_response();
        resp.cancel_suggestions = self.suggestions.cancel().is_some();
        resp.input = Some(raw);
        resp
    }

    fn suggestion_response(&self) -> AssistResponse {
        let mut resp = AssistResponse::consumed();
        resp.suggestions = self.suggestion_view();
        resp.shadow_text = Some(self.suggestions.current_shadow_text());
        resp
    }

    fn suggestion_view(&self) -> SuggestionAction {
        if self.suggestions.is_empty() || self.input.raw.is_empty() {
            SuggestionAction::Hide
        } else {
            SuggestionAction::Show {
                items: self.suggestions.suggestions().to_vec(),
                selected: self.suggestions.selected_index(),
            }
        }
    }
}
