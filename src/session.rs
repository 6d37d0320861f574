use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use assist_core::prefs::Preferences;
use assist_core::settings::Settings;
use assist_session::{AssistResponse, AssistanceCoordinator, Key, SuggestionConfig};

use crate::async_worker::AsyncWorker;
use crate::backend::{Backend, HttpBackend};
use crate::types::{convert_to_events, EngineError, EngineResponse, RadicalView};

/// Thread-safe search-bar assistant: runs backend queries on worker threads
/// and reports everything the renderer has to do as events.
pub struct AssistSession {
    coordinator: Mutex<AssistanceCoordinator>,
    worker: AsyncWorker,
}

impl AssistSession {
    pub fn new(backend: Arc<dyn Backend>, config: SuggestionConfig) -> Result<Self, EngineError> {
        let worker = AsyncWorker::new(backend).map_err(|e| EngineError::Io {
            msg: format!("spawning workers: {e}"),
        })?;
        Ok(Self {
            coordinator: Mutex::new(AssistanceCoordinator::new(config)),
            worker,
        })
    }

    /// Session talking to the configured HTTP backend.
    pub fn connect(settings: &Settings, prefs: &Preferences) -> Result<Self, EngineError> {
        let backend = Arc::new(HttpBackend::new(&settings.backend));
        Self::new(backend, SuggestionConfig::new(&settings.suggestions, prefs))
    }

    pub fn handle_input(&self, raw: &str) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.handle_input(raw);
        self.dispatch(&c, resp)
    }

    pub fn focus(&self) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.focus();
        self.dispatch(&c, resp)
    }

    pub fn blur(&self) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.blur();
        self.dispatch(&c, resp)
    }

    pub fn handle_key(&self, key: Key) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.handle_key(key);
        self.dispatch(&c, resp)
    }

    pub fn toggle_radical(&self, glyph: &str) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.toggle_radical(glyph);
        self.dispatch(&c, resp)
    }

    pub fn reset_radicals(&self) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.reset_radicals();
        self.dispatch(&c, resp)
    }

    pub fn open_picker(&self) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.open_picker();
        self.dispatch(&c, resp)
    }

    pub fn close_picker(&self) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.close_picker();
        self.dispatch(&c, resp)
    }

    pub fn search_radicals(&self, query: &str) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.search_radicals(query);
        self.dispatch(&c, resp)
    }

    pub fn pick_kanji(&self, kanji: &str) -> EngineResponse {
        let mut c = self.lock();
        let resp = c.pick_kanji(kanji);
        self.dispatch(&c, resp)
    }

    /// Apply the next finished backend result, if any. Stale results are
    /// skipped.
    pub fn poll(&self) -> Option<EngineResponse> {
        // 1. Suggestion results
        while let Some(result) = self.worker.try_recv_suggestion() {
            let mut c = self.lock();
            if let Some(resp) = c.receive_suggestions(result.id, result.result) {
                return Some(self.dispatch(&c, resp));
            }
        }

        // 2. Radical search results
        while let Some(result) = self.worker.try_recv_radical_search() {
            let mut c = self.lock();
            if let Some(resp) = c.receive_radical_search(result.id, result.result) {
                return Some(self.dispatch(&c, resp));
            }
        }

        // 3. Constraint query results
        while let Some(result) = self.worker.try_recv_radicals() {
            let mut c = self.lock();
            if let Some(resp) = c.receive_radicals(&result.query, result.result) {
                return Some(self.dispatch(&c, resp));
            }
        }

        None
    }

    pub fn input(&self) -> String {
        self.lock().input().raw.clone()
    }

    pub fn radical_view(&self) -> RadicalView {
        RadicalView::new(self.lock().radicals())
    }

    fn lock(&self) -> MutexGuard<'_, AssistanceCoordinator> {
        self.coordinator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand queries to the worker and turn the response into events.
    fn dispatch(&self, c: &AssistanceCoordinator, resp: AssistResponse) -> EngineResponse {
        if resp.cancel_suggestions {
            self.worker.abort_suggestions();
        }
        if resp.cancel_radical_search {
            self.worker.abort_radical_search();
        }
        let mut has_pending_work = false;
        if let Some(query) = &resp.suggestion_query {
            self.worker.submit_suggestions(query.clone());
            has_pending_work = true;
        }
        if let Some(query) = &resp.radical_query {
            self.worker.submit_radicals(query.clone());
            has_pending_work = true;
        }
        if let Some(query) = &resp.radical_search {
            self.worker.submit_radical_search(query.clone());
            has_pending_work = true;
        }
        let radicals = resp.radicals_changed.then(|| RadicalView::new(c.radicals()));
        convert_to_events(resp, radicals, has_pending_work)
    }
}
