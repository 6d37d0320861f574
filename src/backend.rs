//! HTTP client for the dictionary backend.

use std::time::Duration;

use assist_core::radicals::{
    RadicalSearchRequest, RadicalSearchResponse, RadicalsRequest, RadicalsResponse,
};
use assist_core::settings::BackendSettings;
use assist_core::{FetchError, SuggestionRequest, SuggestionResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

const SUGGESTION_PATH: &str = "/api/suggestion";
const KANJI_BY_RADICAL_PATH: &str = "/api/kanji/by_radical";
const RADICAL_SEARCH_PATH: &str = "/api/radical/search";

/// The backend endpoints the assistance layer talks to.
///
/// Implementations block; they are only ever called from worker threads.
pub trait Backend: Send + Sync {
    fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, FetchError>;

    fn kanji_by_radicals(&self, request: &RadicalsRequest)
        -> Result<RadicalsResponse, FetchError>;

    fn search_radicals(
        &self,
        request: &RadicalSearchRequest,
    ) -> Result<RadicalSearchResponse, FetchError>;
}

/// JSON-over-HTTP backend.
pub struct HttpBackend {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpBackend {
    pub fn new(settings: &BackendSettings) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(settings.timeout_ms)))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let body = serde_json::to_string(request)?;
        debug!(%url, "backend request");
        let text = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(body.as_bytes())
            .map_err(map_error)?
            .into_body()
            .read_to_string()
            .map_err(map_error)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Backend for HttpBackend {
    fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, FetchError> {
        self.post(SUGGESTION_PATH, request)
    }

    fn kanji_by_radicals(
        &self,
        request: &RadicalsRequest,
    ) -> Result<RadicalsResponse, FetchError> {
        self.post(KANJI_BY_RADICAL_PATH, request)
    }

    fn search_radicals(
        &self,
        request: &RadicalSearchRequest,
    ) -> Result<RadicalSearchResponse, FetchError> {
        self.post(RADICAL_SEARCH_PATH, request)
    }
}

fn map_error(e: ureq::Error) -> FetchError {
    match e {
        ureq::Error::StatusCode(status) => FetchError::Status { status },
        other => FetchError::Network {
            msg: other.to_string(),
        },
    }
}
