//! Search-bar assistance engine: suggestion dropdown, shadow text and the
//! radical kanji picker, driven against a dictionary backend over HTTP.

mod async_worker;
pub mod backend;
mod session;
mod trace_init;
mod types;

pub use assist_core::prefs::{FileStore, MemoryStore, PreferenceStore, Preferences};
pub use assist_core::settings::{settings, Settings};
pub use assist_core::{FetchError, Suggestion, SuggestionKind};
pub use assist_session::{Key, RadicalState, SearchGroup, SuggestionConfig, TabStatus};
pub use backend::{Backend, HttpBackend};
pub use session::AssistSession;
pub use trace_init::init_tracing;
pub use types::{AssistEvent, EngineError, EngineResponse, RadicalView};

pub fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Replace the built-in settings with the TOML file at `path`. Must run
/// before the first `settings()` call.
pub fn settings_load_config(path: &std::path::Path) -> Result<(), EngineError> {
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
        msg: format!("{}: {e}", path.display()),
    })?;
    assist_core::settings::init_custom(content)
        .map_err(|e| EngineError::InvalidData { msg: e.to_string() })
}

/// Open a session for the current settings and the preferences in `store`.
pub fn open_session(store: &dyn PreferenceStore) -> Result<AssistSession, EngineError> {
    let settings = settings();
    let prefs = Preferences::load(store, &settings.suggestions);
    AssistSession::connect(settings, &prefs)
}
