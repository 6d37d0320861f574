mod coordinator;

use assist_core::suggestion::WireSuggestion;
use assist_core::{watch, SuggestionKind, SuggestionResponse};

use crate::{RequestId, SuggestionConfig, SuggestionSession, Update, UpdateOutcome};

pub(super) fn response(kind: SuggestionKind, items: &[(&str, Option<&str>)]) -> SuggestionResponse {
    SuggestionResponse {
        suggestions: items
            .iter()
            .map(|(primary, secondary)| WireSuggestion {
                primary: primary.to_string(),
                secondary: secondary.map(str::to_string),
            })
            .collect(),
        suggestion_type: kind,
    }
}

pub(super) fn words(items: &[&str]) -> SuggestionResponse {
    let pairs: Vec<(&str, Option<&str>)> = items.iter().map(|w| (*w, None)).collect();
    response(SuggestionKind::Default, &pairs)
}

pub(super) fn fetch_id(update: &Update) -> RequestId {
    match &update.outcome {
        UpdateOutcome::Fetch(q) => q.id,
        other => panic!("expected a fetch, got {other:?}"),
    }
}

/// Session whose list was loaded from `resp` for input `raw`.
pub(super) fn loaded(raw: &str, resp: SuggestionResponse) -> SuggestionSession {
    let mut session = SuggestionSession::new(SuggestionConfig::default());
    let update = session.update(&watch(raw), &[]);
    let id = fetch_id(&update);
    session.receive(id, Ok(resp));
    session
}
