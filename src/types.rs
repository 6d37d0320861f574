use std::collections::BTreeMap;

use assist_core::radicals::PAGE_COUNT;
use assist_core::Suggestion;
use assist_session::{
    AssistResponse, RadicalConstraintSet, RadicalState, SearchGroup, SuggestionAction, TabStatus,
};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Snapshot of the radical picker for redrawing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadicalView {
    /// Per-radical state, in taxonomy order.
    pub states: Vec<RadicalState>,
    /// Status of each of the picker's tabs.
    pub pages: Vec<TabStatus>,
    /// Kanji matching the selection, keyed by stroke count.
    pub kanji: BTreeMap<u32, Vec<String>>,
    /// Radical search hits for the results tab. Empty hides the tab.
    pub search: Vec<SearchGroup>,
}

impl RadicalView {
    pub(crate) fn new(radicals: &RadicalConstraintSet) -> Self {
        Self {
            states: radicals.states().to_vec(),
            pages: (0..PAGE_COUNT).map(|p| radicals.page_status(p)).collect(),
            kanji: radicals.kanji_results().clone(),
            search: radicals.search_results(),
        }
    }
}

/// Event-driven response from every `AssistSession` operation.
#[derive(Debug, Clone)]
pub struct EngineResponse {
    pub consumed: bool,
    pub events: Vec<AssistEvent>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssistEvent {
    SetInput {
        text: String,
    },
    ShowSuggestions {
        items: Vec<Suggestion>,
        selected: usize,
    },
    HideSuggestions,
    SetShadowText {
        text: String,
    },
    ClearShadowText,
    UpdateRadicals(RadicalView),
    RadicalBackendUnreachable,
    Submit,
    SchedulePoll,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub(crate) fn convert_to_events(
    resp: AssistResponse,
    radicals: Option<RadicalView>,
    has_pending_work: bool,
) -> EngineResponse {
    let mut events = Vec::new();

    // 1. Input write-back
    if let Some(text) = resp.input {
        events.push(AssistEvent::SetInput { text });
    }

    // 2. Suggestions
    match resp.suggestions {
        SuggestionAction::Show { items, selected } => {
            events.push(AssistEvent::ShowSuggestions { items, selected });
        }
        SuggestionAction::Hide => events.push(AssistEvent::HideSuggestions),
        SuggestionAction::Keep => {}
    }

    // 3. Shadow text
    if let Some(shadow) = resp.shadow_text {
        if shadow.is_empty() {
            events.push(AssistEvent::ClearShadowText);
        } else {
            events.push(AssistEvent::SetShadowText { text: shadow });
        }
    }

    // 4. Radical picker
    if let Some(view) = radicals {
        events.push(AssistEvent::UpdateRadicals(view));
    }
    if resp.radical_backend_failed {
        events.push(AssistEvent::RadicalBackendUnreachable);
    }

    // 5. Submit after everything that changes the input
    if resp.submit {
        events.push(AssistEvent::Submit);
    }

    // 6. Schedule poll
    if has_pending_work {
        events.push(AssistEvent::SchedulePoll);
    }

    EngineResponse {
        consumed: resp.consumed,
        events,
    }
}
