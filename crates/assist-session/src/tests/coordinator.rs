use assist_core::radicals::{FoundRadical, RadicalSearchResponse, RadicalsResponse};
use assist_core::{FetchError, SuggestionKind};

use super::{response, words};
use crate::{
    AssistResponse, AssistanceCoordinator, Key, RadicalState, RequestId, SuggestionAction,
    SuggestionConfig,
};

fn coordinator() -> AssistanceCoordinator {
    AssistanceCoordinator::new(SuggestionConfig::default())
}

fn query_id(resp: &AssistResponse) -> RequestId {
    resp.suggestion_query
        .as_ref()
        .map(|q| q.id)
        .expect("expected a suggestion query")
}

fn shown(resp: &AssistResponse) -> (Vec<String>, usize) {
    match &resp.suggestions {
        SuggestionAction::Show { items, selected } => (
            items.iter().map(|s| s.primary.clone()).collect(),
            *selected,
        ),
        other => panic!("expected Show, got {other:?}"),
    }
}

/// Type `raw` and answer the resulting fetch with `words`.
fn type_and_answer(c: &mut AssistanceCoordinator, raw: &str, list: &[&str]) -> AssistResponse {
    let resp = c.handle_input(raw);
    let id = query_id(&resp);
    c.receive_suggestions(id, Ok(words(list)))
        .expect("response should apply")
}

#[test]
fn test_typing_fetches_and_shows() {
    let mut c = coordinator();
    let resp = c.handle_input("ho");
    assert!(resp.consumed);
    assert_eq!(resp.suggestions, SuggestionAction::Keep);
    let id = query_id(&resp);

    let resp = c.receive_suggestions(id, Ok(words(&["house", "horse"]))).unwrap();
    assert_eq!(shown(&resp), (vec!["house".into(), "horse".into()], 0));
    assert_eq!(resp.shadow_text.as_deref(), Some(""));
}

#[test]
fn test_unchanged_input_is_not_consumed() {
    let mut c = coordinator();
    c.handle_input("ho");
    let resp = c.handle_input("ho");
    assert!(!resp.consumed);
    assert!(resp.suggestion_query.is_none());
}

#[test]
fn test_second_keystroke_cancels_first_fetch() {
    let mut c = coordinator();
    let first = query_id(&c.handle_input("h"));
    let resp = c.handle_input("ho");
    assert!(resp.cancel_suggestions);
    let second = query_id(&resp);

    assert!(c.receive_suggestions(first, Ok(words(&["hat"]))).is_none());
    let resp = c.receive_suggestions(second, Ok(words(&["house"]))).unwrap();
    assert_eq!(shown(&resp).0, vec!["house".to_string()]);
}

#[test]
fn test_arrow_keys_drive_shadow_text() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ho", &["house", "horse"]);

    let resp = c.handle_key(Key::Down);
    assert_eq!(shown(&resp).1, 1);
    assert_eq!(resp.shadow_text.as_deref(), Some("house"));

    let resp = c.handle_key(Key::Up);
    assert_eq!(shown(&resp).1, 0);
    assert_eq!(resp.shadow_text.as_deref(), Some(""));

    let resp = c.handle_key(Key::Up);
    assert_eq!(shown(&resp).1, 2);
    assert_eq!(resp.shadow_text.as_deref(), Some("horse"));
}

#[test]
fn test_shadow_follows_input_while_fetching() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ho", &["house", "horse"]);
    let resp = c.handle_key(Key::Down);
    assert_eq!(resp.shadow_text.as_deref(), Some("house"));

    // Still matches the selection: shadow extends the new input
    let resp = c.handle_input("hou");
    assert!(resp.suggestion_query.is_some());
    assert_eq!(resp.suggestions, SuggestionAction::Keep);
    assert_eq!(resp.shadow_text.as_deref(), Some("house"));

    // Diverged: the stale shadow is cleared before the reply arrives
    let resp = c.handle_input("hox");
    assert!(resp.suggestion_query.is_some());
    assert_eq!(resp.suggestions, SuggestionAction::Keep);
    assert_eq!(resp.shadow_text.as_deref(), Some(""));
}

#[test]
fn test_tab_selects_then_activates() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ho", &["house"]);

    let resp = c.handle_key(Key::Tab);
    assert_eq!(shown(&resp).1, 1);
    assert!(resp.input.is_none());

    let resp = c.handle_key(Key::Tab);
    assert_eq!(resp.input.as_deref(), Some("house"));
    assert_eq!(resp.suggestions, SuggestionAction::Hide);
    assert_eq!(c.input().raw, "house");
    assert_eq!(c.input().token, "house");
    assert!(!resp.submit);
}

#[test]
fn test_enter_activates_and_submits() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ho", &["house"]);
    c.handle_key(Key::Down);
    let resp = c.handle_key(Key::Enter);
    assert_eq!(resp.input.as_deref(), Some("house"));
    assert!(resp.submit);

    // Nothing selected: submit the literal input
    let resp = c.handle_key(Key::Enter);
    assert!(resp.input.is_none());
    assert!(resp.submit);
}

#[test]
fn test_activation_cancels_outstanding_fetch() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ho", &["house"]);
    // The "ho" list stays up while "hou" is fetched
    let pending = query_id(&c.handle_input("hou"));
    let resp = c.handle_key(Key::Down);
    assert_eq!(shown(&resp).1, 1);

    let resp = c.handle_key(Key::Tab);
    assert!(resp.cancel_suggestions);
    assert_eq!(resp.input.as_deref(), Some("house"));
    assert!(c.receive_suggestions(pending, Ok(words(&["hour"]))).is_none());
    assert!(c.suggestions().is_empty());
}

#[test]
fn test_kanji_reading_activation() {
    let mut c = coordinator();
    let id = query_id(&c.handle_input("にほ"));
    let list = response(SuggestionKind::KanjiReading, &[("にほんご", Some("日本語"))]);
    c.receive_suggestions(id, Ok(list)).unwrap();
    let resp = c.handle_key(Key::Down);
    assert_eq!(resp.shadow_text.as_deref(), Some("にほんご"));
    let resp = c.handle_key(Key::Tab);
    assert_eq!(resp.input.as_deref(), Some("日本語 にほんご"));
}

#[test]
fn test_hashtag_shows_immediately() {
    let mut c = coordinator();
    let resp = c.handle_input("cat #ve");
    assert!(resp.suggestion_query.is_none());
    assert_eq!(shown(&resp).0, vec!["#verb".to_string()]);

    c.handle_key(Key::Down);
    let resp = c.handle_key(Key::Tab);
    assert_eq!(resp.input.as_deref(), Some("cat #verb"));
}

#[test]
fn test_empty_input_hides() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ho", &["house"]);
    let resp = c.handle_input("");
    assert_eq!(resp.suggestions, SuggestionAction::Hide);
    assert_eq!(resp.shadow_text.as_deref(), Some(""));
}

#[test]
fn test_failure_hides_list() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ho", &["house"]);
    let id = query_id(&c.handle_input("hou"));
    let err = FetchError::Network {
        msg: "refused".into(),
    };
    let resp = c.receive_suggestions(id, Err(err)).unwrap();
    assert_eq!(resp.suggestions, SuggestionAction::Hide);
}

#[test]
fn test_blur_keeps_list_for_focus() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ho", &["house"]);
    let resp = c.blur();
    assert_eq!(resp.suggestions, SuggestionAction::Hide);

    let resp = c.focus();
    assert!(resp.suggestion_query.is_none());
    assert_eq!(shown(&resp).0, vec!["house".to_string()]);

    // A second focus without blur refetches
    let resp = c.focus();
    assert!(resp.suggestion_query.is_some());
}

#[test]
fn test_picker_filter_flows_into_suggestions() {
    let mut c = coordinator();
    type_and_answer(&mut c, "ki", &["木"]);

    let resp = c.open_picker();
    assert!(c.is_picker_open());
    assert!(resp.radicals_changed);
    assert!(resp.suggestion_query.as_ref().unwrap().request.radicals.is_empty());

    let resp = c.toggle_radical("木");
    let radical_query = resp.radical_query.clone().unwrap();
    assert_eq!(radical_query.radicals, vec!["木".to_string()]);
    assert!(resp.cancel_suggestions);
    let suggestion_query = resp.suggestion_query.as_ref().unwrap();
    assert_eq!(suggestion_query.request.radicals, vec!["木".to_string()]);

    let applied = c
        .receive_radicals(
            &radical_query,
            Ok(RadicalsResponse {
                possible_radicals: vec!["日".into()],
                ..RadicalsResponse::default()
            }),
        )
        .unwrap();
    assert!(applied.radicals_changed);
    assert_eq!(c.radicals().state("口"), Some(RadicalState::Disabled));

    // Disabled radicals are not toggleable
    let resp = c.toggle_radical("口");
    assert!(!resp.consumed);
    assert!(resp.suggestion_query.is_none());
}

#[test]
fn test_closed_picker_sends_no_filter() {
    let mut c = coordinator();
    c.handle_input("ki");
    let resp = c.toggle_radical("木");
    assert!(resp.radical_query.is_some());
    assert!(resp.suggestion_query.as_ref().unwrap().request.radicals.is_empty());
}

#[test]
fn test_deselecting_last_radical_resets_without_query() {
    let mut c = coordinator();
    c.open_picker();
    let q = c.toggle_radical("一").radical_query.unwrap();
    c.receive_radicals(&q, Ok(RadicalsResponse::default()));
    assert_eq!(c.radicals().state("二"), Some(RadicalState::Disabled));

    let resp = c.toggle_radical("一");
    assert!(resp.radical_query.is_none());
    assert!(resp.radicals_changed);
    assert_eq!(c.radicals().state("二"), Some(RadicalState::Unselected));
}

#[test]
fn test_close_picker_resets_mask() {
    let mut c = coordinator();
    c.handle_input("ki");
    c.open_picker();
    c.toggle_radical("木");
    let resp = c.close_picker();
    assert!(!c.is_picker_open());
    assert!(resp.radicals_changed);
    assert!(!c.radicals().has_selection());
    assert!(resp.suggestion_query.as_ref().unwrap().request.radicals.is_empty());
}

#[test]
fn test_stale_radical_response_is_dropped() {
    let mut c = coordinator();
    c.open_picker();
    let q1 = c.toggle_radical("一").radical_query.unwrap();
    c.toggle_radical("二");
    assert!(c.receive_radicals(&q1, Ok(RadicalsResponse::default())).is_none());
}

#[test]
fn test_radical_backend_failure_is_reported() {
    let mut c = coordinator();
    c.open_picker();
    let q = c.toggle_radical("一").radical_query.unwrap();
    let err = FetchError::Status { status: 500 };
    let resp = c.receive_radicals(&q, Err(err)).unwrap();
    assert!(resp.radical_backend_failed);
    assert!(!resp.radicals_changed);
}

#[test]
fn test_pick_kanji_appends_to_input() {
    let mut c = coordinator();
    c.handle_input("日本");
    let resp = c.pick_kanji("語");
    assert_eq!(resp.input.as_deref(), Some("日本語"));
    assert_eq!(resp.suggestion_query.as_ref().unwrap().request.input, "日本語");
    assert_eq!(c.input().raw, "日本語");
}

fn found(items: &[(u32, &[&str])]) -> RadicalSearchResponse {
    let mut resp = RadicalSearchResponse::default();
    for (strokes, glyphs) in items {
        resp.radicals.insert(
            *strokes,
            glyphs
                .iter()
                .map(|g| FoundRadical {
                    literal: g.to_string(),
                    possible: true,
                })
                .collect(),
        );
    }
    resp
}

#[test]
fn test_radical_search_issues_query() {
    let mut c = coordinator();
    c.open_picker();
    let resp = c.search_radicals("mouth");
    assert!(!resp.cancel_radical_search);
    let query = resp.radical_search.unwrap();
    assert_eq!(query.request.query, "mouth");
    assert!(query.request.picked_radicals.is_empty());
    assert_eq!(c.radicals().search_in_flight(), Some(query.id));
}

#[test]
fn test_radical_search_supersedes_previous() {
    let mut c = coordinator();
    let first = c.search_radicals("mo").radical_search.unwrap();
    let resp = c.search_radicals("mouth");
    assert!(resp.cancel_radical_search);
    let second = resp.radical_search.unwrap();
    assert_ne!(first.id, second.id);

    assert!(c
        .receive_radical_search(first.id, Ok(found(&[(1, &["一"])])))
        .is_none());
    assert!(!c.radicals().has_search_results());

    let resp = c
        .receive_radical_search(second.id, Ok(found(&[(3, &["口"])])))
        .unwrap();
    assert!(resp.radicals_changed);
    let groups = c.radicals().search_results();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].strokes, 3);
    assert_eq!(groups[0].radicals, vec![("口", RadicalState::Unselected)]);
}

#[test]
fn test_radical_search_results_show_current_mask() {
    let mut c = coordinator();
    c.open_picker();
    let q = c.toggle_radical("一").radical_query.unwrap();
    c.receive_radicals(
        &q,
        Ok(RadicalsResponse {
            possible_radicals: vec!["口".into()],
            ..RadicalsResponse::default()
        }),
    );

    let search = c.search_radicals("one").radical_search.unwrap();
    assert_eq!(search.request.picked_radicals, vec!["一".to_string()]);
    c.receive_radical_search(search.id, Ok(found(&[(1, &["一"]), (3, &["口", "土"])])))
        .unwrap();
    let groups = c.radicals().search_results();
    assert_eq!(groups[0].radicals, vec![("一", RadicalState::Selected)]);
    assert_eq!(
        groups[1].radicals,
        vec![("口", RadicalState::Unselected), ("土", RadicalState::Disabled)]
    );

    // Later mask changes show through without searching again
    c.reset_radicals();
    let groups = c.radicals().search_results();
    assert_eq!(groups[0].radicals, vec![("一", RadicalState::Unselected)]);
    assert_eq!(groups[1].radicals[1], ("土", RadicalState::Unselected));
}

#[test]
fn test_blank_radical_search_clears_results() {
    let mut c = coordinator();
    let q = c.search_radicals("mouth").radical_search.unwrap();
    c.receive_radical_search(q.id, Ok(found(&[(3, &["口"])])));
    assert!(c.radicals().has_search_results());

    let pending = c.search_radicals("mout").radical_search.unwrap();
    let resp = c.search_radicals("  ");
    assert!(resp.cancel_radical_search);
    assert!(resp.radical_search.is_none());
    assert!(resp.radicals_changed);
    assert!(!c.radicals().has_search_results());
    assert!(c
        .receive_radical_search(pending.id, Ok(found(&[(3, &["口"])])))
        .is_none());
}

#[test]
fn test_radical_search_failure_drops_results() {
    let mut c = coordinator();
    let q = c.search_radicals("mouth").radical_search.unwrap();
    c.receive_radical_search(q.id, Ok(found(&[(3, &["口"])])));
    let q = c.search_radicals("tree").radical_search.unwrap();
    let resp = c
        .receive_radical_search(q.id, Err(FetchError::Status { status: 500 }))
        .unwrap();
    assert!(resp.radicals_changed);
    assert!(!c.radicals().has_search_results());
}

#[test]
fn test_radical_search_skips_unknown_glyphs() {
    let mut c = coordinator();
    let q = c.search_radicals("x").radical_search.unwrap();
    c.receive_radical_search(q.id, Ok(found(&[(2, &["x"]), (3, &["口", "y"])])));
    let groups = c.radicals().search_results();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].radicals, vec![("口", RadicalState::Unselected)]);
}
