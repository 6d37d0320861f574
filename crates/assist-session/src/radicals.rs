use std::collections::{BTreeMap, HashSet};

use assist_core::radicals::{
    page_groups, RadicalSearchRequest, RadicalSearchResponse, RadicalsResponse, Taxonomy,
};
use assist_core::FetchError;
use tracing::{debug, debug_span, warn};

use crate::types::{RadicalQuery, RadicalSearchQuery, RequestId};

/// Per-radical picker state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RadicalState {
    #[default]
    Unselected,
    Selected,
    /// Ruled out by the latest constraint response. Advisory only.
    Disabled,
}

/// Summary state of a stroke-group tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStatus {
    Disabled,
    Normal,
    Highlighted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Unknown or disabled radical.
    Ignored,
    /// Selection became empty; every mask was reset locally.
    Reset,
    /// The caller must run this constraint query.
    Query(RadicalQuery),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The selection changed since the query was issued; discarded.
    Stale,
    /// Backend failure; mask left as-is.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query: results dropped, nothing to fetch.
    Cleared,
    /// The caller must run this search.
    Query(RadicalSearchQuery),
}

/// Search hits of one stroke count, each with its current mask state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGroup {
    pub strokes: u32,
    pub radicals: Vec<(&'static str, RadicalState)>,
}

/// Tri-state mask over the fixed radical taxonomy plus the kanji matching the
/// current selection.
pub struct RadicalConstraintSet {
    taxonomy: &'static Taxonomy,
    states: Vec<RadicalState>,
    kanji: BTreeMap<u32, Vec<String>>,
    /// Outstanding radical text search.
    search: Option<RequestId>,
    next_search_id: u64,
    /// Taxonomy positions found by the latest search, by stroke count.
    search_hits: BTreeMap<u32, Vec<usize>>,
}

impl Default for RadicalConstraintSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RadicalConstraintSet {
    pub fn new() -> Self {
        let taxonomy = Taxonomy::global();
        Self {
            taxonomy,
            states: vec![RadicalState::Unselected; taxonomy.len()],
            kanji: BTreeMap::new(),
            search: None,
            next_search_id: 0,
            search_hits: BTreeMap::new(),
        }
    }

    pub fn taxonomy(&self) -> &'static Taxonomy {
        self.taxonomy
    }

    pub fn state(&self, glyph: &str) -> Option<RadicalState> {
        self.taxonomy.position(glyph).map(|i| self.states[i])
    }

    /// States in taxonomy order.
    pub fn states(&self) -> &[RadicalState] {
        &self.states
    }

    /// Kanji matching the current selection, keyed by stroke count.
    pub fn kanji_results(&self) -> &BTreeMap<u32, Vec<String>> {
        &self.kanji
    }

    pub fn has_selection(&self) -> bool {
        self.states.contains(&RadicalState::Selected)
    }

    /// Selected glyphs in taxonomy order.
    pub fn selected_glyphs(&self) -> Vec<String> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == RadicalState::Selected)
            .map(|(i, _)| self.taxonomy.glyph(i).to_string())
            .collect()
    }

    pub fn toggle(&mut self, glyph: &str) -> ToggleOutcome {
        let _span = debug_span!("radical_toggle", glyph).entered();
        let Some(pos) = self.taxonomy.position(glyph) else {
            return ToggleOutcome::Ignored;
        };
        self.states[pos] = match self.states[pos] {
            RadicalState::Disabled => return ToggleOutcome::Ignored,
            RadicalState::Selected => RadicalState::Unselected,
            RadicalState::Unselected => RadicalState::Selected,
        };

        let radicals = self.selected_glyphs();
        if radicals.is_empty() {
            self.clear_disabled();
            self.kanji.clear();
            return ToggleOutcome::Reset;
        }
        debug!(count = radicals.len(), "issuing constraint query");
        ToggleOutcome::Query(RadicalQuery { radicals })
    }

    /// Clear every selection and disabled mark. No backend call.
    pub fn reset(&mut self) {
        self.states.fill(RadicalState::Unselected);
        self.kanji.clear();
    }

    /// Apply the response to `query`, relative to the mask as it is now.
    pub fn receive(
        &mut self,
        query: &RadicalQuery,
        result: Result<RadicalsResponse, FetchError>,
    ) -> ApplyOutcome {
        if query.radicals != self.selected_glyphs() {
            debug!("dropping constraint response for an outdated selection");
            return ApplyOutcome::Stale;
        }
        let resp = match result {
            Ok(resp) => resp,
            Err(FetchError::Aborted) => return ApplyOutcome::Stale,
            Err(e) => {
                warn!(error = %e, "radical constraint query failed");
                return ApplyOutcome::Failed;
            }
        };

        let possible: HashSet<&str> = resp.possible_radicals.iter().map(String::as_str).collect();
        for (i, state) in self.states.iter_mut().enumerate() {
            if *state == RadicalState::Selected {
                continue;
            }
            *state = if possible.contains(self.taxonomy.glyph(i)) {
                RadicalState::Unselected
            } else {
                RadicalState::Disabled
            };
        }
        self.kanji = resp.kanji;
        ApplyOutcome::Applied
    }

    /// Start a text search for radicals, superseding the outstanding one.
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        let _span = debug_span!("radical_search", query).entered();
        let query = query.trim();
        if query.is_empty() {
            self.search = None;
            self.search_hits.clear();
            return SearchOutcome::Cleared;
        }
        self.next_search_id += 1;
        let id = RequestId(self.next_search_id);
        self.search = Some(id);
        SearchOutcome::Query(RadicalSearchQuery {
            id,
            request: RadicalSearchRequest {
                query: query.to_string(),
                picked_radicals: self.selected_glyphs(),
            },
        })
    }

    /// Forget the outstanding search, if any.
    pub fn cancel_search(&mut self) -> Option<RequestId> {
        self.search.take()
    }

    pub fn search_in_flight(&self) -> Option<RequestId> {
        self.search
    }

    /// Apply the result of search `id`. Glyphs outside the taxonomy are
    /// dropped.
    pub fn receive_search(
        &mut self,
        id: RequestId,
        result: Result<RadicalSearchResponse, FetchError>,
    ) -> ApplyOutcome {
        if self.search != Some(id) {
            debug!(?id, "dropping stale radical search response");
            return ApplyOutcome::Stale;
        }
        self.search = None;
        let resp = match result {
            Ok(resp) => resp,
            Err(FetchError::Aborted) => return ApplyOutcome::Stale,
            Err(e) => {
                warn!(error = %e, "radical search failed");
                self.search_hits.clear();
                return ApplyOutcome::Failed;
            }
        };

        let taxonomy = self.taxonomy;
        self.search_hits = resp
            .radicals
            .into_iter()
            .filter_map(|(strokes, found)| {
                let positions: Vec<usize> = found
                    .iter()
                    .filter_map(|r| taxonomy.position(&r.literal))
                    .collect();
                (!positions.is_empty()).then_some((strokes, positions))
            })
            .collect();
        ApplyOutcome::Applied
    }

    pub fn has_search_results(&self) -> bool {
        !self.search_hits.is_empty()
    }

    /// Latest search hits seen through the mask as it is now.
    pub fn search_results(&self) -> Vec<SearchGroup> {
        self.search_hits
            .iter()
            .map(|(strokes, positions)| SearchGroup {
                strokes: *strokes,
                radicals: positions
                    .iter()
                    .map(|&i| (self.taxonomy.glyph(i), self.states[i]))
                    .collect(),
            })
            .collect()
    }

    /// Highlighted if anything in the group is selected, Normal if anything
    /// is still selectable, Disabled otherwise.
    pub fn tab_status(&self, group: usize) -> TabStatus {
        let Some(range) = self.taxonomy.group_range(group) else {
            return TabStatus::Disabled;
        };
        fold_status(self.states[range].iter().copied())
    }

    /// Status of picker page `page`, folded over the groups it shows.
    pub fn page_status(&self, page: usize) -> TabStatus {
        page_groups(page)
            .map(|g| self.tab_status(g))
            .fold(TabStatus::Disabled, |acc, s| match (acc, s) {
                (TabStatus::Highlighted, _) | (_, TabStatus::Highlighted) => TabStatus::Highlighted,
                (TabStatus::Normal, _) | (_, TabStatus::Normal) => TabStatus::Normal,
                _ => TabStatus::Disabled,
            })
    }

    fn clear_disabled(&mut self) {
        for state in &mut self.states {
            if *state == RadicalState::Disabled {
                *state = RadicalState::Unselected;
            }
        }
    }
}

fn fold_status(states: impl Iterator<Item = RadicalState>) -> TabStatus {
    let mut status = TabStatus::Disabled;
    for state in states {
        match state {
            RadicalState::Selected => return TabStatus::Highlighted,
            RadicalState::Unselected => status = TabStatus::Normal,
            RadicalState::Disabled => {}
        }
    }
    status
}
