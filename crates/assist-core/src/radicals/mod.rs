//! Radical taxonomy and the `/api/kanji/by_radical` and `/api/radical/search`
//! wire formats.

mod taxonomy;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use taxonomy::{page_groups, StrokeGroup, Taxonomy, GROUPS, PAGE_COUNT};

/// Body of `POST /api/kanji/by_radical`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadicalsRequest {
    pub radicals: Vec<String>,
}

/// Kanji built from every requested radical, grouped by stroke count, and
/// the radicals that can still be added without emptying that set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RadicalsResponse {
    #[serde(default)]
    pub kanji: BTreeMap<u32, Vec<String>>,
    #[serde(default)]
    pub possible_radicals: Vec<String>,
}

/// Body of `POST /api/radical/search`: radicals whose name, reading or
/// meaning matches `query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadicalSearchRequest {
    pub query: String,
    pub picked_radicals: Vec<String>,
}

/// One matching radical.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FoundRadical {
    #[serde(rename = "l")]
    pub literal: String,
    /// Combinable with `picked_radicals`. Advisory: the picker shows the
    /// local mask instead.
    #[serde(rename = "p", default)]
    pub possible: bool,
}

/// Matching radicals grouped by stroke count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RadicalSearchResponse {
    #[serde(default)]
    pub radicals: BTreeMap<u32, Vec<FoundRadical>>,
}
