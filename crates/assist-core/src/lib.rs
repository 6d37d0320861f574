//! Leaf data model for the search-assistance layer: backend wire types, the
//! radical taxonomy, the hashtag catalogue, input tokenisation and settings.

pub mod error;
pub mod hashtags;
pub mod input;
pub mod prefs;
pub mod radicals;
pub mod settings;
pub mod shadow;
pub mod suggestion;
pub mod unicode;

pub use error::FetchError;
pub use input::{watch, InputToken};
pub use suggestion::{Suggestion, SuggestionKind, SuggestionRequest, SuggestionResponse};
