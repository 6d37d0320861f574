//! Suggestion and radical-picker state machines for the search bar.
//!
//! Nothing here performs I/O. Every operation returns an [`AssistResponse`]
//! describing what the caller must render and which backend queries it must
//! submit; results are fed back through the `receive_*` methods.

pub(crate) mod types;

mod coordinator;
mod radicals;
mod suggestion;

#[cfg(test)]
mod tests;

pub use coordinator::AssistanceCoordinator;
pub use radicals::{
    ApplyOutcome, RadicalConstraintSet, RadicalState, SearchGroup, SearchOutcome, TabStatus,
    ToggleOutcome,
};
pub use suggestion::{
    Activation, ActivationMode, ReceiveOutcome, SuggestionConfig, SuggestionSession, Update,
    UpdateOutcome,
};
pub use types::{
    AssistResponse, Key, RadicalQuery, RadicalSearchQuery, RequestId, SuggestionAction,
    SuggestionQuery,
};
