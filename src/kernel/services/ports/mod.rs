//! Service ports: data contracts shared by the search adapters and consumers.

pub mod search;
pub mod settings;

pub use search::{
    GlobalSearchMessage, Generation, Match, Result as SearchResult, SearchError, SearchErrorKind,
    SearchRequest, SearchSummary,
};
pub use settings::SearchSettings;
