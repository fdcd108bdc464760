//! Headless search core: the consumer-side results model plus the services it drives.

pub mod search;
pub mod services;

pub use search::{SearchFileResult, SearchOutcome, SearchState};
