//! Core traits for the matcher
//!
//! ```text
//! Knowledge:
//!   - KnowledgeStore: candidate snapshot + append of learned records
//!
//! Observability:
//!   - MatchObserver: diagnostic sink for search events
//! ```

mod observer;
mod store;

pub use observer::{MatchEvent, MatchObserver, NoopObserver};
pub use store::KnowledgeStore;
