//! Knowledge store interface

use async_trait::async_trait;

use crate::candidate::CandidateRecord;
use crate::Result;

/// External knowledge store
///
/// The matcher only reads snapshots. `append` is used by callers after a
/// no-match has been answered some other way and the answer is kept.
///
/// # Example
///
/// ```ignore
/// let store: Arc<dyn KnowledgeStore> = Arc::new(InMemoryKnowledgeStore::new());
/// let candidates = store.snapshot().await?;
/// let outcome = matcher.match_query("WPS kya hai", &candidates);
/// ```
#[async_trait]
pub trait KnowledgeStore: Send + Sync + 'static {
    /// Current candidate snapshot (unordered)
    async fn snapshot(&self) -> Result<Vec<CandidateRecord>>;

    /// Append a new record
    async fn append(&self, record: CandidateRecord) -> Result<()>;

    /// Store name for logging
    fn name(&self) -> &str;
}
