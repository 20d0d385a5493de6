//! In-memory knowledge store

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::candidate::CandidateRecord;
use crate::traits::KnowledgeStore;
use crate::{Error, Result};

/// Knowledge store backed by a `Vec`
///
/// Suitable for tests and for embedding a fixed question bank.
#[derive(Debug, Default)]
pub struct InMemoryKnowledgeStore {
    records: RwLock<Vec<CandidateRecord>>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records, rejecting duplicate ids
    pub fn with_records(records: Vec<CandidateRecord>) -> Result<Self> {
        let store = Self::new();
        {
            let mut guard = store.records.write();
            for record in records {
                if guard.iter().any(|r| r.id == record.id) {
                    return Err(Error::DuplicateCandidate(record.id));
                }
                guard.push(record);
            }
        }
        Ok(store)
    }

    /// Assign a fresh id (uuid v4) to a record that has none
    pub fn assign_id(record: &mut CandidateRecord) {
        if record.id.trim().is_empty() {
            record.id = uuid::Uuid::new_v4().to_string();
        }
    }

    /// Increment the view counter of a record; false if unknown
    pub fn record_view(&self, id: &str) -> bool {
        let mut guard = self.records.write();
        match guard.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.view_count += 1;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn snapshot(&self) -> Result<Vec<CandidateRecord>> {
        Ok(self.records.read().clone())
    }

    async fn append(&self, mut record: CandidateRecord) -> Result<()> {
        Self::assign_id(&mut record);
        let mut guard = self.records.write();
        if guard.iter().any(|r| r.id == record.id) {
            return Err(Error::DuplicateCandidate(record.id));
        }
        tracing::debug!(id = %record.id, "Appending candidate record");
        guard.push(record);
        Ok(())
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_snapshot() {
        let store = InMemoryKnowledgeStore::new();
        store
            .append(CandidateRecord::new("q1", "What is WPS?", "WPS kya hai?"))
            .await
            .unwrap();
        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "q1");
    }

    #[tokio::test]
    async fn test_duplicate_rejected() {
        let store = InMemoryKnowledgeStore::new();
        store.append(CandidateRecord::new("q1", "a", "")).await.unwrap();
        let err = store.append(CandidateRecord::new("q1", "b", "")).await;
        assert!(matches!(err, Err(Error::DuplicateCandidate(id)) if id == "q1"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_append_assigns_missing_id() {
        let store = InMemoryKnowledgeStore::new();
        store.append(CandidateRecord::new("", "learned question", "")).await.unwrap();
        let snapshot = store.snapshot().await.unwrap();
        assert!(!snapshot[0].id.is_empty());
    }

    #[test]
    fn test_with_records_and_views() {
        let store = InMemoryKnowledgeStore::with_records(vec![
            CandidateRecord::new("q1", "a", ""),
            CandidateRecord::new("q2", "b", ""),
        ])
        .unwrap();
        assert!(store.record_view("q2"));
        assert!(!store.record_view("missing"));
        assert_eq!(store.records.read()[1].view_count, 1);

        let dup = InMemoryKnowledgeStore::with_records(vec![
            CandidateRecord::new("q1", "a", ""),
            CandidateRecord::new("q1", "b", ""),
        ]);
        assert!(dup.is_err());
    }
}
