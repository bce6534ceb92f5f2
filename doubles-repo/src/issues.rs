//! In-memory issue store.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use doubles_types::{Issue, IssueId, IssueRepository, RepoError};

use crate::memory::MemoryStore;

/// Issue repository backed by a [`MemoryStore`] and a monotonic id counter.
pub struct InMemoryIssueRepo {
    store: MemoryStore<IssueId, Issue>,
    next_id: AtomicI64,
}

impl Default for InMemoryIssueRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIssueRepo {
    /// Creates an empty store whose first id will be 1.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            next_id: AtomicI64::new(IssueId::FIRST.value()),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepo {
    async fn next_issue_id(&self) -> Result<IssueId, RepoError> {
        Ok(IssueId::new(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn get_issue(&self, id: IssueId) -> Result<Option<Issue>, RepoError> {
        Ok(self.store.get(&id))
    }

    async fn save_issue(&self, issue: Issue) -> Result<Issue, RepoError> {
        self.store.put(issue.id, issue.clone());
        tracing::debug!(issue_id = %issue.id, "issue stored");
        Ok(issue)
    }

    async fn delete_issue(&self, id: IssueId) -> Result<bool, RepoError> {
        Ok(self.store.delete(&id).is_some())
    }

    async fn list_issues(&self) -> Result<Vec<Issue>, RepoError> {
        Ok(self.store.list())
    }
}
