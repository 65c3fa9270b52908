use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use snipbin_core::models::snippet::{NewSnippet, Snippet, SnippetChanges};
use snipbin_core::query::SnippetQuery;

use crate::error::StorageError;
use crate::repository::{Clock, SnippetRepository, system_clock};

/// Process-local snippet store.
///
/// Records are kept in insertion order, which is the natural order list
/// queries see. Nothing survives a restart.
pub struct MemoryRepository {
    snippets: RwLock<Vec<Snippet>>,
    clock: Clock,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            snippets: RwLock::new(Vec::new()),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.snippets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snippets.read().await.is_empty()
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnippetRepository for MemoryRepository {
    async fn create(&self, snippet: NewSnippet) -> Result<Snippet, StorageError> {
        let stored = snippet.into_snippet(Uuid::now_v7(), (self.clock)());
        self.snippets.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_many(&self, query: &SnippetQuery) -> Result<Vec<Snippet>, StorageError> {
        let snippets = self.snippets.read().await;
        Ok(query.apply(snippets.iter().cloned()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StorageError> {
        let snippets = self.snippets.read().await;
        Ok(snippets.iter().find(|s| s.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: SnippetChanges,
    ) -> Result<Option<Snippet>, StorageError> {
        let mut snippets = self.snippets.write().await;
        let Some(snippet) = snippets.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        changes.apply_to(snippet, (self.clock)());
        Ok(Some(snippet.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StorageError> {
        let mut snippets = self.snippets.write().await;
        let removed = snippets
            .iter()
            .position(|s| s.id == id)
            .map(|idx| snippets.remove(idx));
        Ok(removed)
    }
}
