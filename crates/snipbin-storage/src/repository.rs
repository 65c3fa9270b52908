use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use uuid::Uuid;

use snipbin_core::models::snippet::{NewSnippet, Snippet, SnippetChanges};
use snipbin_core::query::SnippetQuery;

use crate::error::StorageError;

/// Source of "now" for anything that stamps or compares times.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Timestamp::now)
}

/// A store of snippets.
///
/// Stores assign ids and maintain `created_at` / `updated_at`. They never
/// look inside `code`; it is stored exactly as given.
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Persist a new snippet and return the stored record.
    async fn create(&self, snippet: NewSnippet) -> Result<Snippet, StorageError>;

    /// Records matching `query`, sorted and paged as it describes.
    async fn find_many(&self, query: &SnippetQuery) -> Result<Vec<Snippet>, StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StorageError>;

    /// Apply `changes` and return the updated record, or `None` if absent.
    async fn update_by_id(
        &self,
        id: Uuid,
        changes: SnippetChanges,
    ) -> Result<Option<Snippet>, StorageError>;

    /// Remove a snippet and return what was removed, or `None` if absent.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StorageError>;
}
