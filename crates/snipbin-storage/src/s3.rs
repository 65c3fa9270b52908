use async_trait::async_trait;
use aws_sdk_s3::Client;
use uuid::Uuid;

use snipbin_core::keys;
use snipbin_core::models::snippet::{NewSnippet, Snippet, SnippetChanges};
use snipbin_core::query::SnippetQuery;

use crate::error::StorageError;
use crate::objects;
use crate::repository::{Clock, SnippetRepository, system_clock};

/// Snippets stored as one JSON document per object in an S3 bucket.
///
/// S3 cannot evaluate queries, so `find_many` loads every snippet under the
/// prefix and applies the query in process. Natural order is creation order.
#[derive(Clone)]
pub struct S3Repository {
    client: Client,
    bucket: String,
    prefix: String,
    clock: Clock,
}

impl S3Repository {
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
            clock: system_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    async fn load(&self, id: Uuid) -> Result<Option<Snippet>, StorageError> {
        let key = keys::snippet(&self.prefix, id);
        match objects::get_object_opt(&self.client, &self.bucket, &key).await? {
            Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
            None => Ok(None),
        }
    }

    async fn store(&self, snippet: &Snippet) -> Result<(), StorageError> {
        let key = keys::snippet(&self.prefix, snippet.id);
        let body = serde_json::to_vec(snippet)?;
        objects::put_json(&self.client, &self.bucket, &key, body).await
    }
}

#[async_trait]
impl SnippetRepository for S3Repository {
    async fn create(&self, snippet: NewSnippet) -> Result<Snippet, StorageError> {
        let stored = snippet.into_snippet(Uuid::now_v7(), (self.clock)());
        self.store(&stored).await?;
        tracing::debug!(id = %stored.id, bucket = %self.bucket, "stored snippet");
        Ok(stored)
    }

    async fn find_many(&self, query: &SnippetQuery) -> Result<Vec<Snippet>, StorageError> {
        let prefix = keys::snippets_prefix(&self.prefix);
        let object_keys = objects::list_objects(&self.client, &self.bucket, &prefix).await?;

        let mut snippets = Vec::with_capacity(object_keys.len());
        for key in &object_keys {
            if keys::snippet_id(&self.prefix, key).is_none() {
                tracing::warn!(key = %key, "skipping foreign object under snippets prefix");
                continue;
            }
            // deleted between list and get
            let Some(body) = objects::get_object_opt(&self.client, &self.bucket, key).await? else {
                continue;
            };
            let snippet: Snippet = serde_json::from_slice(&body)?;
            snippets.push(snippet);
        }

        snippets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(query.apply(snippets))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StorageError> {
        self.load(id).await
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: SnippetChanges,
    ) -> Result<Option<Snippet>, StorageError> {
        let Some(mut snippet) = self.load(id).await? else {
            return Ok(None);
        };
        changes.apply_to(&mut snippet, (self.clock)());
        self.store(&snippet).await?;
        Ok(Some(snippet))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StorageError> {
        let Some(snippet) = self.load(id).await? else {
            return Ok(None);
        };
        let key = keys::snippet(&self.prefix, id);
        objects::delete_object(&self.client, &self.bucket, &key).await?;
        Ok(Some(snippet))
    }
}
