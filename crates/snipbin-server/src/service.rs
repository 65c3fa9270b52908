//! Snippet lifecycle operations.
//!
//! The service owns the rules that sit around the repository: required
//! fields, code encoding, expiry computation and visibility of expired
//! snippets.
//!
//! `create` and `update` return the record as stored, with `code` still in
//! its encoded form. `list` and `get` return plaintext `code`. Clients of the
//! existing API depend on this split, so it is kept.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use snipbin_core::codec;
use snipbin_core::error::CoreError;
use snipbin_core::expiry;
use snipbin_core::models::request::{CreateSnippetRequest, ListParams, UpdateSnippetRequest};
use snipbin_core::models::snippet::{self, NewSnippet, Snippet, SnippetChanges};
use snipbin_core::query::QueryBuilder;
use snipbin_storage::error::StorageError;
use snipbin_storage::{Clock, SnippetRepository, system_clock};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid snippet id: {0}")]
    InvalidId(String),

    #[error("snippet not found")]
    NotFound,

    #[error("stored code for snippet {id} cannot be decoded: {source}")]
    Decode {
        id: Uuid,
        #[source]
        source: CoreError,
    },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct SnippetService {
    repo: Arc<dyn SnippetRepository>,
    queries: QueryBuilder,
    clock: Clock,
}

impl SnippetService {
    pub fn new(repo: Arc<dyn SnippetRepository>) -> Self {
        Self {
            repo,
            queries: QueryBuilder::new(),
            clock: system_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_page_size(mut self, max: usize) -> Self {
        self.queries = self.queries.max_limit(max);
        self
    }

    /// Create a snippet. Returns the stored record with encoded `code`.
    pub async fn create(&self, req: CreateSnippetRequest) -> Result<Snippet, ServiceError> {
        let mut missing = Vec::new();
        let title = required(req.title, "title", &mut missing);
        let code = required(req.code, "code", &mut missing);
        let language = required(req.language, "language", &mut missing);

        let (Some(title), Some(code), Some(language)) = (title, code, language) else {
            return Err(ServiceError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        };

        let now = (self.clock)();
        let expires_at = req
            .expires_in_seconds
            .map(|secs| expiry::expires_after(now, secs))
            .transpose()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let stored = self
            .repo
            .create(NewSnippet {
                title,
                code: codec::encode(&code),
                language,
                tags: req.tags.unwrap_or_default(),
                expires_at,
            })
            .await?;

        tracing::info!(id = %stored.id, language = %stored.language, "snippet created");
        Ok(stored)
    }

    /// Live snippets matching `params`, with plaintext `code`.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Snippet>, ServiceError> {
        let query = self.queries.build(params, (self.clock)());
        if let Some(field) = &query.rejected_sort {
            tracing::warn!(sort = %field, "ignoring unknown sort field");
        }

        let records = self.repo.find_many(&query).await?;
        records.into_iter().map(decode).collect()
    }

    /// A single live snippet with plaintext `code`. Expired snippets are
    /// reported as not found.
    pub async fn get(&self, raw_id: &str) -> Result<Snippet, ServiceError> {
        let id = parse_id(raw_id)?;
        let snippet = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if !snippet.is_live((self.clock)()) {
            tracing::debug!(id = %id, "snippet expired");
            return Err(ServiceError::NotFound);
        }

        decode(snippet)
    }

    /// Apply a partial update. Empty strings and a zero TTL leave fields
    /// untouched; any other TTL is measured from now. Expired snippets can still be updated.
    /// Returns the stored record with encoded `code`.
    pub async fn update(
        &self,
        raw_id: &str,
        req: UpdateSnippetRequest,
    ) -> Result<Snippet, ServiceError> {
        let id = parse_id(raw_id)?;
        let now = (self.clock)();

        // a zero TTL on update means "unchanged", unlike on create
        let expires_at = req
            .expires_in_seconds
            .filter(|secs| *secs != 0.0)
            .map(|secs| expiry::expires_after(now, secs))
            .transpose()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let changes = SnippetChanges {
            title: non_empty(req.title),
            code: non_empty(req.code).map(|code| codec::encode(&code)),
            language: non_empty(req.language),
            tags: req.tags,
            expires_at,
        };

        let updated = self
            .repo
            .update_by_id(id, changes)
            .await?
            .ok_or(ServiceError::NotFound)?;

        tracing::info!(id = %id, "snippet updated");
        Ok(updated)
    }

    /// Hard-delete a snippet, live or expired.
    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = parse_id(raw_id)?;
        self.repo
            .delete_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        tracing::info!(id = %id, "snippet deleted");
        Ok(())
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    snippet::parse_id(raw).map_err(|_| ServiceError::InvalidId(raw.to_string()))
}

fn decode(snippet: Snippet) -> Result<Snippet, ServiceError> {
    let id = snippet.id;
    snippet
        .decoded()
        .map_err(|source| ServiceError::Decode { id, source })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = non_empty(value);
    if value.is_none() {
        missing.push(name);
    }
    value
}
