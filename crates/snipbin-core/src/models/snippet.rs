use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::codec;
use crate::error::CoreError;
use crate::expiry;

/// A stored code snippet.
///
/// `code` holds whatever form the record is in at the moment: the encoded
/// storage form straight out of a repository, or plaintext after
/// [`Snippet::decoded`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Snippet {
    pub id: Uuid,
    pub title: String,
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub expires_at: Option<jiff::Timestamp>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    /// Reserved edit history. Carried through storage untouched; nothing
    /// writes to it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub versions: Option<Vec<SnippetVersion>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SnippetVersion {
    pub code: String,
    pub updated_at: jiff::Timestamp,
}

impl Snippet {
    pub fn is_live(&self, now: jiff::Timestamp) -> bool {
        expiry::is_live(self.expires_at, now)
    }

    /// Replace the stored `code` with its plaintext.
    pub fn decoded(mut self) -> Result<Self, CoreError> {
        self.code = codec::decode(&self.code)?;
        Ok(self)
    }
}

/// Parse a client-supplied snippet id.
pub fn parse_id(raw: &str) -> Result<Uuid, CoreError> {
    Ok(Uuid::parse_str(raw.trim())?)
}

/// A snippet ready to be written by a repository. `code` is already encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSnippet {
    pub title: String,
    pub code: String,
    pub language: String,
    pub tags: Vec<String>,
    pub expires_at: Option<jiff::Timestamp>,
}

impl NewSnippet {
    /// Materialize the record a store persists, given its assigned id and
    /// the write time.
    pub fn into_snippet(self, id: Uuid, now: jiff::Timestamp) -> Snippet {
        Snippet {
            id,
            title: self.title,
            code: self.code,
            language: self.language,
            tags: self.tags,
            expires_at: self.expires_at,
            created_at: now,
            updated_at: now,
            versions: None,
        }
    }
}

/// Field-level changes for an update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetChanges {
    pub title: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
    pub expires_at: Option<jiff::Timestamp>,
}

impl SnippetChanges {
    /// Apply the changes in place and refresh `updated_at`.
    pub fn apply_to(self, snippet: &mut Snippet, now: jiff::Timestamp) {
        if let Some(title) = self.title {
            snippet.title = title;
        }
        if let Some(code) = self.code {
            snippet.code = code;
        }
        if let Some(language) = self.language {
            snippet.language = language;
        }
        if let Some(tags) = self.tags {
            snippet.tags = tags;
        }
        if let Some(expires_at) = self.expires_at {
            snippet.expires_at = Some(expires_at);
        }
        snippet.updated_at = now;
    }
}
