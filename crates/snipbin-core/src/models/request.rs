//! Request bodies accepted by the HTTP API.
//!
//! Every field is optional at the wire level; the service decides what is
//! required. Empty strings are treated the same as absent fields.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateSnippetRequest {
    #[ts(optional)]
    pub title: Option<String>,
    #[ts(optional)]
    pub code: Option<String>,
    #[ts(optional)]
    pub language: Option<String>,
    #[ts(optional)]
    pub tags: Option<Vec<String>>,
    /// Time-to-live in seconds. `expiresIn` is the name older clients send.
    #[serde(alias = "expiresIn")]
    #[ts(optional)]
    pub expires_in_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateSnippetRequest {
    #[ts(optional)]
    pub title: Option<String>,
    #[ts(optional)]
    pub code: Option<String>,
    #[ts(optional)]
    pub language: Option<String>,
    #[ts(optional)]
    pub tags: Option<Vec<String>>,
    #[serde(alias = "expiresIn")]
    #[ts(optional)]
    pub expires_in_seconds: Option<f64>,
}

/// Raw list parameters exactly as they arrive in the query string.
///
/// Kept as strings so malformed numbers fall back to defaults instead of
/// rejecting the whole request. Use [`ListParams::from_pairs`] so repeated
/// keys are tolerated too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub language: Option<String>,
    pub tags: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ListParams {
    /// Collect decoded query-string pairs. Repeated `tags` keys are merged
    /// into one comma-separated list; for other repeated keys the last value
    /// wins. Unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "language" => params.language = Some(value),
                "tags" => {
                    params.tags = Some(match params.tags.take() {
                        Some(prev) => format!("{prev},{value}"),
                        None => value,
                    });
                }
                "page" => params.page = Some(value),
                "limit" => params.limit = Some(value),
                "sort" => params.sort = Some(value),
                "order" => params.order = Some(value),
                _ => {}
            }
        }
        params
    }
}
