//! Object key conventions.
//!
//! Pure string functions. They define where snippets live inside an object
//! store bucket, below an optional deployment prefix such as `"staging/"`.

use uuid::Uuid;

pub fn snippets_prefix(prefix: &str) -> String {
    format!("{prefix}snippets/")
}

pub fn snippet(prefix: &str, id: Uuid) -> String {
    format!("{prefix}snippets/{id}.json")
}

/// Recover the snippet id from an object key produced by [`snippet`].
pub fn snippet_id(prefix: &str, key: &str) -> Option<Uuid> {
    let name = key
        .strip_prefix(&snippets_prefix(prefix))?
        .strip_suffix(".json")?;
    Uuid::parse_str(name).ok()
}
