//! Storage encoding for snippet code.
//!
//! Code is kept as standard base64 over its UTF-8 bytes so quotes, control
//! characters and anything else a client pastes survive the document store
//! untouched. `decode(&encode(x)) == x` for every string.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::CoreError;

/// Encode plaintext code into its stored form. Never fails.
pub fn encode(plaintext: &str) -> String {
    STANDARD.encode(plaintext.as_bytes())
}

/// Decode a stored payload back to plaintext.
///
/// Fails with [`CoreError::InvalidEncoding`] or [`CoreError::InvalidUtf8`]
/// when the payload was not produced by [`encode`].
pub fn decode(encoded: &str) -> Result<String, CoreError> {
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}
