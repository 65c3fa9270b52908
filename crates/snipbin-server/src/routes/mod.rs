pub mod health;
pub mod snippets;

use crate::error::ApiError;

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
