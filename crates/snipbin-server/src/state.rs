use std::sync::Arc;

use crate::service::SnippetService;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<SnippetService>,
}

impl AppState {
    pub fn new(snippets: SnippetService) -> Self {
        Self {
            snippets: Arc::new(snippets),
        }
    }
}
