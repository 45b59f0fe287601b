use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Both handles are internally synchronized; requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Completion provider behind a trait object so tests can stub the model.
    pub llm: Arc<dyn CompletionProvider>,
}
