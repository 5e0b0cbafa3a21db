//! Trivia Server - question and quiz API
//!
//! HTTP/JSON server over the trivia store.

pub mod error;
pub mod http;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use trivia_core::{QuizSelector, Store, TriviaConfig};

use crate::error::ApiError;

/// Shared application state
pub struct AppState {
    store: Mutex<Store>,
    pub selector: QuizSelector,
    pub questions_per_page: usize,
}

impl AppState {
    /// Wrap an open store with the paging and quiz settings from `config`
    pub fn new(store: Store, config: &TriviaConfig) -> Self {
        Self {
            store: Mutex::new(store),
            selector: QuizSelector::new(),
            questions_per_page: config.pagination.questions_per_page,
        }
    }

    /// Open the database named in `config`
    pub fn from_config(config: &TriviaConfig) -> trivia_core::Result<Self> {
        let store = Store::open(&config.database.path)?;
        Ok(Self::new(store, config))
    }

    /// Create with an in-memory store and default settings
    pub fn in_memory() -> trivia_core::Result<Self> {
        Ok(Self::new(Store::in_memory()?, &TriviaConfig::default()))
    }

    /// Lock the store for the duration of one request
    pub fn store(&self) -> Result<MutexGuard<'_, Store>, ApiError> {
        self.store
            .lock()
            .map_err(|e| ApiError::internal(format!("Mutex poisoned: {}", e)))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("selector", &self.selector)
            .field("questions_per_page", &self.questions_per_page)
            .finish_non_exhaustive()
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Category endpoints
        .route("/categories", get(http::list_categories))
        .route(
            "/categories/{id}/questions",
            get(http::list_category_questions),
        )
        // Question endpoints
        .route("/questions", get(http::list_questions))
        .route("/questions", post(http::search_or_create_question))
        .route("/questions/{id}", delete(http::delete_question))
        // Quiz endpoints
        .route("/quizzes", post(http::next_quiz_question))
        .fallback(http::not_found)
        .method_not_allowed_fallback(http::method_not_allowed)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Trivia server v{} listening on {}",
        trivia_core::version(),
        addr
    );
    axum::serve(listener, app).await?;
    Ok(())
}
