//! HTTP layer for the bookshelf catalog.
//!
//! Exposes the CRUD REST endpoints under `/api/v1` (gated by the
//! `X-API-User-Name` header) and the server-rendered admin pages under
//! `/admin/books` (ungated, like the original deployment behind a trusted
//! proxy).

pub mod admin;
pub mod auth;
pub mod authors;
pub mod books;
pub mod error;
pub mod state;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

pub use auth::ApiKey;
pub use error::ApiError;
pub use state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/books", get(books::list).post(books::create))
        .route(
            "/books/:id",
            get(books::get_by_id).put(books::update).delete(books::remove),
        )
        .route("/authors", get(authors::list).post(authors::create))
        .route(
            "/authors/:id",
            get(authors::get_by_id)
                .put(authors::update)
                .delete(authors::remove),
        )
        .layer(middleware::from_fn_with_state(
            state.api_key.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .nest("/api/v1", api)
        .merge(admin::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
