//! HTTP binding of the employer roster.
//!
//! # Responsibility
//! - Expose list/get/create/update/delete over JSON request/response.
//! - Keep transport concerns (status codes, headers, CORS) out of core.
//!
//! # Invariants
//! - Routes are served at the root and under `/api`, where both
//!   `/api/employers` and `/api/Employers` resolve.

pub mod api;
pub mod error;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;

/// Collection spelling used by the original form client.
const LEGACY_EMPLOYERS_PATH: &str = "/Employers";

/// Builds the application router over an opened store.
pub fn create_router(state: AppState) -> Router {
    let api_routes = employer_routes(api::EMPLOYERS_PATH)
        .merge(employer_routes(LEGACY_EMPLOYERS_PATH));

    Router::new()
        .route("/health", get(api::health))
        .merge(employer_routes(api::EMPLOYERS_PATH))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(api::log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn employer_routes(collection: &str) -> Router<AppState> {
    Router::new()
        .route(
            collection,
            get(api::list_employers).post(api::create_employer),
        )
        .route(
            &format!("{collection}/{{id}}"),
            get(api::get_employer)
                .put(api::update_employer)
                .delete(api::delete_employer),
        )
}
