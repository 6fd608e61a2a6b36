use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Search lifecycle
        .route(
            "/search",
            post(handlers::submit_search).get(handlers::get_search),
        )
        // Detail view
        .route(
            "/selection",
            get(handlers::get_selection).delete(handlers::clear_selection),
        )
        .route("/selection/:id", put(handlers::select_place))
        // AI extras
        .route("/places/:id/image", get(handlers::place_image))
        .route("/tagline", get(handlers::tagline))
        // Curated data
        .route("/catalog", get(handlers::catalog))
}
