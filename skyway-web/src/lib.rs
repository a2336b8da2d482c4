use axum::{http::Method, response::IntoResponse, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod pages;
pub mod state;
pub mod view;

pub use error::AppError;
pub use state::AppState;

/// Router shared by `main` and the integration tests
pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::USER_AGENT]);

    Router::new()
        .merge(pages::routes())
        .merge(api::routes())
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: axum::http::Uri) -> impl IntoResponse {
    AppError::NotFoundError(format!("No route for {}", uri.path()))
}
