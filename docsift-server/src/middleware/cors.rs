// CORS middleware
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Any origin may call the API; there is no browser session to protect.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600))
}
