//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │   Request log    │ ← timestamp, method, path
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← Adds X-Request-Id header
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP request/response spans
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │      CORS        │ ← Cross-origin headers
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ Error translation│ ← diagnostics in development
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │   Catch panic    │ ← 500 instead of a dropped connection
//! └────────┬─────────┘
//!          ▼
//!   Route (+ API key auth on POST/PUT/DELETE)
//!          ▼
//!      Handler (+ body validation on POST/PUT)
//! ```

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{
    ApiKeyAuth, RequestIdLayer, log_request, panic_response, request_span, translate_errors,
};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// The state (and therefore the catalog) is owned by the returned router;
/// build one per test to get isolated data.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;
    let auth = ApiKeyAuth::new(config.api_key.clone());

    let router = Router::new()
        .route("/", get(handlers::api_info))
        .route("/health", get(handlers::health_check))
        .route(
            "/api/products/stats/summary",
            get(handlers::product_stats),
        )
        .route(
            "/api/products",
            get(handlers::list_products)
                .merge(post(handlers::create_product).route_layer(auth.clone())),
        )
        .route(
            "/api/products/{id}",
            get(handlers::get_product)
                .merge(put(handlers::update_product).route_layer(auth.clone()))
                .merge(delete(handlers::delete_product).route_layer(auth)),
        )
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::route_not_found);

    info!(
        max_body_bytes = config.max_request_body_size,
        environment = %config.environment,
        "Router configured"
    );

    with_middleware(router, state)
}

/// Wrap routes in the application middleware stack and attach state.
fn with_middleware(router: Router<AppState>, state: AppState) -> Router {
    let config = &state.config;

    // Applied bottom to top: the last layer added sees the request first.
    router
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(state.clone(), translate_errors))
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(RequestIdLayer::new())
        .layer(from_fn(log_request))
        .with_state(state)
}

/// Build CORS layer from configuration.
///
/// `*` anywhere in the list allows any origin; otherwise only the listed
/// origins that parse as header values are allowed.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allow_any {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
