//! Service-level endpoints: endpoint directory, health, and the fallback
//! for unmatched routes.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::http::{Method, Uri};
use chrono::Utc;
use tracing::instrument;

use crate::error::AppError;
use crate::models::{ApiInfo, HealthResponse};
use crate::state::AppState;

/// Endpoint directory served at `GET /`.
pub const ENDPOINTS: [(&str, &str); 8] = [
    ("GET /", "This welcome message"),
    ("GET /health", "Service health and uptime"),
    (
        "GET /api/products",
        "Get all products (supports filtering, pagination, search)",
    ),
    ("GET /api/products/:id", "Get a specific product by ID"),
    (
        "POST /api/products",
        "Create a new product (requires x-api-key header)",
    ),
    (
        "PUT /api/products/:id",
        "Update a product (requires x-api-key header)",
    ),
    (
        "DELETE /api/products/:id",
        "Delete a product (requires x-api-key header)",
    ),
    (
        "GET /api/products/stats/summary",
        "Get product statistics by category",
    ),
];

/// Describe the available endpoints.
pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        success: true,
        message: "Welcome to the Product API! Go to /api/products to see all products.",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.into_iter().collect::<BTreeMap<_, _>>(),
    })
}

/// Liveness check.
///
/// # Response Body
///
/// ```json
/// {
///   "success": true,
///   "status": "healthy",
///   "version": "0.1.0",
///   "productCount": 5,
///   "uptimeSeconds": 42,
///   "timestamp": "2024-01-15T10:30:00Z"
/// }
/// ```
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        product_count: state.catalog.len().await,
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
    })
}

/// Fallback for requests that matched no route (or no method on a route).
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    AppError::route_not_found(method.as_str(), path)
}
