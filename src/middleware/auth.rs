//! API key authentication middleware.
//!
//! Guards the mutating product routes (create, update, delete). Clients
//! pass the shared secret in the `X-API-Key` header:
//!
//! ```bash
//! curl -X DELETE -H "X-API-Key: your-secret-key" http://localhost:3000/api/products/1
//! ```
//!
//! Rejections are returned as [`AppError::Authentication`] so they go
//! through the same error translation as every other failure.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::AppError;

/// Header name for API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Message when the header is absent.
pub const MISSING_API_KEY: &str = "API key is required. Please provide x-api-key header.";

/// Message when the header does not match the configured key.
pub const INVALID_API_KEY: &str = "Invalid API key provided.";

/// API key authentication layer.
///
/// Applied per route rather than globally, so read-only endpoints stay
/// public.
#[derive(Clone)]
pub struct ApiKeyAuth {
    expected_key: Arc<String>,
}

impl ApiKeyAuth {
    /// Create a new API key auth layer expecting `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            expected_key: Arc::new(api_key.into()),
        }
    }

    /// Check a request's credentials against the expected key.
    pub fn authorize<B>(&self, req: &Request<B>) -> Result<(), AppError> {
        check_api_key(req, &self.expected_key)
    }
}

impl<S> Layer<S> for ApiKeyAuth {
    type Service = ApiKeyAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuthService {
            inner,
            auth: self.clone(),
        }
    }
}

/// API key authentication service wrapper.
#[derive(Clone)]
pub struct ApiKeyAuthService<S> {
    inner: S,
    auth: ApiKeyAuth,
}

impl<S> Service<Request<Body>> for ApiKeyAuthService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let verdict = self.auth.authorize(&req);

        // Swap in a fresh clone so the instance that was polled ready is the
        // one that handles this request.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match verdict {
                Ok(()) => inner.call(req).await,
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}

/// Validate the `X-API-Key` header of a request.
fn check_api_key<B>(req: &Request<B>, expected: &str) -> Result<(), AppError> {
    let path = req.uri().path();

    let header_value = match req.headers().get(API_KEY_HEADER) {
        Some(value) if !value.is_empty() => value,
        _ => {
            warn!(path, "Missing API key");
            return Err(AppError::Authentication(MISSING_API_KEY.to_string()));
        }
    };

    // Non-ASCII header values can never match and count as invalid.
    match header_value.to_str() {
        Ok(provided) if constant_time_eq(provided, expected) => {
            debug!(path, "API key authentication successful");
            Ok(())
        }
        _ => {
            warn!(path, "Invalid API key provided");
            Err(AppError::Authentication(INVALID_API_KEY.to_string()))
        }
    }
}

/// Perform constant-time comparison of two strings.
///
/// This prevents timing attacks where an attacker could determine
/// the correct API key by measuring response times.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn request(key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/products");
        if let Some(key) = key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_matching_key_is_authorized() {
        let auth = ApiKeyAuth::new("secret");
        assert!(auth.authorize(&request(Some("secret"))).is_ok());
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let auth = ApiKeyAuth::new("secret");
        let err = auth.authorize(&request(None)).unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
        assert_eq!(err.to_string(), MISSING_API_KEY);
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let auth = ApiKeyAuth::new("secret");
        let err = auth.authorize(&request(Some("guess"))).unwrap_err();
        assert_eq!(err.to_string(), INVALID_API_KEY);
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let auth = ApiKeyAuth::new("secret");
        let err = auth.authorize(&request(Some(""))).unwrap_err();
        assert_eq!(err.to_string(), MISSING_API_KEY);
    }

    #[test]
    fn test_key_comparison_is_case_sensitive() {
        let auth = ApiKeyAuth::new("secret");
        assert!(auth.authorize(&request(Some("SECRET"))).is_err());
    }

    #[test]
    fn test_constant_time_eq_different_lengths() {
        assert!(!constant_time_eq("short", "much-longer-string"));
        assert!(constant_time_eq("secret123", "secret123"));
    }
}
