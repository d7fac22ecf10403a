use std::sync::Arc;

use axum::http::StatusCode;
use axum::http::header::{HeaderValue, WWW_AUTHENTICATE};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::validation::FieldViolation;

/// Generic message shown to clients for unclassified failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-wide error types with their HTTP classification.
///
/// Only three kinds are surfaced to clients with their own message:
/// not found (404), validation (400) and authentication (401). Everything
/// else is reported as an unclassified internal error (500) with a generic
/// message; the details stay in the server logs.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldViolation>,
    },

    #[error("{0}")]
    Authentication(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Not-found error for a product id.
    pub fn product_not_found(id: &str) -> Self {
        Self::NotFound(format!("Product with id {id} not found"))
    }

    /// Not-found error for a request that matched no route.
    pub fn route_not_found(method: &str, path: &str) -> Self {
        Self::NotFound(format!("Route {method} {path} not found"))
    }

    /// Validation error from a non-empty list of violations.
    ///
    /// The headline message is the first violation's message.
    pub fn validation(fields: Vec<FieldViolation>) -> Self {
        let message = fields
            .first()
            .map(|f| f.message.clone())
            .unwrap_or_else(|| "Request validation failed".to_string());
        Self::Validation { message, fields }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::ConfigError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error name reported in the `error.name` field.
    pub fn name(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFoundError",
            AppError::Validation { .. } | AppError::MalformedBody(_) => "ValidationError",
            AppError::Authentication(_) => "AuthenticationError",
            AppError::ConfigError(_) | AppError::Internal(_) => "InternalServerError",
        }
    }

    /// Message that is safe to show to clients.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Authentication(msg) => msg.clone(),
            AppError::Validation { message, .. } => message.clone(),
            AppError::MalformedBody(e) => sanitize_serde_error(e),
            AppError::ConfigError(_) | AppError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Diagnostic rendering used as `error.stack` in development.
    fn diagnostics(&self) -> String {
        match self {
            // anyhow's Debug output carries the cause chain and, when
            // RUST_BACKTRACE is set, the captured backtrace.
            AppError::Internal(e) => format!("{e:?}"),
            other => format!("{other:?}"),
        }
    }

    /// Translate this error into the HTTP response sent to the client.
    ///
    /// Every failure in the application ends up here, either through
    /// [`IntoResponse`] or through the error translation middleware when
    /// diagnostics are enabled.
    pub fn render(&self, expose_diagnostics: bool) -> Response {
        let fields = match self {
            AppError::Validation { fields, .. } => fields.as_slice(),
            _ => &[],
        };

        let body = ErrorResponse {
            success: false,
            error: ErrorDetail {
                name: self.name(),
                message: self.public_message(),
                fields,
                stack: expose_diagnostics.then(|| self.diagnostics()),
            },
        };

        let mut response = (self.status_code(), axum::Json(body)).into_response();
        if matches!(self, AppError::Authentication(_)) {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("API-Key"));
        }
        response
    }
}

/// Error response body for API endpoints.
#[derive(Serialize)]
struct ErrorResponse<'a> {
    success: bool,
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    name: &'static str,
    message: String,
    #[serde(skip_serializing_if = "<[FieldViolation]>::is_empty")]
    fields: &'a [FieldViolation],
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

/// The error that produced a response, attached as a response extension.
///
/// Lets outer middleware re-render the failure (e.g. with diagnostics)
/// without each handler knowing about the environment.
#[derive(Clone, Debug)]
pub struct ErrorReport(Arc<AppError>);

impl ErrorReport {
    pub fn error(&self) -> &AppError {
        &self.0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, name = self.name(), "Request failed");
        } else {
            tracing::warn!(
                status = status.as_u16(),
                name = self.name(),
                message = %self,
                "Request rejected"
            );
        }

        let mut response = self.render(false);
        response.extensions_mut().insert(ErrorReport(Arc::new(self)));
        response
    }
}

/// Sanitize serde error messages to avoid leaking internal type information.
fn sanitize_serde_error(e: &serde_json::Error) -> String {
    use serde_json::error::Category;

    match e.classify() {
        Category::Eof => "Unexpected end of JSON in request body".to_string(),
        Category::Syntax => "Malformed JSON in request body".to_string(),
        Category::Data => "Invalid data type in request body".to_string(),
        Category::Io => "Invalid request format".to_string(),
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_404() {
        let response = AppError::product_not_found("42").render(false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["name"], "NotFoundError");
        assert_eq!(body["error"]["message"], "Product with id 42 not found");
        assert!(body["error"].get("stack").is_none());
        assert!(body["error"].get("fields").is_none());
    }

    #[tokio::test]
    async fn test_validation_lists_all_fields() {
        let err = AppError::validation(vec![
            FieldViolation::new("name", "bad name"),
            FieldViolation::new("price", "bad price"),
        ]);
        let response = err.render(false);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["name"], "ValidationError");
        assert_eq!(body["error"]["message"], "bad name");
        assert_eq!(body["error"]["fields"].as_array().unwrap().len(), 2);
        assert_eq!(body["error"]["fields"][1]["field"], "price");
    }

    #[tokio::test]
    async fn test_authentication_sets_challenge_header() {
        let response = AppError::Authentication("Invalid API key provided.".into()).render(false);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "API-Key");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let err = AppError::Internal(anyhow::anyhow!("database exploded"));
        let response = err.render(false);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["name"], "InternalServerError");
        assert_eq!(body["error"]["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("exploded"));
    }

    #[tokio::test]
    async fn test_diagnostics_included_when_requested() {
        let err = AppError::Internal(anyhow::anyhow!("database exploded"));
        let body = body_json(err.render(true)).await;
        let stack = body["error"]["stack"].as_str().unwrap();
        assert!(stack.contains("database exploded"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_sanitized() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{\"name\": ").unwrap_err();
        let body = body_json(AppError::from(serde_err).render(false)).await;
        assert_eq!(body["error"]["name"], "ValidationError");
        assert_eq!(
            body["error"]["message"],
            "Unexpected end of JSON in request body"
        );
    }

    #[test]
    fn test_into_response_attaches_report() {
        let response = AppError::route_not_found("GET", "/nope").into_response();
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.error().to_string(), "Route GET /nope not found");
    }
}
