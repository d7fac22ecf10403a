//! Error translation.
//!
//! Handlers, extractors and the auth layer all fail by returning an
//! [`AppError`], which renders itself without diagnostics. This layer sits
//! outside all of them and, in the development environment, re-renders
//! the failure with its diagnostic `stack`. Panics are turned into
//! [`AppError::Internal`] so they take the same path.

use std::any::Any;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::{AppError, ErrorReport};
use crate::state::AppState;

/// Middleware that applies the environment's error detail policy.
pub async fn translate_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !state.config.expose_error_details() {
        return response;
    }

    match response.extensions().get::<ErrorReport>().cloned() {
        Some(report) => {
            let mut rendered = report.error().render(true);
            rendered.extensions_mut().insert(report);
            rendered
        }
        None => response,
    }
}

/// Response for a panicking handler, for use with `CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
