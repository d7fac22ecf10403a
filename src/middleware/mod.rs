//! HTTP middleware for request logging, authentication and error handling.
//!
//! # Architecture
//!
//! ```text
//! Request → Log → Request ID → Trace → CORS → Error translation → Catch panic → Router
//!                                                                                  │
//!                                   (create, update, delete only) API key auth ←───┘
//! ```
//!
//! Authentication failures, validation failures, unknown routes and
//! handler errors are all `AppError`s; the error translation layer is the
//! one place that decides how much of them the client sees.

pub mod auth;
pub mod errors;
pub mod logging;
pub mod request_id;

pub use auth::ApiKeyAuth;
pub use errors::{panic_response, translate_errors};
pub use logging::log_request;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, request_span};
