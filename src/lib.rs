//! # Product Catalog API
//!
//! A small REST API over an in-memory product catalog, built on Axum:
//!
//! - **CRUD**: list (filter, search, paginate), get, create, update, delete
//! - **Statistics**: per-category counts, value and stock levels
//! - **Security**: shared-secret API key on mutating routes, body validation
//! - **Errors**: one translation point mapping every failure to a JSON body
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Log → Request ID → Trace → CORS → Errors)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Route layers (API key auth) + extractors (validation)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (info, health, products)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CatalogService (RwLock<Vec<Product>>)                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_catalog::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//!
//!     let app = build_router(AppState::seeded(config));
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Security Configuration
//!
//! ```bash
//! API_KEY=your-secret-key APP_ENV=production cargo run
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::{Config, Environment};
pub use error::{AppError, AppResult};
pub use routes::build_router;
pub use services::CatalogService;
pub use state::AppState;
