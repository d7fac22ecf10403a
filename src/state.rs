//! Shared application state for Axum handlers.
//!
//! The catalog is owned by the state rather than living in a global, so
//! every router (and every test) gets its own isolated set of records.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::services::CatalogService;

/// Shared application state for Axum handlers.
///
/// This struct is cloned for each request handler. All internal data
/// is wrapped in `Arc` for efficient sharing.
#[derive(Clone)]
pub struct AppState {
    /// Product catalog
    pub catalog: CatalogService,
    /// Application configuration
    pub config: Arc<Config>,
    /// Timestamp when the application started
    pub started_at: Instant,
}

impl AppState {
    /// Create state around an existing catalog.
    pub fn new(catalog: CatalogService, config: Config) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Create state with a freshly seeded catalog.
    pub fn seeded(config: Config) -> Self {
        Self::new(CatalogService::seeded(), config)
    }

    /// Get the application uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
