//! Application state management.
//!
//! Holds the storage backend and JWT validation service shared across all
//! route handlers, and constructs the per-resource services on demand.

use crate::services::{AutomationService, BlueprintService, JwtService, MaintenanceService};
use crate::storage::{MemoryStorageBackend, PostgresStorageBackend, StorageBackend, StorageError};
use std::sync::Arc;

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (in-memory by default, PostgreSQL when configured)
    pub storage: Arc<dyn StorageBackend>,
    /// Bearer-token validation for the external identity provider
    pub jwt: Arc<JwtService>,
    /// Legacy quirk: report NotFound for an empty per-automation page
    legacy_empty_page: bool,
}

impl AppState {
    /// Create application state backed by in-memory storage.
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorageBackend::new()))
    }

    /// Create application state over an explicit storage backend.
    pub fn with_storage(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            jwt: Arc::new(JwtService::from_env()),
            legacy_empty_page: false,
        }
    }

    /// Enable the legacy empty-page-as-NotFound behavior of the
    /// per-automation maintenance listing.
    pub fn with_legacy_empty_page(mut self, enabled: bool) -> Self {
        self.legacy_empty_page = enabled;
        self
    }

    /// Switch to PostgreSQL storage when DATABASE_URL is set, running
    /// migrations first. Without DATABASE_URL the in-memory backend stays.
    pub async fn init_storage(&mut self) -> Result<(), StorageError> {
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| {
                    StorageError::ConnectionError(format!("Failed to connect to database: {}", e))
                })?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| StorageError::ConnectionError(format!("Migration failed: {}", e)))?;

            self.storage = Arc::new(PostgresStorageBackend::new(pool));
        }
        Ok(())
    }

    pub fn automations(&self) -> AutomationService {
        AutomationService::new(self.storage.clone())
    }

    pub fn maintenances(&self) -> MaintenanceService {
        MaintenanceService::new(self.storage.clone())
            .with_empty_page_not_found(self.legacy_empty_page)
    }

    pub fn blueprints(&self) -> BlueprintService {
        BlueprintService::new(self.storage.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
