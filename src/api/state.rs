//! Application state shared across handlers

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::persistence::{DbPersistenceService, PersistenceService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub persistence: Arc<dyn PersistenceService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State backed by the database property store
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            persistence: Arc::new(DbPersistenceService::new()),
            config: Arc::new(config),
        }
    }

    pub fn with_persistence(mut self, persistence: Arc<dyn PersistenceService>) -> Self {
        self.persistence = persistence;
        self
    }
}
