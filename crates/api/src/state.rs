use std::sync::Arc;

use formbridge_db::legacy_store::JsonDocumentStore;

use crate::artifacts::ArtifactStore;
use crate::config::ServerConfig;
use crate::generation_lock::GenerationLocks;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: formbridge_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Form ids with a generation in flight.
    pub generation_locks: Arc<GenerationLocks>,
    /// Where generated pages are written and served from.
    pub artifacts: Arc<ArtifactStore>,
    /// Flat-file JSON documents; `None` when `LEGACY_DATA_DIR` is unset.
    pub legacy_store: Option<Arc<JsonDocumentStore>>,
}

impl AppState {
    /// Assemble state from a pool and configuration.
    pub fn new(pool: formbridge_db::DbPool, config: ServerConfig) -> Self {
        let artifacts = Arc::new(ArtifactStore::new(config.generated_dir.clone()));
        let legacy_store = config
            .legacy_data_dir
            .clone()
            .map(|dir| Arc::new(JsonDocumentStore::new(dir)));

        Self {
            pool,
            config: Arc::new(config),
            generation_locks: Arc::new(GenerationLocks::new()),
            artifacts,
            legacy_store,
        }
    }
}
