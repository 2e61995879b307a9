use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::Store;

/// Shared router state: configuration plus the store handle opened at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> Self {
        Self { config, store }
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}
